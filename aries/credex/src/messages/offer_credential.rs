use serde_json::Value;

use crate::{
    errors::error::prelude::*,
    messages::{
        attachment::{get_attach_as_json, Attachment, AttachmentId},
        decorators::Thread,
    },
};

pub const CREDENTIAL_PREVIEW_TYPE: &str =
    "https://didcomm.org/issue-credential/1.0/credential-preview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialAttribute {
    pub name: String,
    #[serde(rename = "mime-type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialPreview {
    #[serde(rename = "@type", default = "default_preview_type")]
    pub preview_type: String,
    #[serde(default)]
    pub attributes: Vec<CredentialAttribute>,
}

fn default_preview_type() -> String {
    CREDENTIAL_PREVIEW_TYPE.to_string()
}

impl Default for CredentialPreview {
    fn default() -> Self {
        CredentialPreview {
            preview_type: default_preview_type(),
            attributes: Vec::new(),
        }
    }
}

impl CredentialPreview {
    pub fn add_value(mut self, name: &str, value: &str) -> Self {
        self.attributes.push(CredentialAttribute {
            name: name.to_string(),
            mime_type: Some("text/plain".to_string()),
            value: value.to_string(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferCredential {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub credential_preview: CredentialPreview,
    #[serde(rename = "offers~attach")]
    pub offers_attach: Vec<Attachment>,
    #[serde(rename = "~thread", default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

impl OfferCredential {
    pub fn new(id: String, preview: CredentialPreview, libindy_offer: &Value) -> Self {
        OfferCredential {
            id,
            comment: None,
            credential_preview: preview,
            offers_attach: vec![Attachment::from_json(AttachmentId::CredentialOffer, libindy_offer)],
            thread: None,
        }
    }

    /// Thread the exchange runs on. Offers starting a new exchange carry no thread decorator.
    pub fn thread_id(&self) -> &str {
        self.thread.as_ref().map_or(self.id.as_str(), |thread| thread.thid.as_str())
    }

    pub fn offer_json(&self) -> VcxResult<Value> {
        get_attach_as_json(&self.offers_attach)
    }

    pub fn cred_def_id(&self) -> VcxResult<String> {
        self.offer_json()?["cred_def_id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| {
                AriesVcxError::from_msg(
                    AriesVcxErrorKind::InvalidOffer,
                    "Invalid Credential Offer Json: cred_def_id not found",
                )
            })
    }

    pub fn validate(&self) -> VcxResult<()> {
        if self.id.trim().is_empty() {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidOffer,
                "Credential offer has an empty @id",
            ));
        }
        if self.offers_attach.is_empty() {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidOffer,
                "Credential offer has no offers~attach",
            ));
        }
        let offer = self
            .offer_json()
            .map_err(|err| err.map(AriesVcxErrorKind::InvalidOffer, "Cannot read offer attachment"))?;
        if !offer.is_object() {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidOffer,
                "Credential offer attachment is not a json object",
            ));
        }
        self.cred_def_id().map(|_| ())
    }
}
