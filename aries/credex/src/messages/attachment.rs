use base64::{engine::general_purpose, Engine};
use serde_json::Value;

use crate::errors::error::prelude::*;

pub const MIME_TYPE_JSON: &str = "application/json";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttachmentId {
    CredentialOffer,
    CredentialRequest,
    Credential,
}

impl AsRef<str> for AttachmentId {
    fn as_ref(&self) -> &str {
        match self {
            AttachmentId::CredentialOffer => "libindy-cred-offer-0",
            AttachmentId::CredentialRequest => "libindy-cred-request-0",
            AttachmentId::Credential => "libindy-cred-0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttachmentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "mime-type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub data: AttachmentData,
}

impl Attachment {
    pub fn from_json(id: AttachmentId, content: &Value) -> Self {
        Attachment {
            id: Some(id.as_ref().to_string()),
            mime_type: Some(MIME_TYPE_JSON.to_string()),
            data: AttachmentData {
                base64: Some(general_purpose::STANDARD.encode(content.to_string())),
                json: None,
            },
        }
    }

    pub fn content(&self) -> VcxResult<String> {
        match (&self.data.base64, &self.data.json) {
            (Some(encoded), _) => {
                let bytes = general_purpose::STANDARD.decode(encoded)?;
                Ok(String::from_utf8(bytes)?)
            }
            (None, Some(json)) => Ok(json.to_string()),
            (None, None) => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                "Attachment carries neither base64 nor json data",
            )),
        }
    }

    pub fn json_content(&self) -> VcxResult<Value> {
        let content = self.content()?;
        serde_json::from_str(&content).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidJson,
                format!("Attachment content is not json: {err}"),
            )
        })
    }
}

/// Content of the first attachment, which is the only one the 1.0 protocol uses.
pub fn get_attach_as_string(attachments: &[Attachment]) -> VcxResult<String> {
    attachments
        .first()
        .ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                "Message has no attachment",
            )
        })?
        .content()
}

pub fn get_attach_as_json(attachments: &[Attachment]) -> VcxResult<Value> {
    attachments
        .first()
        .ok_or_else(|| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                "Message has no attachment",
            )
        })?
        .json_content()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_base64_content() {
        let attach = Attachment::from_json(
            AttachmentId::CredentialOffer,
            &json!({"cred_def_id": "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag"}),
        );
        assert_eq!(attach.id.as_deref(), Some("libindy-cred-offer-0"));
        let content = attach.json_content().unwrap();
        assert_eq!(content["cred_def_id"], "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag");
    }

    #[test]
    fn test_attachment_json_content() {
        let attach: Attachment =
            serde_json::from_value(json!({"@id": "x", "data": {"json": {"a": 1}}})).unwrap();
        assert_eq!(attach.content().unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn test_attachment_without_data_fails() {
        let attach: Attachment = serde_json::from_value(json!({"data": {}})).unwrap();
        assert_eq!(
            attach.content().unwrap_err().kind(),
            AriesVcxErrorKind::InvalidMessageFormat
        );
    }

    #[test]
    fn test_attachment_invalid_base64() {
        let attach: Attachment =
            serde_json::from_value(json!({"data": {"base64": "%%%not-base64"}})).unwrap();
        assert_eq!(
            attach.content().unwrap_err().kind(),
            AriesVcxErrorKind::InvalidMessageFormat
        );
    }

    #[test]
    fn test_get_attach_as_string_empty() {
        assert!(get_attach_as_string(&[]).is_err());
    }
}
