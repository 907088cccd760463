use serde_json::Value;

use crate::{
    errors::error::prelude::*,
    handlers::util::Status,
    messages::{
        attachment::{get_attach_as_json, get_attach_as_string},
        issue_credential::IssueCredential,
        offer_credential::OfferCredential,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FinishedHolderState {
    pub offer: OfferCredential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<IssueCredential>,
    pub status: Status,
}

impl FinishedHolderState {
    fn credential(&self) -> VcxResult<&IssueCredential> {
        self.credential.as_ref().ok_or_else(|| {
            AriesVcxError::from_msg(AriesVcxErrorKind::InvalidState, "No credential found")
        })
    }

    pub fn get_attachment(&self) -> VcxResult<String> {
        get_attach_as_string(&self.credential()?.credentials_attach)
    }

    fn get_credential_payload(&self) -> VcxResult<Value> {
        get_attach_as_json(&self.credential()?.credentials_attach)
    }

    pub fn get_attributes(&self) -> VcxResult<String> {
        let cred_data = self.get_credential_payload()?;

        let mut new_map = serde_json::map::Map::new();
        match cred_data["values"].as_object() {
            Some(values) => {
                for (key, value) in values {
                    let val = value["raw"]
                        .as_str()
                        .ok_or_else(|| {
                            AriesVcxError::from_msg(
                                AriesVcxErrorKind::InvalidJson,
                                "Missing raw encoding on credential value",
                            )
                        })?
                        .into();
                    new_map.insert(key.clone(), val);
                }
                Ok(Value::Object(new_map).to_string())
            }
            None => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidJson,
                format!("Cannot convert {cred_data:?} into object"),
            )),
        }
    }
}
