use serde_json::Value;

use crate::messages::{
    attachment::{Attachment, AttachmentId},
    decorators::{Thread, Timing},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestCredential {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "requests~attach")]
    pub requests_attach: Vec<Attachment>,
    #[serde(rename = "~thread")]
    pub thread: Thread,
    #[serde(rename = "~timing", default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

impl RequestCredential {
    pub fn new(id: String, thread_id: &str, request: &Value) -> Self {
        RequestCredential {
            id,
            comment: None,
            requests_attach: vec![Attachment::from_json(AttachmentId::CredentialRequest, request)],
            thread: Thread::new(thread_id.to_string()),
            timing: Some(Timing::now()),
        }
    }
}
