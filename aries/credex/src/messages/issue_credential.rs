use serde_json::Value;

use crate::messages::{
    attachment::{Attachment, AttachmentId},
    decorators::{PleaseAck, Thread},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCredential {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "credentials~attach")]
    pub credentials_attach: Vec<Attachment>,
    #[serde(rename = "~thread")]
    pub thread: Thread,
    #[serde(rename = "~please_ack", default, skip_serializing_if = "Option::is_none")]
    pub please_ack: Option<PleaseAck>,
}

impl IssueCredential {
    pub fn new(id: String, thread_id: &str, credential: &Value) -> Self {
        IssueCredential {
            id,
            comment: None,
            credentials_attach: vec![Attachment::from_json(AttachmentId::Credential, credential)],
            thread: Thread::new(thread_id.to_string()),
            please_ack: None,
        }
    }
}
