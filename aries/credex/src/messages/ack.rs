use crate::messages::decorators::{Thread, Timing};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "PENDING")]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckCredential {
    #[serde(rename = "@id")]
    pub id: String,
    pub status: AckStatus,
    #[serde(rename = "~thread")]
    pub thread: Thread,
    #[serde(rename = "~timing", default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

impl AckCredential {
    pub fn new(id: String, thread_id: &str) -> Self {
        AckCredential {
            id,
            status: AckStatus::Ok,
            thread: Thread::new(thread_id.to_string()),
            timing: Some(Timing::now()),
        }
    }
}
