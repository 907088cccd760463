use crate::messages::decorators::Thread;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDescription {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemReport {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ProblemDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "~thread", default, skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
}

impl ProblemReport {
    pub fn new(id: String, thread_id: &str, code: &str, comment: Option<String>) -> Self {
        ProblemReport {
            id,
            description: Some(ProblemDescription {
                code: code.to_string(),
                en: comment.clone(),
            }),
            comment,
            thread: Some(Thread::new(thread_id.to_string())),
        }
    }
}
