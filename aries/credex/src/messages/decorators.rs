use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub thid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pthid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_order: Option<u32>,
}

impl Thread {
    pub fn new(thid: String) -> Self {
        Thread {
            thid,
            pthid: None,
            sender_order: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_time: Option<DateTime<Utc>>,
}

impl Timing {
    pub fn now() -> Self {
        Timing {
            out_time: Some(Utc::now()),
            in_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PleaseAck {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub on: Vec<String>,
}
