//! Aries issue-credential 1.0 messages the holder sends and receives.
//!
//! Both the `https://didcomm.org/` and the legacy `did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/`
//! type prefixes are accepted on input; the former is always emitted.

pub mod ack;
pub mod attachment;
pub mod decorators;
pub mod issue_credential;
pub mod offer_credential;
pub mod problem_report;
pub mod request_credential;

use self::{
    ack::AckCredential, issue_credential::IssueCredential, offer_credential::OfferCredential,
    problem_report::ProblemReport, request_credential::RequestCredential,
};
use crate::errors::error::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "@type")]
pub enum AriesMessage {
    #[serde(
        rename = "https://didcomm.org/issue-credential/1.0/offer-credential",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/offer-credential"
    )]
    CredentialOffer(OfferCredential),
    #[serde(
        rename = "https://didcomm.org/issue-credential/1.0/request-credential",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/request-credential"
    )]
    CredentialRequest(RequestCredential),
    #[serde(
        rename = "https://didcomm.org/issue-credential/1.0/issue-credential",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/issue-credential"
    )]
    Credential(IssueCredential),
    #[serde(
        rename = "https://didcomm.org/issue-credential/1.0/ack",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/ack"
    )]
    CredentialAck(AckCredential),
    #[serde(
        rename = "https://didcomm.org/issue-credential/1.0/problem-report",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/issue-credential/1.0/problem-report",
        alias = "https://didcomm.org/report-problem/1.0/problem-report",
        alias = "did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/report-problem/1.0/problem-report"
    )]
    ProblemReport(ProblemReport),
    #[serde(other)]
    Unknown,
}

impl AriesMessage {
    pub fn from_json(message: &str) -> VcxResult<Self> {
        serde_json::from_str(message).map_err(|err| {
            AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidMessageFormat,
                format!("Cannot deserialize message {message:?}: {err}"),
            )
        })
    }

    pub fn thread_id(&self) -> Option<&str> {
        match self {
            AriesMessage::CredentialOffer(msg) => Some(msg.thread_id()),
            AriesMessage::CredentialRequest(msg) => Some(&msg.thread.thid),
            AriesMessage::Credential(msg) => Some(&msg.thread.thid),
            AriesMessage::CredentialAck(msg) => Some(&msg.thread.thid),
            AriesMessage::ProblemReport(msg) => msg.thread.as_ref().map(|thread| thread.thid.as_str()),
            AriesMessage::Unknown => None,
        }
    }

    pub fn matches_thread_id(&self, thread_id: &str) -> bool {
        self.thread_id() == Some(thread_id)
    }
}

impl From<OfferCredential> for AriesMessage {
    fn from(msg: OfferCredential) -> Self {
        AriesMessage::CredentialOffer(msg)
    }
}

impl From<RequestCredential> for AriesMessage {
    fn from(msg: RequestCredential) -> Self {
        AriesMessage::CredentialRequest(msg)
    }
}

impl From<IssueCredential> for AriesMessage {
    fn from(msg: IssueCredential) -> Self {
        AriesMessage::Credential(msg)
    }
}

impl From<AckCredential> for AriesMessage {
    fn from(msg: AckCredential) -> Self {
        AriesMessage::CredentialAck(msg)
    }
}

impl From<ProblemReport> for AriesMessage {
    fn from(msg: ProblemReport) -> Self {
        AriesMessage::ProblemReport(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _offer_json(type_prefix: &str) -> serde_json::Value {
        json!({
            "@id": "57b3f85d-7673-4e6f-bb09-cc27cf2653c0",
            "@type": format!("{type_prefix}issue-credential/1.0/offer-credential"),
            "credential_preview": {
                "@type": "https://didcomm.org/issue-credential/1.0/credential-preview",
                "attributes": [{"name": "address1", "value": "101 Tela Lane"}]
            },
            "offers~attach": [{
                "@id": "libindy-cred-offer-0",
                "mime-type": "application/json",
                "data": {"json": {"cred_def_id": "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag"}}
            }]
        })
    }

    #[test]
    fn test_deserialize_offer_with_didcomm_prefix() {
        let msg: AriesMessage = serde_json::from_value(_offer_json("https://didcomm.org/")).unwrap();
        let AriesMessage::CredentialOffer(offer) = msg else {
            panic!("expected offer");
        };
        assert_eq!(offer.thread_id(), "57b3f85d-7673-4e6f-bb09-cc27cf2653c0");
        assert_eq!(offer.credential_preview.attributes[0].value, "101 Tela Lane");
    }

    #[test]
    fn test_deserialize_offer_with_legacy_prefix() {
        let msg: AriesMessage =
            serde_json::from_value(_offer_json("did:sov:BzCbsNYhMrjHiqZDTUASHg;spec/")).unwrap();
        assert!(matches!(msg, AriesMessage::CredentialOffer(_)));
        let reserialized = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            reserialized["@type"],
            "https://didcomm.org/issue-credential/1.0/offer-credential"
        );
    }

    #[test]
    fn test_unknown_message_type() {
        let msg = AriesMessage::from_json(r#"{"@id": "1", "@type": "https://didcomm.org/basicmessage/1.0/message"}"#)
            .unwrap();
        assert_eq!(msg, AriesMessage::Unknown);
        assert_eq!(msg.thread_id(), None);
    }

    #[test]
    fn test_report_problem_alias() {
        let msg = AriesMessage::from_json(
            r#"{"@id": "1", "@type": "https://didcomm.org/report-problem/1.0/problem-report", "~thread": {"thid": "abc"}}"#,
        )
        .unwrap();
        assert!(msg.matches_thread_id("abc"));
    }

    #[test]
    fn test_message_without_type_fails() {
        let err = AriesMessage::from_json(r#"{"@id": "1"}"#).unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidMessageFormat);
    }
}
