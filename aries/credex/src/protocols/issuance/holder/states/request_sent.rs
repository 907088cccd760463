use crate::{
    errors::error::prelude::*,
    handlers::util::Status,
    messages::{
        attachment::get_attach_as_string,
        issue_credential::IssueCredential, offer_credential::OfferCredential,
        problem_report::ProblemReport, request_credential::RequestCredential,
    },
    protocols::issuance::holder::states::{
        finished::FinishedHolderState, offer_received::preview_attributes,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RequestSentState {
    pub offer: OfferCredential,
    pub msg_credential_request: RequestCredential,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_handle: Option<u32>,
}

impl From<(RequestSentState, IssueCredential)> for FinishedHolderState {
    fn from((state, credential): (RequestSentState, IssueCredential)) -> Self {
        trace!("SM is now in Finished state");
        FinishedHolderState {
            offer: state.offer,
            credential: Some(credential),
            status: Status::Success,
        }
    }
}

impl From<(RequestSentState, Status)> for FinishedHolderState {
    fn from((state, status): (RequestSentState, Status)) -> Self {
        trace!("SM is now in Finished state with status {}", status.code());
        FinishedHolderState {
            offer: state.offer,
            credential: None,
            status,
        }
    }
}

impl RequestSentState {
    pub fn get_attributes(&self) -> VcxResult<String> {
        Ok(preview_attributes(&self.offer).to_string())
    }

    pub fn get_attachment(&self) -> VcxResult<String> {
        get_attach_as_string(&self.offer.offers_attach)
    }

    pub fn receive_problem_report(self, problem_report: ProblemReport) -> FinishedHolderState {
        (self, Status::Rejected(problem_report)).into()
    }
}
