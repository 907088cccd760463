use std::fmt;

use crate::{
    errors::error::prelude::*,
    handlers::util::Status,
    messages::{
        ack::AckCredential, attachment::get_attach_as_json, issue_credential::IssueCredential,
        offer_credential::OfferCredential, problem_report::ProblemReport,
        request_credential::RequestCredential, AriesMessage,
    },
    protocols::{
        common::{
            build_problem_report_msg, PROBLEM_CODE_CREDENTIAL_NOT_PROCESSED,
            PROBLEM_CODE_ISSUANCE_ABANDONED, PROBLEM_CODE_REQUEST_NOT_CREATED,
        },
        issuance::{
            holder::states::{
                finished::FinishedHolderState, initial::InitialHolderState,
                offer_received::OfferReceivedState, request_sent::RequestSentState,
            },
            verify_thread_id,
        },
        SendClosure,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum HolderFullState {
    Initial(InitialHolderState),
    OfferReceived(OfferReceivedState),
    RequestSent(RequestSentState),
    Finished(FinishedHolderState),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HolderState {
    Initial,
    OfferReceived,
    RequestSent,
    Accepted,
    Rejected,
    Failed,
}

impl From<HolderState> for u32 {
    fn from(state: HolderState) -> u32 {
        match state {
            HolderState::Initial => 0,
            HolderState::OfferReceived => 1,
            HolderState::RequestSent => 2,
            HolderState::Accepted => 3,
            HolderState::Rejected => 4,
            HolderState::Failed => 5,
        }
    }
}

impl TryFrom<u32> for HolderState {
    type Error = AriesVcxError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(HolderState::Initial),
            1 => Ok(HolderState::OfferReceived),
            2 => Ok(HolderState::RequestSent),
            3 => Ok(HolderState::Accepted),
            4 => Ok(HolderState::Rejected),
            5 => Ok(HolderState::Failed),
            _ => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!("Unknown holder state code {code}"),
            )),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HolderSM {
    state: HolderFullState,
    source_id: String,
    thread_id: String,
}

impl fmt::Display for HolderFullState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HolderFullState::Initial(_) => f.write_str("Initial"),
            HolderFullState::OfferReceived(_) => f.write_str("OfferReceived"),
            HolderFullState::RequestSent(_) => f.write_str("RequestSent"),
            HolderFullState::Finished(_) => f.write_str("Finished"),
        }
    }
}

fn build_credential_request_msg(
    offer: &OfferCredential,
    my_pw_did: &str,
    thread_id: &str,
) -> VcxResult<RequestCredential> {
    if my_pw_did.is_empty() {
        return Err(AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidInput,
            "Cannot build credential request without a pairwise DID",
        ));
    }
    let offer_json = offer.offer_json()?;
    let cred_def_id = offer.cred_def_id()?;
    let nonce = offer_json["nonce"].as_str().ok_or_else(|| {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidOffer,
            "Invalid Credential Offer Json: nonce not found",
        )
    })?;
    let request = json!({
        "prover_did": my_pw_did,
        "cred_def_id": cred_def_id,
        "nonce": nonce,
    });
    Ok(RequestCredential::new(
        uuid::Uuid::new_v4().to_string(),
        thread_id,
        &request,
    ))
}

fn build_credential_ack(thread_id: &str) -> AckCredential {
    AckCredential::new(uuid::Uuid::new_v4().to_string(), thread_id)
}

fn validate_credential(credential: &IssueCredential) -> VcxResult<()> {
    let payload = get_attach_as_json(&credential.credentials_attach)?;
    if !payload.is_object() {
        return Err(AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidMessageFormat,
            "Credential attachment is not a json object",
        ));
    }
    Ok(())
}

impl HolderSM {
    pub fn from_offer(offer: OfferCredential, source_id: String) -> VcxResult<Self> {
        trace!(
            "HolderSM::from_offer >>> source_id: {:?}, offer: {:?}",
            source_id,
            offer
        );
        offer.validate()?;
        Ok(HolderSM {
            thread_id: offer.thread_id().to_string(),
            state: HolderFullState::OfferReceived(OfferReceivedState::new(offer)),
            source_id,
        })
    }

    /// Rebuilds a state machine from already validated parts, as restored from storage.
    pub fn from_parts(source_id: String, thread_id: String, state: HolderFullState) -> Self {
        HolderSM {
            state,
            source_id,
            thread_id,
        }
    }

    /// Checks that a restored state machine is internally consistent: the offer is well formed
    /// and on this thread, a sent request belongs to the thread, and an accepted exchange carries
    /// a readable credential.
    pub fn validate(&self) -> VcxResult<()> {
        let offer = match &self.state {
            HolderFullState::Initial(_) => return Ok(()),
            HolderFullState::OfferReceived(state) => &state.offer,
            HolderFullState::RequestSent(state) => {
                if state.msg_credential_request.thread.thid != self.thread_id {
                    return Err(AriesVcxError::from_msg(
                        AriesVcxErrorKind::InvalidState,
                        format!(
                            "Credential request is on thread {}, expected {}",
                            state.msg_credential_request.thread.thid, self.thread_id
                        ),
                    ));
                }
                &state.offer
            }
            HolderFullState::Finished(state) => {
                match (&state.status, &state.credential) {
                    (Status::Success, Some(credential)) => {
                        if credential.thread.thid != self.thread_id {
                            return Err(AriesVcxError::from_msg(
                                AriesVcxErrorKind::InvalidState,
                                format!(
                                    "Credential is on thread {}, expected {}",
                                    credential.thread.thid, self.thread_id
                                ),
                            ));
                        }
                        validate_credential(credential)?;
                    }
                    (Status::Success, None) => {
                        return Err(AriesVcxError::from_msg(
                            AriesVcxErrorKind::InvalidState,
                            "Accepted exchange carries no credential",
                        ));
                    }
                    (Status::Undefined, _) => {
                        return Err(AriesVcxError::from_msg(
                            AriesVcxErrorKind::InvalidState,
                            "Finished exchange has no status",
                        ));
                    }
                    _ => {}
                }
                &state.offer
            }
        };
        offer.validate()?;
        if offer.thread_id() != self.thread_id {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::InvalidState,
                format!(
                    "Offer is on thread {}, expected {}",
                    offer.thread_id(),
                    self.thread_id
                ),
            ));
        }
        Ok(())
    }

    pub fn get_source_id(&self) -> String {
        self.source_id.clone()
    }

    pub fn get_thread_id(&self) -> VcxResult<String> {
        Ok(self.thread_id.clone())
    }

    pub async fn send_request(
        self,
        my_pw_did: String,
        payment_handle: Option<u32>,
        send_message: SendClosure,
    ) -> VcxResult<Self> {
        trace!(
            "HolderSM::send_request >>> my_pw_did: {}, payment_handle: {:?}",
            my_pw_did,
            payment_handle
        );
        let HolderSM {
            state,
            source_id,
            thread_id,
        } = self;
        let state = match state {
            HolderFullState::OfferReceived(state_data) => {
                match build_credential_request_msg(&state_data.offer, &my_pw_did, &thread_id) {
                    Ok(request) => {
                        send_message(request.clone().into()).await?;
                        HolderFullState::RequestSent((state_data, request, payment_handle).into())
                    }
                    Err(err) => {
                        let problem_report = build_problem_report_msg(
                            PROBLEM_CODE_REQUEST_NOT_CREATED,
                            Some(err.to_string()),
                            &thread_id,
                        );
                        error!(
                            "Failed to create credential request, sending problem report: {:?}",
                            problem_report
                        );
                        send_message(problem_report.clone().into()).await?;
                        HolderFullState::Finished((state_data, Status::Failed(problem_report)).into())
                    }
                }
            }
            state => {
                return Err(AriesVcxError::from_msg(
                    AriesVcxErrorKind::InvalidState,
                    format!("Cannot send credential request in state {state}"),
                ));
            }
        };
        Ok(HolderSM {
            state,
            source_id,
            thread_id,
        })
    }

    pub async fn decline_offer(
        self,
        comment: Option<String>,
        send_message: SendClosure,
    ) -> VcxResult<Self> {
        trace!("HolderSM::decline_offer >>> comment: {:?}", comment);
        let HolderSM {
            state,
            source_id,
            thread_id,
        } = self;
        let state = match state {
            HolderFullState::OfferReceived(state_data) => {
                let problem_report =
                    build_problem_report_msg(PROBLEM_CODE_ISSUANCE_ABANDONED, comment, &thread_id);
                send_message(problem_report.clone().into()).await?;
                HolderFullState::Finished((state_data, Status::Declined(problem_report)).into())
            }
            state => {
                return Err(AriesVcxError::from_msg(
                    AriesVcxErrorKind::InvalidState,
                    format!("Unable to decline credential offer in state {state}"),
                ));
            }
        };
        Ok(HolderSM {
            state,
            source_id,
            thread_id,
        })
    }

    /// Picks the first message in `messages` the current state can consume.
    pub fn find_message_to_handle(
        &self,
        messages: Vec<(String, AriesMessage)>,
    ) -> Option<(String, AriesMessage)> {
        trace!(
            "HolderSM::find_message_to_handle >>> messages: {:?}, state: {}",
            messages,
            self.state
        );
        if !matches!(self.state, HolderFullState::RequestSent(_)) {
            return None;
        }
        messages.into_iter().find(|(_, message)| match message {
            AriesMessage::Credential(_) | AriesMessage::ProblemReport(_) => {
                message.matches_thread_id(&self.thread_id)
            }
            _ => false,
        })
    }

    /// Applies `message` to the state machine. Acknowledgements and problem reports are only
    /// sent when `send_message` is provided.
    pub async fn handle_message(
        self,
        message: AriesMessage,
        send_message: Option<SendClosure>,
    ) -> VcxResult<Self> {
        trace!("HolderSM::handle_message >>> message: {:?}", message);
        if let AriesMessage::Credential(_) | AriesMessage::ProblemReport(_) = message {
            verify_thread_id(&self.thread_id, &message)?;
        }
        match message {
            AriesMessage::Credential(credential) => {
                self.receive_credential(credential, send_message).await
            }
            AriesMessage::ProblemReport(problem_report) => {
                Ok(self.receive_problem_report(problem_report))
            }
            message => {
                warn!("Holder is not able to handle message {:?}, ignoring", message);
                Ok(self)
            }
        }
    }

    pub async fn receive_credential(
        self,
        credential: IssueCredential,
        send_message: Option<SendClosure>,
    ) -> VcxResult<Self> {
        trace!("HolderSM::receive_credential >>> credential id: {}", credential.id);
        let HolderSM {
            state,
            source_id,
            thread_id,
        } = self;
        let state = match state {
            HolderFullState::RequestSent(state_data) => match validate_credential(&credential) {
                Ok(()) => {
                    if credential.please_ack.is_some() {
                        match &send_message {
                            Some(send_message) => {
                                send_message(build_credential_ack(&thread_id).into()).await?;
                            }
                            None => {
                                warn!("Credential ack requested but no connection is bound, skipping")
                            }
                        }
                    }
                    HolderFullState::Finished((state_data, credential).into())
                }
                Err(err) => {
                    let problem_report = build_problem_report_msg(
                        PROBLEM_CODE_CREDENTIAL_NOT_PROCESSED,
                        Some(err.to_string()),
                        &thread_id,
                    );
                    error!(
                        "Failed to process credential, sending problem report: {:?}",
                        problem_report
                    );
                    if let Some(send_message) = &send_message {
                        send_message(problem_report.clone().into()).await?;
                    }
                    HolderFullState::Finished((state_data, Status::Failed(problem_report)).into())
                }
            },
            state => {
                warn!("Unable to receive credential in state {}, ignoring", state);
                state
            }
        };
        Ok(HolderSM {
            state,
            source_id,
            thread_id,
        })
    }

    pub fn receive_problem_report(self, problem_report: ProblemReport) -> Self {
        trace!(
            "HolderSM::receive_problem_report >>> problem_report: {:?}",
            problem_report
        );
        let HolderSM {
            state,
            source_id,
            thread_id,
        } = self;
        let state = match state {
            HolderFullState::RequestSent(state_data) => {
                HolderFullState::Finished(state_data.receive_problem_report(problem_report))
            }
            state => {
                warn!("Unable to receive problem report in state {}, ignoring", state);
                state
            }
        };
        HolderSM {
            state,
            source_id,
            thread_id,
        }
    }

    pub fn get_state(&self) -> HolderState {
        match self.state {
            HolderFullState::Initial(_) => HolderState::Initial,
            HolderFullState::OfferReceived(_) => HolderState::OfferReceived,
            HolderFullState::RequestSent(_) => HolderState::RequestSent,
            HolderFullState::Finished(ref state) => match state.status {
                Status::Success => HolderState::Accepted,
                Status::Declined(_) | Status::Rejected(_) => HolderState::Rejected,
                Status::Failed(_) | Status::Undefined => HolderState::Failed,
            },
        }
    }

    pub fn is_terminal_state(&self) -> bool {
        matches!(self.state, HolderFullState::Finished(_))
    }

    pub fn credential_status(&self) -> u32 {
        trace!("HolderSM::credential_status >>>");
        match self.state {
            HolderFullState::Finished(ref state) => state.status.code(),
            _ => Status::Undefined.code(),
        }
    }

    pub fn get_offer(&self) -> VcxResult<OfferCredential> {
        match self.state {
            HolderFullState::OfferReceived(ref state) => Ok(state.offer.clone()),
            HolderFullState::RequestSent(ref state) => Ok(state.offer.clone()),
            HolderFullState::Finished(ref state) => Ok(state.offer.clone()),
            HolderFullState::Initial(_) => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "Credential offer has not been received yet",
            )),
        }
    }

    pub fn get_credential(&self) -> VcxResult<IssueCredential> {
        match self.state {
            HolderFullState::Finished(ref state) if state.status == Status::Success => state
                .credential
                .clone()
                .ok_or_else(|| {
                    AriesVcxError::from_msg(AriesVcxErrorKind::InvalidState, "No credential found")
                }),
            _ => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "Cannot get credential: credential exchange not finished yet",
            )),
        }
    }

    pub fn get_attributes(&self) -> VcxResult<String> {
        match self.state {
            HolderFullState::OfferReceived(ref state) => state.get_attributes(),
            HolderFullState::RequestSent(ref state) => state.get_attributes(),
            HolderFullState::Finished(ref state) if state.status == Status::Success => {
                state.get_attributes()
            }
            HolderFullState::Finished(ref state) => {
                OfferReceivedState::new(state.offer.clone()).get_attributes()
            }
            HolderFullState::Initial(_) => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "Cannot get credential attributes: offer has not been received yet",
            )),
        }
    }

    pub fn get_attachment(&self) -> VcxResult<String> {
        match self.state {
            HolderFullState::OfferReceived(ref state) => state.get_attachment(),
            HolderFullState::RequestSent(ref state) => state.get_attachment(),
            HolderFullState::Finished(ref state) if state.status == Status::Success => {
                state.get_attachment()
            }
            HolderFullState::Finished(ref state) => {
                OfferReceivedState::new(state.offer.clone()).get_attachment()
            }
            HolderFullState::Initial(_) => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "Cannot get credential attachment: offer has not been received yet",
            )),
        }
    }

    pub fn get_msg_credential_request(&self) -> VcxResult<RequestCredential> {
        match self.state {
            HolderFullState::RequestSent(ref state) => Ok(state.msg_credential_request.clone()),
            _ => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "Credential request has not been sent",
            )),
        }
    }

    pub fn get_payment_handle(&self) -> Option<u32> {
        match self.state {
            HolderFullState::RequestSent(ref state) => state.payment_handle,
            _ => None,
        }
    }

    pub fn get_problem_report(&self) -> VcxResult<ProblemReport> {
        match self.state {
            HolderFullState::Finished(ref state) => {
                state.status.problem_report().cloned().ok_or_else(|| {
                    AriesVcxError::from_msg(
                        AriesVcxErrorKind::NotReady,
                        "No problem report available in current state",
                    )
                })
            }
            _ => Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::NotReady,
                "No problem report available in current state",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use futures::FutureExt;
    use serde_json::Value;

    use super::*;
    use crate::messages::{
        attachment::{Attachment, AttachmentId},
        decorators::PleaseAck,
        offer_credential::CredentialPreview,
    };

    const THREAD_ID: &str = "ab8d3a4e-0c29-4e2c-b9d3-6d5c1e8a4f21";

    fn _offer() -> OfferCredential {
        let preview = CredentialPreview::default()
            .add_value("name", "Alice")
            .add_value("age", "25");
        OfferCredential::new(
            THREAD_ID.to_string(),
            preview,
            &json!({
                "schema_id": "V4SGRU86Z58d6TV7PBUe6f:2:degree:1.0",
                "cred_def_id": "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag",
                "nonce": "161126724054910446992163"
            }),
        )
    }

    fn _credential() -> IssueCredential {
        IssueCredential::new(
            "f6b9c5a3-1d4e-4ad8-9c6f-2a51e7d3b0c8".to_string(),
            THREAD_ID,
            &json!({
                "cred_def_id": "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag",
                "values": {
                    "name": {"raw": "Alice", "encoded": "27034640024117331033063128044004318218486816931520886405535659934417438781507"},
                    "age": {"raw": "25", "encoded": "25"}
                }
            }),
        )
    }

    fn _problem_report() -> ProblemReport {
        ProblemReport::new(
            "0b6a1c42-6f1e-4a51-9e2c-d7f0a3b8e5c9".to_string(),
            THREAD_ID,
            "issuance-abandoned",
            Some("Issuer changed its mind".to_string()),
        )
    }

    fn _recording_send(sent: Arc<Mutex<Vec<AriesMessage>>>) -> SendClosure {
        Box::new(move |message: AriesMessage| {
            sent.lock().unwrap().push(message);
            async { Ok::<(), AriesVcxError>(()) }.boxed()
        })
    }

    fn _failing_send() -> SendClosure {
        Box::new(|_: AriesMessage| {
            async {
                Err(AriesVcxError::from_msg(
                    AriesVcxErrorKind::TransportError,
                    "Connection refused",
                ))
            }
            .boxed()
        })
    }

    fn _holder_sm() -> HolderSM {
        HolderSM::from_offer(_offer(), "test-source".to_string()).unwrap()
    }

    async fn _holder_sm_request_sent() -> HolderSM {
        let sent = Arc::new(Mutex::new(vec![]));
        _holder_sm()
            .send_request("2ZHFFhzA2XtTD6hJqzL7ux".to_string(), None, _recording_send(sent))
            .await
            .unwrap()
    }

    #[test]
    fn test_from_offer_sets_thread_and_state() {
        let holder_sm = _holder_sm();
        assert_eq!(holder_sm.get_state(), HolderState::OfferReceived);
        assert_eq!(holder_sm.get_thread_id().unwrap(), THREAD_ID);
        assert_eq!(holder_sm.get_source_id(), "test-source");
        assert_eq!(holder_sm.credential_status(), 0);
    }

    #[test]
    fn test_from_offer_rejects_offer_without_attachment() {
        let mut offer = _offer();
        offer.offers_attach.clear();
        let err = HolderSM::from_offer(offer, "test-source".to_string()).unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidOffer);
    }

    #[tokio::test]
    async fn test_send_request_moves_to_request_sent() {
        let sent = Arc::new(Mutex::new(vec![]));
        let holder_sm = _holder_sm()
            .send_request(
                "2ZHFFhzA2XtTD6hJqzL7ux".to_string(),
                Some(7),
                _recording_send(sent.clone()),
            )
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::RequestSent);
        assert_eq!(holder_sm.get_payment_handle(), Some(7));
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let AriesMessage::CredentialRequest(request) = &sent[0] else {
            panic!("expected credential request, got {:?}", sent[0]);
        };
        assert_eq!(request.thread.thid, THREAD_ID);
        let attach = get_attach_as_json(&request.requests_attach).unwrap();
        assert_eq!(attach["prover_did"], "2ZHFFhzA2XtTD6hJqzL7ux");
        assert_eq!(attach["cred_def_id"], "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag");
        assert_eq!(attach["nonce"], "161126724054910446992163");
    }

    #[tokio::test]
    async fn test_send_request_transport_failure_is_propagated() {
        let err = _holder_sm()
            .send_request("2ZHFFhzA2XtTD6hJqzL7ux".to_string(), None, _failing_send())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::TransportError);
    }

    #[tokio::test]
    async fn test_send_request_fails_when_offer_has_no_nonce() {
        let mut offer = _offer();
        offer.offers_attach = vec![Attachment::from_json(
            AttachmentId::CredentialOffer,
            &json!({"cred_def_id": "V4SGRU86Z58d6TV7PBUe6f:3:CL:529:tag"}),
        )];
        let sent = Arc::new(Mutex::new(vec![]));
        let holder_sm = HolderSM::from_offer(offer, "test-source".to_string())
            .unwrap()
            .send_request(
                "2ZHFFhzA2XtTD6hJqzL7ux".to_string(),
                None,
                _recording_send(sent.clone()),
            )
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Failed);
        assert_eq!(holder_sm.credential_status(), 2);
        let sent = sent.lock().unwrap();
        assert!(matches!(sent[0], AriesMessage::ProblemReport(_)));
    }

    #[tokio::test]
    async fn test_send_request_twice_fails_with_invalid_state() {
        let holder_sm = _holder_sm_request_sent().await;
        let sent = Arc::new(Mutex::new(vec![]));
        let err = holder_sm
            .send_request("2ZHFFhzA2XtTD6hJqzL7ux".to_string(), None, _recording_send(sent))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_receive_credential_moves_to_accepted() {
        let holder_sm = _holder_sm_request_sent()
            .await
            .handle_message(_credential().into(), None)
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Accepted);
        assert_eq!(holder_sm.credential_status(), 1);
        assert_eq!(holder_sm.get_credential().unwrap(), _credential());
        let attributes: Value = serde_json::from_str(&holder_sm.get_attributes().unwrap()).unwrap();
        assert_eq!(attributes, json!({"name": "Alice", "age": "25"}));
    }

    #[tokio::test]
    async fn test_receive_credential_sends_ack_when_requested() {
        let mut credential = _credential();
        credential.please_ack = Some(PleaseAck::default());
        let sent = Arc::new(Mutex::new(vec![]));
        let holder_sm = _holder_sm_request_sent()
            .await
            .handle_message(credential.into(), Some(_recording_send(sent.clone())))
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Accepted);
        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].matches_thread_id(THREAD_ID));
        assert!(matches!(sent[0], AriesMessage::CredentialAck(_)));
    }

    #[tokio::test]
    async fn test_receive_undecodable_credential_moves_to_failed() {
        let mut credential = _credential();
        credential.credentials_attach[0].data.base64 = Some("%%%".to_string());
        let sent = Arc::new(Mutex::new(vec![]));
        let holder_sm = _holder_sm_request_sent()
            .await
            .handle_message(credential.into(), Some(_recording_send(sent.clone())))
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Failed);
        assert!(matches!(sent.lock().unwrap()[0], AriesMessage::ProblemReport(_)));
        assert_eq!(
            holder_sm.get_problem_report().unwrap().description.unwrap().code,
            PROBLEM_CODE_CREDENTIAL_NOT_PROCESSED
        );
    }

    #[tokio::test]
    async fn test_receive_problem_report_moves_to_rejected() {
        let holder_sm = _holder_sm_request_sent()
            .await
            .handle_message(_problem_report().into(), None)
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Rejected);
        assert_eq!(holder_sm.credential_status(), 4);
        assert_eq!(
            holder_sm.get_credential().unwrap_err().kind(),
            AriesVcxErrorKind::NotReady
        );
    }

    #[tokio::test]
    async fn test_credential_in_offer_received_is_ignored() {
        let holder_sm = _holder_sm()
            .handle_message(_credential().into(), None)
            .await
            .unwrap();
        assert_eq!(holder_sm.get_state(), HolderState::OfferReceived);
    }

    #[tokio::test]
    async fn test_message_with_foreign_thread_is_refused() {
        let credential = IssueCredential::new(
            "1".to_string(),
            "some-other-thread",
            &json!({"values": {}}),
        );
        let err = _holder_sm_request_sent()
            .await
            .handle_message(credential.into(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidJson);
    }

    #[tokio::test]
    async fn test_find_message_to_handle() {
        let holder_sm = _holder_sm_request_sent().await;
        let foreign = IssueCredential::new("2".to_string(), "other", &json!({}));
        let messages = vec![
            ("uid-1".to_string(), AriesMessage::from(_offer())),
            ("uid-2".to_string(), AriesMessage::from(foreign)),
            ("uid-3".to_string(), AriesMessage::from(_credential())),
        ];
        let (uid, message) = holder_sm.find_message_to_handle(messages).unwrap();
        assert_eq!(uid, "uid-3");
        assert!(matches!(message, AriesMessage::Credential(_)));

        assert!(_holder_sm()
            .find_message_to_handle(vec![("uid-3".to_string(), _credential().into())])
            .is_none());
    }

    #[tokio::test]
    async fn test_decline_offer() {
        let sent = Arc::new(Mutex::new(vec![]));
        let holder_sm = _holder_sm()
            .decline_offer(Some("Not interested".to_string()), _recording_send(sent.clone()))
            .await
            .unwrap();

        assert_eq!(holder_sm.get_state(), HolderState::Rejected);
        assert_eq!(holder_sm.credential_status(), 3);
        assert!(holder_sm.is_terminal_state());
        let AriesMessage::ProblemReport(report) = &sent.lock().unwrap()[0] else {
            panic!("expected problem report");
        };
        assert_eq!(report.comment.as_deref(), Some("Not interested"));
    }

    #[tokio::test]
    async fn test_decline_offer_after_request_fails() {
        let sent = Arc::new(Mutex::new(vec![]));
        let err = _holder_sm_request_sent()
            .await
            .decline_offer(None, _recording_send(sent))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidState);
    }

    #[test]
    fn test_state_codes() {
        let codes: Vec<u32> = [
            HolderState::Initial,
            HolderState::OfferReceived,
            HolderState::RequestSent,
            HolderState::Accepted,
            HolderState::Rejected,
            HolderState::Failed,
        ]
        .into_iter()
        .map(u32::from)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(HolderState::try_from(3).unwrap(), HolderState::Accepted);
        assert!(HolderState::try_from(6).is_err());
    }

    #[tokio::test]
    async fn test_validate_restored_states() {
        assert!(_holder_sm().validate().is_ok());
        let request_sent = _holder_sm_request_sent().await;
        assert!(request_sent.validate().is_ok());
        let accepted = request_sent
            .clone()
            .receive_credential(_credential(), None)
            .await
            .unwrap();
        assert!(accepted.validate().is_ok());

        let without_credential = HolderSM::from_parts(
            "test-source".to_string(),
            THREAD_ID.to_string(),
            HolderFullState::Finished(FinishedHolderState {
                offer: _offer(),
                credential: None,
                status: Status::Success,
            }),
        );
        assert_eq!(
            without_credential.validate().unwrap_err().kind(),
            AriesVcxErrorKind::InvalidState
        );

        let mut request = request_sent.get_msg_credential_request().unwrap();
        request.thread.thid = "d4c3b2a1-0000-4000-8000-000000000000".to_string();
        let foreign_request = HolderSM::from_parts(
            "test-source".to_string(),
            THREAD_ID.to_string(),
            HolderFullState::RequestSent(RequestSentState {
                offer: _offer(),
                msg_credential_request: request,
                payment_handle: None,
            }),
        );
        assert_eq!(
            foreign_request.validate().unwrap_err().kind(),
            AriesVcxErrorKind::InvalidState
        );

        let mut unreadable = _credential();
        unreadable.credentials_attach[0].data.base64 = Some("not base64!".to_string());
        let unreadable_credential = HolderSM::from_parts(
            "test-source".to_string(),
            THREAD_ID.to_string(),
            HolderFullState::Finished(FinishedHolderState {
                offer: _offer(),
                credential: Some(unreadable),
                status: Status::Success,
            }),
        );
        assert!(unreadable_credential.validate().is_err());
    }

    #[tokio::test]
    async fn test_attributes_from_offer_preview() {
        let holder_sm = _holder_sm();
        let attributes: Value = serde_json::from_str(&holder_sm.get_attributes().unwrap()).unwrap();
        assert_eq!(attributes, json!({"name": "Alice", "age": "25"}));
        let attachment: Value = serde_json::from_str(&holder_sm.get_attachment().unwrap()).unwrap();
        assert_eq!(attachment["nonce"], "161126724054910446992163");
    }
}
