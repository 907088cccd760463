use crate::{
    errors::error::prelude::*,
    messages::{
        issue_credential::IssueCredential, offer_credential::OfferCredential,
        problem_report::ProblemReport, request_credential::RequestCredential, AriesMessage,
    },
    protocols::{
        issuance::holder::state_machine::{HolderSM, HolderState},
        SendClosure,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Holder {
    holder_sm: HolderSM,
}

impl From<HolderSM> for Holder {
    fn from(holder_sm: HolderSM) -> Self {
        Holder { holder_sm }
    }
}

impl Holder {
    pub fn create_from_offer(
        source_id: &str,
        credential_offer: OfferCredential,
    ) -> VcxResult<Holder> {
        trace!(
            "Holder::create_from_offer >>> source_id: {:?}, credential_offer: {:?}",
            source_id,
            credential_offer
        );
        let holder_sm = HolderSM::from_offer(credential_offer, source_id.to_string())?;
        Ok(Holder { holder_sm })
    }

    pub async fn send_request(
        &mut self,
        my_pw_did: String,
        payment_handle: Option<u32>,
        send_message: SendClosure,
    ) -> VcxResult<()> {
        self.holder_sm = self
            .holder_sm
            .clone()
            .send_request(my_pw_did, payment_handle, send_message)
            .await?;
        Ok(())
    }

    pub async fn decline_offer(
        &mut self,
        comment: Option<&str>,
        send_message: SendClosure,
    ) -> VcxResult<ProblemReport> {
        self.holder_sm = self
            .holder_sm
            .clone()
            .decline_offer(comment.map(String::from), send_message)
            .await?;
        self.get_problem_report()
    }

    pub fn find_message_to_handle(
        &self,
        messages: Vec<(String, AriesMessage)>,
    ) -> Option<(String, AriesMessage)> {
        self.holder_sm.find_message_to_handle(messages)
    }

    pub async fn process_aries_msg(
        &mut self,
        message: AriesMessage,
        send_message: Option<SendClosure>,
    ) -> VcxResult<()> {
        self.holder_sm = self
            .holder_sm
            .clone()
            .handle_message(message, send_message)
            .await?;
        Ok(())
    }

    pub fn get_msg_credential_request(&self) -> VcxResult<RequestCredential> {
        self.holder_sm.get_msg_credential_request()
    }

    pub fn is_terminal_state(&self) -> bool {
        self.holder_sm.is_terminal_state()
    }

    pub fn get_state(&self) -> HolderState {
        self.holder_sm.get_state()
    }

    pub fn get_source_id(&self) -> String {
        self.holder_sm.get_source_id()
    }

    pub fn get_thread_id(&self) -> VcxResult<String> {
        self.holder_sm.get_thread_id()
    }

    pub fn get_credential(&self) -> VcxResult<IssueCredential> {
        self.holder_sm.get_credential()
    }

    /// Fails when a holder restored from storage is not internally consistent.
    pub fn validate(&self) -> VcxResult<()> {
        self.holder_sm.validate()
    }

    pub fn get_attributes(&self) -> VcxResult<String> {
        self.holder_sm.get_attributes()
    }

    pub fn get_attachment(&self) -> VcxResult<String> {
        self.holder_sm.get_attachment()
    }

    pub fn get_offer(&self) -> VcxResult<OfferCredential> {
        self.holder_sm.get_offer()
    }

    pub fn get_payment_handle(&self) -> Option<u32> {
        self.holder_sm.get_payment_handle()
    }

    pub fn get_credential_status(&self) -> VcxResult<u32> {
        Ok(self.holder_sm.credential_status())
    }

    pub fn get_problem_report(&self) -> VcxResult<ProblemReport> {
        self.holder_sm.get_problem_report()
    }
}
