use serde_json::Value;

use crate::{
    errors::error::prelude::*,
    handlers::util::Status,
    messages::{
        attachment::get_attach_as_string, offer_credential::OfferCredential,
        request_credential::RequestCredential,
    },
    protocols::issuance::holder::states::{
        finished::FinishedHolderState, request_sent::RequestSentState,
    },
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OfferReceivedState {
    pub offer: OfferCredential,
}

impl From<(OfferReceivedState, RequestCredential, Option<u32>)> for RequestSentState {
    fn from(
        (state, request, payment_handle): (OfferReceivedState, RequestCredential, Option<u32>),
    ) -> Self {
        trace!("SM is now in RequestSent state");
        RequestSentState {
            offer: state.offer,
            msg_credential_request: request,
            payment_handle,
        }
    }
}

impl From<(OfferReceivedState, Status)> for FinishedHolderState {
    fn from((state, status): (OfferReceivedState, Status)) -> Self {
        trace!("SM is now in Finished state with status {}", status.code());
        FinishedHolderState {
            offer: state.offer,
            credential: None,
            status,
        }
    }
}

impl OfferReceivedState {
    pub fn new(offer: OfferCredential) -> Self {
        OfferReceivedState { offer }
    }

    pub fn get_attributes(&self) -> VcxResult<String> {
        Ok(preview_attributes(&self.offer).to_string())
    }

    pub fn get_attachment(&self) -> VcxResult<String> {
        get_attach_as_string(&self.offer.offers_attach)
    }
}

pub(crate) fn preview_attributes(offer: &OfferCredential) -> Value {
    let new_map = offer
        .credential_preview
        .attributes
        .iter()
        .map(|attribute| (attribute.name.clone(), Value::String(attribute.value.clone())))
        .collect::<serde_json::Map<String, Value>>();
    Value::Object(new_map)
}
