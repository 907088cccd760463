use std::{sync::Arc, time::Duration};

use aries_credex::{
    handlers::{issuance::holder::Holder, util::Status},
    messages::{
        issue_credential::IssueCredential, offer_credential::OfferCredential,
        problem_report::ProblemReport, request_credential::RequestCredential, AriesMessage,
    },
    protocols::{
        common::{build_problem_report_msg, PROBLEM_CODE_ISSUANCE_ABANDONED},
        issuance::holder::{
            state_machine::{HolderFullState, HolderSM, HolderState},
            states::{
                finished::FinishedHolderState, initial::InitialHolderState,
                offer_received::OfferReceivedState, request_sent::RequestSentState,
            },
        },
    },
};
use serde_json::Value;

use crate::{
    api_vcx::{api_global::context::VcxContext, api_handle::connection},
    errors::error::prelude::*,
};

/// A holder together with the connection it talks over. The connection handle is process
/// local and therefore never part of a snapshot.
#[derive(Debug, Clone)]
pub struct HolderWrapper {
    holder: Holder,
    connection_handle: Option<u32>,
}

impl HolderWrapper {
    fn new(holder: Holder, connection_handle: Option<u32>) -> Self {
        HolderWrapper {
            holder,
            connection_handle,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "version", content = "data")]
enum Credentials {
    #[serde(rename = "1.0")]
    V1(LegacyCredential),
    #[serde(rename = "2.0")]
    V2(Holder),
}

/// Flat layout written by older releases. Loaded, never written.
#[derive(Serialize, Deserialize, Debug)]
struct LegacyCredential {
    source_id: String,
    state: u32,
    credential_offer: OfferCredential,
    #[serde(default)]
    credential_request: Option<RequestCredential>,
    #[serde(default)]
    credential: Option<IssueCredential>,
    #[serde(default)]
    payment_handle: Option<u32>,
    #[serde(default)]
    problem_report: Option<ProblemReport>,
}

fn invalid_snapshot<D>(msg: D) -> LibvcxError
where
    D: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
{
    LibvcxError::from_msg(LibvcxErrorKind::InvalidSnapshot, msg)
}

impl TryFrom<LegacyCredential> for Holder {
    type Error = LibvcxError;

    fn try_from(legacy: LegacyCredential) -> Result<Self, Self::Error> {
        legacy
            .credential_offer
            .validate()
            .map_err(|err| invalid_snapshot(format!("Snapshot carries an invalid offer: {err}")))?;
        let offer = legacy.credential_offer;
        let thread_id = offer.thread_id().to_string();
        let state = HolderState::try_from(legacy.state)
            .map_err(|err| invalid_snapshot(err.msg().to_string()))?;
        let restored_report = |report: Option<ProblemReport>| {
            report.unwrap_or_else(|| {
                build_problem_report_msg(
                    PROBLEM_CODE_ISSUANCE_ABANDONED,
                    Some("Restored from a 1.0 snapshot".to_string()),
                    &thread_id,
                )
            })
        };
        let full_state = match state {
            HolderState::Initial => HolderFullState::Initial(InitialHolderState::new()),
            HolderState::OfferReceived => {
                HolderFullState::OfferReceived(OfferReceivedState::new(offer))
            }
            HolderState::RequestSent => HolderFullState::RequestSent(RequestSentState {
                offer,
                msg_credential_request: legacy.credential_request.ok_or_else(|| {
                    invalid_snapshot("Snapshot in RequestSent state lacks credential_request")
                })?,
                payment_handle: legacy.payment_handle,
            }),
            HolderState::Accepted => HolderFullState::Finished(FinishedHolderState {
                offer,
                credential: Some(legacy.credential.ok_or_else(|| {
                    invalid_snapshot("Snapshot in Accepted state lacks credential")
                })?),
                status: Status::Success,
            }),
            HolderState::Rejected => HolderFullState::Finished(FinishedHolderState {
                offer,
                credential: None,
                status: Status::Rejected(restored_report(legacy.problem_report)),
            }),
            HolderState::Failed => HolderFullState::Finished(FinishedHolderState {
                offer,
                credential: None,
                status: Status::Failed(restored_report(legacy.problem_report)),
            }),
        };
        Ok(HolderSM::from_parts(legacy.source_id, thread_id, full_state).into())
    }
}

fn parse_offer(offer: &str) -> LibvcxResult<OfferCredential> {
    if offer.trim().is_empty() {
        return Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidOffer,
            "Credential offer is empty",
        ));
    }
    let offer_message: Value = serde_json::from_str(offer).map_err(|err| {
        LibvcxError::from_msg(
            LibvcxErrorKind::InvalidOffer,
            format!("Cannot deserialize credential offer: {err}"),
        )
    })?;
    if offer_message.is_array() {
        return Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidOffer,
            "Received offer in legacy format",
        ));
    }
    if offer_message.get("@type").is_none() {
        return serde_json::from_value::<OfferCredential>(offer_message).map_err(|err| {
            LibvcxError::from_msg(
                LibvcxErrorKind::InvalidOffer,
                format!("Cannot parse credential offer: {err}"),
            )
        });
    }
    match serde_json::from_value::<AriesMessage>(offer_message) {
        Ok(AriesMessage::CredentialOffer(offer)) => Ok(offer),
        Ok(message) => Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidOffer,
            format!("Message is not a credential offer: {message:?}"),
        )),
        Err(err) => Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidOffer,
            format!("Cannot parse credential offer: {err}"),
        )),
    }
}

fn create_credential(source_id: &str, offer: OfferCredential) -> LibvcxResult<Holder> {
    Holder::create_from_offer(source_id, offer).map_err(|err| {
        LibvcxError::from_msg(LibvcxErrorKind::InvalidOffer, err.msg().to_string())
    })
}

pub fn credential_create_with_offer(
    ctx: &VcxContext,
    source_id: &str,
    offer: &str,
) -> LibvcxResult<u32> {
    trace!(
        "credential_create_with_offer >>> source_id: {}, offer: {}",
        source_id,
        offer
    );
    let holder = create_credential(source_id, parse_offer(offer)?)?;
    let handle = ctx.credentials.add(HolderWrapper::new(holder, None))?;
    debug!("credential_create_with_offer <<< source_id: {}, handle: {}", source_id, handle);
    Ok(handle)
}

pub async fn credential_create_with_msgid(
    ctx: &VcxContext,
    source_id: &str,
    connection_handle: u32,
    msg_id: &str,
) -> LibvcxResult<(u32, String)> {
    credential_create_with_msgid_with_timeout(
        ctx,
        source_id,
        connection_handle,
        msg_id,
        ctx.transport_timeout(),
    )
    .await
}

pub async fn credential_create_with_msgid_with_timeout(
    ctx: &VcxContext,
    source_id: &str,
    connection_handle: u32,
    msg_id: &str,
    timeout: Duration,
) -> LibvcxResult<(u32, String)> {
    trace!(
        "credential_create_with_msgid >>> source_id: {}, connection_handle: {}, msg_id: {}",
        source_id,
        connection_handle,
        msg_id
    );
    let message =
        connection::get_message_by_id(ctx.transport().as_ref(), timeout, connection_handle, msg_id)
            .await?;
    let offer = match message {
        AriesMessage::CredentialOffer(offer) => offer,
        message => {
            return Err(LibvcxError::from_msg(
                LibvcxErrorKind::InvalidOffer,
                format!("Message of different type was received: {message:?}"),
            ));
        }
    };
    let offer_json = serde_json::to_string(&AriesMessage::from(offer.clone())).map_err(|err| {
        LibvcxError::from_msg(
            LibvcxErrorKind::SerializationError,
            format!("Cannot serialize offer: {err}"),
        )
    })?;
    trace!(
        "credential_create_with_msgid ::: for msg_id {} found offer {}",
        msg_id,
        offer_json
    );
    let holder = create_credential(source_id, offer)?;
    let handle = ctx
        .credentials
        .add(HolderWrapper::new(holder, Some(connection_handle)))?;
    debug!("inserting credential {} into handle map", source_id);
    Ok((handle, offer_json))
}

pub async fn credential_get_offers(ctx: &VcxContext, connection_handle: u32) -> LibvcxResult<String> {
    credential_get_offers_with_timeout(ctx, connection_handle, ctx.transport_timeout()).await
}

pub async fn credential_get_offers_with_timeout(
    ctx: &VcxContext,
    connection_handle: u32,
    timeout: Duration,
) -> LibvcxResult<String> {
    trace!(
        "credential_get_offers >>> connection_handle: {}",
        connection_handle
    );
    let credential_offers: Vec<AriesMessage> =
        connection::get_messages(ctx.transport().as_ref(), timeout, connection_handle)
            .await?
            .into_iter()
            .filter_map(|(_, message)| match message {
                AriesMessage::CredentialOffer(_) => Some(message),
                _ => None,
            })
            .collect();
    Ok(json!(credential_offers).to_string())
}

pub async fn credential_send_request(
    ctx: &VcxContext,
    handle: u32,
    connection_handle: u32,
    payment_handle: u32,
) -> LibvcxResult<()> {
    credential_send_request_with_timeout(
        ctx,
        handle,
        connection_handle,
        payment_handle,
        ctx.transport_timeout(),
    )
    .await
}

pub async fn credential_send_request_with_timeout(
    ctx: &VcxContext,
    handle: u32,
    connection_handle: u32,
    payment_handle: u32,
    timeout: Duration,
) -> LibvcxResult<()> {
    trace!(
        "credential_send_request >>> handle: {}, connection_handle: {}, payment_handle: {}",
        handle,
        connection_handle,
        payment_handle
    );
    let mut guard = ctx.credentials.lock(handle).await?;
    if guard.holder.get_state() != HolderState::OfferReceived {
        return Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidState,
            format!(
                "Cannot send credential request in state {:?}",
                guard.holder.get_state()
            ),
        ));
    }
    let mut credential = guard.clone();
    let my_pw_did =
        connection::get_pw_did(ctx.transport().as_ref(), timeout, connection_handle).await?;
    let send_message =
        connection::send_message_closure(Arc::clone(ctx.transport()), timeout, connection_handle)?;
    let payment_handle = (payment_handle != 0).then_some(payment_handle);
    credential
        .holder
        .send_request(my_pw_did, payment_handle, send_message)
        .await?;
    credential.connection_handle = Some(connection_handle);
    *guard = credential;
    Ok(())
}

pub async fn credential_decline_offer(
    ctx: &VcxContext,
    handle: u32,
    connection_handle: u32,
    comment: Option<&str>,
) -> LibvcxResult<()> {
    trace!(
        "credential_decline_offer >>> handle: {}, connection_handle: {}, comment: {:?}",
        handle,
        connection_handle,
        comment
    );
    let mut guard = ctx.credentials.lock(handle).await?;
    let mut credential = guard.clone();
    let send_message = connection::send_message_closure(
        Arc::clone(ctx.transport()),
        ctx.transport_timeout(),
        connection_handle,
    )?;
    credential.holder.decline_offer(comment, send_message).await?;
    credential.connection_handle = Some(connection_handle);
    *guard = credential;
    Ok(())
}

pub async fn credential_update_state(ctx: &VcxContext, handle: u32) -> LibvcxResult<u32> {
    credential_update_state_with_timeout(ctx, handle, ctx.transport_timeout()).await
}

pub async fn credential_update_state_with_timeout(
    ctx: &VcxContext,
    handle: u32,
    timeout: Duration,
) -> LibvcxResult<u32> {
    trace!("credential_update_state >>> handle: {}", handle);
    poll_and_update(ctx, handle, None, timeout).await
}

pub async fn credential_update_state_with_connection(
    ctx: &VcxContext,
    handle: u32,
    connection_handle: u32,
) -> LibvcxResult<u32> {
    trace!(
        "credential_update_state_with_connection >>> handle: {}, connection_handle: {}",
        handle,
        connection_handle
    );
    poll_and_update(ctx, handle, Some(connection_handle), ctx.transport_timeout()).await
}

/// Polls the bound connection, or `rebind_to` when given, and applies the first message that
/// belongs to the exchange. A new binding is only kept once the poll went through.
async fn poll_and_update(
    ctx: &VcxContext,
    handle: u32,
    rebind_to: Option<u32>,
    timeout: Duration,
) -> LibvcxResult<u32> {
    if rebind_to == Some(0) {
        return Err(LibvcxError::from_msg(
            LibvcxErrorKind::InvalidConnectionHandle,
            "Connection handle 0 is never valid",
        ));
    }
    let mut guard = ctx.credentials.lock(handle).await?;
    if guard.holder.is_terminal_state() {
        if rebind_to.is_some() {
            guard.connection_handle = rebind_to;
        }
        return Ok(guard.holder.get_state().into());
    }
    let Some(connection_handle) = rebind_to.or(guard.connection_handle) else {
        debug!(
            "credential_update_state ::: handle {} has no connection bound, nothing to poll",
            handle
        );
        return Ok(guard.holder.get_state().into());
    };
    let mut credential = guard.clone();
    let messages =
        connection::get_messages(ctx.transport().as_ref(), timeout, connection_handle).await?;
    let reviewed = match credential.holder.find_message_to_handle(messages) {
        Some((uid, message)) => {
            let send_message = connection::send_message_closure(
                Arc::clone(ctx.transport()),
                timeout,
                connection_handle,
            )?;
            credential
                .holder
                .process_aries_msg(message, Some(send_message))
                .await?;
            Some(uid)
        }
        None => None,
    };
    credential.connection_handle = Some(connection_handle);
    let state: u32 = credential.holder.get_state().into();
    *guard = credential;
    // committed before marking, a marking failure leaves the new state in place
    if let Some(uid) = reviewed {
        connection::update_message_status(ctx.transport().as_ref(), timeout, connection_handle, &uid)
            .await
            .map_err(|err| {
                LibvcxError::from(err).extend(format!(
                    "Credential {handle} moved to state {state} but message {uid} was not marked reviewed"
                ))
            })?;
    }
    Ok(state)
}

pub async fn credential_update_state_with_message(
    ctx: &VcxContext,
    handle: u32,
    message: &str,
) -> LibvcxResult<u32> {
    trace!(
        "credential_update_state_with_message >>> handle: {}, message: {}",
        handle,
        message
    );
    let message = AriesMessage::from_json(message).map_err(|err| {
        LibvcxError::from_msg(
            LibvcxErrorKind::InvalidJson,
            format!("Cannot update state: Message deserialization failed: {}", err.msg()),
        )
    })?;
    let mut guard = ctx.credentials.lock(handle).await?;
    if guard.holder.is_terminal_state() {
        return Ok(guard.holder.get_state().into());
    }
    let mut credential = guard.clone();
    let send_message = credential
        .connection_handle
        .map(|connection_handle| {
            connection::send_message_closure(
                Arc::clone(ctx.transport()),
                ctx.transport_timeout(),
                connection_handle,
            )
        })
        .transpose()?;
    credential
        .holder
        .process_aries_msg(message, send_message)
        .await?;
    let state = credential.holder.get_state().into();
    *guard = credential;
    Ok(state)
}

pub async fn credential_get_state(ctx: &VcxContext, handle: u32) -> LibvcxResult<u32> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_state().into()))
        .await
}

pub async fn credential_serialize(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    trace!("credential_serialize >>> handle: {}", handle);
    ctx.credentials
        .get(handle, |credential| {
            serde_json::to_string(&Credentials::V2(credential.holder.clone())).map_err(|err| {
                LibvcxError::from_msg(
                    LibvcxErrorKind::SerializationError,
                    format!("Cannot serialize credential: {err:?}"),
                )
            })
        })
        .await
}

fn holder_from_snapshot(snapshot: &str) -> LibvcxResult<Holder> {
    if snapshot.trim().is_empty() {
        return Err(invalid_snapshot("Credential snapshot is empty"));
    }
    let credential: Credentials = serde_json::from_str(snapshot)
        .map_err(|err| invalid_snapshot(format!("Cannot deserialize credential: {err}")))?;
    let holder = match credential {
        Credentials::V1(legacy) => Holder::try_from(legacy)?,
        Credentials::V2(holder) => holder,
    };
    holder
        .validate()
        .map_err(|err| invalid_snapshot(format!("Snapshot is not consistent: {}", err.msg())))?;
    Ok(holder)
}

pub fn credential_deserialize(ctx: &VcxContext, snapshot: &str) -> LibvcxResult<u32> {
    trace!("credential_deserialize >>> snapshot: {}", snapshot);
    let holder = holder_from_snapshot(snapshot)?;
    ctx.credentials.add(HolderWrapper::new(holder, None))
}

pub fn credential_release(ctx: &VcxContext, handle: u32) -> LibvcxResult<()> {
    trace!("credential_release >>> handle: {}", handle);
    ctx.credentials.release(handle)
}

pub fn credential_release_all(ctx: &VcxContext) {
    if let Err(err) = ctx.credentials.drain() {
        warn!("credential_release_all >>> failed to release handles: {}", err);
    }
}

pub fn is_valid_handle(ctx: &VcxContext, handle: u32) -> bool {
    ctx.credentials.has_handle(handle)
}

pub async fn credential_get_source_id(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_source_id()))
        .await
}

pub async fn credential_get_thread_id(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_thread_id()?))
        .await
}

pub async fn credential_get_attributes(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_attributes()?))
        .await
}

pub async fn credential_get_attachment(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_attachment()?))
        .await
}

pub async fn credential_get_credential(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| {
            Ok(json!(AriesMessage::from(credential.holder.get_credential()?)).to_string())
        })
        .await
}

pub async fn credential_get_offer(ctx: &VcxContext, handle: u32) -> LibvcxResult<String> {
    ctx.credentials
        .get(handle, |credential| {
            Ok(json!(AriesMessage::from(credential.holder.get_offer()?)).to_string())
        })
        .await
}

pub async fn credential_get_credential_status(ctx: &VcxContext, handle: u32) -> LibvcxResult<u32> {
    ctx.credentials
        .get(handle, |credential| Ok(credential.holder.get_credential_status()?))
        .await
}
