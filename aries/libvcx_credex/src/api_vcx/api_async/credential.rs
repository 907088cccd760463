use std::{sync::Arc, time::Duration};

use crate::api_vcx::{
    api_global::context::VcxContext,
    api_handle::credential,
    utils::runtime::{execute_async, Completion},
};

pub fn credential_create_with_offer(
    ctx: Arc<VcxContext>,
    source_id: String,
    offer: String,
) -> Completion<u32> {
    execute_async(async move { credential::credential_create_with_offer(&ctx, &source_id, &offer) })
}

pub fn credential_create_with_msgid(
    ctx: Arc<VcxContext>,
    source_id: String,
    connection_handle: u32,
    msg_id: String,
) -> Completion<(u32, String)> {
    execute_async(async move {
        credential::credential_create_with_msgid(&ctx, &source_id, connection_handle, &msg_id).await
    })
}

pub fn credential_create_with_msgid_with_timeout(
    ctx: Arc<VcxContext>,
    source_id: String,
    connection_handle: u32,
    msg_id: String,
    timeout: Duration,
) -> Completion<(u32, String)> {
    execute_async(async move {
        credential::credential_create_with_msgid_with_timeout(
            &ctx,
            &source_id,
            connection_handle,
            &msg_id,
            timeout,
        )
        .await
    })
}

pub fn credential_get_offers(ctx: Arc<VcxContext>, connection_handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_offers(&ctx, connection_handle).await })
}

pub fn credential_get_offers_with_timeout(
    ctx: Arc<VcxContext>,
    connection_handle: u32,
    timeout: Duration,
) -> Completion<String> {
    execute_async(async move {
        credential::credential_get_offers_with_timeout(&ctx, connection_handle, timeout).await
    })
}

pub fn credential_send_request(
    ctx: Arc<VcxContext>,
    handle: u32,
    connection_handle: u32,
    payment_handle: u32,
) -> Completion<()> {
    execute_async(async move {
        credential::credential_send_request(&ctx, handle, connection_handle, payment_handle).await
    })
}

pub fn credential_send_request_with_timeout(
    ctx: Arc<VcxContext>,
    handle: u32,
    connection_handle: u32,
    payment_handle: u32,
    timeout: Duration,
) -> Completion<()> {
    execute_async(async move {
        credential::credential_send_request_with_timeout(
            &ctx,
            handle,
            connection_handle,
            payment_handle,
            timeout,
        )
        .await
    })
}

pub fn credential_decline_offer(
    ctx: Arc<VcxContext>,
    handle: u32,
    connection_handle: u32,
    comment: Option<String>,
) -> Completion<()> {
    execute_async(async move {
        credential::credential_decline_offer(&ctx, handle, connection_handle, comment.as_deref())
            .await
    })
}

pub fn credential_update_state(ctx: Arc<VcxContext>, handle: u32) -> Completion<u32> {
    execute_async(async move { credential::credential_update_state(&ctx, handle).await })
}

pub fn credential_update_state_with_timeout(
    ctx: Arc<VcxContext>,
    handle: u32,
    timeout: Duration,
) -> Completion<u32> {
    execute_async(async move {
        credential::credential_update_state_with_timeout(&ctx, handle, timeout).await
    })
}

pub fn credential_update_state_with_connection(
    ctx: Arc<VcxContext>,
    handle: u32,
    connection_handle: u32,
) -> Completion<u32> {
    execute_async(async move {
        credential::credential_update_state_with_connection(&ctx, handle, connection_handle).await
    })
}

pub fn credential_update_state_with_message(
    ctx: Arc<VcxContext>,
    handle: u32,
    message: String,
) -> Completion<u32> {
    execute_async(async move {
        credential::credential_update_state_with_message(&ctx, handle, &message).await
    })
}

pub fn credential_get_state(ctx: Arc<VcxContext>, handle: u32) -> Completion<u32> {
    execute_async(async move { credential::credential_get_state(&ctx, handle).await })
}

pub fn credential_serialize(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_serialize(&ctx, handle).await })
}

pub fn credential_deserialize(ctx: Arc<VcxContext>, snapshot: String) -> Completion<u32> {
    execute_async(async move { credential::credential_deserialize(&ctx, &snapshot) })
}

pub fn credential_release(ctx: Arc<VcxContext>, handle: u32) -> Completion<()> {
    execute_async(async move { credential::credential_release(&ctx, handle) })
}

pub fn credential_get_source_id(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_source_id(&ctx, handle).await })
}

pub fn credential_get_thread_id(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_thread_id(&ctx, handle).await })
}

pub fn credential_get_attributes(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_attributes(&ctx, handle).await })
}

pub fn credential_get_attachment(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_attachment(&ctx, handle).await })
}

pub fn credential_get_credential(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_credential(&ctx, handle).await })
}

pub fn credential_get_offer(ctx: Arc<VcxContext>, handle: u32) -> Completion<String> {
    execute_async(async move { credential::credential_get_offer(&ctx, handle).await })
}

pub fn credential_get_credential_status(ctx: Arc<VcxContext>, handle: u32) -> Completion<u32> {
    execute_async(async move { credential::credential_get_credential_status(&ctx, handle).await })
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};

    use test_utils::{
        mock_transport::MockTransport,
        mockdata::mockdata_credex::{ARIES_CREDENTIAL_OFFER, PW_DID},
    };

    use super::*;
    use crate::{api_vcx::api_global::settings::VcxConfig, errors::error::LibvcxErrorKind};

    fn _context() -> Arc<VcxContext> {
        let transport = Arc::new(MockTransport::new());
        transport.add_connection(1, PW_DID);
        VcxContext::init(VcxConfig::default(), transport).unwrap()
    }

    #[test]
    fn test_completion_wait() {
        let ctx = _context();
        let handle = credential_create_with_offer(
            Arc::clone(&ctx),
            "alice".to_string(),
            ARIES_CREDENTIAL_OFFER.to_string(),
        )
        .wait()
        .unwrap();
        assert_eq!(credential_get_state(Arc::clone(&ctx), handle).wait().unwrap(), 1);
        credential_send_request(Arc::clone(&ctx), handle, 1, 0)
            .wait()
            .unwrap();
        assert_eq!(credential_get_state(ctx, handle).wait().unwrap(), 2);
    }

    #[test]
    fn test_completion_callback_reports_error() {
        let ctx = _context();
        let (sender, receiver) = mpsc::channel();
        credential_serialize(ctx, 0).on_complete(move |result| {
            let _ = sender.send(result.map_err(|err| err.kind()));
        });
        assert_eq!(
            receiver.recv().unwrap().unwrap_err(),
            LibvcxErrorKind::InvalidHandle
        );
    }
}
