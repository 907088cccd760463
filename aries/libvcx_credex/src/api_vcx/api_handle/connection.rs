//! Timeout bounded access to the connection layer supplied by the embedding application.

use std::{future::Future, sync::Arc, time::Duration};

use aries_credex::{
    errors::error::prelude::*, messages::AriesMessage, protocols::SendClosure,
    transport::BaseMessageTransport,
};
use futures::FutureExt;

async fn bounded<F, T>(timeout: Duration, operation: &str, future: F) -> VcxResult<T>
where
    F: Future<Output = VcxResult<T>>,
{
    tokio::time::timeout(timeout, future).await.map_err(|_| {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::Timeout,
            format!("{operation} did not complete within {timeout:?}"),
        )
    })?
}

fn check_connection_handle(connection_handle: u32) -> VcxResult<()> {
    if connection_handle == 0 {
        return Err(AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidConnectionHandle,
            "Connection handle 0 is never valid",
        ));
    }
    Ok(())
}

pub async fn get_messages(
    transport: &dyn BaseMessageTransport,
    timeout: Duration,
    connection_handle: u32,
) -> VcxResult<Vec<(String, AriesMessage)>> {
    trace!("connection::get_messages >>> connection_handle: {}", connection_handle);
    check_connection_handle(connection_handle)?;
    bounded(timeout, "get_messages", transport.get_messages(connection_handle)).await
}

pub async fn get_message_by_id(
    transport: &dyn BaseMessageTransport,
    timeout: Duration,
    connection_handle: u32,
    msg_id: &str,
) -> VcxResult<AriesMessage> {
    trace!(
        "connection::get_message_by_id >>> connection_handle: {}, msg_id: {}",
        connection_handle,
        msg_id
    );
    check_connection_handle(connection_handle)?;
    bounded(
        timeout,
        "get_message_by_id",
        transport.get_message_by_id(connection_handle, msg_id),
    )
    .await
}

pub async fn update_message_status(
    transport: &dyn BaseMessageTransport,
    timeout: Duration,
    connection_handle: u32,
    uid: &str,
) -> VcxResult<()> {
    trace!(
        "connection::update_message_status >>> connection_handle: {}, uid: {}",
        connection_handle,
        uid
    );
    bounded(
        timeout,
        "update_message_status",
        transport.update_message_status(connection_handle, uid),
    )
    .await
}

pub async fn get_pw_did(
    transport: &dyn BaseMessageTransport,
    timeout: Duration,
    connection_handle: u32,
) -> VcxResult<String> {
    check_connection_handle(connection_handle)?;
    bounded(timeout, "get_pw_did", transport.get_pw_did(connection_handle)).await
}

pub fn send_message_closure(
    transport: Arc<dyn BaseMessageTransport>,
    timeout: Duration,
    connection_handle: u32,
) -> VcxResult<SendClosure> {
    check_connection_handle(connection_handle)?;
    Ok(Box::new(move |message: AriesMessage| {
        let transport = Arc::clone(&transport);
        async move {
            bounded(
                timeout,
                "send_message",
                transport.send_message(connection_handle, &message),
            )
            .await
        }
        .boxed()
    }))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use test_utils::{mock_transport::MockTransport, mockdata::mockdata_credex::PW_DID};

    use super::*;

    #[tokio::test]
    async fn test_zero_connection_handle_is_rejected() {
        let transport = MockTransport::new();
        let err = get_messages(&transport, Duration::from_secs(1), 0)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::InvalidConnectionHandle);
    }

    #[tokio::test]
    async fn test_slow_transport_times_out() {
        let transport = MockTransport::new();
        transport.add_connection(1, PW_DID);
        transport.set_delay(Duration::from_millis(500));
        let err = get_pw_did(&transport, Duration::from_millis(20), 1)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_send_message_closure_delivers() {
        let transport = Arc::new(MockTransport::new());
        transport.add_connection(3, PW_DID);
        let send_message =
            send_message_closure(transport.clone(), Duration::from_secs(1), 3).unwrap();
        send_message(AriesMessage::Unknown).await.unwrap();
        assert_eq!(transport.sent_messages(3).len(), 1);
    }
}
