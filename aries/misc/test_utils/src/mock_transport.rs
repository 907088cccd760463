use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Mutex, MutexGuard,
    },
    time::Duration,
};

use aries_credex::{
    errors::error::prelude::*, messages::AriesMessage, transport::BaseMessageTransport,
};
use async_trait::async_trait;

use crate::errors::error::{TestUtilsError, TestUtilsResult};

#[derive(Debug, Default)]
struct MockConnection {
    pw_did: String,
    inbox: Vec<(String, AriesMessage)>,
    sent: Vec<AriesMessage>,
    reviewed: Vec<String>,
}

/// In-memory connection layer. Every connection has an inbox the test fills and an outbox
/// recording what the holder sent.
#[derive(Debug, Default)]
pub struct MockTransport {
    connections: Mutex<HashMap<u32, MockConnection>>,
    fail_send: AtomicBool,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
    delay_ms: AtomicU64,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn connections(&self) -> MutexGuard<'_, HashMap<u32, MockConnection>> {
        match self.connections.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn add_connection(&self, connection_handle: u32, pw_did: &str) {
        self.connections().insert(
            connection_handle,
            MockConnection {
                pw_did: pw_did.to_string(),
                ..MockConnection::default()
            },
        );
    }

    pub fn push_message(&self, connection_handle: u32, uid: &str, message: AriesMessage) {
        self.connections()
            .entry(connection_handle)
            .or_default()
            .inbox
            .push((uid.to_string(), message));
    }

    pub fn push_message_json(
        &self,
        connection_handle: u32,
        uid: &str,
        message: &str,
    ) -> TestUtilsResult<()> {
        let message = AriesMessage::from_json(message)
            .map_err(|err| TestUtilsError::MockDataError(err.to_string()))?;
        self.push_message(connection_handle, uid, message);
        Ok(())
    }

    pub fn sent_messages(&self, connection_handle: u32) -> Vec<AriesMessage> {
        self.connections()
            .get(&connection_handle)
            .map(|connection| connection.sent.clone())
            .unwrap_or_default()
    }

    pub fn reviewed_messages(&self, connection_handle: u32) -> Vec<String> {
        self.connections()
            .get(&connection_handle)
            .map(|connection| connection.reviewed.clone())
            .unwrap_or_default()
    }

    pub fn set_send_failure(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn set_fetch_failure(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_update_failure(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    /// Every transport call sleeps for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.delay_ms.store(millis, Ordering::SeqCst);
    }

    async fn simulate_latency(&self) {
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    fn check_fetch(&self) -> VcxResult<()> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::TransportError,
                "Mock transport configured to fail fetching",
            ));
        }
        Ok(())
    }

    fn unknown_connection(connection_handle: u32) -> AriesVcxError {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidConnectionHandle,
            format!("Unknown connection handle {connection_handle}"),
        )
    }
}

#[async_trait]
impl BaseMessageTransport for MockTransport {
    async fn get_messages(&self, connection_handle: u32) -> VcxResult<Vec<(String, AriesMessage)>> {
        self.simulate_latency().await;
        self.check_fetch()?;
        let connections = self.connections();
        let connection = connections
            .get(&connection_handle)
            .ok_or_else(|| Self::unknown_connection(connection_handle))?;
        trace!(
            "MockTransport::get_messages >>> connection_handle: {}, pending: {}",
            connection_handle,
            connection.inbox.len()
        );
        Ok(connection.inbox.clone())
    }

    async fn get_message_by_id(&self, connection_handle: u32, msg_id: &str) -> VcxResult<AriesMessage> {
        self.simulate_latency().await;
        self.check_fetch()?;
        let connections = self.connections();
        let connection = connections
            .get(&connection_handle)
            .ok_or_else(|| Self::unknown_connection(connection_handle))?;
        connection
            .inbox
            .iter()
            .find(|(uid, _)| uid == msg_id)
            .map(|(_, message)| message.clone())
            .ok_or_else(|| {
                AriesVcxError::from_msg(
                    AriesVcxErrorKind::MessageNotFound,
                    format!("Message {msg_id} not found on connection {connection_handle}"),
                )
            })
    }

    async fn send_message(&self, connection_handle: u32, message: &AriesMessage) -> VcxResult<()> {
        self.simulate_latency().await;
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::TransportError,
                "Mock transport configured to fail sending",
            ));
        }
        let mut connections = self.connections();
        let connection = connections
            .get_mut(&connection_handle)
            .ok_or_else(|| Self::unknown_connection(connection_handle))?;
        debug!("MockTransport::send_message >>> connection_handle: {}", connection_handle);
        connection.sent.push(message.clone());
        Ok(())
    }

    async fn update_message_status(&self, connection_handle: u32, uid: &str) -> VcxResult<()> {
        self.simulate_latency().await;
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(AriesVcxError::from_msg(
                AriesVcxErrorKind::TransportError,
                "Mock transport configured to fail marking messages",
            ));
        }
        let mut connections = self.connections();
        let connection = connections
            .get_mut(&connection_handle)
            .ok_or_else(|| Self::unknown_connection(connection_handle))?;
        connection.inbox.retain(|(msg_uid, _)| msg_uid != uid);
        connection.reviewed.push(uid.to_string());
        Ok(())
    }

    async fn get_pw_did(&self, connection_handle: u32) -> VcxResult<String> {
        self.simulate_latency().await;
        self.connections()
            .get(&connection_handle)
            .map(|connection| connection.pw_did.clone())
            .ok_or_else(|| Self::unknown_connection(connection_handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mockdata::mockdata_credex::{ARIES_CREDENTIAL_OFFER, PW_DID};

    #[tokio::test]
    async fn test_inbox_and_review() {
        let transport = MockTransport::new();
        transport.add_connection(1, PW_DID);
        transport
            .push_message_json(1, "uid-1", ARIES_CREDENTIAL_OFFER)
            .unwrap();

        assert_eq!(transport.get_messages(1).await.unwrap().len(), 1);
        assert!(transport.get_message_by_id(1, "uid-1").await.is_ok());
        transport.update_message_status(1, "uid-1").await.unwrap();
        assert!(transport.get_messages(1).await.unwrap().is_empty());
        assert_eq!(transport.reviewed_messages(1), vec!["uid-1".to_string()]);
        assert_eq!(
            transport.get_message_by_id(1, "uid-1").await.unwrap_err().kind(),
            AriesVcxErrorKind::MessageNotFound
        );
    }

    #[tokio::test]
    async fn test_unknown_connection() {
        let transport = MockTransport::new();
        assert_eq!(
            transport.get_pw_did(9).await.unwrap_err().kind(),
            AriesVcxErrorKind::InvalidConnectionHandle
        );
    }

    #[tokio::test]
    async fn test_send_failure_injection() {
        let transport = MockTransport::new();
        transport.add_connection(1, PW_DID);
        transport.set_send_failure(true);
        let err = transport
            .send_message(1, &AriesMessage::Unknown)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), AriesVcxErrorKind::TransportError);
        assert!(transport.sent_messages(1).is_empty());
    }
}
