use async_trait::async_trait;

use crate::{errors::error::VcxResult, messages::AriesMessage};

/// Connection layer the holder exchanges protocol messages through.
///
/// Connections are addressed by opaque handles owned by the implementor; the
/// holder never creates or releases them.
#[async_trait]
pub trait BaseMessageTransport: Send + Sync {
    /// Pending messages on the connection keyed by their transport uid. Never fails on an
    /// empty inbox.
    async fn get_messages(&self, connection_handle: u32) -> VcxResult<Vec<(String, AriesMessage)>>;

    /// Fails with `MessageNotFound` when `msg_id` denotes nothing.
    async fn get_message_by_id(&self, connection_handle: u32, msg_id: &str) -> VcxResult<AriesMessage>;

    /// Fails with `TransportError` when delivery fails.
    async fn send_message(&self, connection_handle: u32, message: &AriesMessage) -> VcxResult<()>;

    async fn update_message_status(&self, connection_handle: u32, uid: &str) -> VcxResult<()>;

    async fn get_pw_did(&self, connection_handle: u32) -> VcxResult<String>;
}
