use crate::{errors::error::prelude::*, messages::AriesMessage};

pub mod holder;

pub fn verify_thread_id(thread_id: &str, message: &AriesMessage) -> VcxResult<()> {
    if !message.matches_thread_id(thread_id) {
        return Err(AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidJson,
            format!("Cannot handle message {message:?}: thread id does not match, expected {thread_id:?}"),
        ));
    }
    Ok(())
}
