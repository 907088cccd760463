use std::{error::Error, fmt};

use thiserror;

pub mod prelude {
    pub use super::{AriesVcxError, AriesVcxErrorKind, VcxResult};
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum AriesVcxErrorKind {
    // Common
    #[error("Object is in invalid state for requested operation")]
    InvalidState,
    #[error("Invalid JSON string")]
    InvalidJson,
    #[error("Invalid input parameter")]
    InvalidInput,
    #[error("Object not ready for specified action")]
    NotReady,
    #[error("Unable to serialize")]
    SerializationError,
    #[error("Unknown Error")]
    UnknownError,

    // Messages
    #[error("Invalid message format")]
    InvalidMessageFormat,
    #[error("Credential offer is malformed or incomplete")]
    InvalidOffer,
    #[error("Message not found")]
    MessageNotFound,

    // Transport
    #[error("Failed to deliver or retrieve message")]
    TransportError,
    #[error("Invalid Connection Handle")]
    InvalidConnectionHandle,
    #[error("Transport did not answer in time")]
    Timeout,
}

#[derive(thiserror::Error)]
pub struct AriesVcxError {
    msg: String,
    kind: AriesVcxErrorKind,
}

fn format_error(err: &AriesVcxError, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Error: {}", err.msg())?;
    let mut current = err.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

impl fmt::Display for AriesVcxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl fmt::Debug for AriesVcxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl AriesVcxError {
    fn new(kind: AriesVcxErrorKind, msg: String) -> Self {
        AriesVcxError { msg, kind }
    }

    pub fn from_msg<D>(kind: AriesVcxErrorKind, msg: D) -> AriesVcxError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(kind, msg.to_string())
    }

    pub fn kind(&self) -> AriesVcxErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub fn map<D>(self, kind: AriesVcxErrorKind, msg: D) -> AriesVcxError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self::new(kind, format!("{}\n{}", msg, self.msg))
    }
}

pub type VcxResult<T> = Result<T, AriesVcxError>;
