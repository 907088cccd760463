use std::{error::Error, fmt};

use thiserror;

pub mod prelude {
    pub use super::{LibvcxError, LibvcxErrorKind, LibvcxResult};
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum LibvcxErrorKind {
    // Common
    #[error("Object is in invalid state for requested operation")]
    InvalidState,
    #[error("Invalid Configuration")]
    InvalidConfiguration,
    #[error("Obj was not found with handle")]
    InvalidHandle,
    #[error("Invalid JSON string")]
    InvalidJson,
    #[error("Invalid input parameter")]
    InvalidInput,
    #[error("Object not ready for specified action")]
    NotReady,
    #[error("Unable to serialize")]
    SerializationError,
    #[error("Action is not supported")]
    ActionNotSupported,
    #[error("Waiting for the operation to complete timed out")]
    Timeout,
    #[error("Could not acquire lock on a shared object")]
    PoisonedLock,

    // Credential exchange
    #[error("Credential offer is malformed or empty")]
    InvalidOffer,
    #[error("Credential snapshot is malformed or truncated")]
    InvalidSnapshot,
    #[error("Message not found")]
    NotFound,

    // Transport
    #[error("Message failed in post")]
    TransportError,
    #[error("Invalid Connection Handle")]
    InvalidConnectionHandle,

    #[error("Unknown Error")]
    UnknownError,
}

#[derive(thiserror::Error)]
pub struct LibvcxError {
    msg: String,
    kind: LibvcxErrorKind,
}

fn format_error(err: &LibvcxError, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Error: {}", err.msg())?;
    let mut current = err.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

impl fmt::Display for LibvcxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl fmt::Debug for LibvcxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_error(self, f)
    }
}

impl LibvcxError {
    pub fn from_msg<D>(kind: LibvcxErrorKind, msg: D) -> LibvcxError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        LibvcxError {
            msg: msg.to_string(),
            kind,
        }
    }

    pub fn kind(&self) -> LibvcxErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    #[must_use]
    pub fn extend<D>(self, msg: D) -> LibvcxError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        LibvcxError {
            msg: format!("{}\n{}", self.msg, msg),
            kind: self.kind,
        }
    }

    #[must_use]
    pub fn map<D>(self, kind: LibvcxErrorKind, msg: D) -> LibvcxError
    where
        D: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        LibvcxError {
            msg: format!("{}\n{}", msg, self.msg),
            kind,
        }
    }
}

impl From<LibvcxErrorKind> for LibvcxError {
    fn from(kind: LibvcxErrorKind) -> Self {
        LibvcxError::from_msg(kind, kind.to_string())
    }
}

pub type LibvcxResult<T> = Result<T, LibvcxError>;
