use std::sync::PoisonError;

use tokio::sync::oneshot::error::RecvError;

use crate::errors::error::{LibvcxError, LibvcxErrorKind};

impl<T> From<PoisonError<T>> for LibvcxError {
    fn from(err: PoisonError<T>) -> Self {
        LibvcxError::from_msg(LibvcxErrorKind::PoisonedLock, err.to_string())
    }
}

impl From<serde_json::Error> for LibvcxError {
    fn from(err: serde_json::Error) -> Self {
        LibvcxError::from_msg(LibvcxErrorKind::InvalidJson, format!("Invalid json: {err}"))
    }
}

impl From<RecvError> for LibvcxError {
    fn from(err: RecvError) -> Self {
        LibvcxError::from_msg(
            LibvcxErrorKind::UnknownError,
            format!("Operation was dropped before completing: {err}"),
        )
    }
}
