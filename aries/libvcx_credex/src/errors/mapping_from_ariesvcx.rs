use aries_credex::errors::error::{AriesVcxError, AriesVcxErrorKind};

use crate::errors::error::{LibvcxError, LibvcxErrorKind};

impl From<AriesVcxError> for LibvcxError {
    fn from(error: AriesVcxError) -> LibvcxError {
        LibvcxError::from_msg(error.kind().into(), error.msg().to_string())
    }
}

impl From<AriesVcxErrorKind> for LibvcxErrorKind {
    fn from(kind: AriesVcxErrorKind) -> Self {
        match kind {
            AriesVcxErrorKind::InvalidState => LibvcxErrorKind::InvalidState,
            AriesVcxErrorKind::InvalidJson => LibvcxErrorKind::InvalidJson,
            AriesVcxErrorKind::InvalidInput => LibvcxErrorKind::InvalidInput,
            AriesVcxErrorKind::NotReady => LibvcxErrorKind::NotReady,
            AriesVcxErrorKind::SerializationError => LibvcxErrorKind::SerializationError,
            AriesVcxErrorKind::InvalidMessageFormat => LibvcxErrorKind::InvalidJson,
            AriesVcxErrorKind::InvalidOffer => LibvcxErrorKind::InvalidOffer,
            AriesVcxErrorKind::MessageNotFound => LibvcxErrorKind::NotFound,
            AriesVcxErrorKind::TransportError => LibvcxErrorKind::TransportError,
            AriesVcxErrorKind::InvalidConnectionHandle => LibvcxErrorKind::InvalidConnectionHandle,
            AriesVcxErrorKind::Timeout => LibvcxErrorKind::Timeout,
            AriesVcxErrorKind::UnknownError => LibvcxErrorKind::UnknownError,
        }
    }
}
