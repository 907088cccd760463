use std::string::FromUtf8Error;

use crate::errors::error::{AriesVcxError, AriesVcxErrorKind};

impl From<serde_json::Error> for AriesVcxError {
    fn from(err: serde_json::Error) -> Self {
        AriesVcxError::from_msg(AriesVcxErrorKind::InvalidJson, format!("Invalid json: {err}"))
    }
}

impl From<base64::DecodeError> for AriesVcxError {
    fn from(err: base64::DecodeError) -> Self {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidMessageFormat,
            format!("Attachment is not valid base64: {err}"),
        )
    }
}

impl From<FromUtf8Error> for AriesVcxError {
    fn from(err: FromUtf8Error) -> Self {
        AriesVcxError::from_msg(
            AriesVcxErrorKind::InvalidMessageFormat,
            format!("Attachment is not valid utf-8: {err}"),
        )
    }
}
