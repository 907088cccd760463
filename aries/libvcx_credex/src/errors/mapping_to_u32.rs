use crate::errors::error::{LibvcxError, LibvcxErrorKind};

impl From<LibvcxError> for u32 {
    fn from(error: LibvcxError) -> u32 {
        error.kind().into()
    }
}

pub static SUCCESS_CODE: u32 = 0;
static UNKNOWN_ERROR_CODE: u32 = 1001;

lazy_static! {
    static ref ERROR_KINDS: Vec<(LibvcxErrorKind, u32)> = vec![
        (LibvcxErrorKind::InvalidConnectionHandle, 1003),
        (LibvcxErrorKind::InvalidConfiguration, 1004),
        (LibvcxErrorKind::NotReady, 1005),
        (LibvcxErrorKind::TransportError, 1010),
        (LibvcxErrorKind::InvalidJson, 1016),
        (LibvcxErrorKind::InvalidHandle, 1048),
        (LibvcxErrorKind::SerializationError, 1050),
        (LibvcxErrorKind::NotFound, 1073),
        (LibvcxErrorKind::InvalidState, 1081),
        (LibvcxErrorKind::ActionNotSupported, 1103),
        (LibvcxErrorKind::PoisonedLock, 1109),
        (LibvcxErrorKind::InvalidInput, 1115),
        (LibvcxErrorKind::InvalidSnapshot, 1116),
        (LibvcxErrorKind::InvalidOffer, 1117),
        (LibvcxErrorKind::Timeout, 1124),
        (LibvcxErrorKind::UnknownError, UNKNOWN_ERROR_CODE),
    ];
}

impl From<LibvcxErrorKind> for u32 {
    fn from(kind: LibvcxErrorKind) -> u32 {
        match ERROR_KINDS
            .iter()
            .find(|(mapping_kind, _)| *mapping_kind == kind)
        {
            Some((_, mapping_code)) => *mapping_code,
            None => UNKNOWN_ERROR_CODE,
        }
    }
}

impl From<u32> for LibvcxErrorKind {
    fn from(code: u32) -> LibvcxErrorKind {
        match ERROR_KINDS.iter().find(|(_, n)| *n == code) {
            Some((kind, _)) => *kind,
            None => LibvcxErrorKind::UnknownError,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::error::{LibvcxError, LibvcxErrorKind};

    #[test]
    fn it_should_map_error_kinds_to_codes() {
        assert_eq!(u32::from(LibvcxErrorKind::InvalidConnectionHandle), 1003);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidConfiguration), 1004);
        assert_eq!(u32::from(LibvcxErrorKind::NotReady), 1005);
        assert_eq!(u32::from(LibvcxErrorKind::TransportError), 1010);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidJson), 1016);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidHandle), 1048);
        assert_eq!(u32::from(LibvcxErrorKind::SerializationError), 1050);
        assert_eq!(u32::from(LibvcxErrorKind::NotFound), 1073);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidState), 1081);
        assert_eq!(u32::from(LibvcxErrorKind::ActionNotSupported), 1103);
        assert_eq!(u32::from(LibvcxErrorKind::PoisonedLock), 1109);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidInput), 1115);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidSnapshot), 1116);
        assert_eq!(u32::from(LibvcxErrorKind::InvalidOffer), 1117);
        assert_eq!(u32::from(LibvcxErrorKind::Timeout), 1124);
        assert_eq!(u32::from(LibvcxErrorKind::UnknownError), 1001);
    }

    #[test]
    fn it_should_map_codes_to_error_kinds() {
        assert_eq!(LibvcxErrorKind::from(1048), LibvcxErrorKind::InvalidHandle);
        assert_eq!(LibvcxErrorKind::from(1117), LibvcxErrorKind::InvalidOffer);
        assert_eq!(LibvcxErrorKind::from(1116), LibvcxErrorKind::InvalidSnapshot);
        assert_eq!(LibvcxErrorKind::from(1124), LibvcxErrorKind::Timeout);
        assert_eq!(LibvcxErrorKind::from(9999), LibvcxErrorKind::UnknownError);
    }

    #[test]
    fn it_should_map_error_to_code() {
        let err = LibvcxError::from_msg(LibvcxErrorKind::InvalidState, "wrong state");
        assert_eq!(u32::from(err), 1081);
    }
}
