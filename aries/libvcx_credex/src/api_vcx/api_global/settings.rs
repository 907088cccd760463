use std::time::Duration;

use typed_builder::TypedBuilder;

use crate::errors::error::prelude::*;

pub const DEFAULT_THREADPOOL_SIZE: usize = 4;
pub const DEFAULT_TRANSPORT_TIMEOUT_SECS: u64 = 30;

/// Process configuration, usually supplied as a JSON string by the embedding application.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default, TypedBuilder)]
#[serde(deny_unknown_fields)]
pub struct VcxConfig {
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threadpool_size: Option<usize>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_timeout_secs: Option<u64>,
}

impl VcxConfig {
    pub fn from_json(config: &str) -> LibvcxResult<Self> {
        let config: VcxConfig = serde_json::from_str(config).map_err(|err| {
            LibvcxError::from_msg(
                LibvcxErrorKind::InvalidConfiguration,
                format!("Cannot parse configuration {config:?}: {err}"),
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LibvcxResult<()> {
        if self.threadpool_size == Some(0) {
            return Err(LibvcxError::from_msg(
                LibvcxErrorKind::InvalidConfiguration,
                "threadpool_size must be greater than 0",
            ));
        }
        if self.transport_timeout_secs == Some(0) {
            return Err(LibvcxError::from_msg(
                LibvcxErrorKind::InvalidConfiguration,
                "transport_timeout_secs must be greater than 0",
            ));
        }
        Ok(())
    }

    pub fn threadpool_size(&self) -> usize {
        self.threadpool_size.unwrap_or(DEFAULT_THREADPOOL_SIZE)
    }

    pub fn transport_timeout(&self) -> Duration {
        Duration::from_secs(
            self.transport_timeout_secs
                .unwrap_or(DEFAULT_TRANSPORT_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = VcxConfig::from_json("{}").unwrap();
        assert_eq!(config.threadpool_size(), 4);
        assert_eq!(config.transport_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_config_from_json() {
        let config =
            VcxConfig::from_json(r#"{"threadpool_size": 8, "transport_timeout_secs": 5}"#).unwrap();
        assert_eq!(
            config,
            VcxConfig::builder()
                .threadpool_size(8)
                .transport_timeout_secs(5)
                .build()
        );
    }

    #[test]
    fn test_config_rejects_invalid_input() {
        for config in [
            "",
            "not json",
            r#"{"threadpool_size": 0}"#,
            r#"{"transport_timeout_secs": 0}"#,
            r#"{"threadpool_size": -1}"#,
            r#"{"wallet_name": "alice"}"#,
        ] {
            assert_eq!(
                VcxConfig::from_json(config).unwrap_err().kind(),
                LibvcxErrorKind::InvalidConfiguration,
                "config {config:?} should be rejected"
            );
        }
    }
}
