use std::{fmt, sync::Arc, time::Duration};

use aries_credex::transport::BaseMessageTransport;

use crate::{
    api_vcx::{
        api_global::settings::VcxConfig,
        api_handle::{credential::HolderWrapper, object_cache::ObjectCache},
        utils::runtime::init_runtime,
    },
    errors::error::prelude::*,
};

/// Everything a credential operation needs: the configuration, the connection layer and the
/// store of live credential handles.
pub struct VcxContext {
    config: VcxConfig,
    transport: Arc<dyn BaseMessageTransport>,
    pub(crate) credentials: ObjectCache<HolderWrapper>,
}

impl fmt::Debug for VcxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcxContext")
            .field("config", &self.config)
            .field("credentials", &self.credentials.len().ok())
            .finish_non_exhaustive()
    }
}

impl VcxContext {
    pub fn init(
        config: VcxConfig,
        transport: Arc<dyn BaseMessageTransport>,
    ) -> LibvcxResult<Arc<VcxContext>> {
        trace!("VcxContext::init >>> config: {:?}", config);
        config.validate()?;
        init_runtime(config.threadpool_size())?;
        info!("VcxContext::init >>> credential holder context initialized");
        Ok(Arc::new(VcxContext {
            config,
            transport,
            credentials: ObjectCache::new("credentials-cache"),
        }))
    }

    pub fn init_from_json(
        config: &str,
        transport: Arc<dyn BaseMessageTransport>,
    ) -> LibvcxResult<Arc<VcxContext>> {
        Self::init(VcxConfig::from_json(config)?, transport)
    }

    pub fn config(&self) -> &VcxConfig {
        &self.config
    }

    pub fn transport(&self) -> &Arc<dyn BaseMessageTransport> {
        &self.transport
    }

    pub fn transport_timeout(&self) -> Duration {
        self.config.transport_timeout()
    }

    /// Releases every credential handle. The context stays usable afterwards.
    pub fn shutdown(&self) -> LibvcxResult<usize> {
        let released = self.credentials.drain()?;
        info!("VcxContext::shutdown >>> released {} credential handles", released);
        Ok(released)
    }
}
