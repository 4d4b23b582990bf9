use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::network::NetworkTable;
use crate::service::LogService;

pub type SharedState = Arc<AppState>;

/// Immutable per-process state; requests share nothing mutable.
pub struct AppState {
    pub config: ServiceConfig,
    pub service: LogService,
}

impl AppState {
    pub fn new(config: ServiceConfig, networks: NetworkTable) -> Self {
        let service = LogService::from_config(&config, networks);
        Self { config, service }
    }
}
