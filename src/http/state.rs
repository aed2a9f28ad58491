//! State shared by every handler of a service.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::store::RecordStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, config: ServiceConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
