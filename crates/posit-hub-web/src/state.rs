//! Shared application state for the web server.

use std::sync::Arc;

use posit_hub_common::Result;
use posit_hub_config::Config;

use crate::store::SessionStore;
use crate::templates::Templates;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
    pub templates: Templates,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            sessions: SessionStore::new(),
            templates: Templates::new()?,
        })
    }
}

pub type SharedState = Arc<AppState>;
