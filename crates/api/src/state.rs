//! Shared application state for the Axum API server.

use santa_common::config::AppConfig;
use santa_notifier::{Notifier, Transport};

/// Application state shared across all route handlers via Axum `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: AppConfig, notifier: Notifier) -> Self {
        Self { config, notifier }
    }

    /// Build state with the transport selected by `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let notifier = Notifier::new(Transport::from_config(&config));
        Self::new(config, notifier)
    }
}
