//! Shared application state.
//!
//! Contains the state that is shared across all request handlers.

use crate::config::ConfigV1;
use crate::handlers::Dispatcher;
use crate::utils::log_throttle::LogThrottle;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Message handlers, including the metric backend chosen at startup.
    pub dispatcher: Arc<Dispatcher>,
    /// Rate limit for server-side logging of failed requests.
    pub error_log_throttle: Arc<LogThrottle>,
}
