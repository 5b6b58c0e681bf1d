// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod http;
pub mod logging;
pub mod statsd;
pub mod types;

pub use http::*;
pub use logging::*;
pub use statsd::*;
pub use types::*;
