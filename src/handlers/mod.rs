//! Message handlers and the dispatcher routing requests to them.

pub mod base;
pub mod dispatcher;
pub mod log_handler;
pub mod metric_handler;

pub use base::{MessageHandler, Payload};
pub use dispatcher::{DispatchOutcome, Dispatcher, Route};
pub use log_handler::LogHandler;
pub use metric_handler::MetricHandler;
