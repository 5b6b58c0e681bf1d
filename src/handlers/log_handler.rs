use std::sync::Arc;

use super::base::{lookup, MessageHandler, Payload};
use crate::error::{RelayError, Result};
use crate::utils::log_sink::LogSink;
use crate::utils::value::value_to_string;

const MESSAGE_KEYS: &[&str] = &["message", "log-message"];

/// Forwards client log messages to the message log channel.
pub struct LogHandler {
    sink: Arc<dyn LogSink>,
}

impl LogHandler {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl MessageHandler for LogHandler {
    fn message_type(&self) -> &'static str {
        "log"
    }

    fn handle(&self, payload: &Payload) -> Result<()> {
        let message = lookup(payload, MESSAGE_KEYS).ok_or(RelayError::MissingField("message"))?;
        self.sink.info(&value_to_string(message));
        Ok(())
    }
}
