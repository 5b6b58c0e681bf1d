use std::sync::Arc;

use super::StatsClient;
use crate::error::Result;
use crate::utils::log_sink::{LogSink, TracingSink};

/// Stand-in for the UDP client when no statsd host is configured.
///
/// Lines are encoded exactly as they would be on the wire and written to the
/// stats log channel, one entry per operation.
pub struct LoggingStatsClient {
    host: Option<String>,
    port: u16,
    prefix: Option<String>,
    sink: Arc<dyn LogSink>,
}

impl LoggingStatsClient {
    /// Keeps the same parameters as the UDP client; host and port are only stored.
    pub fn new(host: Option<String>, port: u16, prefix: Option<String>) -> Self {
        Self::with_sink(host, port, prefix, Arc::new(TracingSink::stats()))
    }

    pub fn with_sink(
        host: Option<String>,
        port: u16,
        prefix: Option<String>,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        LoggingStatsClient {
            host,
            port,
            prefix,
            sink,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl StatsClient for LoggingStatsClient {
    fn backend_type(&self) -> &str {
        "logging"
    }

    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    fn send(&self, data: &str) -> Result<()> {
        self.sink.info(data);
        Ok(())
    }
}
