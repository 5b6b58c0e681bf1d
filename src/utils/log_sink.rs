//! Log channels the relay writes client telemetry to.
//!
//! Handlers and the logging StatsD backend receive a sink at construction
//! instead of reaching for a global logger, so tests can swap in a recorder.

/// `tracing` target of the channel carrying encoded StatsD lines.
pub const STATS_TARGET: &str = "stats";
/// `tracing` target of the channel carrying client log messages.
pub const MESSAGES_TARGET: &str = "messages";

/// Something that accepts informational log lines.
pub trait LogSink: Send + Sync {
    fn info(&self, line: &str);
}

/// The two channels exposed by [`TracingSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Stats,
    Messages,
}

/// Writes lines as `tracing` INFO events on a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    channel: Channel,
}

impl TracingSink {
    pub fn stats() -> Self {
        TracingSink {
            channel: Channel::Stats,
        }
    }

    pub fn messages() -> Self {
        TracingSink {
            channel: Channel::Messages,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl LogSink for TracingSink {
    fn info(&self, line: &str) {
        // tracing targets must be constants, hence one arm per channel
        match self.channel {
            Channel::Stats => tracing::info!(target: STATS_TARGET, "{}", line),
            Channel::Messages => tracing::info!(target: MESSAGES_TARGET, "{}", line),
        }
    }
}
