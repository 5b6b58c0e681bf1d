use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Port used by StatsD daemons unless told otherwise.
pub const DEFAULT_STATSD_PORT: u16 = 8125;

/// Where metrics go.
///
/// Without a `host` the relay does not talk to a daemon at all and writes the
/// encoded StatsD lines to the `stats` log channel instead.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct StatsdConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl StatsdConfig {
    /// The configured host, ignoring blank values.
    pub fn host(&self) -> Option<&str> {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
    }
}

impl Default for StatsdConfig {
    fn default() -> Self {
        StatsdConfig {
            host: None,
            port: DEFAULT_STATSD_PORT,
            prefix: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_STATSD_PORT
}

/// Validation knobs for incoming metrics.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct MetricsConfig {
    /// When set, `gauge` and `timing` metrics must carry a value instead of
    /// silently defaulting to 1. `incr` always defaults to 1.
    #[serde(default)]
    pub require_explicit_value: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_host_counts_as_unset() {
        let config = StatsdConfig {
            host: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.host(), None);
    }

    #[test]
    fn host_is_trimmed() {
        let config = StatsdConfig {
            host: Some(" stats.local ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.host(), Some("stats.local"));
    }

    #[test]
    fn defaults_to_standard_port() {
        assert_eq!(StatsdConfig::default().port, 8125);
    }
}
