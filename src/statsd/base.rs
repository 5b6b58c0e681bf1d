use std::sync::Arc;

use tracing::{error, info};

use super::{logging_client::LoggingStatsClient, udp_client::UdpStatsClient};
use crate::config::StatsdConfig;
use crate::error::Result;

/// The metric operations clients may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Incr,
    Gauge,
    Timing,
}

impl MetricType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "incr" => Some(MetricType::Incr),
            "gauge" => Some(MetricType::Gauge),
            "timing" => Some(MetricType::Timing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Incr => "incr",
            MetricType::Gauge => "gauge",
            MetricType::Timing => "timing",
        }
    }

    /// StatsD type suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            MetricType::Incr => "c",
            MetricType::Gauge => "g",
            MetricType::Timing => "ms",
        }
    }
}

/// Renders a metric value the way StatsD daemons expect it: integral values
/// without a fractional part, everything else in shortest decimal form.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Encodes one StatsD line: `<prefix.><label>:<value>|<suffix>`.
pub fn encode_line(prefix: Option<&str>, label: &str, value: f64, metric: MetricType) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => format!(
            "{}.{}:{}|{}",
            prefix,
            label,
            format_value(value),
            metric.suffix()
        ),
        None => format!("{}:{}|{}", label, format_value(value), metric.suffix()),
    }
}

/// The metric backend capability.
///
/// Implementors only decide where encoded lines go; the encoding itself is
/// shared so a logged line is byte-for-byte what the daemon would receive.
pub trait StatsClient: Send + Sync {
    /// Short backend name, e.g. "udp" or "logging".
    fn backend_type(&self) -> &str;

    fn prefix(&self) -> Option<&str>;

    /// Ships one payload (one or more newline separated lines).
    fn send(&self, data: &str) -> Result<()>;

    fn increment(&self, label: &str, value: f64) -> Result<()> {
        self.send(&encode_line(self.prefix(), label, value, MetricType::Incr))
    }

    fn gauge(&self, label: &str, value: f64) -> Result<()> {
        let line = encode_line(self.prefix(), label, value, MetricType::Gauge);
        if value < 0.0 {
            // A leading '-' reads as a delta, so reset to zero first.
            let reset = encode_line(self.prefix(), label, 0.0, MetricType::Gauge);
            return self.send(&format!("{}\n{}", reset, line));
        }
        self.send(&line)
    }

    fn timing(&self, label: &str, value: f64) -> Result<()> {
        self.send(&encode_line(self.prefix(), label, value, MetricType::Timing))
    }

    /// Runs the operation named by `metric`.
    fn record(&self, metric: MetricType, label: &str, value: f64) -> Result<()> {
        match metric {
            MetricType::Incr => self.increment(label, value),
            MetricType::Gauge => self.gauge(label, value),
            MetricType::Timing => self.timing(label, value),
        }
    }
}

/// Creates the metric backend from the statsd config.
/// With a host, metrics go to that daemon over UDP. Without one, they are
/// written to the `stats` log channel.
pub fn create_statist(config: &StatsdConfig) -> std::io::Result<Arc<dyn StatsClient>> {
    let prefix = config.prefix.clone();

    match config.host() {
        Some(host) => match UdpStatsClient::new(host, config.port, prefix) {
            Ok(client) => {
                info!("Sending metrics to statsd at {}", client.addr());
                Ok(Arc::new(client))
            }
            Err(e) => {
                error!(
                    "Failed to create statsd client for {}:{}: {}",
                    host, config.port, e
                );
                Err(e)
            }
        },
        None => {
            info!("No statsd host configured. Logging metrics to the stats channel.");
            Ok(Arc::new(LoggingStatsClient::new(None, config.port, prefix)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingClient {
        prefix: Option<String>,
        sent: Mutex<Vec<String>>,
    }

    impl StatsClient for CapturingClient {
        fn backend_type(&self) -> &str {
            "capture"
        }

        fn prefix(&self) -> Option<&str> {
            self.prefix.as_deref()
        }

        fn send(&self, data: &str) -> Result<()> {
            self.sent.lock().unwrap().push(data.to_string());
            Ok(())
        }
    }

    #[test]
    fn encodes_each_metric_type() {
        assert_eq!(encode_line(None, "a.b", 1.0, MetricType::Incr), "a.b:1|c");
        assert_eq!(encode_line(None, "a.b", 42.0, MetricType::Gauge), "a.b:42|g");
        assert_eq!(
            encode_line(None, "a.b", 300.0, MetricType::Timing),
            "a.b:300|ms"
        );
    }

    #[test]
    fn prefix_is_joined_with_a_dot_only_when_set() {
        assert_eq!(
            encode_line(Some("cnx"), "clicks", 1.0, MetricType::Incr),
            "cnx.clicks:1|c"
        );
        assert_eq!(
            encode_line(Some(""), "clicks", 1.0, MetricType::Incr),
            "clicks:1|c"
        );
    }

    #[test]
    fn fractional_values_keep_their_decimals() {
        assert_eq!(format_value(12.5), "12.5");
        assert_eq!(format_value(0.25), "0.25");
        assert_eq!(format_value(300.0), "300");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn metric_type_names_round_trip() {
        for metric in [MetricType::Incr, MetricType::Gauge, MetricType::Timing] {
            assert_eq!(MetricType::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(MetricType::parse("smudge"), None);
        assert_eq!(MetricType::parse("INCR"), None);
    }

    #[test]
    fn negative_gauge_resets_before_setting() {
        let client = CapturingClient::default();
        client.gauge("queue.depth", -5.0).unwrap();
        assert_eq!(
            client.sent.lock().unwrap().as_slice(),
            ["queue.depth:0|g\nqueue.depth:-5|g"]
        );
    }

    #[test]
    fn record_dispatches_by_type() {
        let client = CapturingClient {
            prefix: Some("web".to_string()),
            ..Default::default()
        };
        client.record(MetricType::Incr, "hits", 2.0).unwrap();
        client.record(MetricType::Gauge, "users", 7.0).unwrap();
        client.record(MetricType::Timing, "render", 12.5).unwrap();
        assert_eq!(
            client.sent.lock().unwrap().as_slice(),
            ["web.hits:2|c", "web.users:7|g", "web.render:12.5|ms"]
        );
    }

    #[test]
    fn selects_logging_backend_without_host() {
        let statist = create_statist(&StatsdConfig::default()).unwrap();
        assert_eq!(statist.backend_type(), "logging");
    }

    #[test]
    fn selects_udp_backend_with_host() {
        let config = StatsdConfig {
            host: Some("127.0.0.1".to_string()),
            port: 8125,
            prefix: Some(String::new()),
        };
        let statist = create_statist(&config).unwrap();
        assert_eq!(statist.backend_type(), "udp");
    }
}
