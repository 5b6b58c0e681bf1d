pub mod base;
pub mod logging_client;
pub mod udp_client;

// Re-export the primary backend items so code outside can do
// "use crate::statsd::{StatsClient, create_statist};"
pub use base::{create_statist, encode_line, format_value, MetricType, StatsClient};
pub use logging_client::LoggingStatsClient;
pub use udp_client::UdpStatsClient;
