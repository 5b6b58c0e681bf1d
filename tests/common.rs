#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, Response};
use axum::Router;
use cnxlogging::config::{Config, ConfigV1};
use cnxlogging::handlers::Dispatcher;
use cnxlogging::routes::create_router;
use cnxlogging::state::AppState;
use cnxlogging::statsd::{LoggingStatsClient, StatsClient};
use cnxlogging::utils::log_sink::LogSink;
use cnxlogging::utils::log_throttle::LogThrottle;
use figment::providers::{Format, Yaml};
use figment::Figment;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:6543
logging:
  level: "debug"
  format: "json"
"#;

pub fn load_test_config(extra: &str) -> ConfigV1 {
    let yaml = format!("{TEST_CONFIG}{extra}");
    let config: Config = Figment::new()
        .merge(Yaml::string(&yaml))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

/// Captures everything written to a log channel.
// Integration tests link the library without cfg(test), so the crate's own RecordingSink is not visible here.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn info(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

pub struct TestApp {
    pub router: Router,
    pub messages: Arc<RecordingSink>,
    pub stats: Arc<RecordingSink>,
}

/// Builds the router with the logging metric backend and both channels
/// captured in memory.
pub fn build_app(config: ConfigV1) -> TestApp {
    let messages = Arc::new(RecordingSink::default());
    let stats = Arc::new(RecordingSink::default());
    let statist: Arc<dyn StatsClient> = Arc::new(LoggingStatsClient::with_sink(
        None,
        config.statsd.port,
        config.statsd.prefix.clone(),
        stats.clone(),
    ));
    let dispatcher = Dispatcher::with_defaults(statist, messages.clone(), &config.metrics);

    let state = AppState {
        config: Arc::new(config),
        dispatcher: Arc::new(dispatcher),
        error_log_throttle: Arc::new(LogThrottle::default()),
    };

    TestApp {
        router: create_router(state),
        messages,
        stats,
    }
}

pub fn json_request(method: Method, path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}
