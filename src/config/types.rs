use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::http::HttpConfig;
use super::logging::LoggingConfig;
use super::statsd::{MetricsConfig, StatsdConfig};

/// Environment variable naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "CNXLOGGING_CONFIG";
/// Prefix for environment overrides, e.g. `CNXLOGGING_STATSD__HOST`.
pub const ENV_PREFIX: &str = "CNXLOGGING_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub bind_address: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub statsd: StatsdConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Builds the figment used at startup: the YAML file, then `CNXLOGGING_*`
/// environment overrides on top.
pub fn figment() -> Figment {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.yaml".to_string());
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]).split("__"))
}

/// Extracts a versioned config from any figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from `config.yaml` (or `$CNXLOGGING_CONFIG`) plus environment
/// overrides. Exits the process if the configuration is unusable.
pub fn load_config() -> ConfigV1 {
    match extract_config(&figment()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(schema) => println!("{}", schema),
        Err(e) => eprintln!("Error rendering configuration schema: {}", e),
    }
}
