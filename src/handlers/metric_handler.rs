use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::base::{lookup, MessageHandler, Payload};
use crate::config::MetricsConfig;
use crate::error::{RelayError, Result};
use crate::statsd::{MetricType, StatsClient};
use crate::utils::value::value_to_string;

const TYPE_KEYS: &[&str] = &["type", "metric-type"];
const LABEL_KEYS: &[&str] = &["label", "metric-label"];
const VALUE_KEYS: &[&str] = &["value", "metric-value"];

/// Characters that would corrupt a StatsD line if they appeared in a label.
const RESERVED_LABEL_CHARS: &[char] = &[':', '|', '@'];

/// Translates metric messages into calls on the metric backend.
pub struct MetricHandler {
    statist: Arc<dyn StatsClient>,
    require_explicit_value: bool,
}

impl MetricHandler {
    pub fn new(statist: Arc<dyn StatsClient>, config: &MetricsConfig) -> Self {
        Self {
            statist,
            require_explicit_value: config.require_explicit_value,
        }
    }

    fn metric_type(payload: &Payload) -> Result<MetricType> {
        match lookup(payload, TYPE_KEYS) {
            Some(Value::String(name)) => {
                MetricType::parse(name).ok_or_else(|| RelayError::InvalidMetricType(name.clone()))
            }
            Some(other) => Err(RelayError::InvalidMetricType(value_to_string(other))),
            None => Err(RelayError::InvalidMetricType("null".to_string())),
        }
    }

    fn label(payload: &Payload) -> Result<&str> {
        let label = match lookup(payload, LABEL_KEYS) {
            Some(Value::String(label)) => label.as_str(),
            Some(_) => return Err(RelayError::invalid_field("label", "expected a string")),
            None => return Err(RelayError::MissingField("label")),
        };
        if label.is_empty() {
            return Err(RelayError::invalid_field("label", "must not be empty"));
        }
        if label
            .chars()
            .any(|c| c.is_control() || RESERVED_LABEL_CHARS.contains(&c))
        {
            return Err(RelayError::invalid_field(
                "label",
                "must not contain ':', '|', '@' or control characters",
            ));
        }
        Ok(label)
    }

    fn value(&self, payload: &Payload, metric: MetricType) -> Result<f64> {
        match lookup(payload, VALUE_KEYS) {
            None | Some(Value::Null) => {
                if self.require_explicit_value && metric != MetricType::Incr {
                    Err(RelayError::MissingField("value"))
                } else {
                    Ok(1.0)
                }
            }
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| RelayError::invalid_field("value", "not representable as a float")),
            Some(_) => Err(RelayError::invalid_field("value", "expected a number")),
        }
    }
}

impl MessageHandler for MetricHandler {
    fn message_type(&self) -> &'static str {
        "metric"
    }

    fn handle(&self, payload: &Payload) -> Result<()> {
        let metric = Self::metric_type(payload)?;
        let label = Self::label(payload)?;
        let value = self.value(payload, metric)?;

        debug!(
            "Recording {} metric '{}' = {} via {}",
            metric.as_str(),
            label,
            value,
            self.statist.backend_type()
        );
        self.statist.record(metric, label, value)
    }
}
