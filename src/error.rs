//! Error type shared by the message handlers and the metric backends.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Everything that turns a routed request into a 500.
///
/// Routing problems are deliberately absent: a bad method or path never
/// reaches a handler and is answered with a plain 404 by the dispatcher.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid metric type: {0}")]
    InvalidMetricType(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("invalid value for field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("{0}")]
    Backend(#[from] std::io::Error),
}

impl RelayError {
    /// Stable name of the error kind, as shown to HTTP clients.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Body(_) => "BodyError",
            RelayError::Parse(_) => "ParseError",
            RelayError::InvalidMetricType(_) => "InvalidMetricType",
            RelayError::MissingField(_) => "MissingField",
            RelayError::InvalidField { .. } => "InvalidField",
            RelayError::Backend(_) => "BackendError",
        }
    }

    /// One-line `"<kind>: <message>"` rendering used for 500 response bodies.
    pub fn client_message(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        RelayError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
