use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;
use tracing::debug;

use super::base::{MessageHandler, Payload};
use super::log_handler::LogHandler;
use super::metric_handler::MetricHandler;
use crate::config::MetricsConfig;
use crate::error::Result;
use crate::statsd::StatsClient;
use crate::utils::log_sink::LogSink;

/// Body field that selects the handler on the root route.
pub const MESSAGE_TYPE_KEY: &str = "message-type";

/// Where a request goes, decided from method and path alone.
pub enum Route {
    /// Wrong method or unknown path; the body is never read.
    NotFound,
    /// `POST /<type>` with a registered handler.
    Handler(Arc<dyn MessageHandler>),
    /// `POST /`: the handler is named by the body's `message-type` field.
    Envelope,
}

/// How a request ended up.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// Wrong method, unknown route or unknown message type.
    NotFound,
    /// A handler ran; its result decides between 200 and 500.
    Handled(Result<()>),
}

/// Routes incoming messages to their handlers.
///
/// `POST /<type>` goes straight to the handler registered for `<type>`.
/// `POST /` reads the type from the `message-type` body field, which is how
/// older clients address the relay.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn MessageHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The standard `log` and `metric` handlers.
    pub fn with_defaults(
        statist: Arc<dyn StatsClient>,
        message_sink: Arc<dyn LogSink>,
        metrics: &MetricsConfig,
    ) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(Arc::new(LogHandler::new(message_sink)));
        dispatcher.register(Arc::new(MetricHandler::new(statist, metrics)));
        dispatcher
    }

    pub fn register(&mut self, handler: Arc<dyn MessageHandler>) {
        self.handlers.insert(handler.message_type(), handler);
    }

    pub fn resolve(&self, message_type: &str) -> Option<Arc<dyn MessageHandler>> {
        self.handlers.get(message_type).cloned()
    }

    pub fn message_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Method check and route resolution.
    pub fn route(&self, method: &Method, path: &str) -> Route {
        if *method != Method::POST {
            debug!("Rejecting {} {}: only POST is served", method, path);
            return Route::NotFound;
        }
        if path == "/" {
            return Route::Envelope;
        }
        match path
            .strip_prefix('/')
            .and_then(|message_type| self.resolve(message_type))
        {
            Some(handler) => Route::Handler(handler),
            None => {
                debug!("No route for {}", path);
                Route::NotFound
            }
        }
    }

    /// Parses the body and runs the handler picked by [`Dispatcher::route`].
    pub fn handle(&self, route: Route, body: &[u8]) -> DispatchOutcome {
        let handler = match route {
            Route::NotFound => return DispatchOutcome::NotFound,
            Route::Handler(handler) => handler,
            Route::Envelope => {
                let payload = match parse(body) {
                    Ok(payload) => payload,
                    Err(e) => return DispatchOutcome::Handled(Err(e)),
                };
                let handler = payload
                    .get(MESSAGE_TYPE_KEY)
                    .and_then(Value::as_str)
                    .and_then(|message_type| self.resolve(message_type));
                return match handler {
                    Some(handler) => DispatchOutcome::Handled(handler.handle(&payload)),
                    None => {
                        debug!("No handler for message-type {:?}", payload.get(MESSAGE_TYPE_KEY));
                        DispatchOutcome::NotFound
                    }
                };
            }
        };

        DispatchOutcome::Handled(parse(body).and_then(|payload| handler.handle(&payload)))
    }

    /// Runs one request through method check, route resolution, body parse
    /// and the handler.
    pub fn dispatch(&self, method: &Method, path: &str, body: &[u8]) -> DispatchOutcome {
        self.handle(self.route(method, path), body)
    }
}

/// Parses a request body, which must be a JSON object.
pub fn parse(body: &[u8]) -> Result<Payload> {
    Ok(serde_json::from_slice::<Payload>(body)?)
}
