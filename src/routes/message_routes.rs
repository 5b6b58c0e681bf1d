//! Entry point for client log and metric messages.

use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::RelayError;
use crate::handlers::{DispatchOutcome, Route};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Hands the request to the dispatcher and maps the outcome to a response:
/// 404 and 200 with empty bodies, 500 with a one-line plain text reason.
///
/// Method and path are checked before the body is read, so oversized or
/// broken bodies never turn a 404 into anything else.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();

    let route = state.dispatcher.route(&parts.method, path);
    if matches!(route, Route::NotFound) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let outcome = match read_body(body, state.config.http.max_body_bytes).await {
        Ok(bytes) => state.dispatcher.handle(route, &bytes),
        Err(e) => DispatchOutcome::Handled(Err(e)),
    };

    match outcome {
        DispatchOutcome::NotFound => StatusCode::NOT_FOUND.into_response(),
        DispatchOutcome::Handled(Ok(())) => StatusCode::OK.into_response(),
        DispatchOutcome::Handled(Err(e)) => {
            report_failure(&state, path, &e);
            HTTPError::from(e).into_response()
        }
    }
}

async fn read_body(body: Body, limit: usize) -> Result<axum::body::Bytes, RelayError> {
    to_bytes(body, limit)
        .await
        .map_err(|e| RelayError::Body(e.to_string()))
}

fn report_failure(state: &AppState, path: &str, err: &RelayError) {
    let key = format!("dispatch.{}", err.kind());
    if let Some(suppressed) = state.error_log_throttle.should_emit(&key) {
        error!(
            error_kind = err.kind(),
            path = path,
            suppressed = suppressed,
            "Failed to handle message: {:?}",
            err
        );
    }
}
