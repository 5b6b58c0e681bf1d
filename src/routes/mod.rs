//! HTTP route definitions.
//!
//! The relay has no fixed route table: every request falls through to the
//! message dispatcher, which answers unknown methods and paths with 404.

mod message_routes;

use crate::state::AppState;
use axum::Router;

/// Creates the application router and attaches the application state.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(message_routes::dispatch)
        .with_state(state)
}
