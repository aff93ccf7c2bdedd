//! HTTP route handlers, all nested under `/api`.

pub mod notes;
pub mod quiz;
pub mod stats;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use horizon_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(notes::routes())
        .merge(quiz::routes())
        .merge(stats::routes())
}

/// `{success: false, error}` with the status matching the error kind.
///
/// Only [`Error::public_message`] reaches the client; server-side failures
/// are logged in full.
pub(crate) fn error_response(err: &Error) -> (StatusCode, Json<serde_json::Value>) {
    let status = match err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::EmptyInput { .. } | Error::InputTooLong { .. } | Error::Validation(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::DuplicateContent(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if !err.is_client_error() {
        warn!("Request failed: {}", err);
    }
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": err.public_message(),
        })),
    )
}
