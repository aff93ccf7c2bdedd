//! Note generation routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use horizon_extract::{NoteOptions, NoteStyle, NotesResponse};
use serde::Deserialize;

use super::error_response;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes/generate", post(generate_notes))
        .route("/notes/styles", get(list_styles))
        .route("/notes/analyze", post(analyze_notes))
}

#[derive(Deserialize)]
struct NotesRequest {
    #[serde(default)]
    text: String,
    #[serde(default)]
    style: NoteStyle,
    #[serde(default)]
    options: NoteOptions,
}

/// POST /api/notes/generate: notes in one style.
async fn generate_notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NotesRequest>,
) -> impl IntoResponse {
    let response = state.notes.respond(&req.text, req.style, &req.options);
    (response_status(&response), Json(response))
}

fn response_status(response: &NotesResponse) -> StatusCode {
    if response.success {
        StatusCode::OK
    } else if response.client_error {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// GET /api/notes/styles
async fn list_styles() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "styles": NoteStyle::catalog(),
    }))
}

/// POST /api/notes/analyze: notes plus report, complexity, study aids and
/// content statistics.
async fn analyze_notes(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NotesRequest>,
) -> impl IntoResponse {
    match state.notes.analyze_document(&req.text, req.style, &req.options) {
        Ok(analysis) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "notes": analysis.notes,
                "report": analysis.report,
                "complexity": analysis.complexity,
                "study_aids": analysis.study_aids,
                "statistics": analysis.statistics,
            })),
        ),
        Err(e) => error_response(&e),
    }
}
