//! Stats route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use horizon_extract::NoteStyle;
use horizon_store::StoreStats;
use tracing::warn;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// GET /api/stats: quiz counts and active limits.
async fn get_stats(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let store_stats = state.store.stats().unwrap_or_else(|e| {
        warn!("Failed to read store stats: {}", e);
        StoreStats {
            quizzes: 0,
            sessions: 0,
            questions: 0,
            db_path: String::new(),
            db_size_mb: 0.0,
        }
    });

    Json(serde_json::json!({
        "quizzes": store_stats.quizzes,
        "sessions": store_stats.sessions,
        "questions": store_stats.questions,
        "dbSizeMb": store_stats.db_size_mb,
        "noteStyles": NoteStyle::ALL.len(),
        "limits": {
            "maxTextLength": state.notes.max_text_length(),
            "minNotesLength": state.notes.min_text_length(),
        },
        "extraction": state.notes.limits(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{app, send};

    #[tokio::test]
    async fn test_empty_store_stats() {
        let (app, _dir) = app();
        let (status, body) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quizzes"], 0);
        assert_eq!(body["sessions"], 0);
        assert_eq!(body["noteStyles"], 6);
        assert!(body["limits"]["maxTextLength"].is_number());
        assert_eq!(body["extraction"]["max_definitions"], 6);
    }
}
