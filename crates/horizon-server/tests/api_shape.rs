//! Response shape tests: pins the JSON field names and types that browser
//! clients read from each endpoint.
//!
//! Each test builds the full router over a temporary database and drives it
//! in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use horizon_core::HorizonConfig;
use horizon_server::{build_router, AppState};
use horizon_store::SqliteQuizStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const TEXT: &str = "Mitochondria are the organelles that release energy inside cells. \
    The cell membrane controls what enters and leaves the cell. \
    In 1665, Robert Hooke first described cells under a microscope. \
    Cells divide because organisms need to grow and repair tissue.";

fn app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = HorizonConfig::from_env(dir.path()).unwrap();
    let store = SqliteQuizStore::open(&config.data_paths.db).unwrap();
    (build_router(Arc::new(AppState::new(config, Arc::new(store)))), dir)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Notes envelope: `{success, notes, style, summary{brief, standard,
/// detailed}, counts{key_points, definitions, facts}, original_word_count,
/// notes_word_count, compression_ratio}` with no `error` key.
#[tokio::test]
async fn test_notes_success_shape() {
    let (app, _dir) = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/notes/generate",
        Some(json!({ "text": TEXT, "style": "numbered" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["success"].is_boolean());
    assert!(body["notes"].is_string());
    assert!(body["style"].is_string());
    assert!(body["summary"]["brief"].is_string());
    assert!(body["summary"]["standard"].is_string());
    assert!(body["summary"]["detailed"].is_string());
    assert!(body["counts"]["key_points"].is_number());
    assert!(body["counts"]["definitions"].is_number());
    assert!(body["counts"]["facts"].is_number());
    assert!(body["original_word_count"].is_number());
    assert!(body["notes_word_count"].is_number());
    assert!(body["compression_ratio"].is_number());
    assert!(body.get("error").is_none());
}

/// Failure envelope: exactly `{success: false, error}`.
#[tokio::test]
async fn test_notes_error_shape() {
    let (app, _dir) = app();
    let (_, body) = call(&app, "POST", "/api/notes/generate", Some(json!({ "text": "" }))).await;

    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

/// Style catalogue entries: `{id, name, description, icon}`.
#[tokio::test]
async fn test_styles_shape() {
    let (app, _dir) = app();
    let (_, body) = call(&app, "GET", "/api/notes/styles", None).await;

    for style in body["styles"].as_array().unwrap() {
        assert!(style["id"].is_string());
        assert!(style["name"].is_string());
        assert!(style["description"].is_string());
        assert!(style["icon"].is_string());
    }
}

/// Generated quiz: `{success, message, questions[{question, options{A..D},
/// correct_answer, explanation, kind}], text_analysis{reading_ease,
/// difficulty_level, word_count, sentence_count, recommended_questions}}`.
#[tokio::test]
async fn test_quiz_generate_shape() {
    let (app, _dir) = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/quiz/generate",
        Some(json!({ "text": TEXT, "num_questions": 3, "seed": 42 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    for q in body["questions"].as_array().unwrap() {
        assert!(q["question"].is_string());
        for key in ["A", "B", "C", "D"] {
            assert!(q["options"][key].is_string());
        }
        assert!(q["correct_answer"].is_string());
        assert!(q["explanation"].is_string());
        assert!(q["kind"].is_string());
    }

    let analysis = &body["text_analysis"];
    assert!(analysis["reading_ease"].is_number());
    assert!(analysis["difficulty_level"].is_string());
    assert!(analysis["word_count"].is_number());
    assert!(analysis["sentence_count"].is_number());
    assert_eq!(analysis["recommended_questions"], 3);
}

/// Submission: `{success, session_id, results{total_questions,
/// correct_answers, score_percentage, detailed_results[], timestamp}}`.
#[tokio::test]
async fn test_submission_shape() {
    let (app, _dir) = app();
    let quiz = json!({
        "title": "Cells",
        "questions": [{
            "question": "Who first described cells?",
            "options": { "A": "Robert Hooke", "B": "Isaac Newton" },
            "correct_answer": "A"
        }]
    });
    let (_, created) = call(&app, "POST", "/api/quiz/create", Some(quiz)).await;
    assert!(created["quiz_id"].is_string());
    assert!(created["message"].is_string());

    let uri = format!("/api/quiz/{}/submit", created["quiz_id"].as_str().unwrap());
    let (_, body) = call(&app, "POST", &uri, Some(json!({ "answers": { "0": "A" } }))).await;

    assert!(body["session_id"].is_string());
    let results = &body["results"];
    assert_eq!(results["total_questions"], 1);
    assert_eq!(results["correct_answers"], 1);
    assert!(results["score_percentage"].is_number());
    assert!(results["timestamp"].is_string());
    let detail = &results["detailed_results"][0];
    assert!(detail["question"].is_string());
    assert!(detail["your_answer"].is_string());
    assert!(detail["correct_answer"].is_string());
    assert!(detail["is_correct"].is_boolean());
    assert!(detail["explanation"].is_string());
}

/// Stats: `{quizzes, sessions, questions, dbSizeMb, noteStyles, limits,
/// extraction}`.
#[tokio::test]
async fn test_stats_shape() {
    let (app, _dir) = app();
    let (_, body) = call(&app, "GET", "/api/stats", None).await;

    assert!(body["quizzes"].is_number());
    assert!(body["sessions"].is_number());
    assert!(body["questions"].is_number());
    assert!(body["dbSizeMb"].is_number());
    assert!(body["limits"]["minNotesLength"].is_number());
    assert!(body["extraction"].is_object());
}
