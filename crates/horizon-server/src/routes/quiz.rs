//! Quiz generation, storage and submission routes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use horizon_core::Error;
use horizon_extract::complexity::analyze_difficulty;
use horizon_store::validate::{sanitize_user_info, MAX_QUESTIONS};
use horizon_store::{score_quiz, NewQuiz};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::info;

use super::error_response;
use crate::state::AppState;

const DEFAULT_QUESTION_COUNT: usize = 5;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quiz/generate", post(generate_quiz))
        .route("/quiz/create", post(create_quiz))
        .route("/quiz/list", get(list_quizzes))
        .route("/quiz/{id}", get(get_quiz))
        .route("/quiz/{id}/submit", post(submit_quiz))
        .route("/session/{id}/results", get(get_session_results))
}

#[derive(Deserialize)]
struct GenerateQuizRequest {
    #[serde(default)]
    text: String,
    num_questions: Option<usize>,
    /// Fixes the question mix and distractors for reproducible output.
    seed: Option<u64>,
}

/// POST /api/quiz/generate: draft questions from text.
async fn generate_quiz(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateQuizRequest>,
) -> impl IntoResponse {
    if let Err(e) = state.notes.check_length(&req.text, 1) {
        return error_response(&e);
    }

    let count = req
        .num_questions
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .clamp(1, MAX_QUESTIONS);
    let mut rng = match req.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let analysis = analyze_difficulty(&req.text);
    let questions = state.quizzes.generate(&req.text, count, &mut rng);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": format!("Generated {} questions successfully", questions.len()),
            "questions": questions,
            "text_analysis": analysis,
        })),
    )
}

/// POST /api/quiz/create
async fn create_quiz(
    State(state): State<Arc<AppState>>,
    Json(quiz): Json<NewQuiz>,
) -> impl IntoResponse {
    match state.store.save_quiz(quiz) {
        Ok(quiz) => {
            info!("Created quiz {} ({} questions)", quiz.id, quiz.questions.len());
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "success": true,
                    "quiz_id": quiz.id,
                    "message": "Quiz created successfully",
                })),
            )
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/quiz/list: newest first.
async fn list_quizzes(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_quizzes() {
        Ok(quizzes) => (
            StatusCode::OK,
            Json(serde_json::json!({ "quizzes": quizzes })),
        ),
        Err(e) => error_response(&e),
    }
}

/// GET /api/quiz/{id}: questions without answers.
async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.load_quiz(&id) {
        Ok(quiz) => (StatusCode::OK, Json(serde_json::json!(quiz.public_view()))),
        Err(e) => error_response(&e),
    }
}

#[derive(Deserialize)]
struct SubmitRequest {
    answers: HashMap<String, String>,
    #[serde(default)]
    user_info: BTreeMap<String, String>,
}

/// POST /api/quiz/{id}/submit: score answers and record a session.
async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SubmitRequest>,
) -> impl IntoResponse {
    if uuid::Uuid::parse_str(&id).is_err() {
        return error_response(&Error::Validation("Invalid quiz ID format".into()));
    }

    let quiz = match state.store.load_quiz(&id) {
        Ok(quiz) => quiz,
        Err(e) => return error_response(&e),
    };

    let results = score_quiz(&quiz, &req.answers);
    let user_info = sanitize_user_info(req.user_info);

    match state.store.save_session(&quiz.id, results, user_info) {
        Ok(session) => {
            info!(
                "Session {} scored {}% on quiz {}",
                session.id, session.results.score_percentage, quiz.id
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "session_id": session.id,
                    "results": session.results,
                })),
            )
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/session/{id}/results
async fn get_session_results(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.load_session(&id) {
        Ok(session) => (StatusCode::OK, Json(serde_json::json!(session))),
        Err(e) => error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{app, send};

    const TEXT: &str = "Erosion is the gradual wearing away of rock by wind and water. \
        The Eiffel Tower was completed in 1889 for the World Fair. \
        Rivers flood because heavy rain falls in the mountains. \
        A glacier is a slow moving mass of ice.";

    fn sample_quiz() -> serde_json::Value {
        json!({
            "title": "Rivers",
            "description": "Basic <b>geography</b>",
            "questions": [
                {
                    "question": "What is erosion?",
                    "options": { "A": "Wearing away of rock", "B": "A river", "C": "A cloud", "D": "Rain" },
                    "correct_answer": "A",
                    "explanation": "Erosion wears rock away."
                },
                {
                    "question": "When was the Eiffel Tower completed?",
                    "options": { "A": "1889", "B": "1899", "C": "1879", "D": "1901" },
                    "correct_answer": "A"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_generate_is_reproducible_with_seed() {
        let (app, _dir) = app();
        let body = json!({ "text": TEXT, "num_questions": 4, "seed": 7 });
        let (status, first) = send(&app, "POST", "/api/quiz/generate", Some(body.clone())).await;
        let (_, second) = send(&app, "POST", "/api/quiz/generate", Some(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["success"], true);
        assert_eq!(first["questions"], second["questions"]);
        assert!(first["text_analysis"]["reading_ease"].is_number());

        let questions = first["questions"].as_array().unwrap();
        assert!(questions.len() <= 4);
        for q in questions {
            assert_eq!(q["correct_answer"], "A");
            assert_eq!(q["options"].as_object().unwrap().len(), 4);
        }
    }

    #[tokio::test]
    async fn test_generate_requires_text() {
        let (app, _dir) = app();
        let (status, body) = send(&app, "POST", "/api/quiz/generate", Some(json!({ "text": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_take_and_review_quiz() {
        let (app, _dir) = app();

        let (status, created) = send(&app, "POST", "/api/quiz/create", Some(sample_quiz())).await;
        assert_eq!(status, StatusCode::CREATED);
        let quiz_id = created["quiz_id"].as_str().unwrap().to_string();

        let (_, listed) = send(&app, "GET", "/api/quiz/list", None).await;
        assert_eq!(listed["quizzes"][0]["id"], quiz_id.as_str());
        assert_eq!(listed["quizzes"][0]["question_count"], 2);

        let (status, quiz) = send(&app, "GET", &format!("/api/quiz/{}", quiz_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quiz["description"], "Basic &lt;b&gt;geography&lt;/b&gt;");
        assert!(quiz["questions"][0].get("correct_answer").is_none());
        assert!(quiz["questions"][0].get("explanation").is_none());

        let (status, submitted) = send(
            &app,
            "POST",
            &format!("/api/quiz/{}/submit", quiz_id),
            Some(json!({ "answers": { "0": "a", "1": "B" }, "user_info": { "name": "Sam" } })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["results"]["correct_answers"], 1);
        assert_eq!(submitted["results"]["score_percentage"], 50.0);

        let session_id = submitted["session_id"].as_str().unwrap();
        let (status, session) =
            send(&app, "GET", &format!("/api/session/{}/results", session_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["quiz_id"], quiz_id.as_str());
        assert_eq!(session["user_info"]["name"], "Sam");
        assert_eq!(session["results"]["detailed_results"][1]["your_answer"], "B");
    }

    #[tokio::test]
    async fn test_duplicate_quiz_conflicts() {
        let (app, _dir) = app();
        send(&app, "POST", "/api/quiz/create", Some(sample_quiz())).await;
        let (status, body) = send(&app, "POST", "/api/quiz/create", Some(sample_quiz())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_invalid_quiz_rejected() {
        let (app, _dir) = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/quiz/create",
            Some(json!({ "title": "Empty", "questions": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("At least one question"));
    }

    #[tokio::test]
    async fn test_submit_checks_quiz_id() {
        let (app, _dir) = app();
        let answers = json!({ "answers": {} });

        let (status, _) = send(&app, "POST", "/api/quiz/not-a-uuid/submit", Some(answers.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = format!("/api/quiz/{}/submit", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "POST", &missing, Some(answers)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/session/nope/results", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
