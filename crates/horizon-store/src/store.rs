//! Storage seam for quizzes and sessions.

use std::collections::BTreeMap;

use horizon_core::Result;

use crate::types::{NewQuiz, Quiz, QuizResults, QuizSession, QuizSummary, StoreStats};

/// Persistent quiz and session storage.
///
/// Handlers hold an `Arc<dyn QuizStore>`; implementations serialize their
/// own access.
pub trait QuizStore: Send + Sync {
    /// Persist a validated quiz and return it with its new id.
    fn save_quiz(&self, quiz: NewQuiz) -> Result<Quiz>;

    /// `Error::NotFound` when no quiz has this id.
    fn load_quiz(&self, id: &str) -> Result<Quiz>;

    /// Newest first.
    fn list_quizzes(&self) -> Result<Vec<QuizSummary>>;

    fn save_session(
        &self,
        quiz_id: &str,
        results: QuizResults,
        user_info: BTreeMap<String, String>,
    ) -> Result<QuizSession>;

    /// `Error::NotFound` when no session has this id.
    fn load_session(&self, id: &str) -> Result<QuizSession>;

    fn stats(&self) -> Result<StoreStats>;
}
