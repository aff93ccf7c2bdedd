//! Horizon Store: quizzes, answer scoring and quiz sessions on SQLite.

pub mod schema;
pub mod scoring;
pub mod sqlite;
pub mod store;
pub mod types;
pub mod validate;

pub use scoring::score_quiz;
pub use sqlite::SqliteQuizStore;
pub use store::QuizStore;
pub use types::*;
