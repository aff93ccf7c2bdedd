//! Shared application state.

use std::sync::Arc;

use horizon_core::HorizonConfig;
use horizon_extract::{NoteGenerator, QuizGenerator};
use horizon_store::QuizStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: HorizonConfig,
    pub store: Arc<dyn QuizStore>,
    pub notes: NoteGenerator,
    pub quizzes: QuizGenerator,
}

impl AppState {
    pub fn new(config: HorizonConfig, store: Arc<dyn QuizStore>) -> Self {
        let notes = NoteGenerator::from_config(&config);
        Self {
            config,
            store,
            notes,
            quizzes: QuizGenerator::new(),
        }
    }
}
