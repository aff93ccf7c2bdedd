//! Data types for quizzes, results and sessions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Quiz as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub questions: Vec<QuestionRecord>,
}

/// A quiz row from the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionRecord>,
    pub content_hash: String,
    /// RFC 3339.
    pub created_at: String,
}

impl Quiz {
    /// The quiz as shown to a quiz taker: no answers, no explanations.
    pub fn public_view(&self) -> PublicQuiz {
        PublicQuiz {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| PublicQuestion {
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            question_count: self.questions.len(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub question: String,
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicQuiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<PublicQuestion>,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub question_count: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Two decimal places.
    pub score_percentage: f64,
    pub detailed_results: Vec<QuestionResult>,
    pub timestamp: String,
}

/// A scored submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    pub id: String,
    pub quiz_id: String,
    pub results: QuizResults,
    #[serde(default)]
    pub user_info: BTreeMap<String, String>,
    pub created_at: String,
}

/// Store-level statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreStats {
    pub quizzes: i64,
    pub sessions: i64,
    pub questions: i64,
    pub db_path: String,
    pub db_size_mb: f64,
}
