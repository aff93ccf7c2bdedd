//! Answer scoring.

use std::collections::HashMap;

use crate::types::{QuestionResult, Quiz, QuizResults};

/// Score `answers` against `quiz`.
///
/// Answers are keyed by zero-based question index as a string (`"0"`,
/// `"1"`, …). A missing answer counts as wrong. Comparison ignores case and
/// surrounding whitespace.
pub fn score_quiz(quiz: &Quiz, answers: &HashMap<String, String>) -> QuizResults {
    let detailed_results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let your_answer = answers.get(&i.to_string()).cloned().unwrap_or_default();
            let is_correct = your_answer.trim().to_lowercase() == q.correct_answer.trim().to_lowercase();
            QuestionResult {
                question: q.question.clone(),
                your_answer,
                correct_answer: q.correct_answer.clone(),
                is_correct,
                explanation: q.explanation.clone(),
            }
        })
        .collect();

    let total_questions = detailed_results.len();
    let correct_answers = detailed_results.iter().filter(|r| r.is_correct).count();
    let score_percentage = if total_questions > 0 {
        let pct = correct_answers as f64 / total_questions as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    } else {
        0.0
    };

    QuizResults {
        total_questions,
        correct_answers,
        score_percentage,
        detailed_results,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}
