//! Input validation and sanitization for quiz creation and submission.

use std::collections::BTreeMap;

use horizon_core::{Error, Result};

use crate::types::NewQuiz;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_QUESTION_LEN: usize = 500;
pub const MAX_EXPLANATION_LEN: usize = 1000;
pub const MAX_OPTION_LEN: usize = 200;
pub const MAX_USER_INFO_LEN: usize = 100;
pub const MAX_QUESTIONS: usize = 50;

/// Trim, truncate to `max_len` characters, then HTML-escape.
///
/// The limit applies to the input, so an entity is never cut in half.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.trim().chars().take(max_len) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Check structure and sanitize every string of a quiz.
pub fn validate_new_quiz(mut quiz: NewQuiz) -> Result<NewQuiz> {
    quiz.title = sanitize(&quiz.title, MAX_TITLE_LEN);
    if quiz.title.is_empty() {
        return Err(Error::Validation("Missing required field: title".into()));
    }
    quiz.description = sanitize(&quiz.description, MAX_DESCRIPTION_LEN);

    if quiz.questions.is_empty() {
        return Err(Error::Validation("At least one question is required".into()));
    }
    if quiz.questions.len() > MAX_QUESTIONS {
        return Err(Error::Validation(format!(
            "Maximum {} questions allowed",
            MAX_QUESTIONS
        )));
    }

    for (i, q) in quiz.questions.iter_mut().enumerate() {
        if q.question.trim().is_empty() || q.options.is_empty() || q.correct_answer.trim().is_empty() {
            return Err(Error::Validation(format!(
                "Question {} is missing required fields",
                i + 1
            )));
        }
        q.question = sanitize(&q.question, MAX_QUESTION_LEN);
        q.explanation = sanitize(&q.explanation, MAX_EXPLANATION_LEN);
        q.correct_answer = q.correct_answer.trim().to_string();
        for value in q.options.values_mut() {
            *value = sanitize(value, MAX_OPTION_LEN);
        }
    }

    Ok(quiz)
}

pub fn sanitize_user_info(info: BTreeMap<String, String>) -> BTreeMap<String, String> {
    info.into_iter()
        .map(|(k, v)| (k, sanitize(&v, MAX_USER_INFO_LEN)))
        .collect()
}
