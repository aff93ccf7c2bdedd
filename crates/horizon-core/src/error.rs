//! Error types for Horizon.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Text too short: {actual} characters, need at least {min}")]
    EmptyInput { min: usize, actual: usize },

    #[error("Text too long: {actual} characters, limit is {max}")]
    InputTooLong { max: usize, actual: usize },

    #[error("Extraction failed: {0}")]
    InternalExtraction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate content: hash={0}")]
    DuplicateContent(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Message safe to hand back to an HTTP client.
    ///
    /// Input and validation errors are descriptive; anything originating in
    /// storage or extraction internals collapses to a generic sentence.
    pub fn public_message(&self) -> String {
        match self {
            Error::EmptyInput { .. }
            | Error::InputTooLong { .. }
            | Error::NotFound(_)
            | Error::Validation(_) => self.to_string(),
            Error::DuplicateContent(_) => "An identical quiz already exists".to_string(),
            Error::InternalExtraction(_) => {
                "Content extraction failed for this text".to_string()
            }
            Error::Storage(_) | Error::Database(_) | Error::Io(_) | Error::Json(_) => {
                "A storage error occurred".to_string()
            }
        }
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput { .. }
                | Error::InputTooLong { .. }
                | Error::NotFound(_)
                | Error::Validation(_)
                | Error::DuplicateContent(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_are_masked() {
        let err = Error::Database("no such table: quizzes at /srv/data/db".into());
        assert_eq!(err.public_message(), "A storage error occurred");
        assert!(!err.is_client_error());

        let err = Error::InternalExtraction("regex blew up".into());
        assert!(!err.public_message().contains("regex"));
    }

    #[test]
    fn test_input_errors_are_descriptive() {
        let err = Error::EmptyInput { min: 100, actual: 12 };
        assert_eq!(
            err.public_message(),
            "Text too short: 12 characters, need at least 100"
        );
        assert!(err.is_client_error());
    }
}
