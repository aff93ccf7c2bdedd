//! SQLite-backed quiz store.
//!
//! Questions, results and user info are stored as JSON text columns; quizzes
//! are deduplicated by a SHA-256 hash of their title and questions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::store::QuizStore;
use crate::types::*;
use crate::validate::validate_new_quiz;
use horizon_core::{Error, Result};

pub struct SqliteQuizStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteQuizStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be `db_dir/horizon.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir).map_err(|e| Error::Storage(e.to_string()))?;
        let db_path = db_dir.join("horizon.db");

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let stats = store.stats()?;
        info!(
            "SqliteQuizStore initialized: {} quizzes, {} sessions, path={}",
            stats.quizzes,
            stats.sessions,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    /// Hex SHA-256 over the title and the serialized questions.
    pub fn content_hash(quiz: &NewQuiz) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(quiz.title.as_bytes());
        hasher.update([0u8]);
        hasher.update(serde_json::to_vec(&quiz.questions)?);
        Ok(hex::encode(hasher.finalize()))
    }

    fn count(conn: &Connection, table: &str) -> Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    fn row_to_quiz(row: &rusqlite::Row<'_>) -> rusqlite::Result<(Quiz, String)> {
        let questions_json: String = row.get("questions_json")?;
        Ok((
            Quiz {
                id: row.get("id")?,
                title: row.get("title")?,
                description: row.get("description")?,
                questions: Vec::new(),
                content_hash: row.get("content_hash")?,
                created_at: row.get("created_at")?,
            },
            questions_json,
        ))
    }

    fn row_to_session(row: &rusqlite::Row<'_>) -> rusqlite::Result<(QuizSession, String, Option<String>)> {
        Ok((
            QuizSession {
                id: row.get("id")?,
                quiz_id: row.get("quiz_id")?,
                results: QuizResults {
                    total_questions: 0,
                    correct_answers: 0,
                    score_percentage: 0.0,
                    detailed_results: Vec::new(),
                    timestamp: String::new(),
                },
                user_info: BTreeMap::new(),
                created_at: row.get("created_at")?,
            },
            row.get("results_json")?,
            row.get("user_info_json")?,
        ))
    }
}

impl QuizStore for SqliteQuizStore {
    fn save_quiz(&self, quiz: NewQuiz) -> Result<Quiz> {
        let quiz = validate_new_quiz(quiz)?;
        let content_hash = Self::content_hash(&quiz)?;
        let questions_json = serde_json::to_string(&quiz.questions)?;
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO quizzes (id, title, description, questions_json, content_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![
            id,
            quiz.title,
            quiz.description,
            questions_json,
            content_hash,
            created_at
        ])
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint") {
                Error::DuplicateContent(content_hash.clone())
            } else {
                Error::Database(e.to_string())
            }
        })?;

        debug!("Saved quiz {} with {} questions", id, quiz.questions.len());
        Ok(Quiz {
            id,
            title: quiz.title,
            description: quiz.description,
            questions: quiz.questions,
            content_hash,
            created_at,
        })
    }

    fn load_quiz(&self, id: &str) -> Result<Quiz> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM quizzes WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], Self::row_to_quiz)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let (mut quiz, questions_json) = row.ok_or_else(|| Error::NotFound(format!("Quiz {}", id)))?;
        quiz.questions = serde_json::from_str(&questions_json)?;
        Ok(quiz)
    }

    fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM quizzes ORDER BY created_at DESC, rowid DESC")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], Self::row_to_quiz)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut summaries = Vec::new();
        for row in rows {
            let (mut quiz, questions_json) = row.map_err(|e| Error::Database(e.to_string()))?;
            // Rows whose questions no longer parse are skipped.
            match serde_json::from_str(&questions_json) {
                Ok(questions) => {
                    quiz.questions = questions;
                    summaries.push(quiz.summary());
                }
                Err(e) => debug!("Skipping quiz {}: {}", quiz.id, e),
            }
        }
        Ok(summaries)
    }

    fn save_session(
        &self,
        quiz_id: &str,
        results: QuizResults,
        user_info: BTreeMap<String, String>,
    ) -> Result<QuizSession> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        let results_json = serde_json::to_string(&results)?;
        let user_info_json = if user_info.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&user_info)?)
        };

        let conn = self.conn.lock();
        conn.prepare_cached(
            "INSERT INTO quiz_sessions (id, quiz_id, results_json, user_info_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| Error::Database(e.to_string()))?
        .execute(params![id, quiz_id, results_json, user_info_json, created_at])
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint") {
                Error::NotFound(format!("Quiz {}", quiz_id))
            } else {
                Error::Database(e.to_string())
            }
        })?;

        Ok(QuizSession {
            id,
            quiz_id: quiz_id.to_string(),
            results,
            user_info,
            created_at,
        })
    }

    fn load_session(&self, id: &str) -> Result<QuizSession> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM quiz_sessions WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![id], Self::row_to_session)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        let (mut session, results_json, user_info_json) =
            row.ok_or_else(|| Error::NotFound(format!("Session {}", id)))?;
        session.results = serde_json::from_str(&results_json)?;
        if let Some(json) = user_info_json {
            session.user_info = serde_json::from_str(&json)?;
        }
        Ok(session)
    }

    fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn.lock();
        let quizzes = Self::count(&conn, "quizzes")?;
        let sessions = Self::count(&conn, "quiz_sessions")?;
        let questions: i64 = conn
            .query_row(
                "SELECT COALESCE(SUM(json_array_length(questions_json)), 0) FROM quizzes",
                [],
                |row| row.get(0),
            )
            .map_err(|e| Error::Database(e.to_string()))?;
        drop(conn);

        let db_size_mb = std::fs::metadata(&self.db_path)
            .map(|m| m.len() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0);

        Ok(StoreStats {
            quizzes,
            sessions,
            questions,
            db_path: self.db_path.display().to_string(),
            db_size_mb: (db_size_mb * 100.0).round() / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_quiz;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn test_store() -> (SqliteQuizStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteQuizStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn new_quiz(title: &str) -> NewQuiz {
        NewQuiz {
            title: title.into(),
            description: "Basic biology".into(),
            questions: vec![QuestionRecord {
                question: "What is Photosynthesis?".into(),
                options: [
                    ("A", "Turning light into energy"),
                    ("B", "Cell division"),
                    ("C", "Respiration"),
                    ("D", "Digestion"),
                ]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
                correct_answer: "A".into(),
                explanation: "Plants convert light into energy".into(),
            }],
        }
    }

    #[test]
    fn test_save_and_load_quiz() {
        let (store, _dir) = test_store();
        let saved = store.save_quiz(new_quiz("Plants")).unwrap();
        assert_eq!(saved.content_hash.len(), 64);

        let loaded = store.load_quiz(&saved.id).unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.questions[0].options["A"], "Turning light into energy");
    }

    #[test]
    fn test_missing_quiz_is_not_found() {
        let (store, _dir) = test_store();
        assert!(matches!(store.load_quiz("nope"), Err(Error::NotFound(_))));
        assert!(matches!(store.load_session("nope"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_duplicate_quiz_rejected() {
        let (store, _dir) = test_store();
        store.save_quiz(new_quiz("Plants")).unwrap();
        let err = store.save_quiz(new_quiz("Plants")).unwrap_err();
        assert!(matches!(err, Error::DuplicateContent(_)));
        store.save_quiz(new_quiz("Animals")).unwrap();
        assert_eq!(store.list_quizzes().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_quiz_rejected_before_insert() {
        let (store, _dir) = test_store();
        let mut quiz = new_quiz("Plants");
        quiz.questions.clear();
        assert!(matches!(store.save_quiz(quiz), Err(Error::Validation(_))));
        assert_eq!(store.stats().unwrap().quizzes, 0);
    }

    #[test]
    fn test_list_summaries() {
        let (store, _dir) = test_store();
        let saved = store.save_quiz(new_quiz("Plants")).unwrap();
        let list = store.list_quizzes().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, saved.id);
        assert_eq!(list[0].question_count, 1);
        assert_eq!(list[0].description, "Basic biology");
    }

    #[test]
    fn test_session_round_trip() {
        let (store, _dir) = test_store();
        let quiz = store.save_quiz(new_quiz("Plants")).unwrap();
        let answers: HashMap<String, String> = [("0".to_string(), "a".to_string())].into_iter().collect();
        let results = score_quiz(&quiz, &answers);
        let info = [("name".to_string(), "Sam".to_string())].into_iter().collect();

        let session = store.save_session(&quiz.id, results, info).unwrap();
        let loaded = store.load_session(&session.id).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.results.score_percentage, 100.0);
        assert_eq!(loaded.user_info["name"], "Sam");

        let stats = store.stats().unwrap();
        assert_eq!((stats.quizzes, stats.sessions, stats.questions), (1, 1, 1));
    }

    #[test]
    fn test_session_for_unknown_quiz() {
        let (store, _dir) = test_store();
        let quiz = Quiz {
            id: "ghost".into(),
            title: "Ghost".into(),
            description: String::new(),
            questions: Vec::new(),
            content_hash: String::new(),
            created_at: String::new(),
        };
        let results = score_quiz(&quiz, &HashMap::new());
        let err = store.save_session("ghost", results, BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
