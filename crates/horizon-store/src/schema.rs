//! Database schema SQL.

/// Quizzes and the scored sessions submitted against them.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    questions_json TEXT NOT NULL,
    content_hash TEXT UNIQUE NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS quiz_sessions (
    id TEXT PRIMARY KEY,
    quiz_id TEXT NOT NULL REFERENCES quizzes(id) ON DELETE CASCADE,
    results_json TEXT NOT NULL,
    user_info_json TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_quizzes_created ON quizzes(created_at);
CREATE INDEX IF NOT EXISTS idx_quizzes_hash ON quizzes(content_hash);
CREATE INDEX IF NOT EXISTS idx_sessions_quiz_id ON quiz_sessions(quiz_id);
"#;
