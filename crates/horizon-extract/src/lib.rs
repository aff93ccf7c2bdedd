//! Horizon Extract: rule-based study-note and quiz extraction.
//!
//! The pipeline is regex and keyword lists only: normalize the text, split
//! it into sentences, classify sentences into definitions, facts, key
//! points, processes and examples, build a position-preserving summary and
//! render everything into one of the note templates.

pub mod classify;
pub mod complexity;
pub mod format;
pub mod normalize;
pub mod pipeline;
pub mod quiz;
pub mod report;
pub mod sentences;
pub mod simplify;
pub mod study_aids;
pub mod summary;
pub mod tagger;

pub use classify::ClassifiedItem;
pub use format::{NoteDocument, NoteStyle};
pub use normalize::normalize;
pub use pipeline::{GeneratedNotes, NoteGenerator, NoteOptions, NotesResponse};
pub use quiz::{QuizGenerator, QuizQuestion};
pub use report::ContentAnalysisReport;
pub use sentences::{segment, Sentence};
pub use simplify::simplify;
pub use summary::{summarize, Summary};
