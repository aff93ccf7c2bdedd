//! The note generation pipeline.
//!
//! ```text
//! raw text → length checks → normalize → segment → classify + summarize
//!          → NoteDocument → GeneratedNotes
//! ```
//!
//! [`NoteGenerator::respond`] is the outer boundary: every failure, including
//! a panic inside a classifier, becomes `{success: false, error}` with a
//! message that is safe to show to a client. [`NoteGenerator::analyze_document`]
//! turns a panic into [`Error::InternalExtraction`] the same way.

use std::panic::{catch_unwind, AssertUnwindSafe};

use horizon_core::config::{DEFAULT_MAX_TEXT_LENGTH, DEFAULT_MIN_NOTES_LENGTH};
use horizon_core::{Error, ExtractionLimits, ExtractionMode, HorizonConfig, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::complexity::{analyze_complexity, round_to, TextComplexity};
use crate::format::{NoteDocument, NoteStyle};
use crate::normalize::{char_len, normalize, word_count};
use crate::report::ContentAnalysisReport;
use crate::study_aids::{ContentStatistics, StudyAids};
use crate::summary::Summary;

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteOptions {
    /// Lowers every category cap to at most this many items.
    pub max_items_per_category: Option<usize>,
    /// Overrides the generator's minimum input length.
    pub min_text_length: Option<usize>,
    /// Forces an extraction mode; never lower than the style needs.
    pub mode: Option<ExtractionMode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteCounts {
    pub key_points: usize,
    pub definitions: usize,
    pub facts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNotes {
    pub notes: String,
    pub style: NoteStyle,
    pub summary: Summary,
    pub counts: NoteCounts,
    pub original_word_count: usize,
    pub notes_word_count: usize,
    /// Notes words as a percentage of source words, one decimal place.
    pub compression_ratio: f64,
}

/// Success-or-error envelope returned across the call boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesResponse {
    pub success: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub result: Option<GeneratedNotes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The failure was caused by the input rather than by extraction.
    #[serde(skip)]
    pub client_error: bool,
}

impl NotesResponse {
    fn ok(notes: GeneratedNotes) -> Self {
        Self {
            success: true,
            result: Some(notes),
            error: None,
            client_error: false,
        }
    }

    fn failed(err: &Error) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(err.public_message()),
            client_error: err.is_client_error(),
        }
    }
}

/// Everything the analysis endpoint reports for one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAnalysis {
    pub notes: GeneratedNotes,
    pub report: ContentAnalysisReport,
    pub complexity: TextComplexity,
    pub study_aids: StudyAids,
    pub statistics: ContentStatistics,
}

/// Stateless entry point; shareable across threads.
#[derive(Debug, Clone)]
pub struct NoteGenerator {
    limits: ExtractionLimits,
    min_text_length: usize,
    max_text_length: usize,
}

impl Default for NoteGenerator {
    fn default() -> Self {
        Self::new(ExtractionLimits::default())
    }
}

impl NoteGenerator {
    pub fn new(limits: ExtractionLimits) -> Self {
        Self {
            limits,
            min_text_length: DEFAULT_MIN_NOTES_LENGTH,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }

    pub fn from_config(config: &HorizonConfig) -> Self {
        Self {
            limits: config.limits.clone(),
            min_text_length: config.min_notes_length,
            max_text_length: config.max_text_length,
        }
    }

    pub fn with_text_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_text_length = min;
        self.max_text_length = max;
        self
    }

    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    pub fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    /// Reject text outside the configured length bounds.
    pub fn check_length(&self, text: &str, min: usize) -> Result<()> {
        let actual = char_len(text.trim());
        if actual < min {
            return Err(Error::EmptyInput { min, actual });
        }
        if actual > self.max_text_length {
            return Err(Error::InputTooLong {
                max: self.max_text_length,
                actual,
            });
        }
        Ok(())
    }

    /// Classify and summarize `text` for `style`.
    pub fn analyze(&self, text: &str, style: NoteStyle, options: &NoteOptions) -> Result<ContentAnalysisReport> {
        let min = options.min_text_length.unwrap_or(self.min_text_length);
        self.check_length(text, min)?;

        let limits = match options.max_items_per_category {
            Some(n) => self.limits.clone().capped(n),
            None => self.limits.clone(),
        };
        let mode = options
            .mode
            .unwrap_or_default()
            .max(style.required_mode());

        let normalized = normalize(text);
        let report = ContentAnalysisReport::analyze(&normalized, &limits, mode);
        debug!(
            "Analyzed {} words in {} sentences ({} mode)",
            report.word_count, report.sentence_count, mode
        );
        Ok(report)
    }

    /// Generate notes in `style`.
    pub fn generate(&self, text: &str, style: NoteStyle, options: &NoteOptions) -> Result<GeneratedNotes> {
        let report = self.analyze(text, style, options)?;
        Ok(render(text, &report, style))
    }

    /// Notes plus the full report, complexity metrics and study aids.
    pub fn analyze_document(
        &self,
        text: &str,
        style: NoteStyle,
        options: &NoteOptions,
    ) -> Result<DocumentAnalysis> {
        let mut options = options.clone();
        options.mode = Some(ExtractionMode::Advanced);
        guarded(|| {
            let report = self.analyze(text, style, &options)?;
            let complexity = analyze_complexity(&normalize(text));
            let study_aids = StudyAids::build(&report, &complexity);
            let statistics = ContentStatistics::build(text, &report, &study_aids);
            Ok(DocumentAnalysis {
                notes: render(text, &report, style),
                report,
                complexity,
                study_aids,
                statistics,
            })
        })
    }

    /// [`generate`](Self::generate) with every failure folded into the
    /// response envelope.
    pub fn respond(&self, text: &str, style: NoteStyle, options: &NoteOptions) -> NotesResponse {
        match guarded(|| self.generate(text, style, options)) {
            Ok(notes) => NotesResponse::ok(notes),
            Err(e) => {
                if !e.is_client_error() {
                    warn!("Note generation failed: {}", e);
                }
                NotesResponse::failed(&e)
            }
        }
    }
}

/// Run `f`, turning a panic into [`Error::InternalExtraction`].
fn guarded<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        warn!("Extraction panicked");
        Err(Error::InternalExtraction("classifier panicked".to_string()))
    })
}

fn render(original: &str, report: &ContentAnalysisReport, style: NoteStyle) -> GeneratedNotes {
    let notes = NoteDocument::build(report, style).render();
    let original_word_count = word_count(original);
    let notes_word_count = word_count(&notes);

    GeneratedNotes {
        compression_ratio: compression_ratio(notes_word_count, original_word_count),
        notes,
        style,
        summary: report.summary.clone(),
        counts: NoteCounts {
            key_points: report.key_points.len(),
            definitions: report.definitions.len(),
            facts: report.facts.len(),
        },
        original_word_count,
        notes_word_count,
    }
}

/// `notes / original * 100`, one decimal place; zero for empty input.
pub fn compression_ratio(notes_words: usize, original_words: usize) -> f64 {
    if original_words == 0 {
        return 0.0;
    }
    round_to(notes_words as f64 / original_words as f64 * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHOTOSYNTHESIS: &str = "Photosynthesis is the process by which plants convert light into energy. \
        This is an important biological process. \
        In 1900, scientists began studying it in detail.";

    #[test]
    fn test_rejects_short_text() {
        let err = NoteGenerator::default()
            .generate("Too short.", NoteStyle::Bullet, &NoteOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput { min: 100, actual: 10 }));
    }

    #[test]
    fn test_rejects_long_text() {
        let generator = NoteGenerator::default().with_text_bounds(1, 20);
        let err = generator
            .generate(PHOTOSYNTHESIS, NoteStyle::Bullet, &NoteOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InputTooLong { max: 20, .. }));
    }

    #[test]
    fn test_counts_and_ratio() {
        let notes = NoteGenerator::default()
            .generate(PHOTOSYNTHESIS, NoteStyle::Bullet, &NoteOptions::default())
            .unwrap();
        assert_eq!(
            notes.counts,
            NoteCounts {
                key_points: 1,
                definitions: 1,
                facts: 1
            }
        );
        assert_eq!(notes.original_word_count, 25);
        assert_eq!(
            notes.compression_ratio,
            compression_ratio(notes.notes_word_count, notes.original_word_count)
        );
    }

    #[test]
    fn test_style_raises_mode() {
        let report = NoteGenerator::default()
            .analyze(PHOTOSYNTHESIS, NoteStyle::Comprehensive, &NoteOptions::default())
            .unwrap();
        assert_eq!(report.mode, ExtractionMode::Advanced);
        assert_eq!(report.key_concepts.len(), 1);
    }

    #[test]
    fn test_max_items_option_caps_categories() {
        let text: String = (0..20)
            .map(|i| format!("Item number{} is the {}th entry in this list. ", i, i))
            .collect();
        let options = NoteOptions {
            max_items_per_category: Some(2),
            ..Default::default()
        };
        let notes = NoteGenerator::default()
            .generate(&text, NoteStyle::Bullet, &options)
            .unwrap();
        assert_eq!(notes.counts.definitions, 2);
        assert!(notes.counts.key_points <= 2);
        assert!(notes.counts.facts <= 2);
    }

    #[test]
    fn test_respond_envelope() {
        let generator = NoteGenerator::default();
        let ok = generator.respond(PHOTOSYNTHESIS, NoteStyle::Bullet, &NoteOptions::default());
        assert!(ok.success);
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["counts"]["definitions"], 1);
        assert!(json.get("error").is_none());

        let failed = generator.respond("", NoteStyle::Bullet, &NoteOptions::default());
        assert!(!failed.success);
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("Text too short"));
        assert!(json.get("notes").is_none());
        assert!(json.get("client_error").is_none());
        assert!(failed.client_error);
        assert!(!ok.client_error);
    }

    #[test]
    fn test_panic_becomes_internal_error() {
        let err = guarded::<()>(|| panic!("tagger index out of range")).unwrap_err();
        assert!(matches!(err, Error::InternalExtraction(_)));
        assert!(!err.is_client_error());
        assert!(!err.public_message().contains("tagger"));

        let failed = NotesResponse::failed(&err);
        assert!(!failed.success);
        assert!(!failed.client_error);
    }

    #[test]
    fn test_guarded_passes_results_through() {
        assert_eq!(guarded(|| Ok(7)).unwrap(), 7);
        let err = guarded::<()>(|| Err(Error::Validation("bad".to_string()))).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_compression_ratio_rounding() {
        assert_eq!(compression_ratio(1, 3), 33.3);
        assert_eq!(compression_ratio(2, 3), 66.7);
        assert_eq!(compression_ratio(5, 0), 0.0);
    }

    #[test]
    fn test_document_analysis() {
        let analysis = NoteGenerator::default()
            .analyze_document(PHOTOSYNTHESIS, NoteStyle::Bullet, &NoteOptions::default())
            .unwrap();
        assert_eq!(analysis.report.mode, ExtractionMode::Advanced);
        assert_eq!(analysis.study_aids.flashcards.len(), 2);
        assert_eq!(analysis.complexity.sentence_count, 3);
        assert_eq!(analysis.study_aids.practice_questions.len(), 1);
        assert_eq!(analysis.statistics.content_breakdown.definitions, 1);
        assert_eq!(analysis.statistics.study_aids_generated.flashcards, 2);
        assert_eq!(analysis.statistics.extraction_efficiency.concepts_per_paragraph, 1.0);
    }
}
