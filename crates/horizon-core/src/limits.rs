//! Classifier bounds, per-category caps and extraction mode.

use serde::{Deserialize, Serialize};

/// Which optional classifiers run alongside the basic ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    /// Key points, definitions, facts and summary.
    #[default]
    Basic,
    /// Adds processes, examples, statistics and key concepts.
    Advanced,
}

impl ExtractionMode {
    pub fn extracts_processes(self) -> bool {
        self >= Self::Advanced
    }

    pub fn extracts_examples(self) -> bool {
        self >= Self::Advanced
    }
}

impl std::fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Inclusive character-length window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl LengthWindow {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

/// Every tunable bound used by the classifiers and the summary builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionLimits {
    /// Sentence length accepted by the definition templates.
    pub definition_sentence: LengthWindow,
    /// Terms of this many characters or more are rejected.
    pub max_term_len: usize,
    /// Definition bodies of this many characters or more are rejected.
    pub max_definition_len: usize,
    pub fact_sentence: LengthWindow,
    pub key_point_sentence: LengthWindow,
    /// Length of the captured example text.
    pub example_text: LengthWindow,
    /// Minimum word count for a process step.
    pub min_step_words: usize,
    /// Sentence length that earns the summary length bonus.
    pub summary_bonus: LengthWindow,

    pub max_definitions: usize,
    pub max_key_concepts: usize,
    pub max_facts: usize,
    pub max_key_points: usize,
    pub max_examples: usize,
    pub max_statistics: usize,

    pub brief_sentences: usize,
    pub standard_sentences: usize,
    pub detailed_sentences: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            definition_sentence: LengthWindow::new(20, 200),
            max_term_len: 50,
            max_definition_len: 150,
            fact_sentence: LengthWindow::new(15, 120),
            key_point_sentence: LengthWindow::new(20, 150),
            example_text: LengthWindow::new(10, 200),
            min_step_words: 5,
            summary_bonus: LengthWindow::new(50, 150),
            max_definitions: 6,
            max_key_concepts: 8,
            max_facts: 5,
            max_key_points: 8,
            max_examples: 6,
            max_statistics: 10,
            brief_sentences: 3,
            standard_sentences: 5,
            detailed_sentences: 8,
        }
    }
}

impl ExtractionLimits {
    /// Lower every category cap to at most `max_items`. Caps never grow.
    pub fn capped(mut self, max_items: usize) -> Self {
        for cap in [
            &mut self.max_definitions,
            &mut self.max_key_concepts,
            &mut self.max_facts,
            &mut self.max_key_points,
            &mut self.max_examples,
            &mut self.max_statistics,
        ] {
            *cap = (*cap).min(max_items);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_inclusive() {
        let w = LengthWindow::new(20, 200);
        assert!(w.contains(20));
        assert!(w.contains(200));
        assert!(!w.contains(19));
        assert!(!w.contains(201));
    }

    #[test]
    fn test_capped_never_raises() {
        let limits = ExtractionLimits::default().capped(7);
        assert_eq!(limits.max_definitions, 6);
        assert_eq!(limits.max_key_points, 7);
        assert_eq!(limits.max_key_concepts, 7);
        assert_eq!(limits.max_facts, 5);
    }

    #[test]
    fn test_mode_flags() {
        assert!(!ExtractionMode::Basic.extracts_processes());
        assert!(ExtractionMode::Advanced.extracts_examples());
        assert_eq!(ExtractionMode::Advanced.to_string(), "advanced");
    }
}
