//! Aggregate result of one extraction pass.

use horizon_core::{ExtractionLimits, ExtractionMode};
use serde::{Deserialize, Serialize};

use crate::classify::{
    classify, ClassifiedItem, Concept, Definition, Example, Fact, KeyPoint, Process, Statistic,
};
use crate::normalize::word_count;
use crate::sentences::split_sentences;
use crate::summary::{summarize, Summary};

/// Every classified collection of a text plus its summary.
///
/// Built once per call from normalized text and consumed by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysisReport {
    pub mode: ExtractionMode,
    pub key_points: Vec<KeyPoint>,
    pub definitions: Vec<Definition>,
    pub facts: Vec<Fact>,
    pub key_concepts: Vec<Concept>,
    pub processes: Vec<Process>,
    pub examples: Vec<Example>,
    pub statistics: Vec<Statistic>,
    pub summary: Summary,
    pub word_count: usize,
    pub sentence_count: usize,
}

impl ContentAnalysisReport {
    /// Segment, classify and summarize already normalized text.
    pub fn analyze(normalized: &str, limits: &ExtractionLimits, mode: ExtractionMode) -> Self {
        let sentences = split_sentences(normalized);
        let c = classify(&sentences, limits, mode);
        let summary = summarize(&sentences, limits);

        Self {
            mode,
            key_points: c.key_points,
            definitions: c.definitions,
            facts: c.facts,
            key_concepts: c.key_concepts,
            processes: c.processes,
            examples: c.examples,
            statistics: c.statistics,
            summary,
            word_count: word_count(normalized),
            sentence_count: sentences.len(),
        }
    }

    /// True when none of the core note categories found anything.
    pub fn has_no_core_items(&self) -> bool {
        self.key_points.is_empty() && self.definitions.is_empty() && self.facts.is_empty()
    }

    /// All items as tagged variants, ordered by source position.
    pub fn items(&self) -> Vec<ClassifiedItem> {
        let mut items: Vec<ClassifiedItem> = self
            .definitions
            .iter()
            .cloned()
            .map(ClassifiedItem::Definition)
            .chain(self.facts.iter().cloned().map(ClassifiedItem::Fact))
            .chain(self.key_points.iter().cloned().map(ClassifiedItem::KeyPoint))
            .chain(self.key_concepts.iter().cloned().map(ClassifiedItem::Concept))
            .chain(self.processes.iter().cloned().map(ClassifiedItem::Process))
            .chain(self.examples.iter().cloned().map(ClassifiedItem::Example))
            .collect();
        items.sort_by_key(|item| item.source().position);
        items
    }
}
