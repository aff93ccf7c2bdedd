//! Rule-based sentence classifiers.
//!
//! Each classifier is a pure function of a sentence sequence and the
//! configured [`ExtractionLimits`]. [`classify`] runs them together and
//! gives sentences to categories in priority order: a sentence kept as a
//! definition is not offered to the fact rules, and a sentence kept as a
//! definition or fact is not offered to the key-point rules. Concepts,
//! processes, examples and statistics are alternative views and see every
//! sentence.

pub mod definitions;
pub mod examples;
pub mod facts;
pub mod key_points;
pub mod processes;
pub mod statistics;

use std::collections::HashSet;

use horizon_core::{ExtractionLimits, ExtractionMode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sentences::Sentence;

pub use definitions::{definition_kind, extract_definitions, extract_key_concepts};
pub use examples::extract_examples;
pub use facts::extract_facts;
pub use key_points::extract_key_points;
pub use processes::extract_processes;
pub use statistics::extract_statistics;

/// Words that mark a sentence as notable.
pub const IMPORTANCE_KEYWORDS: &[&str] = &[
    "important",
    "key",
    "main",
    "primary",
    "essential",
    "crucial",
    "significant",
    "major",
    "fundamental",
    "basic",
    "critical",
];

/// Where an item came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Sentence text as it appeared after normalization.
    pub sentence: String,
    /// Zero-based sentence position.
    pub position: usize,
}

impl From<&Sentence<'_>> for Provenance {
    fn from(s: &Sentence<'_>) -> Self {
        Self {
            sentence: s.text.to_string(),
            position: s.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
    #[serde(rename = "type")]
    pub kind: DefinitionKind,
    pub source: Provenance,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub concept: String,
    pub description: String,
    pub source: Provenance,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub text: String,
    pub source: Provenance,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub text: String,
    pub source: Provenance,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_number: usize,
    pub description: String,
    pub keywords: Vec<String>,
    pub source: Provenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    pub name: String,
    pub steps: Vec<Step>,
    pub source: Provenance,
    pub score: f64,
}

impl Process {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub source: Provenance,
    pub score: f64,
}

/// What a definition body describes, judged from its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Process,
    Concept,
    Object,
    General,
}

/// Kind of number found by the statistics extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    Percentage,
    Temporal,
    Monetary,
    Measurement,
    Quantity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub value: String,
    /// Up to 50 characters either side of the value.
    pub context: String,
    pub kind: StatisticKind,
    pub source: Provenance,
}

/// Any single classified item, tagged by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedItem {
    Definition(Definition),
    Fact(Fact),
    KeyPoint(KeyPoint),
    Concept(Concept),
    Process(Process),
    Example(Example),
}

impl ClassifiedItem {
    pub fn source(&self) -> &Provenance {
        match self {
            Self::Definition(d) => &d.source,
            Self::Fact(f) => &f.source,
            Self::KeyPoint(k) => &k.source,
            Self::Concept(c) => &c.source,
            Self::Process(p) => &p.source,
            Self::Example(e) => &e.source,
        }
    }
}

/// Output of [`classify`].
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub definitions: Vec<Definition>,
    pub key_concepts: Vec<Concept>,
    pub facts: Vec<Fact>,
    pub key_points: Vec<KeyPoint>,
    pub processes: Vec<Process>,
    pub examples: Vec<Example>,
    pub statistics: Vec<Statistic>,
}

/// Run every classifier enabled by `mode` over `sentences`.
pub fn classify(
    sentences: &[Sentence<'_>],
    limits: &ExtractionLimits,
    mode: ExtractionMode,
) -> Classification {
    let definitions = extract_definitions(sentences.iter().copied(), limits);
    let mut claimed: HashSet<usize> = definitions.iter().map(|d| d.source.position).collect();

    let facts = extract_facts(unclaimed(sentences, &claimed), limits);
    claimed.extend(facts.iter().map(|f| f.source.position));

    let key_points = extract_key_points(unclaimed(sentences, &claimed), limits);

    let mut classification = Classification {
        definitions,
        facts,
        key_points,
        ..Default::default()
    };

    if mode >= ExtractionMode::Advanced {
        classification.key_concepts = extract_key_concepts(sentences.iter().copied(), limits);
        classification.statistics = extract_statistics(sentences.iter().copied(), limits);
    }
    if mode.extracts_processes() {
        classification.processes =
            extract_processes(sentences.iter().copied(), limits, &crate::tagger::HeuristicTagger);
    }
    if mode.extracts_examples() {
        classification.examples = extract_examples(sentences.iter().copied(), limits);
    }

    debug!(
        "Classified {} sentences: definitions={}, facts={}, key_points={}, concepts={}, processes={}, examples={}",
        sentences.len(),
        classification.definitions.len(),
        classification.facts.len(),
        classification.key_points.len(),
        classification.key_concepts.len(),
        classification.processes.len(),
        classification.examples.len(),
    );

    classification
}

fn unclaimed<'s, 'a>(
    sentences: &'s [Sentence<'a>],
    claimed: &'s HashSet<usize>,
) -> impl Iterator<Item = Sentence<'a>> + 's {
    sentences
        .iter()
        .filter(move |s| !claimed.contains(&s.position))
        .copied()
}

/// Heuristic importance of a sentence, only meaningful relative to others.
///
/// +0.2 for 10–25 words, +0.3 per importance keyword contained.
pub fn importance_score(sentence: &str) -> f64 {
    let mut score = 0.0;
    let words = sentence.split_whitespace().count();
    if (10..=25).contains(&words) {
        score += 0.2;
    }
    let lower = sentence.to_lowercase();
    let hits = IMPORTANCE_KEYWORDS.iter().filter(|kw| lower.contains(**kw)).count();
    score + 0.3 * hits as f64
}

pub(crate) fn contains_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack_lower.contains(n))
}
