//! Fact extraction: numbers, causes, effects and contrasts.

use horizon_core::ExtractionLimits;

use super::{contains_any, contains_digit, importance_score, Fact, Provenance};
use crate::sentences::Sentence;
use crate::simplify::simplify;

/// Cause/effect and contrast markers.
pub const RELATION_KEYWORDS: &[&str] = &[
    "because",
    "due to",
    "results in",
    "causes",
    "leads to",
    "compared to",
    "unlike",
    "whereas",
    "while",
    "however",
];

/// A sentence is a fact when its length is in the fact window and it holds a
/// digit or a relation keyword.
pub fn is_fact(sentence: &Sentence<'_>, limits: &ExtractionLimits) -> bool {
    limits.fact_sentence.contains(sentence.len())
        && (contains_digit(sentence.text) || contains_any(&sentence.lower(), RELATION_KEYWORDS))
}

/// Extract up to `limits.max_facts` facts in source order.
pub fn extract_facts<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<Fact> {
    sentences
        .into_iter()
        .filter(|s| is_fact(s, limits))
        .take(limits.max_facts)
        .map(|s| Fact {
            text: simplify(s.text),
            score: importance_score(s.text),
            source: Provenance::from(&s),
        })
        .collect()
}
