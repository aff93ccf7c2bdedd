//! Extractive summary in three lengths.
//!
//! Sentences are selected by score but always emitted in document order.

use std::collections::HashSet;

use horizon_core::ExtractionLimits;
use serde::{Deserialize, Serialize};

use crate::classify::IMPORTANCE_KEYWORDS;
use crate::sentences::Sentence;
use crate::simplify::simplify;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub brief: String,
    pub standard: String,
    pub detailed: String,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.brief.is_empty() && self.standard.is_empty() && self.detailed.is_empty()
    }
}

/// Score one sentence of a document with `total` sentences.
///
/// +2 for the first or last sentence, +1 for a digit, +1 per importance
/// keyword present as a word, +1 for a length inside `limits.summary_bonus`.
pub fn score_sentence(sentence: &Sentence<'_>, total: usize, limits: &ExtractionLimits) -> i32 {
    let mut score = 0;

    if sentence.position == 0 || sentence.position + 1 == total {
        score += 2;
    }
    if sentence.text.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }

    let lower = sentence.lower();
    let words: HashSet<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    score += IMPORTANCE_KEYWORDS.iter().filter(|kw| words.contains(**kw)).count() as i32;

    if limits.summary_bonus.contains(sentence.len()) {
        score += 1;
    }

    score
}

/// Pick the `n` best distinct sentences and return them in document order.
///
/// Ties are broken by earlier position. Sentences whose text repeats an
/// already-selected one are skipped.
pub fn select_sentences<'a>(
    sentences: &[Sentence<'a>],
    n: usize,
    limits: &ExtractionLimits,
) -> Vec<Sentence<'a>> {
    let total = sentences.len();
    let mut ranked: Vec<(i32, Sentence<'a>)> = sentences
        .iter()
        .map(|s| (score_sentence(s, total, limits), *s))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.position.cmp(&b.1.position)));

    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected: Vec<Sentence<'a>> = ranked
        .into_iter()
        .map(|(_, s)| s)
        .filter(|s| seen.insert(s.text))
        .take(n)
        .collect();

    selected.sort_by_key(|s| s.position);
    selected
}

/// Build brief, standard and detailed summaries.
pub fn summarize(sentences: &[Sentence<'_>], limits: &ExtractionLimits) -> Summary {
    let render = |n: usize| {
        select_sentences(sentences, n, limits)
            .iter()
            .map(|s| simplify(s.text))
            .collect::<Vec<_>>()
            .join(" ")
    };

    Summary {
        brief: render(limits.brief_sentences),
        standard: render(limits.standard_sentences),
        detailed: render(limits.detailed_sentences),
    }
}
