//! Pluggable part-of-speech tagging.
//!
//! Tagging is a best-effort augmentation: process-step keywords and
//! comparison questions use it, nothing else depends on its accuracy. A
//! model-backed tagger can be plugged in by implementing [`Tagger`]; the
//! bundled [`HeuristicTagger`] uses a stop-word list and suffix rules.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Coarse part-of-speech label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Other,
}

impl PosTag {
    /// Nouns, verbs and adjectives carry content.
    pub fn is_content(&self) -> bool {
        !matches!(self, PosTag::Other)
    }
}

/// Assigns one label per token.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag>;
}

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "if", "then", "than", "so", "of", "in", "on", "at",
        "to", "for", "from", "by", "with", "about", "into", "over", "after", "before", "under",
        "between", "through", "during", "is", "are", "was", "were", "be", "been", "being", "am",
        "do", "does", "did", "has", "have", "had", "can", "could", "will", "would", "should",
        "may", "might", "must", "shall", "it", "its", "this", "that", "these", "those", "they",
        "them", "their", "he", "she", "his", "her", "we", "our", "you", "your", "i", "me", "my",
        "not", "no", "as", "also", "very", "more", "most", "some", "any", "all", "each", "both",
        "such", "which", "who", "whom", "what", "when", "where", "why", "how", "there", "here",
        "while", "whereas", "unlike", "compared", "first", "second", "third", "next", "finally",
        "step", "steps",
    ]
    .into_iter()
    .collect()
});

/// Suffix → tag rules. Longer suffixes first.
const SUFFIX_RULES: &[(&str, PosTag)] = &[
    ("ization", PosTag::Noun),
    ("isation", PosTag::Noun),
    ("ment", PosTag::Noun),
    ("ness", PosTag::Noun),
    ("tion", PosTag::Noun),
    ("sion", PosTag::Noun),
    ("ship", PosTag::Noun),
    ("ity", PosTag::Noun),
    ("ism", PosTag::Noun),
    ("able", PosTag::Adjective),
    ("ible", PosTag::Adjective),
    ("less", PosTag::Adjective),
    ("ous", PosTag::Adjective),
    ("ful", PosTag::Adjective),
    ("ive", PosTag::Adjective),
    ("ical", PosTag::Adjective),
    ("al", PosTag::Adjective),
    ("ic", PosTag::Adjective),
    ("ing", PosTag::Verb),
    ("ize", PosTag::Verb),
    ("ise", PosTag::Verb),
    ("ate", PosTag::Verb),
    ("ify", PosTag::Verb),
    ("ed", PosTag::Verb),
    ("en", PosTag::Verb),
];

/// Stop-word and suffix based tagger. Unknown content words default to nouns.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    fn tag_one(token: &str) -> PosTag {
        if token.is_empty() || !token.chars().all(char::is_alphabetic) {
            return PosTag::Other;
        }
        let lower = token.to_lowercase();
        if STOP_WORDS.contains(lower.as_str()) {
            return PosTag::Other;
        }
        if lower.len() > 4 {
            for &(suffix, tag) in SUFFIX_RULES {
                if lower.ends_with(suffix) {
                    return tag;
                }
            }
        }
        PosTag::Noun
    }
}

impl Tagger for HeuristicTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        tokens.iter().map(|t| Self::tag_one(t)).collect()
    }
}

/// Split text into alphabetic word tokens.
pub fn word_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Distinct nouns in first-seen order.
pub fn nouns<'a>(tagger: &dyn Tagger, tokens: &[&'a str]) -> Vec<&'a str> {
    let tags = tagger.tag(tokens);
    let mut seen = HashSet::new();
    tokens
        .iter()
        .zip(tags)
        .filter(|(_, tag)| *tag == PosTag::Noun)
        .map(|(tok, _)| *tok)
        .filter(|tok| seen.insert(tok.to_lowercase()))
        .collect()
}

/// Up to `max` lower-cased content words longer than three characters.
pub fn content_keywords(tagger: &dyn Tagger, text: &str, max: usize) -> Vec<String> {
    let tokens = word_tokens(text);
    let tags = tagger.tag(&tokens);
    tokens
        .iter()
        .zip(tags)
        .filter(|(tok, tag)| tag.is_content() && tok.chars().count() > 3)
        .map(|(tok, _)| tok.to_lowercase())
        .take(max)
        .collect()
}
