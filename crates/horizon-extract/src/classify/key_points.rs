//! Key-point extraction for sentences that carry no strict definition.

use std::collections::HashSet;

use horizon_core::ExtractionLimits;

use super::{contains_any, contains_digit, importance_score, KeyPoint, Provenance, IMPORTANCE_KEYWORDS};
use crate::sentences::Sentence;
use crate::simplify::simplify;

/// Sentence openings that introduce a summary-worthy statement.
pub const LEAD_PHRASES: &[&str] = &["this", "these", "the process", "the method"];

pub fn is_key_point(sentence: &Sentence<'_>, limits: &ExtractionLimits) -> bool {
    if !limits.key_point_sentence.contains(sentence.len()) {
        return false;
    }
    let lower = sentence.lower();
    contains_any(&lower, IMPORTANCE_KEYWORDS)
        || contains_digit(sentence.text)
        || LEAD_PHRASES.iter().any(|p| lower.starts_with(p))
}

/// Extract up to `limits.max_key_points` key points, dropping exact
/// duplicates and keeping source order.
pub fn extract_key_points<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<KeyPoint> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut points = Vec::new();

    for sentence in sentences {
        if points.len() >= limits.max_key_points {
            break;
        }
        if !is_key_point(&sentence, limits) {
            continue;
        }
        let text = simplify(sentence.text);
        if seen.insert(text.clone()) {
            points.push(KeyPoint {
                text,
                score: importance_score(sentence.text),
                source: Provenance::from(&sentence),
            });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::segment;

    fn points(text: &str) -> Vec<String> {
        extract_key_points(segment(text), &ExtractionLimits::default())
            .into_iter()
            .map(|p| p.text)
            .collect()
    }

    #[test]
    fn test_keyword_digit_and_lead() {
        let p = points(
            "This is an important biological process. \
             Roughly 70 species live in the lake. \
             The method relies on careful sampling. \
             Birds often sing in the early morning.",
        );
        assert_eq!(p.len(), 3);
        assert_eq!(p[2], "The method relies on careful sampling.");
    }

    #[test]
    fn test_exact_duplicates_removed() {
        let p = points(
            "The main idea is repetition here. The main idea is repetition here. \
             Another key sentence appears later.",
        );
        assert_eq!(
            p,
            vec![
                "The main idea is repetition here.",
                "Another key sentence appears later."
            ]
        );
    }

    #[test]
    fn test_cap_at_eight() {
        let text: String = (0..20)
            .map(|i| format!("The key finding number {} matters. ", i))
            .collect();
        assert_eq!(points(&text).len(), 8);
    }

    #[test]
    fn test_short_sentences_ignored() {
        assert!(points("Key idea.").is_empty());
    }
}
