//! Example and illustration extraction.

use std::collections::HashSet;

use horizon_core::ExtractionLimits;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{importance_score, Example, Provenance};
use crate::normalize::char_len;
use crate::sentences::Sentence;
use crate::simplify::simplify;

static EXAMPLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:for example|for instance|such as|including|like),?\s+([^.;!?]+)",
        r"(?i)\b(?:an example (?:of|is)|examples include)\s+([^.;!?]+)",
        r"(?i)\b(?:consider|imagine|suppose),?\s+([^.;!?]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extract up to `limits.max_examples` examples.
///
/// Every match of every pattern is considered; the captured text runs to the
/// next sentence-level punctuation and must fit `limits.example_text`.
pub fn extract_examples<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<Example> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut examples = Vec::new();

    'sentences: for sentence in sentences {
        for re in EXAMPLE_PATTERNS.iter() {
            for caps in re.captures_iter(sentence.text) {
                if examples.len() >= limits.max_examples {
                    break 'sentences;
                }
                let Some(m) = caps.get(1) else { continue };
                let text = m.as_str().trim();
                if !limits.example_text.contains(char_len(text)) {
                    continue;
                }
                if seen.insert(text.to_lowercase()) {
                    examples.push(Example {
                        text: simplify(text),
                        score: importance_score(sentence.text),
                        source: Provenance::from(&sentence),
                    });
                }
            }
        }
    }

    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::segment;

    fn examples(text: &str) -> Vec<String> {
        extract_examples(segment(text), &ExtractionLimits::default())
            .into_iter()
            .map(|e| e.text)
            .collect()
    }

    #[test]
    fn test_example_markers() {
        let e = examples(
            "Many fruits grow in warm climates, for example mangoes and papayas. \
             Consider a ball rolling down a slope.",
        );
        assert_eq!(e, vec!["mangoes and papayas", "a ball rolling down a slope"]);
    }

    #[test]
    fn test_comma_after_marker() {
        let e = examples("For instance, water freezes at zero degrees.");
        assert_eq!(e, vec!["water freezes at zero degrees"]);
    }

    #[test]
    fn test_short_captures_rejected() {
        assert!(examples("Cats such as lynx roar.").is_empty());
    }

    #[test]
    fn test_unlike_is_not_like() {
        assert!(examples("Birds, unlike most mammals, lay eggs in nests.").is_empty());
    }

    #[test]
    fn test_cap_at_six() {
        let text: String = (0..10)
            .map(|i| format!("Imagine a world with {} moons in orbit. ", i))
            .collect();
        assert_eq!(examples(&text).len(), 6);
    }
}
