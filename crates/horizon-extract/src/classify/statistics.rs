//! Numbers and statistics with surrounding context.

use horizon_core::ExtractionLimits;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Provenance, Statistic, StatisticKind};
use crate::sentences::Sentence;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b\d+(?:\.\d+)?(?:\s?(?:%|(?:percent|dollars?|years?|months?|days?|hours?|minutes?|seconds?)\b))?",
    )
    .unwrap()
});

const CONTEXT_CHARS: usize = 50;

/// Extract up to `limits.max_statistics` numbers with context.
pub fn extract_statistics<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<Statistic> {
    let mut stats = Vec::new();

    for sentence in sentences {
        for m in NUMBER_RE.find_iter(sentence.text) {
            if stats.len() >= limits.max_statistics {
                return stats;
            }
            let value = m.as_str().trim().to_string();
            let context = window(sentence.text, m.start(), m.end(), CONTEXT_CHARS);
            stats.push(Statistic {
                kind: classify_number(&value, sentence.text),
                value,
                context: context.trim().to_string(),
                source: Provenance::from(&sentence),
            });
        }
    }

    stats
}

/// Slice `text` to at most `radius` characters around the byte range.
fn window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());
    &text[from..to]
}

/// Classify a number by its unit and the words of its sentence.
pub fn classify_number(value: &str, sentence: &str) -> StatisticKind {
    let value_lower = value.to_lowercase();
    let context = sentence.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| context.contains(w));

    if value_lower.contains('%') || value_lower.contains("percent") || context.contains("percent") {
        StatisticKind::Percentage
    } else if has(&["year", "date", "century"]) {
        StatisticKind::Temporal
    } else if has(&["dollar", "cost", "price"]) {
        StatisticKind::Monetary
    } else if has(&["meter", "foot", "feet", "inch", "mile"]) {
        StatisticKind::Measurement
    } else {
        StatisticKind::Quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::segment;

    #[test]
    fn test_values_and_kinds() {
        let stats = extract_statistics(
            segment("About 40 percent of students passed. The bridge is 300 meters long. It cost 12 dollars."),
            &ExtractionLimits::default(),
        );
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].value, "40 percent");
        assert_eq!(stats[0].kind, StatisticKind::Percentage);
        assert_eq!(stats[1].kind, StatisticKind::Measurement);
        assert_eq!(stats[2].value, "12 dollars");
        assert_eq!(stats[2].kind, StatisticKind::Monetary);
    }

    #[test]
    fn test_context_window() {
        let text = format!("{}42{}", "a".repeat(80), "b".repeat(80));
        assert_eq!(window(&text, 80, 82, 50).len(), 102);
        assert_eq!(window("x 7 y", 2, 3, 50), "x 7 y");
    }

    #[test]
    fn test_cap() {
        let text = "1 2 3 4 5 6 7 8 9 10 11 12 13.";
        let stats = extract_statistics(segment(text), &ExtractionLimits::default());
        assert_eq!(stats.len(), 10);
        assert_eq!(stats[0].kind, StatisticKind::Quantity);
    }
}
