//! Text cleanup run before segmentation.

use once_cell::sync::Lazy;
use regex::Regex;

static DISALLOWED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s.,!?;:\-()]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Canonicalize raw document text.
///
/// Drops characters outside word characters, whitespace and `. , ! ? ; : - ( )`,
/// collapses whitespace runs (newlines and tabs included) into single spaces
/// and trims both ends. Stripping happens first so a removed symbol between
/// two spaces cannot leave a double space behind.
pub fn normalize(raw: &str) -> String {
    let stripped = DISALLOWED_RE.replace_all(raw, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// Whitespace-delimited word count, the unit used for compression ratios.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Length in characters, not bytes.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  one\n\ntwo\t three  "), "one two three");
    }

    #[test]
    fn test_strips_symbols_keeps_punctuation() {
        assert_eq!(
            normalize("Cost: $5 & rising (fast)! Really? Yes; no - maybe."),
            "Cost: 5 rising (fast)! Really? Yes; no - maybe."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_char_len_counts_chars() {
        assert_eq!(char_len("café"), 4);
        assert_eq!(word_count("a  b\nc"), 3);
    }
}
