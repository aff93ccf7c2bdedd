//! Definition and key-concept extraction from copular sentences.

use std::collections::HashSet;

use horizon_core::ExtractionLimits;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{importance_score, Concept, Definition, DefinitionKind, Provenance};
use crate::normalize::char_len;
use crate::sentences::Sentence;
use crate::simplify::simplify;

/// Definition templates, tried in this order; the first match wins.
static DEFINITION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(.+?) is (.+?)[.!?]*$",
        r"(?i)^(.+?) are (.+?)[.!?]*$",
        r"(?i)^(.+?) means (.+?)[.!?]*$",
        r"(?i)^(.+?) refers to (.+?)[.!?]*$",
        r"(?i)^(.+?) can be defined as (.+?)[.!?]*$",
        r"(?i)^(.+?) is known as (.+?)[.!?]*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static LEADING_ARTICLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:the|a|an)\s+").unwrap());

/// Terms that only point back at something else and never name a concept.
const DEICTIC_TERMS: &[&str] = &[
    "this", "these", "that", "those", "it", "they", "there", "here", "he", "she", "we", "you",
    "i", "what", "which", "who",
];

/// Match one sentence against the definition templates.
///
/// Returns the raw `(term, body)` captures of the first template that matches
/// the whole sentence.
pub fn match_definition(sentence: &str) -> Option<(&str, &str)> {
    DEFINITION_PATTERNS.iter().find_map(|re| {
        re.captures(sentence).and_then(|caps| {
            let term = caps.get(1)?.as_str().trim();
            let body = caps.get(2)?.as_str().trim();
            Some((term, body))
        })
    })
}

/// True for pronoun-like terms such as "This" or "They".
pub fn is_deictic(term: &str) -> bool {
    DEICTIC_TERMS.contains(&term.trim().to_lowercase().as_str())
}

/// Lower-case, drop a leading article, title-case.
pub fn clean_term(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let stripped = LEADING_ARTICLE_RE.replace(&lower, "");
    title_case(stripped.trim())
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Accepted `(term, definition, sentence)` triples in source order,
/// deduplicated by case-insensitive term and truncated to `cap`.
fn candidates<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
    cap: usize,
) -> Vec<(String, String, Sentence<'a>)> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut accepted = Vec::new();

    for sentence in sentences {
        if accepted.len() >= cap {
            break;
        }
        if !limits.definition_sentence.contains(sentence.len()) {
            continue;
        }
        let Some((raw_term, raw_body)) = match_definition(sentence.text) else {
            continue;
        };

        let term = clean_term(raw_term);
        let definition = simplify(raw_body);
        let key = term.to_lowercase();

        if term.is_empty()
            || is_deictic(&key)
            || char_len(&term) >= limits.max_term_len
            || char_len(&definition) >= limits.max_definition_len
        {
            continue;
        }
        if seen.insert(key) {
            accepted.push((term, definition, sentence));
        }
    }

    accepted
}

const KIND_KEYWORDS: &[(DefinitionKind, &[&str])] = &[
    (DefinitionKind::Process, &["process", "method", "procedure"]),
    (DefinitionKind::Concept, &["theory", "concept", "principle"]),
    (DefinitionKind::Object, &["tool", "device", "instrument"]),
];

/// First keyword group found in `definition` wins.
pub fn definition_kind(definition: &str) -> DefinitionKind {
    let lower = definition.to_lowercase();
    KIND_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(kind, _)| *kind)
        .unwrap_or(DefinitionKind::General)
}

/// Extract up to `limits.max_definitions` definitions.
pub fn extract_definitions<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<Definition> {
    candidates(sentences, limits, limits.max_definitions)
        .into_iter()
        .map(|(term, definition, sentence)| Definition {
            kind: definition_kind(&definition),
            term,
            definition,
            score: importance_score(sentence.text),
            source: Provenance::from(&sentence),
        })
        .collect()
}

/// The key-concepts variant: same templates, larger cap, `Concept` items.
pub fn extract_key_concepts<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
) -> Vec<Concept> {
    candidates(sentences, limits, limits.max_key_concepts)
        .into_iter()
        .map(|(concept, description, sentence)| Concept {
            concept,
            description,
            score: importance_score(sentence.text),
            source: Provenance::from(&sentence),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::segment;

    fn defs(text: &str) -> Vec<Definition> {
        extract_definitions(segment(text), &ExtractionLimits::default())
    }

    #[test]
    fn test_photosynthesis_definition() {
        let d = defs("Photosynthesis is the process by which plants convert light into energy.");
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].term, "Photosynthesis");
        assert_eq!(
            d[0].definition,
            "the process by which plants convert light into energy"
        );
        assert_eq!(d[0].source.position, 0);
        assert_eq!(d[0].kind, DefinitionKind::Process);
    }

    #[test]
    fn test_definition_kind() {
        assert_eq!(definition_kind("a theory of motion"), DefinitionKind::Concept);
        assert_eq!(definition_kind("a Device for measuring heat"), DefinitionKind::Object);
        assert_eq!(definition_kind("the method and principle of sorting"), DefinitionKind::Process);
        assert_eq!(definition_kind("the basic unit of life"), DefinitionKind::General);
    }

    #[test]
    fn test_template_order_first_wins() {
        // "is" is tried before "is known as".
        assert_eq!(
            match_definition("The capital city is known as the heart of the nation."),
            Some(("The capital city", "known as the heart of the nation"))
        );
        assert_eq!(
            match_definition("Osmosis refers to the movement of water across membranes."),
            Some(("Osmosis", "the movement of water across membranes"))
        );
    }

    #[test]
    fn test_term_cleanup() {
        assert_eq!(clean_term("The MITOCHONDRIA"), "Mitochondria");
        assert_eq!(clean_term("an electric field"), "Electric Field");
        assert_eq!(clean_term("a"), "A");
    }

    #[test]
    fn test_sentence_length_window() {
        assert!(defs("Cats are nice.").is_empty());
        let long = format!("Entropy is {}.", "very ".repeat(50));
        assert!(defs(&long).is_empty());
    }

    #[test]
    fn test_rejects_long_term_or_body() {
        let long_term = format!("{} is a word.", "word ".repeat(12).trim());
        assert!(defs(&long_term).is_empty());
        let limits = ExtractionLimits {
            max_definition_len: 10,
            ..Default::default()
        };
        let d = extract_definitions(
            segment("Photosynthesis is the process by which plants make food."),
            &limits,
        );
        assert!(d.is_empty());
    }

    #[test]
    fn test_rejects_deictic_terms() {
        assert!(defs("This is an important biological process.").is_empty());
        assert!(defs("These are the main findings of the study.").is_empty());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let d = defs(
            "A cell is the basic unit of life. \
             The cell is a tiny structure inside organisms.",
        );
        assert_eq!(d.len(), 1);
        assert_eq!(d[0].definition, "the basic unit of life");
    }

    #[test]
    fn test_caps() {
        let text: String = (0..20)
            .map(|i| format!("Term number{} is a definition of item {}. ", i, i))
            .collect();
        let limits = ExtractionLimits::default();
        assert_eq!(extract_definitions(segment(&text), &limits).len(), 6);
        assert_eq!(extract_key_concepts(segment(&text), &limits).len(), 8);
    }

    #[test]
    fn test_simplifies_body() {
        let d = defs("Recycling is a way to utilize numerous old materials.");
        assert_eq!(d[0].definition, "a way to use many old materials");
    }
}
