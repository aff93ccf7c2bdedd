//! Sentence segmentation on terminal punctuation.
//!
//! Abbreviations and decimal numbers over-split ("Dr. Smith", "3.14"); that
//! is a known limitation of the heuristic and is not corrected here.

const TERMINATORS: &[char] = &['.', '!', '?'];

/// A sentence and its zero-based position among the emitted sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub position: usize,
}

impl<'a> Sentence<'a> {
    pub fn new(text: &'a str, position: usize) -> Self {
        Self { text, position }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Lazy iterator over the sentences of a text.
///
/// Cloning yields an independent iterator from the same point, so a fresh
/// `segment(text)` or a clone taken before iteration restarts the sequence.
#[derive(Debug, Clone)]
pub struct Sentences<'a> {
    text: &'a str,
    offset: usize,
    position: usize,
}

/// Split `text` on runs of `.`, `!` and `?`.
///
/// Each terminator run stays attached to the sentence it ends. Fragments that
/// are empty after trimming, or consist only of terminators, are skipped.
pub fn segment(text: &str) -> Sentences<'_> {
    Sentences {
        text,
        offset: 0,
        position: 0,
    }
}

impl<'a> Iterator for Sentences<'a> {
    type Item = Sentence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = &self.text[self.offset..];
            if rest.is_empty() {
                return None;
            }

            let end = match rest.find(TERMINATORS) {
                Some(i) => {
                    let after = &rest[i..];
                    i + (after.len() - after.trim_start_matches(TERMINATORS).len())
                }
                None => rest.len(),
            };

            let fragment = rest[..end].trim();
            self.offset += end;

            if fragment.trim_matches(TERMINATORS).trim().is_empty() {
                continue;
            }

            let sentence = Sentence::new(fragment, self.position);
            self.position += 1;
            return Some(sentence);
        }
    }
}

/// Collect the sentences of `text` in document order.
pub fn split_sentences(text: &str) -> Vec<Sentence<'_>> {
    segment(text).collect()
}
