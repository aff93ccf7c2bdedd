//! Multiple-choice question generation.
//!
//! Every slot picks one of four generators through the caller's RNG, so a
//! seeded generator reproduces the same quiz. Each source sentence feeds at
//! most one question and slots that find nothing are skipped.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::definitions::{is_deictic, match_definition};
use crate::normalize::normalize;
use crate::sentences::{split_sentences, Sentence};
use crate::tagger::{nouns, word_tokens, HeuristicTagger, Tagger};

pub const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];
const CORRECT_KEY: &str = "A";
const MAX_DISTRACTOR_SENTENCE_LEN: usize = 100;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:1\d{3}|20\d{2})\b").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static PROPER_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z]+ [A-Z][a-z]+").unwrap());

static CAUSE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["because", "results in", "leads to", "causes"]
        .iter()
        .map(|verb| Regex::new(&format!(r"(?i)^(.+?) {} (.+?)[.!?]*$", verb)).unwrap())
        .collect()
});

const COMPARISON_WORDS: &[&str] = &["unlike", "compared to", "whereas", "while", "different from"];

const GENERIC_CAUSES: &[&str] = &[
    "Environmental factors",
    "Human intervention",
    "Natural processes",
    "External influences",
    "Internal mechanisms",
    "Random occurrence",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Definition,
    Factual,
    Concept,
    Comparison,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [Self::Definition, Self::Factual, Self::Concept, Self::Comparison];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    /// Keyed `A` to `D`.
    pub options: BTreeMap<String, String>,
    pub correct_answer: String,
    pub explanation: String,
    pub kind: QuestionKind,
}

impl QuizQuestion {
    fn new(
        kind: QuestionKind,
        question: String,
        answer: String,
        distractors: [String; 3],
        explanation: String,
    ) -> Self {
        let options = OPTION_KEYS
            .iter()
            .zip(std::iter::once(answer).chain(distractors))
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Self {
            question,
            options,
            correct_answer: CORRECT_KEY.to_string(),
            explanation,
            kind,
        }
    }

    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(&self.correct_answer).map(String::as_str)
    }
}

/// A question together with the sentence it consumed.
type Drafted = (QuizQuestion, usize);

pub struct QuizGenerator<T: Tagger = HeuristicTagger> {
    tagger: T,
}

impl QuizGenerator<HeuristicTagger> {
    pub fn new() -> Self {
        Self {
            tagger: HeuristicTagger,
        }
    }
}

impl Default for QuizGenerator<HeuristicTagger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tagger> QuizGenerator<T> {
    pub fn with_tagger(tagger: T) -> Self {
        Self { tagger }
    }

    /// Draw up to `count` questions from `text`.
    pub fn generate<R: Rng + ?Sized>(&self, text: &str, count: usize, rng: &mut R) -> Vec<QuizQuestion> {
        let normalized = normalize(text);
        let sentences = split_sentences(&normalized);
        let mut used: HashSet<usize> = HashSet::new();
        let mut asked: HashSet<String> = HashSet::new();
        let mut questions = Vec::new();

        for _ in 0..count {
            let Some(kind) = QuestionKind::ALL.choose(&mut *rng).copied() else {
                break;
            };
            let drafted = match kind {
                QuestionKind::Definition => self.definition_question(&sentences, &used),
                QuestionKind::Factual => self.factual_question(&sentences, &used, &mut *rng),
                QuestionKind::Concept => self.concept_question(&sentences, &used),
                QuestionKind::Comparison => self.comparison_question(&sentences, &used, &mut *rng),
            };
            if let Some((question, position)) = drafted {
                if asked.insert(question.question.clone()) {
                    used.insert(position);
                    questions.push(question);
                }
            }
        }

        debug!("Generated {} of {} requested questions", questions.len(), count);
        questions
    }

    pub(crate) fn definition_question(
        &self,
        sentences: &[Sentence<'_>],
        used: &HashSet<usize>,
    ) -> Option<Drafted> {
        unused(sentences, used).find_map(|s| {
            let (term, body) = match_definition(s.text)?;
            if is_deictic(term) {
                return None;
            }
            let distractors = sentence_distractors(body, sentences);
            let question = QuizQuestion::new(
                QuestionKind::Definition,
                format!("What is {}?", term),
                body.to_string(),
                distractors,
                format!("{} is correctly defined as {}", term, body),
            );
            Some((question, s.position))
        })
    }

    pub(crate) fn factual_question<R: Rng + ?Sized>(
        &self,
        sentences: &[Sentence<'_>],
        used: &HashSet<usize>,
        rng: &mut R,
    ) -> Option<Drafted> {
        unused(sentences, used).find_map(|s| {
            let (fact, distractors) = blank_candidate(s.text, &mut *rng)?;
            let blanked = s.text.replacen(fact, "____", 1);
            let question = QuizQuestion::new(
                QuestionKind::Factual,
                format!("{}?", blanked.trim_end_matches(['.', '!', '?'])),
                fact.to_string(),
                distractors,
                format!("The correct answer is {} as stated in the text.", fact),
            );
            Some((question, s.position))
        })
    }

    pub(crate) fn concept_question(
        &self,
        sentences: &[Sentence<'_>],
        used: &HashSet<usize>,
    ) -> Option<Drafted> {
        unused(sentences, used).find_map(|s| {
            let caps = CAUSE_PATTERNS.iter().find_map(|re| re.captures(s.text))?;
            let effect = caps.get(1)?.as_str().trim();
            let cause = caps.get(2)?.as_str().trim();

            let mut generic = GENERIC_CAUSES
                .iter()
                .filter(|g| !g.eq_ignore_ascii_case(cause))
                .map(|g| g.to_string());
            let distractors = [generic.next()?, generic.next()?, generic.next()?];

            let question = QuizQuestion::new(
                QuestionKind::Concept,
                format!("What causes {}?", effect),
                cause.to_string(),
                distractors,
                format!("{} is caused by {}.", effect, cause),
            );
            Some((question, s.position))
        })
    }

    pub(crate) fn comparison_question<R: Rng + ?Sized>(
        &self,
        sentences: &[Sentence<'_>],
        used: &HashSet<usize>,
        rng: &mut R,
    ) -> Option<Drafted> {
        for s in unused(sentences, used) {
            let lower = s.lower();
            if !COMPARISON_WORDS.iter().any(|w| lower.contains(w)) {
                continue;
            }
            let tokens = word_tokens(s.text);
            let candidates = nouns(&self.tagger, &tokens);
            if candidates.len() < 2 {
                continue;
            }
            let picked: Vec<&str> = candidates.choose_multiple(rng, 2).copied().collect();
            let (first, second) = (picked[0], picked[1]);

            let question = QuizQuestion::new(
                QuestionKind::Comparison,
                format!("How does {} differ from {}?", first, second),
                "Based on the context provided in the text".to_string(),
                [
                    "They are identical in all aspects".to_string(),
                    "There is no significant difference".to_string(),
                    "The text does not provide this information".to_string(),
                ],
                format!(
                    "The text provides context about the differences between {} and {}.",
                    first, second
                ),
            );
            return Some((question, s.position));
        }
        None
    }
}

fn unused<'s, 'a>(
    sentences: &'s [Sentence<'a>],
    used: &'s HashSet<usize>,
) -> impl Iterator<Item = Sentence<'a>> + 's {
    sentences.iter().filter(move |s| !used.contains(&s.position)).copied()
}

/// Short sentences that do not contain the answer, padded with placeholders.
fn sentence_distractors(answer: &str, sentences: &[Sentence<'_>]) -> [String; 3] {
    let answer_lower = answer.to_lowercase();
    let mut found = sentences
        .iter()
        .filter(|s| s.len() < MAX_DISTRACTOR_SENTENCE_LEN && !s.lower().contains(&answer_lower))
        .map(|s| s.text.trim().to_string());
    let mut fallback = numbered_fallbacks("Alternative answer").into_iter();
    let mut next = || found.next().or_else(|| fallback.next()).unwrap_or_default();
    [next(), next(), next()]
}

/// The first year, number or proper name in `text` and three distractors.
///
/// `None` when the sentence has no candidate or its number does not fit in
/// an `i64`.
fn blank_candidate<'t, R: Rng + ?Sized>(text: &'t str, rng: &mut R) -> Option<(&'t str, [String; 3])> {
    if let Some(m) = YEAR_RE.find(text) {
        let year: i64 = m.as_str().parse().ok()?;
        let offsets: Vec<i64> = (-10..=10).filter(|o| *o != 0).collect();
        return Some((m.as_str(), offset_distractors(year, offsets, rng)));
    }
    if let Some(m) = NUMBER_RE.find(text) {
        let value: i64 = m.as_str().parse().ok()?;
        return Some((m.as_str(), offset_distractors(value, (1..=10).collect(), rng)));
    }
    let m = PROPER_NAME_RE.find(text)?;
    Some((m.as_str(), numbered_fallbacks("Alternative name")))
}

/// Three distinct values `base ± offset` with offsets drawn without
/// repetition. An offset that would overflow is applied the other way.
fn offset_distractors<R: Rng + ?Sized>(base: i64, mut offsets: Vec<i64>, rng: &mut R) -> [String; 3] {
    offsets.shuffle(rng);
    let mut values = offsets
        .into_iter()
        .filter_map(|o| base.checked_add(o).or_else(|| base.checked_sub(o)))
        .map(|v| v.to_string());
    let mut next = || values.next().unwrap_or_default();
    [next(), next(), next()]
}

fn numbered_fallbacks(prefix: &str) -> [String; 3] {
    [
        format!("{} 1", prefix),
        format!("{} 2", prefix),
        format!("{} 3", prefix),
    ]
}
