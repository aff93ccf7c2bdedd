//! Readability and complexity metrics.
//!
//! Flesch reading ease and Flesch–Kincaid grade are computed with a
//! vowel-group syllable heuristic. Text without words or sentences gets
//! neutral defaults (ease 50, grade 10).

use serde::{Deserialize, Serialize};

use crate::normalize::word_count;
use crate::sentences::segment;
use crate::tagger::word_tokens;

const DEFAULT_READING_EASE: f64 = 50.0;
const DEFAULT_GRADE_LEVEL: f64 = 10.0;
const WORDS_PER_MINUTE: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplexityLevel {
    Easy,
    Moderate,
    Difficult,
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
}

impl ComplexityLevel {
    pub fn from_reading_ease(ease: f64) -> Self {
        if ease >= 70.0 {
            Self::Easy
        } else if ease >= 50.0 {
            Self::Moderate
        } else if ease >= 30.0 {
            Self::Difficult
        } else {
            Self::VeryDifficult
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextComplexity {
    pub word_count: usize,
    pub sentence_count: usize,
    pub unique_words: usize,
    pub vocabulary_density: f64,
    pub avg_sentence_length: f64,
    pub flesch_reading_ease: f64,
    pub grade_level: f64,
    pub complexity_level: ComplexityLevel,
    /// Minutes at 200 words per minute.
    pub estimated_reading_time: f64,
}

/// Coarse difficulty used to size generated quizzes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyReport {
    pub reading_ease: f64,
    pub difficulty_level: DifficultyLevel,
    pub word_count: usize,
    pub sentence_count: usize,
    pub recommended_questions: usize,
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Vowel groups, minus a silent trailing `e`, at least one.
pub fn count_syllables(word: &str) -> usize {
    let lower = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if count > 1 && lower.ends_with('e') && !lower.ends_with("le") {
        count -= 1;
    }
    count.max(1)
}

/// `(reading_ease, grade_level)` for the given counts.
fn readability(words: usize, sentences: usize, syllables: usize) -> (f64, f64) {
    if words == 0 || sentences == 0 {
        return (DEFAULT_READING_EASE, DEFAULT_GRADE_LEVEL);
    }
    let wps = words as f64 / sentences as f64;
    let spw = syllables as f64 / words as f64;
    let ease = 206.835 - 1.015 * wps - 84.6 * spw;
    let grade = 0.39 * wps + 11.8 * spw - 15.59;
    (ease, grade)
}

fn flesch(text: &str) -> (f64, f64, usize) {
    let words = word_tokens(text);
    let sentences = segment(text).count();
    let syllables = words.iter().map(|w| count_syllables(w)).sum();
    let (ease, grade) = readability(words.len(), sentences, syllables);
    (ease, grade, sentences)
}

pub fn analyze_complexity(text: &str) -> TextComplexity {
    let words: Vec<String> = word_tokens(text).iter().map(|w| w.to_lowercase()).collect();
    let (ease, grade, sentence_count) = flesch(text);

    let mut distinct = words.clone();
    distinct.sort_unstable();
    distinct.dedup();
    let unique_words = distinct.len();

    let avg_sentence_length = if sentence_count > 0 {
        words.len() as f64 / sentence_count as f64
    } else {
        0.0
    };
    let vocabulary_density = if words.is_empty() {
        0.0
    } else {
        unique_words as f64 / words.len() as f64
    };

    TextComplexity {
        word_count: words.len(),
        sentence_count,
        unique_words,
        vocabulary_density: round_to(vocabulary_density, 3),
        avg_sentence_length: round_to(avg_sentence_length, 2),
        flesch_reading_ease: round_to(ease, 2),
        grade_level: round_to(grade, 2),
        complexity_level: ComplexityLevel::from_reading_ease(ease),
        estimated_reading_time: round_to(words.len() as f64 / WORDS_PER_MINUTE, 1),
    }
}

pub fn analyze_difficulty(text: &str) -> DifficultyReport {
    let (ease, _, sentence_count) = flesch(text);
    let words = word_count(text);

    let difficulty_level = if ease > 70.0 {
        DifficultyLevel::Easy
    } else if ease > 30.0 {
        DifficultyLevel::Medium
    } else {
        DifficultyLevel::Hard
    };

    DifficultyReport {
        reading_ease: round_to(ease, 2),
        difficulty_level,
        word_count: words,
        sentence_count,
        recommended_questions: (words / 100).clamp(3, 10),
    }
}
