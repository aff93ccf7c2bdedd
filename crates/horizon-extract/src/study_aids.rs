//! Flashcards, practice questions, glossary, memory techniques, a study
//! schedule and the content statistics reported next to them.

use serde::{Deserialize, Serialize};

use crate::complexity::{round_to, ComplexityLevel, TextComplexity};
use crate::normalize::word_count;
use crate::report::ContentAnalysisReport;

const MAX_DEFINITION_CARDS: usize = 8;
const MAX_CONCEPT_CARDS: usize = 5;
const MIND_PALACE_MIN_CONCEPTS: usize = 5;
const STUDY_TIME_MULTIPLIER: f64 = 3.0;
const MAX_CONCEPT_QUESTIONS: usize = 5;
const MAX_PROCESS_QUESTIONS: usize = 3;
const MAX_PRACTICE_QUESTIONS: usize = 10;
const PROMPT_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AidKind {
    Definition,
    Concept,
    Process,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
    #[serde(rename = "type")]
    pub kind: AidKind,
    pub difficulty: String,
}

/// An open question to answer from memory, with a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: AidKind,
    pub difficulty: String,
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
    #[serde(rename = "type")]
    pub kind: AidKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryTechnique {
    pub technique: String,
    pub description: String,
    pub application: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionKind {
    Review,
    #[serde(rename = "Deep Study")]
    DeepStudy,
    Practice,
}

impl SessionKind {
    const ROTATION: [SessionKind; 4] = [Self::Review, Self::DeepStudy, Self::Practice, Self::Review];

    pub fn focus(&self) -> &'static str {
        match self {
            Self::Review => "Quick review of key concepts and definitions",
            Self::DeepStudy => "Detailed analysis of complex topics and processes",
            Self::Practice => "Test yourself with questions and flashcards",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub session: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    pub focus: String,
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySchedule {
    /// Minutes.
    pub total_study_time: f64,
    pub recommended_sessions: usize,
    /// Minutes per session.
    pub session_length: f64,
    pub schedule: Vec<StudySession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyAids {
    pub flashcards: Vec<Flashcard>,
    pub practice_questions: Vec<PracticeQuestion>,
    pub key_terms_glossary: Vec<GlossaryEntry>,
    pub study_schedule: StudySchedule,
    pub memory_techniques: Vec<MemoryTechnique>,
}

impl StudyAids {
    pub fn build(report: &ContentAnalysisReport, complexity: &TextComplexity) -> Self {
        Self {
            flashcards: flashcards(report),
            practice_questions: practice_questions(report),
            key_terms_glossary: glossary(report),
            study_schedule: study_schedule(complexity),
            memory_techniques: memory_techniques(report),
        }
    }
}

/// Definition cards first, then concept cards.
pub fn flashcards(report: &ContentAnalysisReport) -> Vec<Flashcard> {
    let definitions = report.definitions.iter().take(MAX_DEFINITION_CARDS).map(|d| Flashcard {
        front: format!("What is {}?", d.term),
        back: d.definition.clone(),
        kind: AidKind::Definition,
        difficulty: "medium".to_string(),
    });
    let concepts = report.key_concepts.iter().take(MAX_CONCEPT_CARDS).map(|c| Flashcard {
        front: format!("Explain the concept: {}", c.concept),
        back: c.description.clone(),
        kind: AidKind::Concept,
        difficulty: "medium".to_string(),
    });
    definitions.chain(concepts).collect()
}

/// "What is" questions for the leading concepts, then "describe" questions
/// for the leading processes.
pub fn practice_questions(report: &ContentAnalysisReport) -> Vec<PracticeQuestion> {
    let concepts = report.key_concepts.iter().take(MAX_CONCEPT_QUESTIONS).map(|c| PracticeQuestion {
        question: format!("What is {}?", c.concept),
        kind: AidKind::Definition,
        difficulty: "easy".to_string(),
        hint: format!("{}...", excerpt(&c.description)),
    });
    let processes = report.processes.iter().take(MAX_PROCESS_QUESTIONS).map(|p| PracticeQuestion {
        question: format!("Describe the process mentioned in: {}...", excerpt(&p.name)),
        kind: AidKind::Process,
        difficulty: "medium".to_string(),
        hint: format!("This process has {} main steps", p.step_count()),
    });
    concepts.chain(processes).take(MAX_PRACTICE_QUESTIONS).collect()
}

fn excerpt(text: &str) -> String {
    text.chars().take(PROMPT_EXCERPT_CHARS).collect()
}

/// Definitions and concepts sorted case-insensitively by term.
pub fn glossary(report: &ContentAnalysisReport) -> Vec<GlossaryEntry> {
    let mut entries: Vec<GlossaryEntry> = report
        .definitions
        .iter()
        .map(|d| GlossaryEntry {
            term: d.term.clone(),
            definition: d.definition.clone(),
            kind: AidKind::Definition,
        })
        .chain(report.key_concepts.iter().map(|c| GlossaryEntry {
            term: c.concept.clone(),
            definition: c.description.clone(),
            kind: AidKind::Concept,
        }))
        .collect();
    entries.sort_by_key(|e| e.term.to_lowercase());
    entries
}

pub fn memory_techniques(report: &ContentAnalysisReport) -> Vec<MemoryTechnique> {
    let technique = |name: &str, description: &str, application: &str| MemoryTechnique {
        technique: name.to_string(),
        description: description.to_string(),
        application: application.to_string(),
    };

    let mut techniques = Vec::new();
    if !report.processes.is_empty() {
        techniques.push(technique(
            "Acronyms",
            "Create acronyms for process steps",
            "Use first letters of each step to create memorable words",
        ));
    }
    if !report.statistics.is_empty() {
        techniques.push(technique(
            "Number Association",
            "Associate numbers with familiar concepts",
            "Link statistical values to dates or quantities you know",
        ));
    }
    if report.key_concepts.len() > MIND_PALACE_MIN_CONCEPTS {
        techniques.push(technique(
            "Mind Palace",
            "Visualize concepts in familiar locations",
            "Place each concept in a room of your house",
        ));
    }
    techniques
}

/// Study for three times the reading time, split by difficulty.
pub fn study_schedule(complexity: &TextComplexity) -> StudySchedule {
    let total = complexity.estimated_reading_time * STUDY_TIME_MULTIPLIER;

    let (min_sessions, minutes_per_session) = match complexity.complexity_level {
        ComplexityLevel::VeryDifficult => (4, 30.0),
        ComplexityLevel::Difficult => (3, 45.0),
        ComplexityLevel::Moderate | ComplexityLevel::Easy => (2, 60.0),
    };
    let sessions = ((total / minutes_per_session) as usize).max(min_sessions);

    let schedule = (0..sessions)
        .map(|i| {
            let kind = SessionKind::ROTATION[i % SessionKind::ROTATION.len()];
            StudySession {
                session: format!("Session {}", i + 1),
                kind,
                focus: kind.focus().to_string(),
                day: format!("Day {}", i + 1),
            }
        })
        .collect();

    StudySchedule {
        total_study_time: round_to(total, 1),
        recommended_sessions: sessions,
        session_length: round_to(total / sessions as f64, 1),
        schedule,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBreakdown {
    pub key_concepts: usize,
    pub definitions: usize,
    pub processes: usize,
    pub examples: usize,
    pub statistics: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AidCounts {
    pub flashcards: usize,
    pub practice_questions: usize,
    pub glossary_terms: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionEfficiency {
    /// Paragraphs are separated by blank lines; a text without one counts
    /// as a single paragraph.
    pub concepts_per_paragraph: f64,
    /// Texts under a thousand words count as one thousand.
    pub definitions_per_1000_words: f64,
}

/// How much was extracted from a text and what was built from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentStatistics {
    pub content_breakdown: ContentBreakdown,
    pub study_aids_generated: AidCounts,
    pub extraction_efficiency: ExtractionEfficiency,
}

impl ContentStatistics {
    /// `original` is the text before normalization, which still has its
    /// paragraph breaks.
    pub fn build(original: &str, report: &ContentAnalysisReport, aids: &StudyAids) -> Self {
        let paragraphs = original.matches("\n\n").count().max(1);
        let thousands = (word_count(original) as f64 / 1000.0).max(1.0);

        Self {
            content_breakdown: ContentBreakdown {
                key_concepts: report.key_concepts.len(),
                definitions: report.definitions.len(),
                processes: report.processes.len(),
                examples: report.examples.len(),
                statistics: report.statistics.len(),
            },
            study_aids_generated: AidCounts {
                flashcards: aids.flashcards.len(),
                practice_questions: aids.practice_questions.len(),
                glossary_terms: aids.key_terms_glossary.len(),
            },
            extraction_efficiency: ExtractionEfficiency {
                concepts_per_paragraph: round_to(report.key_concepts.len() as f64 / paragraphs as f64, 2),
                definitions_per_1000_words: round_to(report.definitions.len() as f64 / thousands, 2),
            },
        }
    }
}
