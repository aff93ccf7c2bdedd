//! Note templates.
//!
//! A [`ContentAnalysisReport`] is rendered into a [`NoteDocument`]: a title
//! and an ordered list of sections. Sections are only created for populated
//! categories, so no template ever emits an empty header.

use std::fmt;

use horizon_core::ExtractionMode;
use serde::{Deserialize, Serialize};

use crate::report::ContentAnalysisReport;

const CORNELL_RULE_WIDTH: usize = 50;
const CORNELL_CUE_WIDTH: usize = 15;
const PARAGRAPH_KEY_POINTS: usize = 5;

/// Output template selector.
///
/// Parsing is lenient: unknown names fall back to [`NoteStyle::Bullet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NoteStyle {
    #[default]
    Bullet,
    Numbered,
    Paragraph,
    Flashcard,
    Comprehensive,
    Cornell,
}

/// One entry of the style catalogue.
#[derive(Debug, Clone, Serialize)]
pub struct StyleInfo {
    pub id: NoteStyle,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl NoteStyle {
    pub const ALL: [NoteStyle; 6] = [
        Self::Bullet,
        Self::Numbered,
        Self::Paragraph,
        Self::Flashcard,
        Self::Comprehensive,
        Self::Cornell,
    ];

    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "numbered" => Self::Numbered,
            "paragraph" => Self::Paragraph,
            "flashcard" => Self::Flashcard,
            "comprehensive" => Self::Comprehensive,
            "cornell" => Self::Cornell,
            _ => Self::Bullet,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullet => "bullet",
            Self::Numbered => "numbered",
            Self::Paragraph => "paragraph",
            Self::Flashcard => "flashcard",
            Self::Comprehensive => "comprehensive",
            Self::Cornell => "cornell",
        }
    }

    /// The least extraction mode whose output this template reads.
    pub fn required_mode(&self) -> ExtractionMode {
        match self {
            Self::Comprehensive | Self::Cornell => ExtractionMode::Advanced,
            _ => ExtractionMode::Basic,
        }
    }

    pub fn catalog() -> Vec<StyleInfo> {
        Self::ALL.iter().map(|s| s.info()).collect()
    }

    fn info(&self) -> StyleInfo {
        let (name, description, icon) = match self {
            Self::Bullet => (
                "Bullet Points",
                "Organized bullet points with key topics",
                "fas fa-list-ul",
            ),
            Self::Numbered => (
                "Numbered List",
                "Sequential numbered points for easy reference",
                "fas fa-list-ol",
            ),
            Self::Paragraph => (
                "Summary Paragraphs",
                "Flowing summary with main ideas",
                "fas fa-align-left",
            ),
            Self::Flashcard => (
                "Flashcards",
                "Question and answer format for studying",
                "fas fa-layer-group",
            ),
            Self::Comprehensive => (
                "Comprehensive Notes",
                "Summary, concepts, definitions, processes, examples and statistics",
                "fas fa-book",
            ),
            Self::Cornell => (
                "Cornell Notes",
                "Cue and note columns with a closing summary",
                "fas fa-columns",
            ),
        };
        StyleInfo {
            id: *self,
            name,
            description,
            icon,
        }
    }
}

impl From<&str> for NoteStyle {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for NoteStyle {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl fmt::Display for NoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A titled block of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSection {
    pub heading: String,
    pub entries: Vec<String>,
    /// Separate entries with a blank line.
    pub loose: bool,
}

impl NoteSection {
    fn tight(heading: &str, entries: Vec<String>) -> Self {
        Self {
            heading: heading.to_string(),
            entries,
            loose: false,
        }
    }

    fn loose(heading: &str, entries: Vec<String>) -> Self {
        Self {
            heading: heading.to_string(),
            entries,
            loose: true,
        }
    }
}

/// Rendered notes, derived from a report and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDocument {
    pub style: NoteStyle,
    pub title: String,
    pub sections: Vec<NoteSection>,
}

impl NoteDocument {
    pub fn build(report: &ContentAnalysisReport, style: NoteStyle) -> Self {
        let (title, sections) = match style {
            NoteStyle::Bullet => ("📝 **STUDY NOTES**", listed(report, |_| "•".to_string())),
            NoteStyle::Numbered => ("📝 **STUDY NOTES**", listed(report, |n| format!("{}.", n))),
            NoteStyle::Paragraph => ("📝 **STUDY NOTES**", paragraph(report)),
            NoteStyle::Flashcard => ("🃏 **FLASHCARD NOTES**", flashcards(report)),
            NoteStyle::Comprehensive => ("📚 **COMPREHENSIVE STUDY NOTES**", comprehensive(report)),
            NoteStyle::Cornell => ("📝 **CORNELL NOTES**", cornell(report)),
        };
        Self {
            style,
            title: title.to_string(),
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.title);
        out.push_str("\n\n");
        for section in &self.sections {
            out.push_str(&section.heading);
            out.push('\n');
            let sep = if section.loose { "\n\n" } else { "\n" };
            out.push_str(&section.entries.join(sep));
            out.push_str("\n\n");
        }
        out
    }
}

impl fmt::Display for NoteDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Render `report` with `style`.
pub fn format_notes(report: &ContentAnalysisReport, style: NoteStyle) -> String {
    NoteDocument::build(report, style).render()
}

fn summary_fallback(report: &ContentAnalysisReport) -> Vec<NoteSection> {
    if report.summary.standard.is_empty() {
        return Vec::new();
    }
    vec![NoteSection::tight(
        "📖 **Summary:**",
        vec![report.summary.standard.clone()],
    )]
}

/// Key points, terms and facts; `marker` receives a counter that runs across
/// all three sections.
fn listed(report: &ContentAnalysisReport, marker: impl Fn(usize) -> String) -> Vec<NoteSection> {
    if report.has_no_core_items() {
        return summary_fallback(report);
    }

    let mut counter = 0;
    let mut next = || {
        counter += 1;
        marker(counter)
    };
    let mut sections = Vec::new();

    if !report.key_points.is_empty() {
        let entries = report
            .key_points
            .iter()
            .map(|k| format!("{} {}", next(), k.text))
            .collect();
        sections.push(NoteSection::tight("🔑 **Key Points:**", entries));
    }
    if !report.definitions.is_empty() {
        let entries = report
            .definitions
            .iter()
            .map(|d| format!("{} **{}**: {}", next(), d.term, d.definition))
            .collect();
        sections.push(NoteSection::tight("📚 **Important Terms:**", entries));
    }
    if !report.facts.is_empty() {
        let entries = report
            .facts
            .iter()
            .map(|f| format!("{} {}", next(), f.text))
            .collect();
        sections.push(NoteSection::tight("💡 **Important Facts:**", entries));
    }

    sections
}

fn paragraph(report: &ContentAnalysisReport) -> Vec<NoteSection> {
    let mut sections = summary_fallback(report);

    if !report.key_points.is_empty() {
        let ideas: Vec<&str> = report
            .key_points
            .iter()
            .take(PARAGRAPH_KEY_POINTS)
            .map(|k| k.text.trim_end_matches(['.', '!', '?']))
            .collect();
        sections.push(NoteSection::tight(
            "🔑 **Main Ideas:**",
            vec![format!("The key concepts to remember are: {}.", ideas.join(", "))],
        ));
    }

    sections
}

fn flashcards(report: &ContentAnalysisReport) -> Vec<NoteSection> {
    if report.definitions.is_empty() && report.facts.is_empty() {
        return summary_fallback(report);
    }

    let mut sections = Vec::new();
    let offset = report.definitions.len();

    if !report.definitions.is_empty() {
        let cards = report
            .definitions
            .iter()
            .enumerate()
            .map(|(i, d)| {
                format!(
                    "**Card {}:**\nFront: What is {}?\nBack: {}",
                    i + 1,
                    d.term,
                    d.definition
                )
            })
            .collect();
        sections.push(NoteSection::loose("📚 **Term Cards:**", cards));
    }
    if !report.facts.is_empty() {
        let cards = report
            .facts
            .iter()
            .enumerate()
            .map(|(i, f)| format!("**Card {}:**\nFact: {}", offset + i + 1, f.text))
            .collect();
        sections.push(NoteSection::loose("💡 **Fact Cards:**", cards));
    }

    sections
}

fn comprehensive(report: &ContentAnalysisReport) -> Vec<NoteSection> {
    let mut sections = Vec::new();

    if !report.summary.standard.is_empty() {
        sections.push(NoteSection::tight(
            "📖 **Executive Summary:**",
            vec![report.summary.standard.clone()],
        ));
    }
    if !report.key_concepts.is_empty() {
        let entries = report
            .key_concepts
            .iter()
            .take(6)
            .map(|c| format!("• **{}**: {}", c.concept, c.description))
            .collect();
        sections.push(NoteSection::tight("🎯 **Key Concepts:**", entries));
    }
    if !report.definitions.is_empty() {
        let entries = report
            .definitions
            .iter()
            .take(5)
            .map(|d| format!("• **{}**: {}", d.term, d.definition))
            .collect();
        sections.push(NoteSection::tight("📚 **Important Definitions:**", entries));
    }
    if !report.processes.is_empty() {
        let entries = report
            .processes
            .iter()
            .take(2)
            .map(|p| {
                let steps: Vec<String> = p
                    .steps
                    .iter()
                    .map(|s| format!("  {}. {}", s.step_number, s.description))
                    .collect();
                format!("**{}**\n{}", p.name, steps.join("\n"))
            })
            .collect();
        sections.push(NoteSection::loose("⚙️ **Processes & Procedures:**", entries));
    }
    if !report.examples.is_empty() {
        let entries = report
            .examples
            .iter()
            .take(4)
            .map(|e| format!("• {}", e.text))
            .collect();
        sections.push(NoteSection::tight("💡 **Examples:**", entries));
    }
    if !report.statistics.is_empty() {
        let entries = report
            .statistics
            .iter()
            .take(5)
            .map(|s| format!("• {}", s.context))
            .collect();
        sections.push(NoteSection::tight("📊 **Key Statistics:**", entries));
    }

    sections
}

fn cornell_cue(concept: &str) -> String {
    if concept.chars().count() > CORNELL_CUE_WIDTH {
        let head: String = concept.chars().take(CORNELL_CUE_WIDTH).collect();
        format!("{}...", head)
    } else {
        format!("{:<width$}", concept, width = CORNELL_CUE_WIDTH)
    }
}

fn cornell(report: &ContentAnalysisReport) -> Vec<NoteSection> {
    let rule = "=".repeat(CORNELL_RULE_WIDTH);
    let mut sections = Vec::new();

    if !report.key_concepts.is_empty() {
        let rows = report
            .key_concepts
            .iter()
            .take(5)
            .map(|c| format!("{} | {}", cornell_cue(&c.concept), c.description))
            .collect();
        sections.push(NoteSection::tight(
            &format!("{rule}\n**CUES** | **NOTES**\n{rule}"),
            rows,
        ));
    }
    if !report.summary.brief.is_empty() {
        sections.push(NoteSection::tight(
            &format!("{rule}\n**SUMMARY:**"),
            vec![report.summary.brief.clone()],
        ));
    }

    sections
}
