//! Step-by-step process extraction.

use horizon_core::ExtractionLimits;

use super::{contains_any, importance_score, Process, Provenance, Step};
use crate::sentences::Sentence;
use crate::simplify::simplify;
use crate::tagger::{content_keywords, Tagger};

/// Words that open a new process.
pub const PROCESS_MARKERS: &[&str] = &["process", "steps", "procedure", "method"];
/// Words that mark a sentence as a step of the open process.
pub const STEP_MARKERS: &[&str] = &["first", "second", "then", "next", "step"];

const STEP_KEYWORDS: usize = 5;

/// Group sentences into processes.
///
/// A sentence containing a process marker names a new process and closes the
/// previous one. While a process is open, sentences with a step marker and at
/// least `limits.min_step_words` words become its ordered steps. Processes
/// that collected no steps are dropped, as are steps seen before any process.
pub fn extract_processes<'a>(
    sentences: impl IntoIterator<Item = Sentence<'a>>,
    limits: &ExtractionLimits,
    tagger: &dyn Tagger,
) -> Vec<Process> {
    let mut processes = Vec::new();
    let mut current: Option<Process> = None;

    for sentence in sentences {
        let lower = sentence.lower();

        if contains_any(&lower, PROCESS_MARKERS) {
            if let Some(done) = current.take() {
                push_if_stepped(&mut processes, done);
            }
            current = Some(Process {
                name: simplify(sentence.text),
                steps: Vec::new(),
                score: importance_score(sentence.text),
                source: Provenance::from(&sentence),
            });
        } else if contains_any(&lower, STEP_MARKERS) && sentence.word_count() >= limits.min_step_words {
            if let Some(process) = current.as_mut() {
                process.steps.push(Step {
                    step_number: process.steps.len() + 1,
                    description: simplify(sentence.text),
                    keywords: content_keywords(tagger, sentence.text, STEP_KEYWORDS),
                    source: Provenance::from(&sentence),
                });
            }
        }
    }

    if let Some(done) = current {
        push_if_stepped(&mut processes, done);
    }

    processes
}

fn push_if_stepped(processes: &mut Vec<Process>, process: Process) {
    if !process.steps.is_empty() {
        processes.push(process);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentences::segment;
    use crate::tagger::HeuristicTagger;

    fn run(text: &str) -> Vec<Process> {
        extract_processes(segment(text), &ExtractionLimits::default(), &HeuristicTagger)
    }

    #[test]
    fn test_groups_steps_under_process() {
        let p = run(
            "Baking bread follows a simple process. \
             First, mix the flour with water and yeast. \
             Then knead the dough for ten minutes. \
             Next, let it rise. \
             The method for cleaning is different. \
             First wipe the counter with a damp cloth.",
        );
        assert_eq!(p.len(), 2);
        assert_eq!(p[0].name, "Baking bread follows a simple process.");
        // "Next, let it rise." has four words and is skipped.
        assert_eq!(p[0].step_count(), 2);
        assert_eq!(p[0].steps[1].step_number, 2);
        assert!(p[0].steps[0].keywords.contains(&"flour".to_string()));
        assert_eq!(p[1].steps.len(), 1);
    }

    #[test]
    fn test_steps_before_any_process_are_ignored() {
        let p = run("First, gather all the tools you need. Then start working on it.");
        assert!(p.is_empty());
    }

    #[test]
    fn test_process_without_steps_dropped() {
        let p = run("The procedure is documented elsewhere. Nothing else follows here.");
        assert!(p.is_empty());
    }
}
