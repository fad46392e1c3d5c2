//! Step coalescing: instruction stream to reported source lines.
//!
//! A transition executes many low-level instructions per source line. The
//! coalescer walks the instruction stream in order and reports a step for
//! the first instruction on each new source line, suppressing repeats and
//! lines that sanitize to nothing. Instructions with no source line at all
//! are counted and attached as a prefix annotation to the next reported
//! step.

use crate::classifier::{classify, InstructionTags};
use crate::sanitizer::sanitize_line;
use crate::trace::Transition;

/// Field width of the location column in rendered step text.
const LOCATION_WIDTH: usize = 20;

/// One source-level step surviving coalescing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedStep {
    /// Ordinal position among reported steps within the transition.
    pub height: usize,
    /// Count of preceding instructions that carried no source line.
    pub no_src: Option<u32>,
    /// Classification tags for the step's instruction.
    pub tags: InstructionTags,
    /// Rendered `" <location>: <sanitized source>"` text.
    pub text: String,
    /// File location of the step's instruction.
    pub file_location: String,
}

/// Walk one transition's steps and produce its reported steps.
///
/// Suppression compares the raw line against the previously seen raw line,
/// not the sanitized text, so two distinct raw lines that sanitize to the
/// same text are both reported. The previous-line state is refreshed on
/// every step, including steps without a source line, so a no-source run
/// between two occurrences of the same line breaks the suppression chain.
/// A no-source run at the tail of the transition is dropped.
pub fn coalesce_transition(transition: &Transition) -> Vec<ReportedStep> {
    let mut reported = Vec::new();
    let mut last_line: Option<&str> = None;
    let mut no_source_count: u32 = 0;

    for step in &transition.steps {
        let line = step.line();
        if let Some(raw) = line {
            let sanitized = sanitize_line(raw);
            if Some(raw) != last_line && !sanitized.is_empty() {
                reported.push(ReportedStep {
                    height: reported.len(),
                    no_src: (no_source_count > 0).then_some(no_source_count),
                    tags: classify(&step.instruction, &sanitized),
                    text: format!(
                        " {:<width$}: {}",
                        step.location,
                        sanitized,
                        width = LOCATION_WIDTH
                    ),
                    file_location: step.instruction.file_location.clone(),
                });
                no_source_count = 0;
            }
        } else {
            no_source_count += 1;
        }
        last_line = line;
    }

    reported
}
