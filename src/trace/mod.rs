//! Recorded-trace input model.
//!
//! A model checker exploring thread interleavings dumps its search result as
//! JSON: one error report per property violation, each carrying the complete
//! path (ordered transitions) that led to it. These types mirror that dump;
//! the analysis pipeline reads them and never mutates them.

mod instruction;

pub use instruction::{Instruction, InstructionKind, MethodRef};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path as FsPath;

/// Complete recorded search result: one entry per reported error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    /// Error reports in discovery order, each with its complete path.
    pub errors: Vec<ErrorReport>,
}

impl Trace {
    /// Load a recorded trace from a JSON dump.
    pub fn from_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            bail!("Trace file not found: {}", path_ref.display());
        }

        let contents = fs::read_to_string(path_ref).context("Failed to read trace file")?;
        let trace: Trace = serde_json::from_str(&contents).context("Invalid trace JSON")?;
        Ok(trace)
    }
}

/// One reported property violation and the path that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error id assigned by the search.
    #[serde(default)]
    pub id: usize,
    /// Short description of the violated property.
    #[serde(default)]
    pub description: String,
    /// The complete explored path ending in this error.
    pub path: Path,
}

/// One complete explored execution: an ordered sequence of transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    /// Name of the application under test.
    pub application: String,
    /// Transitions in execution order.
    pub transitions: Vec<Transition>,
}

/// The unit of execution between two scheduling points: one thread runs a
/// sequence of steps selected by one scheduling decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    /// The executing thread.
    pub thread: ThreadInfo,
    /// The scheduling decision that selected it.
    pub choice: ChoiceGenerator,
    /// Instruction-level steps in execution order.
    pub steps: Vec<Step>,
}

/// Identity and entry point of the thread a transition executed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadInfo {
    /// Numeric thread id assigned by the checker.
    pub id: u32,
    /// Thread name (e.g. `"main"`, `"Thread-1"`).
    pub name: String,
    /// Fully qualified method the thread began executing in.
    pub entry_method: String,
    /// Scheduler state label at the time of the transition (e.g. `"RUNNING"`).
    pub state: String,
}

/// The scheduler's record of one scheduling decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceGenerator {
    /// Identity string. `"START"` and `"JOIN"` mark transitions in which a
    /// thread becomes runnable for the first time; the exact strings come
    /// from the trace format and are matched verbatim downstream.
    pub id: String,
    /// Declared number of available options.
    pub total_choices: usize,
    /// Index of the option that was taken.
    pub chosen: usize,
    /// All option values, rendered as text by the recorder.
    #[serde(default)]
    pub choices: Vec<String>,
}

/// One instruction-level point within a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// `file:line` location of the step.
    pub location: String,
    /// The executed instruction.
    pub instruction: Instruction,
}

impl Step {
    /// Source line the step maps to, when the original file carried one.
    pub fn line(&self) -> Option<&str> {
        self.instruction.source_line.as_deref()
    }
}
