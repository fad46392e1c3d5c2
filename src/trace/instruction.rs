//! Executed-instruction model with kind discrimination.

use serde::{Deserialize, Serialize};

/// Lowest-level executed unit of a step.
///
/// The recorder tags every instruction with one [`InstructionKind`] and the
/// identity of the method it belongs to. Kind payloads are flattened into the
/// instruction object in the recorded JSON, e.g.:
///
/// ```json
/// {
///   "kind": "invocation",
///   "class_name": "Racer",
///   "method_name": "doSomething",
///   "method": { "full_name": "Racer.run()V" },
///   "source_line": "doSomething(1001);",
///   "file_location": "Racer.java:12"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    /// Kind-specific payload, flattened into the instruction object.
    #[serde(flatten)]
    pub kind: InstructionKind,
    /// Method the instruction executes in.
    pub method: MethodRef,
    /// Source line recorded for the instruction, when the file carried one.
    #[serde(default)]
    pub source_line: Option<String>,
    /// `file:line` location recorded for the instruction.
    pub file_location: String,
}

/// Instruction kinds the classifier distinguishes.
///
/// Anything the recorder does not recognize arrives as `Other` and produces
/// no kind-derived tags downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstructionKind {
    /// Method invocation. The recorder fills `class_name` and `method_name`
    /// independently; observed dumps populate both from the invoked class
    /// name, and the pipeline renders whatever was recorded.
    Invocation {
        class_name: String,
        method_name: String,
    },
    /// Return from the enclosing method.
    Return,
    /// Static field read or write.
    StaticFieldAccess {
        class_name: String,
        field_name: String,
    },
    /// Instance field read or write.
    InstanceFieldAccess {
        class_name: String,
        field_name: String,
    },
    /// Anything else.
    #[default]
    Other,
}

/// Method identity carried by every instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodRef {
    /// Fully qualified `Class.method(signature)` name.
    pub full_name: String,
    /// Method declared synchronized.
    #[serde(default)]
    pub synchronized: bool,
    /// Method marked synchronization-relevant by the recorder's analysis.
    #[serde(default)]
    pub sync_relevant: bool,
}

impl MethodRef {
    /// Plain method reference with no synchronization flags.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            synchronized: false,
            sync_relevant: false,
        }
    }
}
