//! Per-step instruction classification.
//!
//! Each reported step can carry a set of optional annotations describing
//! what the instruction does: entering a synchronized method, calling or
//! returning from a method, touching a field, or hitting one of the
//! thread-coordination calls (`wait`, `notify`, `notifyAll`). Detection of
//! the coordination calls is textual, against the sanitized source line.

use crate::trace::{Instruction, InstructionKind};

/// Thread-coordination call spotted in a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRelatedCall {
    Wait,
    Notify,
    NotifyAll,
}

impl ThreadRelatedCall {
    /// Name of the call as it appears in the output document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Notify => "notify",
            Self::NotifyAll => "notifyAll",
        }
    }
}

/// Annotations attached to a single reported step.
///
/// All fields are independent; a step may match several categories at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionTags {
    /// Full name of the synchronized method being entered, if any.
    pub synchronized: Option<String>,
    /// `Class.method` of an invoked method.
    pub method_call: Option<String>,
    /// Full name of the method being returned from.
    pub method_return: Option<String>,
    /// `Class.field` of an accessed field.
    pub field_access: Option<String>,
    /// Coordination call found in the sanitized line text.
    pub thread_related: Option<ThreadRelatedCall>,
}

impl InstructionTags {
    pub fn is_empty(&self) -> bool {
        self.synchronized.is_none()
            && self.method_call.is_none()
            && self.method_return.is_none()
            && self.field_access.is_none()
            && self.thread_related.is_none()
    }
}

/// Classify one instruction against its sanitized source line.
pub fn classify(instruction: &Instruction, sanitized_src: &str) -> InstructionTags {
    let mut tags = InstructionTags::default();

    if instruction.method.synchronized || instruction.method.sync_relevant {
        tags.synchronized = Some(instruction.method.full_name.clone());
    }

    match &instruction.kind {
        InstructionKind::Invocation {
            class_name,
            method_name,
        } => {
            tags.method_call = Some(format!("{class_name}.{method_name}"));
        }
        InstructionKind::Return => {
            tags.method_return = Some(instruction.method.full_name.clone());
        }
        InstructionKind::StaticFieldAccess {
            class_name,
            field_name,
        }
        | InstructionKind::InstanceFieldAccess {
            class_name,
            field_name,
        } => {
            tags.field_access = Some(format!("{class_name}.{field_name}"));
        }
        InstructionKind::Other => {}
    }

    tags.thread_related = detect_thread_related(sanitized_src);
    tags
}

/// First coordination call found in the line, checked in a fixed order.
///
/// `wait()` wins over `notify()`, which wins over `notifyAll()`. Note that
/// `notify()` never matches a `notifyAll()` call because of the literal
/// parenthesis in the needle.
fn detect_thread_related(src: &str) -> Option<ThreadRelatedCall> {
    if src.contains("wait()") {
        Some(ThreadRelatedCall::Wait)
    } else if src.contains("notify()") {
        Some(ThreadRelatedCall::Notify)
    } else if src.contains("notifyAll()") {
        Some(ThreadRelatedCall::NotifyAll)
    } else {
        None
    }
}
