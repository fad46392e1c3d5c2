//! Path formatting: recorded trace to annotated document records.
//!
//! One left-to-right pass per path. Emission order is thread-info block,
//! choice-info block, then reported steps, and each record consumes one
//! path-scoped sequence number as it is emitted. Counters never leak
//! across paths; each path is formatted with a fresh set.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::coalescer::coalesce_transition;
use crate::json_output::{
    JsonAwake, JsonChoiceInfo, JsonPathTrace, JsonStep, JsonSwitch, JsonThreadInfo,
    JsonTransition, TRACE_TYPE,
};
use crate::trace::{ChoiceGenerator, Path, ThreadInfo, Trace, Transition};

/// Choice identity marking a thread's first scheduling after creation.
///
/// Inherited from the trace format; the exact string is load-bearing.
pub const CHOICE_ID_START: &str = "START";
/// Choice identity marking a thread's first scheduling after a join wakeup.
pub const CHOICE_ID_JOIN: &str = "JOIN";

/// Emission counters scoped to one path.
#[derive(Debug, Default)]
struct PathCounters {
    sequence_id: u64,
    awake_count: u64,
}

impl PathCounters {
    /// Hand out the next emission sequence number, starting from 0.
    fn next_sequence_id(&mut self) -> u64 {
        let id = self.sequence_id;
        self.sequence_id += 1;
        id
    }
}

/// Format every reported error's path into a document record.
pub fn format_trace(trace: &Trace) -> Vec<JsonPathTrace> {
    trace
        .errors
        .iter()
        .map(|error| {
            tracing::debug!(
                "formatting path for error {} ({} transitions)",
                error.id,
                error.path.transitions.len()
            );
            format_path(&error.path)
        })
        .collect()
}

/// Format one path, with counters fresh for this invocation.
pub fn format_path(path: &Path) -> JsonPathTrace {
    let mut counters = PathCounters::default();
    let transitions = path
        .transitions
        .iter()
        .enumerate()
        .map(|(tran_id, transition)| build_transition(path, tran_id, transition, &mut counters))
        .collect();

    JsonPathTrace {
        transitions,
        app_name: path.application.clone(),
        trace_type: TRACE_TYPE.to_string(),
        time: unix_time_millis(),
    }
}

fn build_transition(
    path: &Path,
    tran_id: usize,
    transition: &Transition,
    counters: &mut PathCounters,
) -> JsonTransition {
    let thread_info = build_thread_info(path, tran_id, transition, counters);
    let choice_info = encode_choice(&transition.choice, counters.next_sequence_id());
    let steps: Vec<JsonStep> = coalesce_transition(transition)
        .into_iter()
        .map(|step| JsonStep::from_reported(step, counters.next_sequence_id()))
        .collect();
    let num_steps = steps.len();

    JsonTransition {
        transition_id: tran_id,
        thread_info,
        choice_info,
        steps,
        num_steps,
    }
}

fn build_thread_info(
    path: &Path,
    tran_id: usize,
    transition: &Transition,
    counters: &mut PathCounters,
) -> JsonThreadInfo {
    let sequence_id = counters.next_sequence_id();
    let thread = &transition.thread;

    JsonThreadInfo {
        sequence_id,
        thread_id: thread.id,
        thread_name: thread.name.clone(),
        thread_entry_method: thread.entry_method.clone(),
        thread_state: thread.state.clone(),
        awake: detect_awake(path, &transition.choice, counters),
        switch: detect_switch(path, tran_id, thread),
    }
}

/// Awake annotation for a transition whose choice marks a thread becoming
/// runnable.
///
/// The woken thread is the one executing the path's last-choice transition,
/// at index `total_choices - 1`. A choice with no options, or an index past
/// the end of the path, yields no annotation and leaves the counter
/// untouched.
fn detect_awake(
    path: &Path,
    choice: &ChoiceGenerator,
    counters: &mut PathCounters,
) -> Option<JsonAwake> {
    if choice.id != CHOICE_ID_START && choice.id != CHOICE_ID_JOIN {
        return None;
    }
    let last_choice = choice.total_choices.checked_sub(1)?;
    let woken = &path.transitions.get(last_choice)?.thread;
    counters.awake_count += 1;

    Some(JsonAwake {
        tid: woken.id,
        current_thread_name: woken.name.clone(),
        thread_awake_count: counters.awake_count,
    })
}

/// Switch annotation when the executing thread differs from the previous
/// transition's thread.
///
/// The first transition has no predecessor and is annotated against itself;
/// downstream consumers rely on this to seed their view of the running
/// thread.
fn detect_switch(path: &Path, tran_id: usize, current: &ThreadInfo) -> Option<JsonSwitch> {
    let prev = &path.transitions.get(tran_id.saturating_sub(1))?.thread;
    if tran_id > 0 && prev.id == current.id {
        return None;
    }

    Some(JsonSwitch {
        prev_tid: prev.id,
        prev_thread_name: prev.name.clone(),
        next_tid: current.id,
        next_thread_name: current.name.clone(),
    })
}

/// Encode one scheduling choice with its emission sequence number.
fn encode_choice(choice: &ChoiceGenerator, sequence_id: u64) -> JsonChoiceInfo {
    JsonChoiceInfo {
        sequence_id,
        choice_id: choice.id.clone(),
        num_choices: choice.total_choices,
        current_choice: choice
            .choices
            .get(choice.chosen)
            .cloned()
            .unwrap_or_default(),
        choices: choice.choices.clone(),
    }
}

/// Milliseconds since the Unix epoch, 0 if the clock reads earlier.
fn unix_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
