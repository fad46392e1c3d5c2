//! JSON document model for annotated concurrency traces.
//!
//! One record per explored path, nested as transitions, each carrying its
//! thread-info block, choice-info block and reported steps. Field names
//! follow the historical trace document format consumed by downstream
//! visualizers, so several spellings are fixed by compatibility rather
//! than taste.

use serde::{Deserialize, Serialize};

use crate::classifier::InstructionTags;
use crate::coalescer::ReportedStep;

/// Value of the `type` field on every path record.
pub const TRACE_TYPE: &str = "concurrency trace";

/// One path record of the output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPathTrace {
    /// Transitions in execution order.
    pub transitions: Vec<JsonTransition>,
    /// Application the path was explored for.
    pub app_name: String,
    /// Record type marker, always [`TRACE_TYPE`].
    #[serde(rename = "type")]
    pub trace_type: String,
    /// Document creation time, milliseconds since the Unix epoch.
    pub time: u64,
}

/// One transition of a path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonTransition {
    /// Index of the transition within its path.
    pub transition_id: usize,
    /// Executing thread, with any awake/switch annotations.
    pub thread_info: JsonThreadInfo,
    /// Scheduling choice taken to enter this transition.
    pub choice_info: JsonChoiceInfo,
    /// Reported source-level steps.
    pub steps: Vec<JsonStep>,
    /// Number of reported steps.
    pub num_steps: usize,
}

/// Thread identity block of a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonThreadInfo {
    /// Path-scoped emission sequence number.
    pub sequence_id: u64,
    pub thread_id: u32,
    pub thread_name: String,
    /// Full name of the method the thread began executing in.
    pub thread_entry_method: String,
    pub thread_state: String,
    /// Present when this transition wakes a thread up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awake: Option<JsonAwake>,
    /// Present when this transition switches executing threads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<JsonSwitch>,
}

/// Annotation for a thread becoming runnable (creation or post-join).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAwake {
    /// Id of the thread that woke up.
    pub tid: u32,
    pub current_thread_name: String,
    /// Running count of awake events within the path, after this one.
    pub thread_awake_count: u64,
}

/// Annotation for a change of executing thread between transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSwitch {
    pub prev_tid: u32,
    pub prev_thread_name: String,
    pub next_tid: u32,
    pub next_thread_name: String,
}

/// Scheduling choice block of a transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonChoiceInfo {
    /// Path-scoped emission sequence number.
    pub sequence_id: u64,
    /// Choice generator identity string.
    pub choice_id: String,
    /// Total number of options at this scheduling point.
    pub num_choices: usize,
    /// The option actually taken, rendered as text.
    pub current_choice: String,
    /// All options, rendered as text.
    pub choices: Vec<String>,
}

/// One reported source-level step.
///
/// Classification fields appear only when their condition holds; a plain
/// step serializes with just the always-present fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonStep {
    /// Path-scoped emission sequence number.
    pub sequence_id: u64,
    /// Count of preceding instructions without source lines, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_src: Option<u32>,
    /// Rendered `" <location>: <source>"` text.
    pub text: String,
    /// Height of the step among the transition's reported steps.
    pub step_location: usize,
    /// File location of the step's instruction.
    pub file_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_synchronized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sync_method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_method_call: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub called_method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_method_return: Option<bool>,
    /// Key spelling is historical; downstream consumers expect it.
    #[serde(
        rename = "returndMethodName",
        skip_serializing_if = "Option::is_none"
    )]
    pub returnd_method_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_field_access: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessed_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_thread_related_method: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_related_method: Option<String>,
}

impl JsonStep {
    /// Build a step record from a coalesced step and its sequence number.
    pub fn from_reported(step: ReportedStep, sequence_id: u64) -> Self {
        let ReportedStep {
            height,
            no_src,
            tags,
            text,
            file_location,
        } = step;
        let InstructionTags {
            synchronized,
            method_call,
            method_return,
            field_access,
            thread_related,
        } = tags;

        Self {
            sequence_id,
            no_src,
            text,
            step_location: height,
            file_location,
            is_synchronized: synchronized.is_some().then_some(true),
            sync_method_name: synchronized,
            is_method_call: method_call.is_some().then_some(true),
            called_method_name: method_call,
            is_method_return: method_return.is_some().then_some(true),
            returnd_method_name: method_return,
            is_field_access: field_access.is_some().then_some(true),
            accessed_field: field_access,
            is_thread_related_method: thread_related.is_some().then_some(true),
            thread_related_method: thread_related.map(|c| c.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ThreadRelatedCall;

    fn reported(tags: InstructionTags) -> ReportedStep {
        ReportedStep {
            height: 0,
            no_src: None,
            tags,
            text: " Racer.java:15       : d = 42;".to_string(),
            file_location: "Racer.java:15".to_string(),
        }
    }

    #[test]
    fn test_plain_step_serializes_without_tag_fields() {
        let step = JsonStep::from_reported(reported(InstructionTags::default()), 3);
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"sequenceId\":3"));
        assert!(json.contains("\"stepLocation\":0"));
        assert!(json.contains("\"fileLocation\":\"Racer.java:15\""));
        assert!(!json.contains("noSrc"));
        assert!(!json.contains("isSynchronized"));
        assert!(!json.contains("isMethodCall"));
        assert!(!json.contains("isFieldAccess"));
        assert!(!json.contains("isThreadRelatedMethod"));
    }

    #[test]
    fn test_tagged_step_pairs_flag_with_value() {
        let tags = InstructionTags {
            method_call: Some("java.lang.Thread.start".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&JsonStep::from_reported(reported(tags), 0)).unwrap();
        assert!(json.contains("\"isMethodCall\":true"));
        assert!(json.contains("\"calledMethodName\":\"java.lang.Thread.start\""));
    }

    #[test]
    fn test_method_return_key_keeps_historical_spelling() {
        let tags = InstructionTags {
            method_return: Some("Racer.run()V".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&JsonStep::from_reported(reported(tags), 0)).unwrap();
        assert!(json.contains("\"returndMethodName\":\"Racer.run()V\""));
        assert!(!json.contains("returnedMethodName"));
    }

    #[test]
    fn test_thread_related_value_rendered_as_text() {
        let tags = InstructionTags {
            thread_related: Some(ThreadRelatedCall::NotifyAll),
            ..Default::default()
        };
        let json = serde_json::to_string(&JsonStep::from_reported(reported(tags), 0)).unwrap();
        assert!(json.contains("\"isThreadRelatedMethod\":true"));
        assert!(json.contains("\"threadRelatedMethod\":\"notifyAll\""));
    }

    #[test]
    fn test_no_src_prefix_serialized_when_present() {
        let mut step = reported(InstructionTags::default());
        step.no_src = Some(4);
        let json = serde_json::to_string(&JsonStep::from_reported(step, 0)).unwrap();
        assert!(json.contains("\"noSrc\":4"));
    }

    #[test]
    fn test_thread_info_annotations_omitted_when_absent() {
        let info = JsonThreadInfo {
            sequence_id: 0,
            thread_id: 0,
            thread_name: "main".to_string(),
            thread_entry_method: "Racer.main([Ljava/lang/String;)V".to_string(),
            thread_state: "RUNNING".to_string(),
            awake: None,
            switch: None,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"threadEntryMethod\""));
        assert!(!json.contains("awake"));
        assert!(!json.contains("switch"));
    }

    #[test]
    fn test_awake_and_switch_keys() {
        let info = JsonThreadInfo {
            sequence_id: 5,
            thread_id: 1,
            thread_name: "Thread-1".to_string(),
            thread_entry_method: "Racer.run()V".to_string(),
            thread_state: "RUNNING".to_string(),
            awake: Some(JsonAwake {
                tid: 1,
                current_thread_name: "Thread-1".to_string(),
                thread_awake_count: 1,
            }),
            switch: Some(JsonSwitch {
                prev_tid: 0,
                prev_thread_name: "main".to_string(),
                next_tid: 1,
                next_thread_name: "Thread-1".to_string(),
            }),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"awake\":{\"tid\":1"));
        assert!(json.contains("\"currentThreadName\":\"Thread-1\""));
        assert!(json.contains("\"threadAwakeCount\":1"));
        assert!(json.contains("\"switch\":{\"prevTid\":0"));
        assert!(json.contains("\"nextThreadName\":\"Thread-1\""));
    }

    #[test]
    fn test_path_record_top_level_keys() {
        let record = JsonPathTrace {
            transitions: vec![],
            app_name: "Racer".to_string(),
            trace_type: TRACE_TYPE.to_string(),
            time: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"appName\":\"Racer\""));
        assert!(json.contains("\"type\":\"concurrency trace\""));
        assert!(json.contains("\"time\":1700000000000"));
    }
}
