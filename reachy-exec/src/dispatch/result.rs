use reachy_core::Params;
use serde::Serialize;
use serde_json::Value;

use crate::registry::LookupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateStatus {
    Success,
    Partial,
    Failed,
}

impl AggregateStatus {
    /// No failures is success, including the empty run; no successes is failed.
    pub fn from_counts(successful: usize, failed: usize) -> Self {
        if failed == 0 {
            Self::Success
        } else if successful == 0 {
            Self::Failed
        } else {
            Self::Partial
        }
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_index: Option<usize>,

    pub tool: String,

    pub parameters: Params,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Registered names, comma-joined. Only set on a lookup miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tools: Option<String>,

    pub status: StepStatus,
}

impl CommandResult {
    pub fn succeeded(tool: impl Into<String>, parameters: Params, result: Value) -> Self {
        Self {
            command_index: None,
            tool: tool.into(),
            parameters,
            result: Some(result),
            error: None,
            available_tools: None,
            status: StepStatus::Success,
        }
    }

    pub fn failed(tool: impl Into<String>, parameters: Params, error: impl Into<String>) -> Self {
        Self {
            command_index: None,
            tool: tool.into(),
            parameters,
            result: None,
            error: Some(error.into()),
            available_tools: None,
            status: StepStatus::Failed,
        }
    }

    pub fn not_found(miss: &LookupError, parameters: Params) -> Self {
        Self {
            available_tools: Some(miss.available_tools()),
            ..Self::failed(miss.name.clone(), parameters, miss.to_string())
        }
    }

    pub fn at_index(mut self, index: usize) -> Self {
        self.command_index = Some(index);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Success
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sequence,
}

/// Aggregate outcome of a batch. `successful + failed == total_commands`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceResult {
    pub mode: Mode,
    pub total_commands: usize,
    pub successful: usize,
    pub failed: usize,
    pub status: AggregateStatus,
    pub results: Vec<CommandResult>,
}

impl SequenceResult {
    pub fn is_success(&self) -> bool {
        self.status == AggregateStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DispatchOutcome {
    Single(CommandResult),
    Sequence(SequenceResult),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Single(r) => r.is_success(),
            Self::Sequence(s) => s.is_success(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
