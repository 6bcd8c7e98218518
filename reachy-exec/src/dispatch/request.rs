use reachy_core::{Params, Violation};
use serde_json::{json, Map, Value};

/// One operation to run. `tool_name` is accepted in place of `operation_name`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CommandRequest {
    #[serde(alias = "tool_name")]
    pub operation_name: String,

    #[serde(default)]
    pub parameters: Params,
}

impl CommandRequest {
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            parameters: Params::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Params) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }
}

/// A classified dispatch request. `commands` takes precedence over `operation_name`.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchRequest {
    Single(CommandRequest),
    Sequence(Vec<CommandRequest>),
}

/// Request-level shape failure. Aborts the whole dispatch call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    pub violations: Vec<Violation>,
}

impl RequestError {
    fn new(violations: Vec<Violation>) -> Self {
        let detail = violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            message: format!("invalid request: {detail}"),
            violations,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message,
            "violations": self.violations,
            "status": "failed",
        })
    }
}

impl DispatchRequest {
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let Some(obj) = value.as_object() else {
            return Err(RequestError::new(vec![Violation::new(
                "$",
                "request must be a map",
            )]));
        };

        let mut violations = Vec::new();
        let request = match obj.get("commands") {
            Some(commands) => Some(DispatchRequest::Sequence(read_commands(
                commands,
                &mut violations,
            ))),
            None => read_command("$", obj, &mut violations).map(DispatchRequest::Single),
        };

        match request {
            Some(request) if violations.is_empty() => Ok(request),
            _ => Err(RequestError::new(violations)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(steps) => steps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_commands(value: &Value, violations: &mut Vec<Violation>) -> Vec<CommandRequest> {
    let Some(items) = value.as_array() else {
        violations.push(Violation::new("$.commands", "must be a list of command maps"));
        return Vec::new();
    };

    let mut steps = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("$.commands[{i}]");
        match item.as_object() {
            Some(obj) => {
                if let Some(cmd) = read_command(&path, obj, violations) {
                    steps.push(cmd);
                }
            }
            None => violations.push(Violation::new(path, "must be a map")),
        }
    }
    steps
}

fn read_command(
    path: &str,
    obj: &Map<String, Value>,
    violations: &mut Vec<Violation>,
) -> Option<CommandRequest> {
    let before = violations.len();

    let name_path = format!("{path}.operation_name");
    let name = match obj.get("operation_name").or_else(|| obj.get("tool_name")) {
        None | Some(Value::Null) => {
            violations.push(Violation::new(&name_path, "is required"));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            violations.push(Violation::new(&name_path, "must not be empty"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::new(&name_path, "must be a string"));
            None
        }
    };

    let parameters = match obj.get("parameters") {
        None | Some(Value::Null) => Params::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => {
            violations.push(Violation::new(format!("{path}.parameters"), "must be a map"));
            Params::new()
        }
    };

    if violations.len() > before {
        return None;
    }
    name.map(|n| CommandRequest::new(n).with_parameters(parameters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(err: &RequestError) -> Vec<&str> {
        err.violations.iter().map(|v| v.path.as_str()).collect()
    }

    #[test]
    fn classifies_single_and_sequence() {
        let single = DispatchRequest::from_value(&json!({
            "operation_name": "nod_head",
            "parameters": { "angle": 10 }
        }))
        .unwrap();
        assert_eq!(
            single,
            DispatchRequest::Single(CommandRequest::new("nod_head").with_param("angle", 10))
        );

        let seq = DispatchRequest::from_value(&json!({
            "commands": [{ "tool_name": "a" }, { "operation_name": "b", "parameters": null }]
        }))
        .unwrap();
        assert_eq!(
            seq,
            DispatchRequest::Sequence(vec![CommandRequest::new("a"), CommandRequest::new("b")])
        );
    }

    #[test]
    fn commands_takes_precedence() {
        let req = DispatchRequest::from_value(&json!({
            "operation_name": "ignored",
            "commands": []
        }))
        .unwrap();
        assert_eq!(req, DispatchRequest::Sequence(Vec::new()));
        assert!(req.is_empty());
    }

    #[test]
    fn collects_shape_violations() {
        let err = DispatchRequest::from_value(&json!({
            "commands": [{ "operation_name": "ok" }, 7, { "parameters": [] }]
        }))
        .unwrap_err();
        assert_eq!(
            paths(&err),
            vec![
                "$.commands[1]",
                "$.commands[2].operation_name",
                "$.commands[2].parameters"
            ]
        );
        assert!(err.message.starts_with("invalid request: $.commands[1]: must be a map"));
    }

    #[test]
    fn rejects_non_list_commands_and_missing_name() {
        let err = DispatchRequest::from_value(&json!({ "commands": { "a": 1 } })).unwrap_err();
        assert_eq!(paths(&err), vec!["$.commands"]);

        let err = DispatchRequest::from_value(&json!({ "parameters": {} })).unwrap_err();
        assert_eq!(paths(&err), vec!["$.operation_name"]);

        let err = DispatchRequest::from_value(&json!("nod_head")).unwrap_err();
        assert_eq!(err.to_json()["status"], "failed");
    }
}
