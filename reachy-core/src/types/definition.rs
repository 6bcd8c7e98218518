use serde_json::Value;

use crate::types::Params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Shape check only: does `value` look like this type tag.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ParamType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,

    /// Only meaningful for optional parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterLists {
    #[serde(default)]
    pub required: Vec<ParameterSpec>,

    #[serde(default)]
    pub optional: Vec<ParameterSpec>,
}

impl ParameterLists {
    pub fn iter(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.required.iter().chain(self.optional.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionKind {
    /// A unit compiled into the binary and looked up by name.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionRef {
    #[serde(rename = "type")]
    pub kind: ExecutionKind,

    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationDefinition {
    pub name: String,

    pub description: String,

    #[serde(default)]
    pub parameters: ParameterLists,

    pub execution: ExecutionRef,
}

impl OperationDefinition {
    /// Defaults declared by optional parameters, in declaration order.
    pub fn defaults(&self) -> Params {
        self.parameters
            .optional
            .iter()
            .filter_map(|p| p.default.clone().map(|d| (p.name.clone(), d)))
            .collect()
    }

    /// Supplied values layered over optional-parameter defaults.
    ///
    /// Keys not declared by the definition are passed through untouched.
    pub fn resolve_parameters(&self, supplied: &Params) -> Params {
        let mut resolved = self.defaults();
        for (k, v) in supplied {
            resolved.insert(k.clone(), v.clone());
        }
        resolved
    }

    /// Required parameter names absent (or null) in `params`.
    pub fn missing_required<'a>(&'a self, params: &Params) -> Vec<&'a str> {
        self.parameters
            .required
            .iter()
            .filter(|p| params.get(&p.name).map_or(true, Value::is_null))
            .map(|p| p.name.as_str())
            .collect()
    }
}
