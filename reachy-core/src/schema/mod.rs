//! Function-calling schemas for registered operations.

use serde_json::{json, Map, Value};

use crate::types::{OperationDefinition, ParameterSpec};

pub fn tool_schema(def: &OperationDefinition) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for spec in &def.parameters.required {
        properties.insert(spec.name.clone(), property(spec));
        required.push(Value::String(spec.name.clone()));
    }
    for spec in &def.parameters.optional {
        properties.insert(spec.name.clone(), property(spec));
    }

    json!({
        "type": "function",
        "function": {
            "name": def.name,
            "description": def.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        }
    })
}

pub fn tool_schemas<'a>(defs: impl IntoIterator<Item = &'a OperationDefinition>) -> Vec<Value> {
    defs.into_iter().map(tool_schema).collect()
}

fn property(spec: &ParameterSpec) -> Value {
    let mut prop = Map::new();
    prop.insert("type".into(), Value::String(spec.kind.as_str().into()));
    prop.insert(
        "description".into(),
        Value::String(spec.description.clone().unwrap_or_default()),
    );
    if let Some(allowed) = &spec.allowed {
        prop.insert("enum".into(), Value::Array(allowed.clone()));
    }
    if let Some(default) = &spec.default {
        prop.insert("default".into(), default.clone());
    }
    Value::Object(prop)
}
