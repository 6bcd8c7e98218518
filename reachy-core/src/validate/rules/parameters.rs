use std::collections::HashSet;

use crate::types::{ParamType, ParameterLists, ParameterSpec};
use crate::validate::validator::Validator;

pub(crate) fn validate_parameters(v: &mut Validator, path: &str, params: &ParameterLists) {
    let mut seen = HashSet::<&str>::new();
    for (list, specs) in [("required", &params.required), ("optional", &params.optional)] {
        for (idx, spec) in specs.iter().enumerate() {
            let ipath = format!("{path}.{list}[{idx}]");
            if spec.name.trim().is_empty() {
                v.push(format!("{ipath}.name"), "must not be empty");
            }
            if !seen.insert(spec.name.as_str()) {
                v.push(
                    format!("{ipath}.name"),
                    format!("duplicate parameter '{}'", spec.name),
                );
            }
            if list == "required" && spec.default.is_some() {
                v.push(
                    format!("{ipath}.default"),
                    "required parameters cannot declare a default",
                );
            }
            validate_spec_values(v, &ipath, spec);
        }
    }
}

fn validate_spec_values(v: &mut Validator, path: &str, spec: &ParameterSpec) {
    if let Some(allowed) = &spec.allowed {
        if spec.kind != ParamType::String {
            v.push(format!("{path}.enum"), "only string parameters may declare an enum");
        } else if allowed.is_empty() {
            v.push(format!("{path}.enum"), "must not be empty");
        } else if let Some(bad) = allowed.iter().position(|a| !a.is_string()) {
            v.push(format!("{path}.enum[{bad}]"), "must be a string");
        }
    }

    let Some(default) = &spec.default else {
        return;
    };
    if !spec.kind.accepts(default) {
        v.push(
            format!("{path}.default"),
            format!("does not match declared type '{}'", spec.kind),
        );
        return;
    }
    if let Some(allowed) = &spec.allowed {
        if !allowed.contains(default) {
            v.push(format!("{path}.default"), "must be one of the enum values");
        }
    }
}
