use crate::types::OperationDefinition;
use crate::validate::rules::parameters::validate_parameters;
use crate::validate::validator::Validator;

pub(crate) fn validate_definition(
    v: &mut Validator,
    path: &str,
    def: &OperationDefinition,
    expected_name: Option<&str>,
) {
    v.validate_name(&format!("{path}.name"), &def.name);
    if let Some(expected) = expected_name {
        if def.name != expected {
            v.push(
                format!("{path}.name"),
                format!("'{}' does not match index entry '{expected}'", def.name),
            );
        }
    }
    if def.description.trim().is_empty() {
        v.push(format!("{path}.description"), "must not be empty");
    }
    validate_parameters(v, &format!("{path}.parameters"), &def.parameters);
    if def.execution.unit.trim().is_empty() {
        v.push(format!("{path}.execution.unit"), "must not be empty");
    }
}
