use std::collections::HashSet;

use crate::types::CatalogIndex;
use crate::validate::validator::Validator;

pub(crate) fn validate_index(v: &mut Validator, index: &CatalogIndex) {
    let mut names = HashSet::<&str>::new();
    for (idx, entry) in index.operations.iter().enumerate() {
        let path = format!("$.operations[{idx}]");
        v.validate_name(&format!("{path}.name"), &entry.name);
        // Disabled entries still claim their name; a later entry must not shadow it.
        if !names.insert(entry.name.as_str()) {
            v.push(
                format!("{path}.name"),
                format!("duplicate operation name '{}'", entry.name),
            );
        }
        if entry.definition.trim().is_empty() {
            v.push(format!("{path}.definition"), "must not be empty");
        }
    }
}
