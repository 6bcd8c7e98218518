pub(crate) mod rules;
mod validator;

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CatalogIndex, OperationDefinition};
pub(crate) use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for OperationDefinition {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        rules::definition::validate_definition(&mut v, "$", self, None);
        v.finish()
    }
}

impl Validate for CatalogIndex {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new();
        rules::index::validate_index(&mut v, self);
        v.finish()
    }
}

/// Validates an in-memory set of definitions, including name uniqueness across the set.
pub fn validate_definitions(defs: &[OperationDefinition]) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    let mut names = HashSet::<&str>::new();
    for (idx, def) in defs.iter().enumerate() {
        let path = format!("$[{idx}]");
        if !names.insert(def.name.as_str()) {
            v.push(format!("{path}.name"), format!("duplicate operation name '{}'", def.name));
        }
        rules::definition::validate_definition(&mut v, &path, def, None);
    }
    v.finish()
}
