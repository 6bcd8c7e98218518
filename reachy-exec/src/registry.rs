//! Immutable name to operation map, built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use reachy_core::OperationDefinition;

use crate::binder::{BindError, Binder};
use crate::unit::ExecutionUnit;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("operation '{0}' is defined more than once")]
    DuplicateOperation(String),
}

/// Lookup miss. Carries the registered names so callers can report them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Tool '{name}' not found")]
pub struct LookupError {
    pub name: String,
    pub available: Vec<String>,
}

impl LookupError {
    /// Registered names as a single comma-separated string.
    pub fn available_tools(&self) -> String {
        self.available.join(", ")
    }
}

#[derive(Clone)]
pub struct RegisteredOperation {
    pub definition: OperationDefinition,
    pub unit: Arc<dyn ExecutionUnit>,
}

impl std::fmt::Debug for RegisteredOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredOperation")
            .field("definition", &self.definition.name)
            .field("unit", &self.definition.execution.unit)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct OperationRegistry {
    operations: HashMap<String, RegisteredOperation>,
    names: Vec<String>,
}

impl OperationRegistry {
    /// Binds every definition. Fails on the first unresolvable unit or repeated name.
    pub fn build<I>(definitions: I, binder: &dyn Binder) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = OperationDefinition>,
    {
        let mut operations = HashMap::new();
        for definition in definitions {
            if operations.contains_key(&definition.name) {
                return Err(RegistryError::DuplicateOperation(definition.name));
            }
            let unit = binder.bind(&definition)?;
            tracing::info!(
                operation = %definition.name,
                unit = %definition.execution.unit,
                "registered operation"
            );
            operations.insert(definition.name.clone(), RegisteredOperation { definition, unit });
        }

        let mut names: Vec<String> = operations.keys().cloned().collect();
        names.sort_unstable();
        Ok(Self { operations, names })
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredOperation> {
        self.operations.get(name)
    }

    pub fn lookup(&self, name: &str) -> Result<&RegisteredOperation, LookupError> {
        self.get(name).ok_or_else(|| LookupError {
            name: name.to_string(),
            available: self.names.clone(),
        })
    }

    /// Registered names, sorted.
    pub fn available_names(&self) -> &[String] {
        &self.names
    }

    /// Definitions in name order.
    pub fn definitions(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.names
            .iter()
            .filter_map(|n| self.operations.get(n))
            .map(|op| &op.definition)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
