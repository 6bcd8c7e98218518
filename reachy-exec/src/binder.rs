use std::collections::HashMap;
use std::sync::Arc;

use reachy_core::{ExecutionKind, OperationDefinition};

use crate::unit::ExecutionUnit;
use crate::units::builtin_units;

#[derive(Debug, thiserror::Error)]
pub enum BindError {
    #[error("operation '{operation}' references unknown execution unit '{unit}'")]
    UnknownUnit { operation: String, unit: String },
}

/// Resolves a definition's execution reference to a runnable unit.
pub trait Binder: Send + Sync {
    fn bind(&self, definition: &OperationDefinition) -> Result<Arc<dyn ExecutionUnit>, BindError>;
}

/// Name-addressed set of units. [`UnitLibrary::builtin`] holds every unit shipped
/// with the crate; tests and embedders can add or replace entries.
#[derive(Clone, Default)]
pub struct UnitLibrary {
    units: HashMap<String, Arc<dyn ExecutionUnit>>,
}

impl UnitLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut lib = Self::new();
        for (name, unit) in builtin_units() {
            lib.units.insert(name.to_string(), unit);
        }
        lib
    }

    pub fn with_unit(mut self, name: impl Into<String>, unit: impl ExecutionUnit + 'static) -> Self {
        self.insert(name, Arc::new(unit));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, unit: Arc<dyn ExecutionUnit>) {
        self.units.insert(name.into(), unit);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for UnitLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitLibrary").field("units", &self.names()).finish()
    }
}

impl Binder for UnitLibrary {
    fn bind(&self, definition: &OperationDefinition) -> Result<Arc<dyn ExecutionUnit>, BindError> {
        match definition.execution.kind {
            ExecutionKind::Builtin => self
                .units
                .get(&definition.execution.unit)
                .cloned()
                .ok_or_else(|| BindError::UnknownUnit {
                    operation: definition.name.clone(),
                    unit: definition.execution.unit.clone(),
                }),
        }
    }
}
