use std::path::Path;
use std::sync::Arc;

use reachy_core::LoadError;
use reachy_exec::{
    ClientConfig, Dispatcher, OperationRegistry, RegistryError, ReqwestTransport, UnitLibrary,
};

use crate::exit_codes;
use crate::output::{print_error, OutputFormat};
use crate::OutputArgs;

pub struct LoadedCatalog {
    pub registry: OperationRegistry,
    pub disabled: Vec<String>,
}

/// Why a catalog could not be turned into a registry.
pub enum CatalogFailure {
    /// Content problem: parse, validation or binding.
    Invalid {
        message: String,
        violations: Vec<String>,
    },
    /// The catalog could not be read at all.
    Unreadable(String),
}

impl CatalogFailure {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Invalid { .. } => exit_codes::VALIDATION_FAILED,
            Self::Unreadable(_) => exit_codes::RUNTIME_ERROR,
        }
    }

    pub fn report(&self, output: &OutputArgs) {
        match self {
            Self::Unreadable(message) => print_error(output.format, output.quiet, message),
            Self::Invalid {
                message,
                violations,
            } => {
                if output.quiet {
                    return;
                }
                match output.format {
                    OutputFormat::Text => {
                        eprintln!("error: {message}");
                        for v in violations {
                            eprintln!("- {v}");
                        }
                    }
                    OutputFormat::Json => {
                        let err = serde_json::json!({ "error": message, "violations": violations });
                        eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
                    }
                }
            }
        }
    }
}

impl From<LoadError> for CatalogFailure {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Validation(v) => Self::Invalid {
                message: v.to_string(),
                violations: v.violations.iter().map(ToString::to_string).collect(),
            },
            LoadError::Parse { .. } | LoadError::MissingDefinition { .. } => Self::Invalid {
                message: err.to_string(),
                violations: Vec::new(),
            },
            LoadError::MissingIndex(_) | LoadError::Io { .. } => Self::Unreadable(err.to_string()),
        }
    }
}

impl From<RegistryError> for CatalogFailure {
    fn from(err: RegistryError) -> Self {
        Self::Invalid {
            message: err.to_string(),
            violations: Vec::new(),
        }
    }
}

pub fn load_registry(dir: &Path) -> Result<LoadedCatalog, CatalogFailure> {
    let catalog = reachy_core::load(dir)?;
    let disabled = catalog.disabled().to_vec();
    let registry = OperationRegistry::build(catalog.into_definitions(), &UnitLibrary::builtin())?;
    tracing::info!(
        catalog = %dir.display(),
        operations = registry.len(),
        disabled = disabled.len(),
        "catalog loaded"
    );
    Ok(LoadedCatalog { registry, disabled })
}

pub fn build_dispatcher(registry: OperationRegistry, config: &ClientConfig) -> Result<Dispatcher, String> {
    let transport = ReqwestTransport::new(config).map_err(|e| e.to_string())?;
    Ok(Dispatcher::new(Arc::new(registry), Arc::new(transport)))
}
