use std::path::Path;

use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::utils::{load_registry, CatalogFailure};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    operations: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    disabled: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(catalog: &Path, output: OutputArgs) -> i32 {
    match load_registry(catalog) {
        Ok(loaded) => {
            let result = ValidateResult {
                valid: true,
                operations: loaded.registry.len(),
                disabled: loaded.disabled,
                errors: vec![],
            };
            if output.format == OutputFormat::Text && !output.quiet {
                println!(
                    "ok: {} operations registered from {}",
                    result.operations,
                    catalog.display()
                );
                for name in &result.disabled {
                    println!("  disabled: {name}");
                }
            } else {
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(failure @ CatalogFailure::Unreadable(_)) => {
            failure.report(&output);
            failure.exit_code()
        }
        Err(CatalogFailure::Invalid {
            message,
            violations,
        }) => {
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: {message}");
                for v in &violations {
                    eprintln!("- {v}");
                }
            } else {
                let mut errors = vec![message];
                errors.extend(violations);
                let result = ValidateResult {
                    valid: false,
                    operations: 0,
                    disabled: vec![],
                    errors,
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}
