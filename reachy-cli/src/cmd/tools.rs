use std::path::Path;

use reachy_core::tool_schemas;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::utils::load_registry;
use crate::OutputArgs;

#[derive(Serialize)]
struct ToolInfo<'a> {
    name: &'a str,
    description: &'a str,
    required: Vec<&'a str>,
}

pub async fn tools_cmd(catalog: &Path, schema: bool, output: OutputArgs) -> i32 {
    let loaded = match load_registry(catalog) {
        Ok(l) => l,
        Err(failure) => {
            failure.report(&output);
            return failure.exit_code();
        }
    };
    let registry = &loaded.registry;

    if schema {
        print_result(output.format, output.quiet, &tool_schemas(registry.definitions()));
        return exit_codes::SUCCESS;
    }

    let tools: Vec<ToolInfo<'_>> = registry
        .definitions()
        .map(|d| ToolInfo {
            name: &d.name,
            description: &d.description,
            required: d.parameters.required.iter().map(|p| p.name.as_str()).collect(),
        })
        .collect();

    if output.format == OutputFormat::Text && !output.quiet {
        println!("Operations in {}:", catalog.display());
        for t in &tools {
            println!("  - {}: {}", t.name, t.description);
            if !t.required.is_empty() {
                println!("    requires: {}", t.required.join(", "));
            }
        }
    } else {
        print_result(output.format, output.quiet, &tools);
    }

    exit_codes::SUCCESS
}
