use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{build_dispatcher, load_registry};
use crate::{ClientArgs, OutputArgs};

fn read_request(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

pub async fn dispatch_cmd(
    request: &Path,
    catalog: &Path,
    client: ClientArgs,
    output: OutputArgs,
) -> i32 {
    let content = match read_request(request) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to read {}: {e}", request.display()),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    let body: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("request is not valid JSON: {e}"),
            );
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let loaded = match load_registry(catalog) {
        Ok(l) => l,
        Err(failure) => {
            failure.report(&output);
            return failure.exit_code();
        }
    };

    let dispatcher = match build_dispatcher(loaded.registry, &client.to_config()) {
        Ok(d) => d,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::RUNTIME_ERROR;
        }
    };

    match dispatcher.dispatch(&body).await {
        Ok(outcome) => {
            print_result(output.format, output.quiet, &outcome);
            if outcome.is_success() {
                exit_codes::SUCCESS
            } else {
                exit_codes::RUN_FAILED
            }
        }
        Err(err) => {
            if output.format == OutputFormat::Text && !output.quiet {
                eprintln!("error: {}", err.message);
            } else {
                print_result(output.format, output.quiet, &err.to_json());
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}
