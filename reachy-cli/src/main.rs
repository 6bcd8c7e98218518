use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;
mod utils;

pub use args::*;
use commands::Command;

const DEFAULT_LOG_FILTER: &str = "reachy=info,reachy_exec=info";

#[derive(Debug, Parser)]
#[command(name = "reachy", version, about = "Reachy Mini operation dispatcher")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Validate { catalog, output } => {
            cmd::validate::validate_cmd(&catalog.catalog, output).await
        }
        Command::Tools {
            schema,
            catalog,
            output,
        } => cmd::tools::tools_cmd(&catalog.catalog, schema, output).await,
        Command::Dispatch {
            request,
            catalog,
            client,
            output,
        } => cmd::dispatch::dispatch_cmd(&request, &catalog.catalog, client, output).await,
        Command::Serve {
            serve,
            catalog,
            client,
            output,
        } => cmd::serve::serve_cmd(serve.bind, &catalog.catalog, client, output).await,
    }
}
