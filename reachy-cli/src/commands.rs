use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the catalog and check every operation binds to a unit.
    Validate {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List registered operations.
    Tools {
        /// Emit function-calling schemas instead of names.
        #[arg(long)]
        schema: bool,
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a single or sequence dispatch request against the daemon.
    Dispatch {
        /// Request JSON file, or `-` for stdin.
        #[arg(default_value = "-")]
        request: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        client: ClientArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Serve the dispatch surface over HTTP.
    Serve {
        #[command(flatten)]
        serve: ServeArgs,
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        client: ClientArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
