use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use reachy_exec::ClientConfig;
use url::Url;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CatalogArgs {
    /// Catalog directory holding the index and definition files.
    #[arg(long, env = "REACHY_CATALOG", default_value = "catalog")]
    pub catalog: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct ClientArgs {
    /// Base URL of the robot daemon.
    #[arg(long, env = "REACHY_BASE_URL", default_value = reachy_exec::config::DEFAULT_BASE_URL)]
    pub base_url: Url,
    /// Per-request timeout in milliseconds.
    #[arg(long = "timeout", env = "REACHY_TIMEOUT_MS", default_value_t = 30000)]
    pub timeout_ms: u64,
    #[arg(long, env = "REACHY_MAX_RESPONSE_BYTES", default_value_t = 4_194_304)]
    pub max_response_bytes: usize,
}

impl ClientArgs {
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            max_response_bytes: self.max_response_bytes,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    #[arg(long, env = "REACHY_BIND", default_value = "0.0.0.0:8100")]
    pub bind: SocketAddr,
}
