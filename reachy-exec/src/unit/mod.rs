mod params;

use async_trait::async_trait;
use reachy_core::Params;
use serde_json::Value;

use crate::pose::PoseFactory;
use crate::transport::{Transport, TransportError};

pub use params::ParamReader;

/// What an execution unit may use while it runs.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub transport: &'a dyn Transport,
    pub poses: &'a dyn PoseFactory,
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(String),
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Failed(String),
}

/// The bound, invocable implementation of one operation.
///
/// Units receive parameters already merged over the definition's defaults.
/// Failures are returned, never raised: the dispatcher turns them into a failed step.
#[async_trait]
pub trait ExecutionUnit: Send + Sync {
    async fn execute(&self, caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError>;
}
