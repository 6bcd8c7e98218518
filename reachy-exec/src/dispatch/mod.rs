//! Request classification, the single-invoke primitive and sequence execution.

mod request;
mod result;
mod sequence;

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use serde_json::Value;

use crate::pose::{PoseFactory, StandardPoses};
use crate::registry::OperationRegistry;
use crate::transport::Transport;
use crate::unit::Capabilities;

pub use request::{CommandRequest, DispatchRequest, RequestError};
pub use result::{AggregateStatus, CommandResult, DispatchOutcome, Mode, SequenceResult, StepStatus};
pub use sequence::{Invoker, SequenceExecutor};

/// Entry point for dispatch calls. Holds the registry read-only; concurrent calls
/// share it without synchronisation.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
    transport: Arc<dyn Transport>,
    poses: Arc<dyn PoseFactory>,
}

impl Dispatcher {
    pub fn new(registry: Arc<OperationRegistry>, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
            poses: Arc::new(StandardPoses),
        }
    }

    pub fn with_poses(mut self, poses: Arc<dyn PoseFactory>) -> Self {
        self.poses = poses;
        self
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Classifies and validates `request`, then runs it.
    ///
    /// Only a malformed request shape is an `Err`; lookup misses and unit failures
    /// are reported inside the outcome.
    pub async fn dispatch(&self, request: &Value) -> Result<DispatchOutcome, RequestError> {
        match DispatchRequest::from_value(request)? {
            DispatchRequest::Single(cmd) => {
                tracing::info!(operation = %cmd.operation_name, "dispatch started");
                let result = self.invoke(&cmd).await;
                tracing::info!(operation = %result.tool, status = ?result.status, "dispatch finished");
                Ok(DispatchOutcome::Single(result))
            }
            DispatchRequest::Sequence(cmds) => {
                Ok(DispatchOutcome::Sequence(self.run_sequence(cmds).await))
            }
        }
    }

    pub async fn run_sequence(&self, commands: Vec<CommandRequest>) -> SequenceResult {
        SequenceExecutor::new(self).run(commands).await
    }

    pub async fn invoke(&self, request: &CommandRequest) -> CommandResult {
        let name = request.operation_name.as_str();
        let op = match self.registry.lookup(name) {
            Ok(op) => op,
            Err(miss) => {
                tracing::warn!(operation = name, "unknown operation");
                return CommandResult::not_found(&miss, request.parameters.clone());
            }
        };

        let params = op.definition.resolve_parameters(&request.parameters);
        let missing = op.definition.missing_required(&params);
        if !missing.is_empty() {
            let error = format!("Missing required parameter(s): {}", missing.join(", "));
            tracing::warn!(operation = name, %error, "invocation rejected");
            return CommandResult::failed(name, params, error);
        }

        let caps = Capabilities {
            transport: self.transport.as_ref(),
            poses: self.poses.as_ref(),
        };
        let outcome = AssertUnwindSafe(op.unit.execute(&caps, &params))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(value)) => {
                tracing::debug!(operation = name, "operation succeeded");
                CommandResult::succeeded(name, params, value)
            }
            Ok(Err(err)) => {
                tracing::warn!(operation = name, error = %err, "operation failed");
                CommandResult::failed(name, params, err.to_string())
            }
            Err(payload) => {
                let error = format!("execution unit panicked: {}", panic_message(&*payload));
                tracing::warn!(operation = name, %error, "operation failed");
                CommandResult::failed(name, params, error)
            }
        }
    }
}

#[async_trait]
impl Invoker for Dispatcher {
    async fn invoke(&self, request: &CommandRequest) -> CommandResult {
        Dispatcher::invoke(self, request).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
