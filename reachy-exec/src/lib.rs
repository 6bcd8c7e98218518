#![forbid(unsafe_code)]

//! Runtime for the Reachy Mini operation catalog.
//!
//! `reachy-core` loads and validates the declarative catalog; this crate binds each
//! definition to an execution unit, builds the immutable registry and dispatches
//! single or sequenced requests against the robot daemon.

pub mod binder;
pub mod config;
pub mod dispatch;
pub mod pose;
pub mod registry;
pub mod transport;
pub mod unit;
pub mod units;

pub use crate::binder::{BindError, Binder, UnitLibrary};
pub use crate::config::ClientConfig;
pub use crate::dispatch::{
    AggregateStatus, CommandRequest, CommandResult, DispatchOutcome, DispatchRequest, Dispatcher,
    Invoker, RequestError, SequenceExecutor, SequenceResult, StepStatus,
};
pub use crate::pose::{HeadPose, PoseFactory, PoseSpec, StandardPoses};
pub use crate::registry::{LookupError, OperationRegistry, RegisteredOperation, RegistryError};
pub use crate::transport::{Method, ReqwestTransport, Transport, TransportError, TransportRequest};
pub use crate::unit::{Capabilities, ExecutionUnit, ParamReader, UnitError};
