#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reachy_core::{OperationDefinition, Params};
use reachy_exec::{
    Capabilities, Dispatcher, ExecutionUnit, OperationRegistry, Transport, TransportError,
    TransportRequest, UnitError, UnitLibrary,
};
use serde_json::{json, Value};

type Responder = dyn Fn(&TransportRequest) -> Result<Value, TransportError> + Send + Sync;

/// Records every call and answers through a closure.
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportRequest>>,
    respond: Box<Responder>,
}

impl RecordingTransport {
    pub fn ok() -> Self {
        Self::with(|_| Ok(json!({ "status": "success" })))
    }

    pub fn with(
        respond: impl Fn(&TransportRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn calls(&self) -> Vec<TransportRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn call(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let out = (self.respond)(&request);
        self.calls.lock().unwrap().push(request);
        out
    }
}

/// Echoes its resolved parameters back as the result.
pub struct Echo;

#[async_trait]
impl ExecutionUnit for Echo {
    async fn execute(&self, _caps: &Capabilities<'_>, params: &Params) -> Result<Value, UnitError> {
        Ok(json!({ "echo": params }))
    }
}

pub struct Fails;

#[async_trait]
impl ExecutionUnit for Fails {
    async fn execute(&self, _caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        Err(UnitError::Failed("actuator refused".into()))
    }
}

pub struct Panics;

#[async_trait]
impl ExecutionUnit for Panics {
    async fn execute(&self, _caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        panic!("unit blew up")
    }
}

pub fn definition(value: Value) -> OperationDefinition {
    serde_json::from_value(value).unwrap()
}

pub fn op(name: &str, unit: &str) -> OperationDefinition {
    definition(json!({
        "name": name,
        "description": format!("{name} operation"),
        "execution": { "type": "builtin", "unit": unit }
    }))
}

pub fn test_library() -> UnitLibrary {
    UnitLibrary::new()
        .with_unit("echo", Echo)
        .with_unit("fails", Fails)
        .with_unit("panics", Panics)
}

pub fn dispatcher(defs: Vec<OperationDefinition>, transport: Arc<dyn Transport>) -> Dispatcher {
    let registry = OperationRegistry::build(defs, &test_library()).unwrap();
    Dispatcher::new(Arc::new(registry), transport)
}

pub fn catalog_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("catalog")
}
