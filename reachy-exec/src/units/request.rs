use async_trait::async_trait;
use reachy_core::Params;
use serde_json::{Map, Value};

use crate::transport::{Method, TransportRequest};
use crate::unit::{Capabilities, ExecutionUnit, UnitError};

/// Forwards a fixed daemon call and returns its response unchanged.
#[derive(Debug, Clone)]
pub struct RequestUnit {
    method: Method,
    endpoint: &'static str,
}

impl RequestUnit {
    pub fn new(method: Method, endpoint: &'static str) -> Self {
        Self { method, endpoint }
    }
}

#[async_trait]
impl ExecutionUnit for RequestUnit {
    async fn execute(&self, caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        let req = TransportRequest::new(self.method, self.endpoint);
        Ok(caps.transport.call(req).await?)
    }
}

/// Reads a daemon document and returns one of its top-level fields as `{field: value}`.
#[derive(Debug, Clone)]
pub struct StateProjection {
    endpoint: &'static str,
    field: &'static str,
}

impl StateProjection {
    pub fn new(endpoint: &'static str, field: &'static str) -> Self {
        Self { endpoint, field }
    }
}

#[async_trait]
impl ExecutionUnit for StateProjection {
    async fn execute(&self, caps: &Capabilities<'_>, _params: &Params) -> Result<Value, UnitError> {
        let state = caps.transport.call(TransportRequest::get(self.endpoint)).await?;
        let value = state.get(self.field).cloned().ok_or_else(|| {
            UnitError::Failed(format!("daemon state has no '{}' field", self.field))
        })?;
        let mut out = Map::new();
        out.insert(self.field.to_string(), value);
        Ok(Value::Object(out))
    }
}
