use std::net::SocketAddr;
use std::path::Path;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use reachy_core::{tool_schemas, Params};
use reachy_exec::{CommandRequest, CommandResult, Dispatcher};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::exit_codes;
use crate::output::print_error;
use crate::utils::{build_dispatcher, load_registry};
use crate::{ClientArgs, OutputArgs};

#[derive(Debug, Deserialize)]
struct ExecuteToolRequest {
    tool_name: String,
    #[serde(default)]
    arguments: Option<Params>,
}

async fn service_info(State(dispatcher): State<Dispatcher>) -> Json<Value> {
    Json(json!({
        "name": "reachy",
        "version": env!("CARGO_PKG_VERSION"),
        "operations": dispatcher.registry().len(),
        "endpoints": ["GET /tools", "POST /dispatch", "POST /execute_tool"],
    }))
}

async fn list_tools(State(dispatcher): State<Dispatcher>) -> Json<Value> {
    Json(Value::Array(tool_schemas(dispatcher.registry().definitions())))
}

async fn dispatch(State(dispatcher): State<Dispatcher>, Json(body): Json<Value>) -> Response {
    match dispatcher.dispatch(&body).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome.to_json())).into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, Json(err.to_json())).into_response(),
    }
}

async fn execute_tool(
    State(dispatcher): State<Dispatcher>,
    Json(body): Json<ExecuteToolRequest>,
) -> Response {
    let arguments = body.arguments.unwrap_or_default();
    if let Err(miss) = dispatcher.registry().lookup(&body.tool_name) {
        tracing::warn!(tool = %body.tool_name, "unknown tool requested");
        let result = CommandResult::not_found(&miss, arguments);
        return (StatusCode::NOT_FOUND, Json(result)).into_response();
    }

    let request = CommandRequest::new(body.tool_name).with_parameters(arguments);
    (StatusCode::OK, Json(dispatcher.invoke(&request).await)).into_response()
}

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/tools", get(list_tools))
        .route("/dispatch", post(dispatch))
        .route("/execute_tool", post(execute_tool))
        .with_state(dispatcher)
}

pub async fn serve_cmd(
    bind: SocketAddr,
    catalog: &Path,
    client: ClientArgs,
    output: OutputArgs,
) -> i32 {
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

    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(l) => l,
        Err(e) => {
            print_error(
                output.format,
                output.quiet,
                &format!("failed to bind {bind}: {e}"),
            );
            return exit_codes::RUNTIME_ERROR;
        }
    };

    tracing::info!(%bind, daemon = %client.base_url, "serving dispatch API");
    match axum::serve(listener, router(dispatcher)).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            print_error(output.format, output.quiet, &format!("server error: {e}"));
            exit_codes::RUNTIME_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use reachy_exec::{
        OperationRegistry, Transport, TransportError, TransportRequest, UnitLibrary,
    };
    use tower::ServiceExt;

    use super::*;

    struct Idle;

    #[async_trait]
    impl Transport for Idle {
        async fn call(&self, _request: TransportRequest) -> Result<Value, TransportError> {
            Ok(json!({ "head_pose": { "x": 0.0 }, "antennas_position": [0.0, 0.0] }))
        }
    }

    fn app() -> Router {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../catalog");
        let catalog = reachy_core::load(&dir).unwrap();
        let registry =
            OperationRegistry::build(catalog.into_definitions(), &UnitLibrary::builtin()).unwrap();
        router(Dispatcher::new(Arc::new(registry), Arc::new(Idle)))
    }

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let req = match body {
            Some(b) => req.body(Body::from(b.to_string())).unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn tools_lists_every_schema() {
        let (status, body) = send("GET", "/tools", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 18);
        assert_eq!(body[0]["type"], "function");
    }

    #[tokio::test]
    async fn dispatch_runs_sequences() {
        let (status, body) = send(
            "POST",
            "/dispatch",
            Some(json!({ "commands": [
                { "operation_name": "get_head_state" },
                { "operation_name": "bogus" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "partial");
        assert_eq!(body["results"][1]["error"], "Tool 'bogus' not found");
    }

    #[tokio::test]
    async fn dispatch_rejects_bad_shape() {
        let (status, body) = send("POST", "/dispatch", Some(json!({ "commands": 3 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["violations"][0]["path"], "$.commands");
    }

    #[tokio::test]
    async fn execute_tool_reports_unknown_names() {
        let (status, body) =
            send("POST", "/execute_tool", Some(json!({ "tool_name": "fly" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Tool 'fly' not found");
        assert!(body["available_tools"].as_str().unwrap().contains("nod_head"));

        let (status, body) = send(
            "POST",
            "/execute_tool",
            Some(json!({ "tool_name": "get_antennas_state", "arguments": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], json!({ "antennas_position": [0.0, 0.0] }));
    }
}
