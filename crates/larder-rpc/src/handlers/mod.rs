//! Request handlers: JSON-RPC dispatch plus the REST routes.

mod ingredients;
pub mod rest;

use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// Code for bodies that are not a well-formed JSON-RPC request.
const PARSE_ERROR: i32 = -32700;
/// Code for methods the dispatcher does not know.
const METHOD_NOT_FOUND: i32 = -32601;

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter.
pub(crate) fn get_str_param<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(params: &Value, name: &str) -> larder_core::Result<String> {
    get_str_param(params, name)
        .map(String::from)
        .ok_or_else(|| larder_core::LarderError::InvalidParams {
            message: format!("Missing required parameter: {}", name),
        })
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    request: Result<Json<JsonRpcRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected malformed RPC body: {}", rejection.body_text());
            return (
                StatusCode::OK,
                Json(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    rejection.body_text(),
                )),
            );
        }
    };
    let method = request.method.as_str();
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    let Some(result) = dispatch_method(&state, method, &params).await else {
        warn!("Unknown RPC method: {}", method);
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        );
    };

    match result {
        Ok(value) => (StatusCode::OK, Json(JsonRpcResponse::success(id, value))),
        Err(e) => {
            if e.is_client_error() {
                warn!("Rejected {} call: {}", method, e);
            } else {
                error!("RPC error for {}: {}", method, e);
            }
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, e.to_rpc_error_code(), e.to_string())),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to its handler; `None` when the method is unknown.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> Option<larder_core::Result<Value>> {
    let result = match method {
        "search_ingredient" => ingredients::search_ingredient(state, params).await,
        "add_ingredient" => ingredients::add_ingredient(state, params).await,
        "delete_ingredient" => ingredients::delete_ingredient(state, params).await,
        "list_ingredients" => ingredients::list_ingredients(state, params).await,
        "export_search" => ingredients::export_search(state, params).await,
        _ => return None,
    };
    Some(result)
}
