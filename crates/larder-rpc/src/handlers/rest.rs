//! REST routes used by the web frontend.
//!
//! Successful calls return the core response types as JSON. Failures return
//! `{"success": false, "message": ...}` with 400 for caller mistakes and 500 otherwise.

use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use larder_core::config::PathsConfig;
use larder_core::{AddIngredientRequest, ExportRequest, LarderError};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, warn};

#[derive(Debug, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    #[serde(default)]
    pub name: Option<String>,
}

/// Core error rendered as an HTTP response.
pub struct ApiError(LarderError);

impl From<LarderError> for ApiError {
    fn from(err: LarderError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(LarderError::InvalidParams {
            message: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            error!("Request failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = json!({
            "success": false,
            "message": self.0.to_string()
        });
        (status, Json(body)).into_response()
    }
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SearchBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let text = body.text.unwrap_or_default();
    let response = state.api.search_ingredient(&text).await?;
    Ok(Json(response).into_response())
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddIngredientRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let response = state.api.add_ingredient(body)?;
    Ok(Json(response).into_response())
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DeleteBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let name = body.name.unwrap_or_default();
    let response = state.api.delete_ingredient(&name)?;
    Ok(Json(response).into_response())
}

pub async fn export(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let document = state.api.export_search(&body)?;
    let disposition = format!("attachment; filename=\"{}\"", PathsConfig::EXPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let ingredients = state.api.list_ingredients()?;
    Ok(Json(json!({
        "success": true,
        "ingredients": ingredients
    }))
    .into_response())
}
