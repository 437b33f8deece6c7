//! Ingredient RPC methods.

use super::{get_str_param, require_str_param};
use crate::server::AppState;
use larder_core::config::PathsConfig;
use larder_core::{AddIngredientRequest, ExportRequest};
use serde_json::{json, Value};

pub async fn search_ingredient(state: &AppState, params: &Value) -> larder_core::Result<Value> {
    let text = require_str_param(params, "text")?;
    let response = state.api.search_ingredient(&text).await?;
    Ok(serde_json::to_value(response)?)
}

pub async fn add_ingredient(state: &AppState, params: &Value) -> larder_core::Result<Value> {
    let request = AddIngredientRequest {
        name: get_str_param(params, "name").map(String::from),
        image: get_str_param(params, "image").map(String::from),
        description: get_str_param(params, "description").map(String::from),
    };
    let response = state.api.add_ingredient(request)?;
    Ok(serde_json::to_value(response)?)
}

pub async fn delete_ingredient(state: &AppState, params: &Value) -> larder_core::Result<Value> {
    let name = require_str_param(params, "name")?;
    let response = state.api.delete_ingredient(&name)?;
    Ok(serde_json::to_value(response)?)
}

pub async fn list_ingredients(state: &AppState, _params: &Value) -> larder_core::Result<Value> {
    let ingredients = state.api.list_ingredients()?;
    Ok(json!({
        "success": true,
        "ingredients": ingredients
    }))
}

pub async fn export_search(state: &AppState, params: &Value) -> larder_core::Result<Value> {
    let request: ExportRequest = serde_json::from_value(params.clone()).map_err(|e| {
        larder_core::LarderError::InvalidParams {
            message: format!("Invalid export request: {}", e),
        }
    })?;
    let document = state.api.export_search(&request)?;
    Ok(json!({
        "success": true,
        "filename": PathsConfig::EXPORT_FILENAME,
        "document": document
    }))
}
