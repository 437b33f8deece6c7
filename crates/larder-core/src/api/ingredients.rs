//! Ingredient search, mutation and export methods.

use crate::export::render_search_document;
use crate::models::{
    AddIngredientRequest, AddIngredientResponse, DeleteIngredientResponse, ExportRequest,
    IngredientRecord, SearchResponse,
};
use crate::store::AppendOutcome;
use crate::{LarderApi, LarderError, Result};
use tracing::debug;

impl LarderApi {
    /// Resolve free text to stored, fuzzy-matched or synthesized suggestions.
    pub async fn search_ingredient(&self, text: &str) -> Result<SearchResponse> {
        self.resolver.resolve(text).await
    }

    /// All stored ingredients in persistence order.
    pub fn list_ingredients(&self) -> Result<Vec<IngredientRecord>> {
        self.store.load_all()
    }

    /// Add an ingredient. Adding an existing name (any case) succeeds without changes.
    ///
    /// Surrounding whitespace is trimmed from every field before validation, and the
    /// trimmed values are what gets stored, so a padded name still matches exactly later.
    pub fn add_ingredient(&self, request: AddIngredientRequest) -> Result<AddIngredientResponse> {
        let name = required(request.name, "name")?;
        let image = required(request.image, "image")?;
        let description = required(request.description, "description")?;

        let record = IngredientRecord::new(name, image, description);
        let (outcome, _) = self.store.append_then(record.clone(), |records| {
            self.index.rebuild(records);
        })?;

        Ok(match outcome {
            AppendOutcome::Added => AddIngredientResponse::added(record),
            AppendOutcome::AlreadyExists => AddIngredientResponse::already_exists(),
        })
    }

    /// Delete the first ingredient whose name matches case-insensitively.
    pub fn delete_ingredient(&self, name: &str) -> Result<DeleteIngredientResponse> {
        let name = required(Some(name.to_string()), "name")?;

        let (removed, _) = self.store.remove_by_name_then(&name, |records| {
            self.index.rebuild(records);
        })?;

        if !removed {
            debug!("Delete requested for unknown ingredient '{}'", name);
        }
        Ok(DeleteIngredientResponse::from_removed(removed))
    }

    /// Render a search result as a downloadable plain-text document.
    pub fn export_search(&self, request: &ExportRequest) -> Result<String> {
        if request.interpreted.trim().is_empty() {
            return Err(LarderError::missing_field("interpreted"));
        }
        Ok(render_search_document(request))
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| LarderError::missing_field(field))
}
