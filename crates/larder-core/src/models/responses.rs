//! Request and response shapes at the system boundary.

use super::{IngredientRecord, ResolvedRecord};
use serde::{Deserialize, Serialize};

/// Result of resolving a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub interpreted: String,
    pub suggestions: Vec<ResolvedRecord>,
    #[serde(
        default,
        rename = "aiGenerated",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub ai_generated: bool,
}

impl SearchResponse {
    /// Response carrying records already present in the store.
    pub fn stored(interpreted: impl Into<String>, records: Vec<IngredientRecord>) -> Self {
        Self {
            interpreted: interpreted.into(),
            suggestions: records.into_iter().map(ResolvedRecord::Stored).collect(),
            ai_generated: false,
        }
    }

    /// Response carrying a single synthesized record.
    pub fn synthesized(interpreted: impl Into<String>, record: IngredientRecord) -> Self {
        Self {
            interpreted: interpreted.into(),
            suggestions: vec![ResolvedRecord::Synthesized(record)],
            ai_generated: true,
        }
    }
}

/// Fields submitted when adding an ingredient. All three are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddIngredientRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of an add. Duplicates are reported as success with a different message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddIngredientResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<IngredientRecord>,
}

impl AddIngredientResponse {
    pub const ADDED: &'static str = "Ingredient added successfully!";
    pub const ALREADY_EXISTS: &'static str = "Already exists";

    pub fn added(record: IngredientRecord) -> Self {
        Self {
            success: true,
            message: Self::ADDED.to_string(),
            ingredient: Some(record),
        }
    }

    pub fn already_exists() -> Self {
        Self {
            success: true,
            message: Self::ALREADY_EXISTS.to_string(),
            ingredient: None,
        }
    }
}

/// Outcome of a delete; `success` is false when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIngredientResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteIngredientResponse {
    pub const DELETED: &'static str = "Deleted successfully";
    pub const NOT_FOUND: &'static str = "Ingredient not found";

    pub fn from_removed(removed: bool) -> Self {
        Self {
            success: removed,
            message: if removed { Self::DELETED } else { Self::NOT_FOUND }.to_string(),
        }
    }
}

/// One entry of an exported search result. Only name and description are rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A search result submitted for export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub interpreted: String,
    #[serde(default)]
    pub suggestions: Vec<ExportEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_omits_flag_for_stored() {
        let response = SearchResponse::stored(
            "onion",
            vec![IngredientRecord::new("Onion", "img", "• Soups")],
        );
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("aiGenerated").is_none());
        assert_eq!(value["suggestions"][0]["name"], "Onion");
    }

    #[test]
    fn test_search_response_flags_synthesized() {
        let response = SearchResponse::synthesized(
            "Durian",
            IngredientRecord::new("Durian", "img", "• Eaten fresh"),
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["aiGenerated"], json!(true));
        assert_eq!(value["suggestions"][0]["aiGenerated"], json!(true));
    }

    #[test]
    fn test_delete_response_messages() {
        let deleted = DeleteIngredientResponse::from_removed(true);
        assert!(deleted.success);
        assert_eq!(deleted.message, "Deleted successfully");

        let missing = DeleteIngredientResponse::from_removed(false);
        assert!(!missing.success);
        assert_eq!(missing.message, "Ingredient not found");
    }

    #[test]
    fn test_add_request_tolerates_missing_fields() {
        let request: AddIngredientRequest =
            serde_json::from_value(json!({"name": "Basil"})).unwrap();
        assert_eq!(request.name.as_deref(), Some("Basil"));
        assert!(request.image.is_none());
        assert!(request.description.is_none());
    }

    #[test]
    fn test_export_request_ignores_extra_fields() {
        let request: ExportRequest = serde_json::from_value(json!({
            "interpreted": "durian",
            "suggestions": [
                {"name": "Durian", "image": "img", "description": "• Eaten fresh", "aiGenerated": true}
            ]
        }))
        .unwrap();
        assert_eq!(request.suggestions.len(), 1);
        assert_eq!(request.suggestions[0].name, "Durian");
    }
}
