//! Ingredient records and their resolved (stored vs. synthesized) forms.

use crate::config::DescriptionConfig;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// A canonical ingredient as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub image: String,
    pub description: String,
}

impl IngredientRecord {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            description: description.into(),
        }
    }

    /// Case-insensitive name comparison used for every uniqueness and exact-match check.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }

    /// Non-empty, trimmed segments of the bullet-delimited description.
    pub fn description_points(&self) -> Vec<&str> {
        split_points(&self.description)
    }
}

/// Split a bullet-delimited description into its non-empty points.
pub fn split_points(description: &str) -> Vec<&str> {
    description
        .split(DescriptionConfig::BULLET)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A record returned by the resolver.
///
/// Only `Synthesized` carries provenance; it serializes with `"aiGenerated": true` and is
/// never written to the store as-is.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ResolvedRecordRepr")]
pub enum ResolvedRecord {
    Stored(IngredientRecord),
    Synthesized(IngredientRecord),
}

impl ResolvedRecord {
    pub fn record(&self) -> &IngredientRecord {
        match self {
            ResolvedRecord::Stored(record) | ResolvedRecord::Synthesized(record) => record,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, ResolvedRecord::Synthesized(_))
    }
}

impl Serialize for ResolvedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolvedRecord::Stored(record) => record.serialize(serializer),
            ResolvedRecord::Synthesized(record) => {
                let mut state = serializer.serialize_struct("IngredientRecord", 4)?;
                state.serialize_field("name", &record.name)?;
                state.serialize_field("image", &record.image)?;
                state.serialize_field("description", &record.description)?;
                state.serialize_field("aiGenerated", &true)?;
                state.end()
            }
        }
    }
}

/// Wire shape accepted when decoding a resolved record.
#[derive(Deserialize)]
struct ResolvedRecordRepr {
    #[serde(flatten)]
    record: IngredientRecord,
    #[serde(default, rename = "aiGenerated")]
    ai_generated: bool,
}

impl From<ResolvedRecordRepr> for ResolvedRecord {
    fn from(repr: ResolvedRecordRepr) -> Self {
        if repr.ai_generated {
            ResolvedRecord::Synthesized(repr.record)
        } else {
            ResolvedRecord::Stored(repr.record)
        }
    }
}
