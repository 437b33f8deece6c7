//! Tiered ingredient resolution.
//!
//! A query falls through four steps, stopping at the first that produces suggestions:
//!
//! 1. **Exact**: case-insensitive name equality against the freshly read store.
//! 2. **Normalize**: the name normalizer rewrites the query; its output is reported as
//!    `interpreted` from here on.
//! 3. **Fuzzy**: the index snapshot built from that same read is searched with the
//!    normalized name.
//! 4. **Synthesize**: a description is generated for the normalized name. The resulting
//!    record is returned flagged as synthesized and is not stored.
//!
//! Failures in any step propagate; none is treated as "no match".

use crate::capabilities::{DynDescriptionSynthesizer, DynNameNormalizer};
use crate::index::FuzzyIndex;
use crate::models::{IngredientRecord, SearchResponse};
use crate::store::RecordStore;
use crate::{LarderError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Which step answered a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    Exact,
    Fuzzy,
    Synthesized,
}

/// Owner of the resolution policy.
pub struct Resolver {
    store: Arc<RecordStore>,
    index: Arc<FuzzyIndex>,
    normalizer: DynNameNormalizer,
    synthesizer: DynDescriptionSynthesizer,
}

impl Resolver {
    pub fn new(
        store: Arc<RecordStore>,
        index: Arc<FuzzyIndex>,
        normalizer: DynNameNormalizer,
        synthesizer: DynDescriptionSynthesizer,
    ) -> Self {
        Self {
            store,
            index,
            normalizer,
            synthesizer,
        }
    }

    /// Resolve free text into suggestions.
    pub async fn resolve(&self, text: &str) -> Result<SearchResponse> {
        self.resolve_with_tier(text).await.map(|(response, _)| response)
    }

    /// Resolve and report which tier answered.
    pub async fn resolve_with_tier(&self, text: &str) -> Result<(SearchResponse, ResolutionTier)> {
        let raw = text.trim();
        if raw.is_empty() {
            return Err(LarderError::missing_field("text"));
        }
        let lowered = raw.to_lowercase();

        let (records, snapshot) = self.store.load_then(|records| self.index.rebuild(records))?;

        if let Some(exact) = find_exact(&records, &lowered) {
            debug!("Exact match for '{}'", lowered);
            return Ok((
                SearchResponse::stored(lowered, vec![exact.clone()]),
                ResolutionTier::Exact,
            ));
        }

        let interpreted = self.normalize(raw).await?;
        debug!("Normalized '{}' to '{}'", raw, interpreted);

        let hits = snapshot.search(&interpreted.to_lowercase());
        if !hits.is_empty() {
            debug!("Fuzzy search for '{}' found {} hit(s)", interpreted, hits.len());
            return Ok((
                SearchResponse::stored(interpreted, hits),
                ResolutionTier::Fuzzy,
            ));
        }

        let synthesized = self.synthesizer.synthesize(&interpreted).await?;
        info!("Synthesized unknown ingredient '{}'", interpreted);
        let record = IngredientRecord::new(
            interpreted.clone(),
            synthesized.image,
            synthesized.description,
        );
        Ok((
            SearchResponse::synthesized(interpreted, record),
            ResolutionTier::Synthesized,
        ))
    }

    async fn normalize(&self, raw: &str) -> Result<String> {
        let normalized = self.normalizer.normalize(raw).await?;
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return Err(LarderError::NormalizationUnavailable {
                message: format!("Normalizer returned an empty name for '{}'", raw),
            });
        }
        Ok(normalized.to_string())
    }
}

fn find_exact<'a>(records: &'a [IngredientRecord], lowered: &str) -> Option<&'a IngredientRecord> {
    records.iter().find(|r| r.name.to_lowercase() == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{
        DescriptionSynthesizer, NameNormalizer, SynthesizedDescription,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct MapNormalizer {
        answers: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl MapNormalizer {
        fn with(pairs: &[(&str, &str)]) -> Self {
            Self {
                answers: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl NameNormalizer for MapNormalizer {
        async fn normalize(&self, raw: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .answers
                .get(raw)
                .cloned()
                .unwrap_or_else(|| raw.to_string()))
        }
    }

    struct FailingNormalizer;

    #[async_trait]
    impl NameNormalizer for FailingNormalizer {
        async fn normalize(&self, _raw: &str) -> Result<String> {
            Err(LarderError::NormalizationUnavailable {
                message: "service down".into(),
            })
        }
    }

    #[derive(Default)]
    struct CountingSynthesizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DescriptionSynthesizer for CountingSynthesizer {
        async fn synthesize(&self, name: &str) -> Result<SynthesizedDescription> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SynthesizedDescription {
                description: format!("• {} is eaten fresh • Used in desserts", name),
                image: "https://example.com/placeholder.svg".to_string(),
            })
        }
    }

    struct Fixture {
        _temp_dir: TempDir,
        store: Arc<RecordStore>,
        normalizer: Arc<MapNormalizer>,
        synthesizer: Arc<CountingSynthesizer>,
        resolver: Resolver,
    }

    fn fixture(names: &[&str], normalizations: &[(&str, &str)]) -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(temp_dir.path().join("ingredients.json")));
        for name in names {
            store
                .append(IngredientRecord::new(
                    *name,
                    format!("https://example.com/{}.jpg", name.to_lowercase()),
                    "• Culinary staple",
                ))
                .unwrap();
        }
        let normalizer = Arc::new(MapNormalizer::with(normalizations));
        let synthesizer = Arc::new(CountingSynthesizer::default());
        let resolver = Resolver::new(
            store.clone(),
            Arc::new(FuzzyIndex::default()),
            normalizer.clone(),
            synthesizer.clone(),
        );
        Fixture {
            _temp_dir: temp_dir,
            store,
            normalizer,
            synthesizer,
            resolver,
        }
    }

    #[tokio::test]
    async fn test_exact_match_short_circuits() {
        let f = fixture(&["tomato"], &[]);
        let (response, tier) = f.resolver.resolve_with_tier("  Tomato ").await.unwrap();

        assert_eq!(tier, ResolutionTier::Exact);
        assert_eq!(response.interpreted, "tomato");
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].record().name, "tomato");
        assert!(!response.ai_generated);
        assert_eq!(f.normalizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(f.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fuzzy_tier_reports_normalized_name() {
        let f = fixture(&["Onion", "Garlic"], &[("onionn", "Onion ")]);
        let (response, tier) = f.resolver.resolve_with_tier("onionn").await.unwrap();

        assert_eq!(tier, ResolutionTier::Fuzzy);
        assert_eq!(response.interpreted, "Onion");
        assert_eq!(response.suggestions[0].record().name, "Onion");
        assert_eq!(f.normalizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(f.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fuzzy_results_capped_at_three() {
        let f = fixture(
            &["Green Pepper", "Black Pepper", "Red Pepper", "White Pepper"],
            &[("pepers", "pepper")],
        );
        let response = f.resolver.resolve("pepers").await.unwrap();
        assert_eq!(response.suggestions.len(), 3);
        assert_eq!(response.interpreted, "pepper");
    }

    #[tokio::test]
    async fn test_synthesis_when_nothing_matches() {
        let f = fixture(&["Onion"], &[("durian fruit", "Durian")]);
        let (response, tier) = f.resolver.resolve_with_tier("durian fruit").await.unwrap();

        assert_eq!(tier, ResolutionTier::Synthesized);
        assert!(response.ai_generated);
        assert_eq!(response.interpreted, "Durian");
        assert_eq!(response.suggestions.len(), 1);
        assert!(response.suggestions[0].is_synthesized());
        assert_eq!(response.suggestions[0].record().name, "Durian");
        assert_eq!(f.synthesizer.calls.load(Ordering::SeqCst), 1);

        // Not persisted
        let stored = f.store.load_all().unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored.iter().any(|r| r.name_matches("Durian")));
    }

    #[tokio::test]
    async fn test_normalizer_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = Resolver::new(
            Arc::new(RecordStore::new(temp_dir.path().join("ingredients.json"))),
            Arc::new(FuzzyIndex::default()),
            Arc::new(FailingNormalizer),
            Arc::new(CountingSynthesizer::default()),
        );
        assert!(matches!(
            resolver.resolve("saffron").await,
            Err(LarderError::NormalizationUnavailable { .. })
        ));
    }

    /// Clears the shared index while the query is in flight, as a concurrent request
    /// rebuilding from an older read would.
    struct ClearingNormalizer {
        index: Arc<FuzzyIndex>,
    }

    #[async_trait]
    impl NameNormalizer for ClearingNormalizer {
        async fn normalize(&self, raw: &str) -> Result<String> {
            self.index.rebuild(&[]);
            Ok(raw.to_string())
        }
    }

    #[tokio::test]
    async fn test_fuzzy_tier_searches_its_own_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(RecordStore::new(temp_dir.path().join("ingredients.json")));
        store
            .append(IngredientRecord::new("Onion", "https://example.com/onion.jpg", "• Base"))
            .unwrap();
        let index = Arc::new(FuzzyIndex::default());
        let synthesizer = Arc::new(CountingSynthesizer::default());
        let resolver = Resolver::new(
            store,
            index.clone(),
            Arc::new(ClearingNormalizer {
                index: index.clone(),
            }),
            synthesizer.clone(),
        );

        let (response, tier) = resolver.resolve_with_tier("onionn").await.unwrap();
        assert_eq!(tier, ResolutionTier::Fuzzy);
        assert_eq!(response.suggestions[0].record().name, "Onion");
        assert_eq!(synthesizer.calls.load(Ordering::SeqCst), 0);
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_empty_normalization_is_failure() {
        let f = fixture(&["Onion"], &[("???", "  ")]);
        assert!(matches!(
            f.resolver.resolve("???").await,
            Err(LarderError::NormalizationUnavailable { .. })
        ));
        assert_eq!(f.synthesizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_query_is_validation_error() {
        let f = fixture(&["Onion"], &[]);
        let err = f.resolver.resolve("   ").await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(f.normalizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_corrupt_store_is_not_a_miss() {
        let f = fixture(&["Onion"], &[]);
        std::fs::write(f.store.path(), "[oops").unwrap();

        assert!(matches!(
            f.resolver.resolve("onion").await,
            Err(LarderError::StoreUnavailable { .. })
        ));
        assert_eq!(f.normalizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sees_external_edits() {
        let f = fixture(&["Onion"], &[]);
        std::fs::write(
            f.store.path(),
            r#"[{"name": "Leek", "image": "https://example.com/leek.jpg", "description": "• Soups"}]"#,
        )
        .unwrap();

        let (response, tier) = f.resolver.resolve_with_tier("LEEK").await.unwrap();
        assert_eq!(tier, ResolutionTier::Exact);
        assert_eq!(response.suggestions[0].record().name, "Leek");
    }
}
