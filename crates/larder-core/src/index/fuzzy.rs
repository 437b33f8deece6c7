//! Approximate name index over the record store's current contents.
//!
//! Each entry is scored by the fewest edits needed to turn the query into some substring of
//! the entry's lower-cased name (optimal string alignment, so an adjacent transposition is
//! one edit), divided by the query length. Lower is better; `0.0` means the query occurs
//! verbatim inside the name.

use crate::config::IndexConfig;
use crate::models::IngredientRecord;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// One indexed record with its pre-lowered search key.
#[derive(Debug, Clone)]
struct IndexEntry {
    key: String,
    record: IngredientRecord,
}

/// A scored search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyHit {
    pub record: IngredientRecord,
    pub score: f64,
}

/// Rebuildable fuzzy index keyed on ingredient names.
///
/// `rebuild` swaps in a fresh snapshot and hands it back, so a caller can search exactly
/// the records it indexed even if another rebuild lands right after.
pub struct FuzzyIndex {
    entries: RwLock<Arc<Vec<IndexEntry>>>,
    threshold: f64,
    limit: usize,
}

/// Immutable view of the index as of one rebuild.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    entries: Arc<Vec<IndexEntry>>,
    threshold: f64,
    limit: usize,
}

impl Default for FuzzyIndex {
    fn default() -> Self {
        Self::new(IndexConfig::DEFAULT_THRESHOLD)
    }
}

impl FuzzyIndex {
    /// Thresholds outside `0.0..=1.0` are clamped; a NaN threshold falls back to the default.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            IndexConfig::DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            threshold,
            limit: IndexConfig::MAX_SUGGESTIONS,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of records in the current snapshot.
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the index's source collection and return the snapshot just installed.
    pub fn rebuild(&self, records: &[IngredientRecord]) -> IndexSnapshot {
        let entries: Arc<Vec<IndexEntry>> = Arc::new(
            records
                .iter()
                .map(|record| IndexEntry {
                    key: record.name.to_lowercase(),
                    record: record.clone(),
                })
                .collect(),
        );

        match self.entries.write() {
            Ok(mut guard) => *guard = Arc::clone(&entries),
            Err(poisoned) => {
                warn!("Fuzzy index lock poisoned, recovering");
                *poisoned.into_inner() = Arc::clone(&entries);
            }
        }
        debug!("Rebuilt fuzzy index with {} entries", entries.len());
        self.wrap(entries)
    }

    /// Search the current snapshot.
    pub fn search(&self, query: &str) -> Vec<IngredientRecord> {
        self.snapshot().search(query)
    }

    /// Search the current snapshot, keeping each hit's score.
    pub fn search_scored(&self, query: &str) -> Vec<FuzzyHit> {
        self.snapshot().search_scored(query)
    }

    /// The snapshot installed by the most recent rebuild.
    pub fn snapshot(&self) -> IndexSnapshot {
        let entries = match self.entries.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        };
        self.wrap(entries)
    }

    fn wrap(&self, entries: Arc<Vec<IndexEntry>>) -> IndexSnapshot {
        IndexSnapshot {
            entries,
            threshold: self.threshold,
            limit: self.limit,
        }
    }
}

impl IndexSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best matches first, at most three. Empty query or no match yields an empty vector.
    pub fn search(&self, query: &str) -> Vec<IngredientRecord> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.record)
            .collect()
    }

    /// Same as [`search`](Self::search) but keeps each hit's score.
    pub fn search_scored(&self, query: &str) -> Vec<FuzzyHit> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<FuzzyHit> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = match_score(&query, &entry.key);
                (score <= self.threshold).then(|| FuzzyHit {
                    record: entry.record.clone(),
                    score,
                })
            })
            .collect();

        // Stable: equal scores keep insertion order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits.truncate(self.limit);

        debug!(
            "Fuzzy search '{}' matched {} of {} entries",
            query,
            hits.len(),
            self.entries.len()
        );
        hits
    }
}

/// Edits per query character needed to match `query` somewhere inside `text`.
fn match_score(query: &str, text: &str) -> f64 {
    let query_len = query.chars().count();
    if query_len == 0 {
        return 1.0;
    }
    if text.contains(query) {
        return 0.0;
    }
    substring_distance(query, text) as f64 / query_len as f64
}

/// Smallest OSA distance between `query` and any substring of `text`.
///
/// One dynamic-programming pass over `query x text`: row 0 is all zeros so an alignment may
/// start at any text position, and the minimum of the last row lets it end anywhere.
fn substring_distance(query: &str, text: &str) -> usize {
    let query: Vec<char> = query.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let width = text.len() + 1;

    let mut before_prev = vec![0usize; width];
    let mut prev = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in 1..=query.len() {
        current[0] = i;
        for j in 1..width {
            let substitution = prev[j - 1] + usize::from(query[i - 1] != text[j - 1]);
            let mut best = substitution.min(prev[j] + 1).min(current[j - 1] + 1);
            if i > 1 && j > 1 && query[i - 1] == text[j - 2] && query[i - 2] == text[j - 1] {
                best = best.min(before_prev[j - 2] + 1);
            }
            current[j] = best;
        }
        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut current);
    }

    prev.iter().copied().min().unwrap_or(query.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> IngredientRecord {
        IngredientRecord::new(name, "https://example.com/img.jpg", "• Culinary use")
    }

    fn index_of(names: &[&str]) -> FuzzyIndex {
        let index = FuzzyIndex::default();
        let records: Vec<IngredientRecord> = names.iter().map(|n| record(n)).collect();
        index.rebuild(&records);
        index
    }

    fn names(records: &[IngredientRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_exact_and_substring_score_zero() {
        assert_eq!(match_score("onion", "onion"), 0.0);
        assert_eq!(match_score("chili", "red chili powder"), 0.0);
    }

    #[test]
    fn test_transposition_is_one_edit() {
        assert_eq!(substring_distance("oinon", "onion"), 1);
        assert_eq!(substring_distance("garlci", "garlic"), 1);
    }

    #[test]
    fn test_typo_matches() {
        let index = index_of(&["Onion", "Garlic", "Tomato"]);
        assert_eq!(names(&index.search("onionn")), vec!["Onion"]);
        assert_eq!(names(&index.search("tomatoe")), vec!["Tomato"]);
        assert_eq!(names(&index.search("GARLC")), vec!["Garlic"]);
    }

    #[test]
    fn test_partial_substring_matches() {
        let index = index_of(&["Red Chili Powder", "Basil"]);
        assert_eq!(names(&index.search("chili")), vec!["Red Chili Powder"]);
    }

    #[test]
    fn test_no_match_above_threshold() {
        let index = index_of(&["Onion", "Garlic"]);
        assert!(index.search("durian").is_empty());
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let index = index_of(&["Onion"]);
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn test_results_capped_and_ordered() {
        let index = index_of(&[
            "Green Pepper",
            "Pepper",
            "Black Pepper",
            "Peppermint",
            "Red Pepper Flakes",
        ]);
        let hits = index.search_scored("pepper");
        assert_eq!(hits.len(), 3);
        assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
        // All five contain "pepper" verbatim; ties keep insertion order
        assert_eq!(
            hits.iter().map(|h| h.record.name.as_str()).collect::<Vec<_>>(),
            vec!["Green Pepper", "Pepper", "Black Pepper"]
        );
    }

    #[test]
    fn test_better_match_ranks_first() {
        let index = index_of(&["Basmati Rice", "Basil"]);
        let hits = index.search_scored("basil");
        assert_eq!(hits[0].record.name, "Basil");
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let index = index_of(&["Onion"]);
        assert_eq!(index.len(), 1);

        index.rebuild(&[record("Leek"), record("Shallot")]);
        assert_eq!(index.len(), 2);
        assert!(index.search("onion").is_empty());
        assert_eq!(names(&index.search("leek")), vec!["Leek"]);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(FuzzyIndex::new(2.5).threshold(), 1.0);
        assert_eq!(FuzzyIndex::new(-1.0).threshold(), 0.0);
        assert_eq!(
            FuzzyIndex::new(f64::NAN).threshold(),
            IndexConfig::DEFAULT_THRESHOLD
        );
    }

    #[test]
    fn test_rebuild_returns_its_own_snapshot() {
        let index = index_of(&["Onion"]);
        let snapshot = index.rebuild(&[record("Leek")]);

        // A later rebuild does not change what the earlier snapshot searches
        index.rebuild(&[record("Garlic")]);
        assert_eq!(names(&snapshot.search("leek")), vec!["Leek"]);
        assert!(snapshot.search("garlic").is_empty());
        assert_eq!(names(&index.search("garlic")), vec!["Garlic"]);
    }

    /// Minimum OSA distance over every substring, computed the slow way.
    fn brute_force_distance(query: &str, text: &str) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let mut best = query.chars().count();
        for start in 0..=chars.len() {
            for end in start..=chars.len() {
                let candidate: String = chars[start..end].iter().collect();
                best = best.min(strsim::osa_distance(query, &candidate));
            }
        }
        best
    }

    #[test]
    fn test_substring_distance_agrees_with_exhaustive_search() {
        let pairs = [
            ("oinon", "onion"),
            ("tomatoe", "tomato"),
            ("garlc", "garlic"),
            ("chilli", "red chili powder"),
            ("durian", "onion"),
            ("pepr", "black pepper"),
            ("ab", "ba"),
            ("basil", ""),
            ("crème", "crème fraîche"),
            ("fraiche", "crème fraîche"),
        ];
        for (query, text) in pairs {
            assert_eq!(
                substring_distance(query, text),
                brute_force_distance(query, text),
                "{} in {}",
                query,
                text
            );
        }
    }

    #[test]
    fn test_long_query_is_scored_quickly() {
        let query = "a very long normalizer reply that rambles about tomatoes ".repeat(20);
        let text = "sun dried tomatoes in olive oil".repeat(10);
        let started = std::time::Instant::now();
        let _ = substring_distance(&query, &text);
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[test]
    fn test_strict_threshold_requires_substring() {
        let index = FuzzyIndex::new(0.0);
        index.rebuild(&[record("Onion")]);
        assert!(index.search("onionn").is_empty());
        assert_eq!(names(&index.search("nio")), vec!["Onion"]);
    }
}
