//! Larder Core - Headless library for resolving free-text ingredient queries.
//!
//! A query is answered from the stored ingredient set when possible (exact name, then a
//! fuzzy match on a normalized name) and otherwise synthesized on demand. The library can
//! be used programmatically without any HTTP/RPC layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_core::LarderApi;
//!
//! #[tokio::main]
//! async fn main() -> larder_core::Result<()> {
//!     let api = LarderApi::builder("./data/ingredients.json")
//!         .auto_create(true)
//!         .build()?;
//!
//!     let result = api.search_ingredient("tomatoe").await?;
//!     println!("Interpreted as {}", result.interpreted);
//!     for suggestion in &result.suggestions {
//!         println!("  - {}", suggestion.record().name);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod capabilities;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod models;
pub mod network;
pub mod resolver;
pub mod store;

mod api;

// Re-export commonly used types
pub use api::LarderApiBuilder;
pub use capabilities::{
    ChatClient, ChatConfig, DescriptionSynthesizer, ImageLookup, NameNormalizer,
    SynthesizedDescription,
};
pub use error::{LarderError, Result};
pub use index::{FuzzyIndex, IndexSnapshot};
pub use models::{
    AddIngredientRequest, AddIngredientResponse, DeleteIngredientResponse, ExportEntry,
    ExportRequest, IngredientRecord, ResolvedRecord, SearchResponse,
};
pub use resolver::{ResolutionTier, Resolver};
pub use store::{AppendOutcome, RecordStore};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main API struct for Larder operations.
///
/// Owns the record store, the fuzzy index derived from it, and the resolver that ties
/// both to the external capabilities. Share it behind an `Arc`; every method re-reads the
/// store, so concurrent callers and external edits are observed on the next call.
pub struct LarderApi {
    store: Arc<RecordStore>,
    index: Arc<FuzzyIndex>,
    resolver: Resolver,
}

impl LarderApi {
    /// Create a builder for LarderApi.
    ///
    /// Use the builder for more control over initialization options:
    /// - `auto_create`: Create the data file and its directory automatically
    /// - `fuzzy_threshold`: Tune how many typos the fuzzy tier tolerates
    /// - `normalizer` / `synthesizer`: Swap the external capabilities
    pub fn builder(data_file: impl Into<PathBuf>) -> LarderApiBuilder {
        LarderApiBuilder::new(data_file)
    }

    /// Create a LarderApi with default settings and chat configuration from the environment.
    pub fn new(data_file: impl Into<PathBuf>) -> Result<Self> {
        Self::builder(data_file).build()
    }

    /// Path of the persisted ingredient file.
    pub fn data_file(&self) -> &Path {
        self.store.path()
    }

    /// Number of records in the current index snapshot.
    pub fn indexed_count(&self) -> usize {
        self.index.len()
    }
}
