//! In-memory fuzzy name index.
//!
//! The index is derived from the record store and holds no state of its own worth
//! persisting; callers rebuild it after every mutation and before every search.

mod fuzzy;

pub use fuzzy::{FuzzyHit, FuzzyIndex, IndexSnapshot};
