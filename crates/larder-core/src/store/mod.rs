//! Persistence for the ingredient record set.
//!
//! This module provides:
//! - Atomic whole-file JSON reads and writes
//! - The case-insensitively unique record store built on them

mod atomic;
mod record_store;

pub use atomic::{atomic_read_json, atomic_write_json};
pub use record_store::{AppendOutcome, RecordStore};
