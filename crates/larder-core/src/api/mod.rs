//! API implementation submodules.
//!
//! Each submodule contains `impl LarderApi` blocks that extend the public API
//! with domain-specific methods. The struct definition remains in `lib.rs`.

mod builder;
mod ingredients;

pub use builder::LarderApiBuilder;
