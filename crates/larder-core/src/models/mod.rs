//! Data models for Larder.
//!
//! These types are the wire shapes shared by the library, the RPC server, and the
//! persisted ingredient file.

mod ingredient;
mod responses;

pub use ingredient::*;
pub use responses::*;
