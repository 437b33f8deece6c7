//! Networking primitives used by the external capability adapters.

mod client;

pub use client::{extract_domain, HttpClient};
