//! # Connector Layer
//!
//! External integrations implementing the application seams:
//! - HTTP clients (local proxy client, upstream Gemini forwarder)
//! - Mock adapters for tests and offline runs
//! - The axum server (proxy endpoint + static widget assets)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
