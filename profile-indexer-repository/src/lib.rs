//! # Profile Indexer Repository
//!
//! This crate provides traits and implementations for interacting with the
//! profile search index. It includes definitions for errors, interfaces, and
//! a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
