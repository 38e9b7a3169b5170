//! # Profile Indexer
//!
//! Indexing pipeline for discovered profiles - consumes profile events from
//! Kafka, enriches each with an engagement rate from the analytics service,
//! and indexes the enriched record into OpenSearch.
//!
//! ## Architecture
//!
//! The pipeline follows the Consumer-Processor-Loader pattern:
//!
//! 1. **Consumer**: Pulls deliveries from Kafka one at a time and commits
//!    offsets on acknowledgment
//! 2. **Processor**: Parses the payload and enriches it (best-effort)
//! 3. **Loader**: Writes the enriched document into OpenSearch
//! 4. **Orchestrator**: Drives each delivery to a terminal outcome and
//!    decides acknowledgment
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`consumer`]: Kafka consumer and delivery/acknowledgment types
//! - [`processor`]: Payload parsing and enrichment
//! - [`loader`]: Indexing writes
//! - [`orchestrator`]: Per-delivery state machine and shutdown handling
//! - [`metrics`]: Injected counter recorder
//! - [`errors`]: Error types for the pipeline

pub mod config;
pub mod consumer;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod orchestrator;
pub mod processor;

pub use config::Dependencies;
pub use errors::IngestError;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Ingest error.
    #[error("Ingest error: {0}")]
    IngestError(#[from] IngestError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
