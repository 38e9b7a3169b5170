//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! etc.). Implementations are injected into the indexing loader to enable
//! dependency injection and easy testing with mocks.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use profile_indexer_shared::ProfileDocument;

/// Abstracts the underlying search index implementation.
///
/// There is no separate `create_document` operation. Profile events may be
/// redelivered by the message queue, so every write is an upsert addressed by
/// the document id derived from the profile id: repeated writes for the same
/// profile overwrite the stored document rather than duplicating it.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure the search index and its alias exist, creating them if
    /// necessary.
    ///
    /// Called during application startup, before any document operation.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Write a profile document, replacing any prior document stored under
    /// the same profile id.
    ///
    /// The write requests synchronous visibility: once this returns `Ok`,
    /// the document is observable by subsequent reads.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The store acknowledged the write with a success status
    /// * `Err(SearchIndexError::TransportError)` - The store could not be reached
    /// * `Err(SearchIndexError::ApplicationError)` - The store rejected the write
    async fn upsert_profile(&self, document: &ProfileDocument) -> Result<(), SearchIndexError>;
}
