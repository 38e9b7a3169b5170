//! Loader module for the profile indexing pipeline.
//!
//! Writes enriched profile documents into the search index.

use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::errors::IngestError;
use profile_indexer_repository::SearchIndexProvider;
use profile_indexer_shared::ProfileDocument;

/// Loader that indexes enriched profile documents.
///
/// One document per call, no internal buffering: the orchestrator must know
/// the outcome of each write before deciding whether to acknowledge the
/// delivery that produced it.
pub struct SearchLoader {
    provider: Arc<dyn SearchIndexProvider>,
}

impl SearchLoader {
    /// Create a new loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Check that the search index is ready to accept writes.
    pub async fn check_ready(&self) -> Result<(), IngestError> {
        self.provider
            .ensure_index_exists()
            .await
            .map_err(|e| IngestError::loader(format!("Search index not ready: {}", e)))
    }

    /// Write one document to the search index.
    ///
    /// The write is an idempotent upsert addressed by the document's profile
    /// id, so a redelivered event overwrites the earlier attempt.
    #[instrument(skip(self, document), fields(profile_id = %document.profile_id))]
    pub async fn index(&self, document: &ProfileDocument) -> Result<(), IngestError> {
        match self.provider.upsert_profile(document).await {
            Ok(()) => {
                debug!("Document indexed");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to index document");
                Err(IngestError::loader(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use profile_indexer_repository::SearchIndexError;
    use profile_indexer_shared::{Platform, ProfileEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSearchProvider {
        upserted: AtomicUsize,
        fail_writes: bool,
    }

    impl MockSearchProvider {
        fn new(fail_writes: bool) -> Self {
            Self {
                upserted: AtomicUsize::new(0),
                fail_writes,
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchProvider {
        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn upsert_profile(
            &self,
            _document: &ProfileDocument,
        ) -> Result<(), SearchIndexError> {
            if self.fail_writes {
                return Err(SearchIndexError::application(503, "index unavailable"));
            }
            self.upserted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn sample_document() -> ProfileDocument {
        ProfileDocument::from_event(
            ProfileEvent {
                id: "prof-9".to_string(),
                username: "bob".to_string(),
                platform: Platform::YouTube,
                followers: 5_000,
                category: "Gaming".to_string(),
                bio: "".to_string(),
            },
            3.3,
        )
    }

    #[tokio::test]
    async fn test_index_success() {
        let provider = Arc::new(MockSearchProvider::new(false));
        let loader = SearchLoader::new(provider.clone());

        loader.index(&sample_document()).await.unwrap();
        assert_eq!(provider.upserted.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_index_failure_surfaces_loader_error() {
        let provider = Arc::new(MockSearchProvider::new(true));
        let loader = SearchLoader::new(provider.clone());

        let result = loader.index(&sample_document()).await;
        assert!(matches!(result.unwrap_err(), IngestError::LoaderError(_)));
        assert_eq!(provider.upserted.load(Ordering::SeqCst), 0);
    }
}
