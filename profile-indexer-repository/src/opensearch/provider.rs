//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    IndexParts, OpenSearch,
};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, get_versioned_index_name, IndexConfig};
use profile_indexer_shared::ProfileDocument;

/// Default per-request timeout for index writes.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// OpenSearch provider implementation.
///
/// Writes enriched profile documents into OpenSearch, addressed by the
/// profile id so that redelivered events overwrite rather than duplicate.
///
/// # Example
///
/// ```ignore
/// use profile_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexProvider};
///
/// let config = IndexConfig::new("profiles", 0);
/// let provider = OpenSearchProvider::new("http://localhost:9200", config)?;
/// provider.ensure_index_exists().await?;
/// provider.upsert_profile(&document).await?;
/// ```
#[derive(Debug)]
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
    request_timeout: Duration,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing alias and version
    pub fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Override the per-request timeout for index writes.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    /// Ensure the versioned profile index and its alias exist.
    ///
    /// Existence is checked through the alias, so an index created by an
    /// earlier version under a different physical name still satisfies the
    /// check as long as the alias points at it.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_config.alias.as_str()]))
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchIndexError::transport(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(alias = %self.index_config.alias, "Profile index already exists");
            return Ok(());
        }

        let index_name = get_versioned_index_name(self.index_config.version);
        info!(
            index = %index_name,
            alias = %self.index_config.alias,
            "Creating profile index"
        );

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&index_name))
            .body(get_index_settings(&self.index_config))
            .request_timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| SearchIndexError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        Ok(())
    }

    /// Write a profile document under its deterministic document id.
    ///
    /// The index API replaces the full document on every call and
    /// `Refresh::True` makes the write visible to reads issued after this
    /// returns. Write latency is traded for read-after-write consistency,
    /// which redelivery-triggered overwrites rely on.
    async fn upsert_profile(&self, document: &ProfileDocument) -> Result<(), SearchIndexError> {
        let doc_id = document.document_id();
        if doc_id.is_empty() {
            return Err(SearchIndexError::validation(
                "Profile document has an empty profile_id",
            ));
        }

        let body = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.alias, doc_id))
            .refresh(Refresh::True)
            .request_timeout(self.request_timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::transport(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %error_body,
                doc_id = %doc_id,
                "Index write rejected"
            );
            return Err(SearchIndexError::application(status.as_u16(), error_body));
        }

        debug!(doc_id = %doc_id, "Profile document indexed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_indexer_shared::{Platform, ProfileEvent};

    fn sample_document(id: &str) -> ProfileDocument {
        ProfileDocument::from_event(
            ProfileEvent {
                id: id.to_string(),
                username: "user".to_string(),
                platform: Platform::Instagram,
                followers: 100,
                category: "Travel".to_string(),
                bio: "".to_string(),
            },
            1.5,
        )
    }

    #[tokio::test]
    async fn test_upsert_rejects_empty_document_id() {
        let provider = OpenSearchProvider::new(
            "http://localhost:9200",
            IndexConfig::new("profiles", 0),
        )
        .unwrap();

        let result = provider.upsert_profile(&sample_document("")).await;
        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::ValidationError(_)
        ));
    }

    #[test]
    fn test_provider_creation_rejects_invalid_url() {
        let result = OpenSearchProvider::new("not a url", IndexConfig::new("profiles", 0));
        assert!(matches!(
            result.unwrap_err(),
            SearchIndexError::ConnectionError(_)
        ));
    }
}
