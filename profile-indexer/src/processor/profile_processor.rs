//! Profile processor implementation.
//!
//! Transforms raw delivery payloads into enriched profile documents. Parsing
//! is strict (a malformed payload can never succeed and must be discarded by
//! the caller); enrichment is best-effort and degrades to a sentinel rate
//! instead of failing.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::errors::IngestError;
use profile_analytics::{EngagementClient, EngagementRequest};
use profile_indexer_shared::{ProfileDocument, ProfileEvent, DEFAULT_ENGAGEMENT_RATE};

/// Default deadline for the enrichment call.
pub const DEFAULT_ENRICHMENT_DEADLINE: Duration = Duration::from_secs(1);

/// Outcome of the enrichment step.
///
/// The degrade path is type-visible rather than an implicit zero left in a
/// struct field; both variants are consumed uniformly by the indexing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enrichment {
    /// The analytics service returned a rate.
    Computed(f64),
    /// The analytics call failed or timed out; the sentinel rate is used.
    Degraded(f64),
}

impl Enrichment {
    /// The engagement rate to persist.
    pub fn rate(&self) -> f64 {
        match self {
            Enrichment::Computed(rate) | Enrichment::Degraded(rate) => *rate,
        }
    }

    /// Whether enrichment fell back to the sentinel.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Enrichment::Degraded(_))
    }
}

/// Processor that turns profile events into enriched documents.
pub struct ProfileProcessor {
    analytics: Arc<dyn EngagementClient>,
    enrichment_deadline: Duration,
}

impl ProfileProcessor {
    /// Create a processor with the default enrichment deadline.
    pub fn new(analytics: Arc<dyn EngagementClient>) -> Self {
        Self::with_deadline(analytics, DEFAULT_ENRICHMENT_DEADLINE)
    }

    /// Create a processor with a custom enrichment deadline.
    pub fn with_deadline(analytics: Arc<dyn EngagementClient>, deadline: Duration) -> Self {
        Self {
            analytics,
            enrichment_deadline: deadline,
        }
    }

    /// Parse a raw delivery payload into a profile event.
    pub fn parse_event(&self, payload: &[u8]) -> Result<ProfileEvent, IngestError> {
        serde_json::from_slice(payload).map_err(|e| IngestError::parse(e.to_string()))
    }

    /// Enrich a profile event with its engagement rate.
    ///
    /// Never fails: an error or timeout from the analytics service degrades
    /// to [`DEFAULT_ENGAGEMENT_RATE`]. Enrichment must never block indexing.
    pub async fn enrich(&self, event: &ProfileEvent) -> Enrichment {
        let request = EngagementRequest {
            platform: event.platform.to_string(),
            username: event.username.clone(),
            followers: event.followers,
        };

        match self
            .analytics
            .compute_engagement(&request, self.enrichment_deadline)
            .await
        {
            Ok(rate) => Enrichment::Computed(rate),
            Err(e) => {
                warn!(
                    profile_id = %event.id,
                    error = %e,
                    "Engagement enrichment degraded, using default rate"
                );
                Enrichment::Degraded(DEFAULT_ENGAGEMENT_RATE)
            }
        }
    }

    /// Produce the enriched document for a profile event.
    pub async fn process(&self, event: ProfileEvent) -> ProfileDocument {
        let enrichment = self.enrich(&event).await;
        ProfileDocument::from_event(event, enrichment.rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use profile_analytics::AnalyticsError;
    use profile_indexer_shared::Platform;

    struct FixedRateClient(f64);

    #[async_trait]
    impl EngagementClient for FixedRateClient {
        async fn compute_engagement(
            &self,
            _request: &EngagementRequest,
            _deadline: Duration,
        ) -> Result<f64, AnalyticsError> {
            Ok(self.0)
        }
    }

    struct UnreachableClient;

    #[async_trait]
    impl EngagementClient for UnreachableClient {
        async fn compute_engagement(
            &self,
            _request: &EngagementRequest,
            deadline: Duration,
        ) -> Result<f64, AnalyticsError> {
            Err(AnalyticsError::Timeout(deadline))
        }
    }

    fn sample_event() -> ProfileEvent {
        ProfileEvent {
            id: "prof-1".to_string(),
            username: "alice".to_string(),
            platform: Platform::Instagram,
            followers: 1_000,
            category: "Food".to_string(),
            bio: "recipes".to_string(),
        }
    }

    #[test]
    fn test_parse_valid_payload() {
        let processor = ProfileProcessor::new(Arc::new(FixedRateClient(1.0)));
        let payload = serde_json::to_vec(&sample_event()).unwrap();

        let event = processor.parse_event(&payload).unwrap();
        assert_eq!(event.id, "prof-1");
    }

    #[test]
    fn test_parse_malformed_payload() {
        let processor = ProfileProcessor::new(Arc::new(FixedRateClient(1.0)));

        let result = processor.parse_event(b"not-json");
        assert!(matches!(result.unwrap_err(), IngestError::ParseError(_)));
    }

    #[test]
    fn test_parse_empty_payload() {
        let processor = ProfileProcessor::new(Arc::new(FixedRateClient(1.0)));

        let result = processor.parse_event(b"");
        assert!(matches!(result.unwrap_err(), IngestError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_enrich_success() {
        let processor = ProfileProcessor::new(Arc::new(FixedRateClient(4.2)));

        let enrichment = processor.enrich(&sample_event()).await;
        assert_eq!(enrichment, Enrichment::Computed(4.2));
        assert!(!enrichment.is_degraded());
    }

    #[tokio::test]
    async fn test_enrich_degrades_on_timeout() {
        let processor = ProfileProcessor::new(Arc::new(UnreachableClient));

        let enrichment = processor.enrich(&sample_event()).await;
        assert_eq!(enrichment, Enrichment::Degraded(DEFAULT_ENGAGEMENT_RATE));
        assert_eq!(enrichment.rate(), 0.0);
    }

    #[tokio::test]
    async fn test_process_builds_document_with_computed_rate() {
        let processor = ProfileProcessor::new(Arc::new(FixedRateClient(6.5)));

        let document = processor.process(sample_event()).await;
        assert_eq!(document.profile_id, "prof-1");
        assert_eq!(document.engagement_rate, 6.5);
    }

    #[tokio::test]
    async fn test_process_with_degraded_enrichment_still_builds_document() {
        let processor = ProfileProcessor::new(Arc::new(UnreachableClient));

        let document = processor.process(sample_event()).await;
        assert_eq!(document.engagement_rate, DEFAULT_ENGAGEMENT_RATE);
        assert_eq!(document.username, "alice");
    }
}
