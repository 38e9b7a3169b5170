//! HTTP client for the engagement analytics service.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AnalyticsError;
use crate::types::{EngagementRequest, EngagementResponse};

/// Client-side contract of the engagement RPC.
///
/// Implementations must be safe to call repeatedly and concurrently, must
/// honor the caller-supplied deadline (returning [`AnalyticsError::Timeout`]
/// rather than hanging past it), and must not retry internally. Retry policy
/// belongs to the caller, and the indexing pipeline's policy is to degrade
/// instead of retrying.
#[async_trait]
pub trait EngagementClient: Send + Sync {
    /// Compute the engagement rate for a profile summary.
    async fn compute_engagement(
        &self,
        request: &EngagementRequest,
        deadline: Duration,
    ) -> Result<f64, AnalyticsError>;
}

/// `EngagementClient` backed by the analytics HTTP service.
pub struct HttpEngagementClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpEngagementClient {
    /// Create a client for the service at `base_url`
    /// (e.g., "http://analytics:8084").
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/engagement", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl EngagementClient for HttpEngagementClient {
    async fn compute_engagement(
        &self,
        request: &EngagementRequest,
        deadline: Duration,
    ) -> Result<f64, AnalyticsError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(deadline)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnalyticsError::Timeout(deadline)
                } else {
                    AnalyticsError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyticsError::Status(status.as_u16()));
        }

        let body: EngagementResponse = response
            .json()
            .await
            .map_err(|e| AnalyticsError::Decode(e.to_string()))?;

        debug!(
            username = %request.username,
            platform = %request.platform,
            engagement_rate = body.engagement_rate,
            "Engagement rate computed"
        );

        Ok(body.engagement_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_construction() {
        let client = HttpEngagementClient::new("http://analytics:8084/");
        assert_eq!(client.endpoint, "http://analytics:8084/engagement");

        let client = HttpEngagementClient::new("http://analytics:8084");
        assert_eq!(client.endpoint, "http://analytics:8084/engagement");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        // Port 9 (discard) is not listening; the connection is refused fast.
        let client = HttpEngagementClient::new("http://127.0.0.1:9");
        let request = EngagementRequest {
            platform: "Instagram".to_string(),
            username: "nobody".to_string(),
            followers: 1,
        };

        let result = client
            .compute_engagement(&request, Duration::from_secs(5))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AnalyticsError::Transport(_) | AnalyticsError::Timeout(_)
        ));
    }
}
