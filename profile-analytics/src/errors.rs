//! Error types for the engagement client.

use thiserror::Error;

/// Errors returned by an [`crate::EngagementClient`].
///
/// The indexing pipeline treats every variant the same way (degrade to the
/// sentinel rate); the split exists for logging and diagnosis.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The call did not complete within the caller-supplied deadline.
    #[error("Engagement request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The service could not be reached or the connection failed mid-call.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Service returned status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}
