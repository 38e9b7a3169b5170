//! Wire types for the engagement RPC boundary.

use serde::{Deserialize, Serialize};

/// Request for an engagement-rate computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRequest {
    pub platform: String,
    pub username: String,
    pub followers: u64,
}

/// Response carrying the computed engagement rate.
///
/// The rate is non-negative with no guaranteed upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementResponse {
    pub engagement_rate: f64,
}
