//! # Profile Analytics
//!
//! Engagement analytics for discovered profiles. This crate contains both
//! sides of the enrichment RPC boundary:
//!
//! - The stateless HTTP service that computes an engagement rate for a
//!   profile summary ([`server`], exposed by the `profile-analytics` binary)
//! - The client the indexing pipeline uses to call it ([`client`])
//!
//! The service holds no per-caller state; the rate is recomputed on every
//! request and is never persisted by this crate.

pub mod client;
pub mod engagement;
pub mod errors;
pub mod server;
pub mod types;

pub use client::{EngagementClient, HttpEngagementClient};
pub use errors::AnalyticsError;
pub use types::{EngagementRequest, EngagementResponse};
