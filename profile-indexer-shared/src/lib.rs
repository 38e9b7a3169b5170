//! # Profile Indexer Shared
//!
//! This crate defines shared data structures and types used across the profile
//! indexing system. It includes the wire-format profile event, the open-set
//! platform enum, and the enriched document persisted to the search index.

pub mod types;

pub use types::platform::Platform;
pub use types::profile_document::{ProfileDocument, DEFAULT_ENGAGEMENT_RATE};
pub use types::profile_event::ProfileEvent;
