//! Enriched profile document persisted to the search index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::platform::Platform;
use crate::types::profile_event::ProfileEvent;

/// Engagement rate recorded when enrichment could not be obtained.
pub const DEFAULT_ENGAGEMENT_RATE: f64 = 0.0;

/// Document representation of an enriched profile as stored in the search
/// engine.
///
/// Created or overwritten on each successful processing attempt and never
/// deleted by this subsystem. The document id in the index is derived from
/// the profile id alone, so reprocessing a redelivered event overwrites the
/// prior document instead of duplicating it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileDocument {
    pub profile_id: String,
    pub username: String,
    pub platform: Platform,
    pub followers: u64,
    pub category: String,
    pub bio: String,
    /// Computed engagement rate, or [`DEFAULT_ENGAGEMENT_RATE`] when the
    /// enrichment call degraded.
    pub engagement_rate: f64,
    pub indexed_at: DateTime<Utc>,
}

impl ProfileDocument {
    /// Build a document from a profile event and its engagement rate.
    pub fn from_event(event: ProfileEvent, engagement_rate: f64) -> Self {
        Self {
            profile_id: event.id,
            username: event.username,
            platform: event.platform,
            followers: event.followers,
            category: event.category,
            bio: event.bio,
            engagement_rate,
            indexed_at: Utc::now(),
        }
    }

    /// The id this document is stored under in the search index.
    ///
    /// Deterministic per profile: the same event always maps to the same
    /// document, regardless of when the write happens.
    pub fn document_id(&self) -> &str {
        &self.profile_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> ProfileEvent {
        ProfileEvent {
            id: "prof-42".to_string(),
            username: "sample".to_string(),
            platform: Platform::TikTok,
            followers: 910,
            category: "Comedy".to_string(),
            bio: "jokes daily".to_string(),
        }
    }

    #[test]
    fn test_from_event_copies_fields() {
        let doc = ProfileDocument::from_event(sample_event(), 5.4);

        assert_eq!(doc.profile_id, "prof-42");
        assert_eq!(doc.username, "sample");
        assert_eq!(doc.platform, Platform::TikTok);
        assert_eq!(doc.followers, 910);
        assert_eq!(doc.engagement_rate, 5.4);
    }

    #[test]
    fn test_document_id_is_profile_id() {
        let doc = ProfileDocument::from_event(sample_event(), DEFAULT_ENGAGEMENT_RATE);
        assert_eq!(doc.document_id(), "prof-42");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let doc = ProfileDocument::from_event(sample_event(), 2.1);

        let json = serde_json::to_string(&doc).unwrap();
        let deserialized: ProfileDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(doc.profile_id, deserialized.profile_id);
        assert_eq!(doc.engagement_rate, deserialized.engagement_rate);
    }
}
