//! Profile event wire payload.
//!
//! This is the producer-owned JSON payload published when a profile is
//! discovered. Events are immutable once published; the same event may be
//! delivered more than once across queue redeliveries.

use serde::{Deserialize, Serialize};

use crate::types::platform::Platform;

/// A "profile discovered" event as published to the message queue.
///
/// The `id` is an opaque string, globally unique, assigned at creation and
/// never reassigned. It is the sole source of document identity in the
/// search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEvent {
    pub id: String,
    pub username: String,
    pub platform: Platform,
    pub followers: u64,
    pub category: String,
    pub bio: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_event() {
        let json = r#"{
            "id": "prof-123",
            "username": "jane_doe",
            "platform": "Instagram",
            "followers": 54000,
            "category": "Fitness",
            "bio": "Personal trainer"
        }"#;

        let event: ProfileEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "prof-123");
        assert_eq!(event.platform, Platform::Instagram);
        assert_eq!(event.followers, 54000);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        // Producers may attach fields this consumer does not track, such as a
        // pre-set engagement_rate. They must not break parsing.
        let json = r#"{
            "id": "prof-456",
            "username": "creator",
            "platform": "YouTube",
            "followers": 12,
            "category": "Tech",
            "bio": "",
            "engagement_rate": 4.2,
            "avatar_url": "https://cdn.example/a.png"
        }"#;

        let event: ProfileEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "prof-456");
    }

    #[test]
    fn test_deserialize_rejects_negative_followers() {
        let json = r#"{
            "id": "prof-789",
            "username": "x",
            "platform": "TikTok",
            "followers": -5,
            "category": "Music",
            "bio": ""
        }"#;

        assert!(serde_json::from_str::<ProfileEvent>(json).is_err());
    }
}
