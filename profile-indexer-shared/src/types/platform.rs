//! Social platform identifier.
//!
//! The platform set is open: producers may publish profiles from platforms
//! this service has never heard of, so unknown names round-trip through
//! [`Platform::Other`] instead of failing deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The platform a profile was discovered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
    /// Any platform not explicitly known to this service.
    Other(String),
}

impl Platform {
    /// The platform name as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::YouTube => "YouTube",
            Platform::Other(name) => name,
        }
    }
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Instagram" => Platform::Instagram,
            "TikTok" => Platform::TikTok,
            "YouTube" => Platform::YouTube,
            _ => Platform::Other(value),
        }
    }
}

impl From<Platform> for String {
    fn from(platform: Platform) -> Self {
        platform.as_str().to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
