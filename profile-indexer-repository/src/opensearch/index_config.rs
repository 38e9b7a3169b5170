//! OpenSearch index configuration and mappings.
//!
//! The physical index is versioned (`profiles_v0`, `profiles_v1`, ...) and
//! reached through a stable alias, so a future reindex can swap the alias
//! without touching callers.

use serde_json::{json, Value};

/// Configuration for the profile search index.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The alias name used for all document operations.
    pub alias: String,
    /// The version number of the physical index (e.g., 0 for "profiles_v0").
    pub version: u32,
}

impl IndexConfig {
    /// Create a new index configuration.
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }
}

/// The base name of the profile index (without version).
pub const INDEX_NAME: &str = "profiles";

/// Get the versioned physical index name (e.g., "profiles_v0").
pub fn get_versioned_index_name(version: u32) -> String {
    format!("{}_v{}", INDEX_NAME, version)
}

/// Get the index settings, mappings, and alias binding for the profile index.
///
/// - `username` uses `search_as_you_type` for autocomplete, with a raw
///   keyword sub-field for exact lookups
/// - `profile_id`, `platform`, and `category` are keywords for filtering
/// - `followers` is a long, `engagement_rate` a float for range queries
pub fn get_index_settings(config: &IndexConfig) -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "aliases": {
            (config.alias.clone()): {}
        },
        "mappings": {
            "properties": {
                "profile_id": {
                    "type": "keyword"
                },
                "username": {
                    "type": "search_as_you_type",
                    "fields": {
                        "raw": {
                            "type": "keyword"
                        }
                    }
                },
                "platform": {
                    "type": "keyword"
                },
                "followers": {
                    "type": "long"
                },
                "category": {
                    "type": "keyword"
                },
                "bio": {
                    "type": "text"
                },
                "engagement_rate": {
                    "type": "float"
                },
                "indexed_at": {
                    "type": "date"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let config = IndexConfig::new("profiles", 0);
        let settings = get_index_settings(&config);

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(settings["mappings"]["properties"]["profile_id"]["type"], "keyword");
        assert_eq!(
            settings["mappings"]["properties"]["username"]["type"],
            "search_as_you_type"
        );
        assert_eq!(settings["mappings"]["properties"]["followers"]["type"], "long");
        assert_eq!(
            settings["mappings"]["properties"]["engagement_rate"]["type"],
            "float"
        );
        assert_eq!(settings["mappings"]["properties"]["indexed_at"]["type"], "date");
    }

    #[test]
    fn test_alias_binding_uses_configured_alias() {
        let config = IndexConfig::new("profiles-staging", 3);
        let settings = get_index_settings(&config);
        assert!(settings["aliases"]["profiles-staging"].is_object());
    }

    #[test]
    fn test_versioned_index_name() {
        assert_eq!(get_versioned_index_name(0), "profiles_v0");
        assert_eq!(get_versioned_index_name(1), "profiles_v1");
        assert_eq!(get_versioned_index_name(42), "profiles_v42");
    }
}
