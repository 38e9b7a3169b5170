//! Dependency initialization and wiring for the profile indexer.

use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::consumer::KafkaConsumer;
use crate::loader::SearchLoader;
use crate::metrics::PipelineCounters;
use crate::orchestrator::Orchestrator;
use crate::processor::ProfileProcessor;
use crate::IndexingError;
use profile_analytics::HttpEngagementClient;
use profile_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexProvider};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default Kafka broker address.
const DEFAULT_KAFKA_BROKER: &str = "localhost:9092";

/// Default Kafka consumer group ID.
const DEFAULT_KAFKA_GROUP_ID: &str = "profile-indexer";

/// Default analytics service base URL.
const DEFAULT_ANALYTICS_URL: &str = "http://localhost:8084";

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 3;

/// Default maximum number of startup connection attempts.
const DEFAULT_MAX_CONNECT_ATTEMPTS: u32 = 10;

/// Default enrichment deadline in milliseconds.
const DEFAULT_ENRICHMENT_DEADLINE_MS: u64 = 1000;

/// Connection mode for OpenSearch at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if the first connection attempt fails.
    FailFast,
    /// Retry a bounded number of times before giving up.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from environment variable.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("OPENSEARCH_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid OPENSEARCH_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
    /// The counter recorder shared with the orchestrator, for exposition.
    pub counters: Arc<PipelineCounters>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `INDEX_ALIAS`: Index alias name (default: "profiles")
    /// - `PROFILES_INDEX_VERSION`: Index version number (default: 0)
    /// - `KAFKA_BROKER`: Kafka broker address (default: localhost:9092)
    /// - `KAFKA_GROUP_ID`: Consumer group ID (default: profile-indexer)
    /// - `ANALYTICS_URL`: Analytics service base URL (default: http://localhost:8084)
    /// - `ENRICHMENT_DEADLINE_MS`: Enrichment call deadline (default: 1000)
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 3)
    /// - `OPENSEARCH_MAX_CONNECT_ATTEMPTS`: Startup attempt bound (default: 10)
    pub async fn new() -> Result<Self, IndexingError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let kafka_broker =
            env::var("KAFKA_BROKER").unwrap_or_else(|_| DEFAULT_KAFKA_BROKER.to_string());
        let kafka_group_id =
            env::var("KAFKA_GROUP_ID").unwrap_or_else(|_| DEFAULT_KAFKA_GROUP_ID.to_string());
        let analytics_url =
            env::var("ANALYTICS_URL").unwrap_or_else(|_| DEFAULT_ANALYTICS_URL.to_string());
        let connection_mode = ConnectionMode::from_env();
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);
        let max_attempts = env::var("OPENSEARCH_MAX_CONNECT_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECT_ATTEMPTS);
        let enrichment_deadline = env::var("ENRICHMENT_DEADLINE_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(DEFAULT_ENRICHMENT_DEADLINE_MS));

        info!(
            opensearch_url = %opensearch_url,
            kafka_broker = %kafka_broker,
            kafka_group_id = %kafka_group_id,
            analytics_url = %analytics_url,
            connection_mode = ?connection_mode,
            retry_interval_secs = retry_interval,
            max_connect_attempts = max_attempts,
            "Initializing dependencies"
        );

        let index_alias = env::var("INDEX_ALIAS").unwrap_or_else(|_| "profiles".to_string());
        let index_version = env::var("PROFILES_INDEX_VERSION")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        let index_config = IndexConfig::new(index_alias, index_version);

        let search_provider = OpenSearchProvider::new(&opensearch_url, index_config)
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;

        // Bounded startup attempts: an unreachable index store is fatal so
        // an orchestrator can restart the process.
        Self::connect_to_opensearch(
            &search_provider,
            &opensearch_url,
            connection_mode,
            Duration::from_secs(retry_interval),
            max_attempts,
        )
        .await?;

        info!("OpenSearch connection established, profile index ready");

        let consumer = KafkaConsumer::new(&kafka_broker, &kafka_group_id).map_err(|e| {
            IndexingError::config(format!("Failed to create Kafka consumer: {}", e))
        })?;

        info!("Kafka consumer created");

        let analytics_client = Arc::new(HttpEngagementClient::new(&analytics_url));
        let processor = ProfileProcessor::with_deadline(analytics_client, enrichment_deadline);

        let loader = SearchLoader::new(Arc::new(search_provider));

        let counters = Arc::new(PipelineCounters::new());
        let orchestrator =
            Orchestrator::new(Arc::new(consumer), processor, loader, counters.clone());

        Ok(Self {
            orchestrator,
            counters,
        })
    }

    /// Verify the index store is reachable and the profile index exists,
    /// retrying a bounded number of times in retry mode.
    async fn connect_to_opensearch(
        provider: &OpenSearchProvider,
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
        max_attempts: u32,
    ) -> Result<(), IndexingError> {
        let attempts = match mode {
            ConnectionMode::FailFast => 1,
            ConnectionMode::Retry => max_attempts.max(1),
        };

        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match provider.ensure_index_exists().await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        warn!(
                            opensearch_url = %url,
                            attempt = attempt,
                            max_attempts = attempts,
                            error = %last_error,
                            "Failed to reach OpenSearch, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                }
            }
        }

        Err(IndexingError::config(format!(
            "Failed to connect to OpenSearch after {} attempts: {}",
            attempts, last_error
        )))
    }
}
