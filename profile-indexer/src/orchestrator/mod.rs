//! Orchestrator module for the profile indexing pipeline.
//!
//! Drives each delivery through parse, enrich, and index to a terminal
//! outcome, and turns that outcome into an acknowledgment decision for the
//! consumer.

use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, Duration};
use tracing::{error, info, instrument, warn};

use crate::consumer::{Delivery, StreamMessage};
use crate::errors::IngestError;
use crate::loader::SearchLoader;
use crate::metrics::MetricsRecorder;
use crate::processor::ProfileProcessor;

/// Source of deliveries for the pipeline.
///
/// Abstracted so tests can drive the orchestrator without a broker. The
/// implementation must forward one delivery at a time and wait for its
/// acknowledgment decision before forwarding the next.
#[async_trait]
pub trait Consumer: Send + Sync {
    /// Register with the message source.
    fn subscribe(&self) -> Result<(), IngestError>;

    /// Pull deliveries and exchange them for acknowledgments until the
    /// stream ends or shutdown is signaled.
    async fn run(
        &self,
        sender: mpsc::Sender<StreamMessage>,
        ack_receiver: mpsc::Receiver<StreamMessage>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), IngestError>;
}

/// Terminal state of one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// The enriched record was indexed; the delivery is acknowledged.
    Committed,
    /// The payload was unparseable; the delivery is acknowledged and
    /// dropped so it is never retried.
    Discarded,
    /// The index write failed; the delivery is left unacknowledged so the
    /// queue redelivers it.
    Failed,
}

impl ProcessingOutcome {
    /// Whether this outcome consumes the delivery.
    ///
    /// Only a committed record or a poison message acknowledges; every
    /// other failure mode preserves the delivery for redelivery.
    pub fn acknowledges(&self) -> bool {
        !matches!(self, ProcessingOutcome::Failed)
    }
}

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Size of the delivery/acknowledgment channel buffers. The consumer
    /// keeps one delivery in flight, so this only needs headroom for
    /// control messages.
    pub channel_buffer_size: usize,
    /// Interval between progress log lines.
    pub progress_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: 16,
            progress_interval: Duration::from_secs(10),
        }
    }
}

/// Orchestrator that coordinates the pipeline components.
///
/// The orchestrator:
/// - Manages the lifecycle of the consumer, processor, and loader
/// - Drives each delivery to a terminal [`ProcessingOutcome`]
/// - Sends acknowledgment decisions back to the consumer
/// - Handles shutdown signals
pub struct Orchestrator {
    consumer: Arc<dyn Consumer>,
    processor: ProfileProcessor,
    loader: SearchLoader,
    metrics: Arc<dyn MetricsRecorder>,
    config: OrchestratorConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        consumer: Arc<dyn Consumer>,
        processor: ProfileProcessor,
        loader: SearchLoader,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Self {
        Self::with_config(
            consumer,
            processor,
            loader,
            metrics,
            OrchestratorConfig::default(),
        )
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        consumer: Arc<dyn Consumer>,
        processor: ProfileProcessor,
        loader: SearchLoader,
        metrics: Arc<dyn MetricsRecorder>,
        config: OrchestratorConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            consumer,
            processor,
            loader,
            metrics,
            config,
            shutdown_tx,
        }
    }

    /// Run the orchestrator.
    ///
    /// Blocks until the consumer stream ends or a shutdown signal is
    /// received. Per-delivery failures never escape this loop; every
    /// delivery reaches a terminal outcome and the next one is pulled.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<(), IngestError> {
        info!("Starting profile indexer orchestrator");

        // Fail fast if the index store is not ready.
        self.loader.check_ready().await?;

        self.consumer.subscribe()?;

        let (delivery_transmitter, mut delivery_receiver) =
            mpsc::channel::<StreamMessage>(self.config.channel_buffer_size);
        let (ack_transmitter, ack_receiver) =
            mpsc::channel::<StreamMessage>(self.config.channel_buffer_size);

        let consumer = self.consumer.clone();
        let shutdown_rx = self.shutdown_tx.subscribe();

        let consumer_handle = tokio::spawn(async move {
            if let Err(e) = consumer
                .run(delivery_transmitter, ack_receiver, shutdown_rx)
                .await
            {
                error!(error = %e, "Consumer error");
            }
        });

        info!("Ready to process profile events");

        let mut progress_timer = interval(self.config.progress_interval);
        progress_timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        progress_timer.tick().await; // consume the immediate first tick

        loop {
            tokio::select! {
                msg = delivery_receiver.recv() => {
                    match msg {
                        Some(StreamMessage::Delivery(delivery)) => {
                            let tag = delivery.tag.clone();
                            let outcome = self.process_one(delivery).await;
                            let _ = ack_transmitter
                                .send(StreamMessage::Acknowledgment {
                                    tag,
                                    ack: outcome.acknowledges(),
                                })
                                .await;
                        }
                        Some(StreamMessage::Error(e)) => {
                            error!(error = %e, "Received error from consumer");
                        }
                        Some(StreamMessage::End) | None => {
                            info!("Consumer stream ended");
                            break;
                        }
                        Some(StreamMessage::Acknowledgment { .. }) => {
                            warn!("Received acknowledgment on delivery channel (should be on ack channel)");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    let _ = self.shutdown_tx.send(());
                    break;
                }
                _ = progress_timer.tick() => {
                    let snapshot = self.metrics.snapshot();
                    info!(
                        received = snapshot.received,
                        committed = snapshot.committed,
                        discarded = snapshot.discarded,
                        failed = snapshot.failed,
                        "Processing progress"
                    );
                }
            }
        }

        // Wait for consumer to finish. An in-flight delivery that never got
        // its acknowledgment stays uncommitted and will be redelivered.
        let _ = consumer_handle.await;

        let snapshot = self.metrics.snapshot();
        info!(
            received = snapshot.received,
            committed = snapshot.committed,
            discarded = snapshot.discarded,
            failed = snapshot.failed,
            "Orchestrator shutdown complete"
        );
        Ok(())
    }

    /// Drive one delivery to a terminal state.
    ///
    /// Parse failure discards (a malformed message can never succeed on
    /// redelivery; retrying it forever would stall the queue). Enrichment is
    /// best-effort inside the processor. Only the index write decides
    /// between commit and failure.
    pub async fn process_one(&self, delivery: Delivery) -> ProcessingOutcome {
        self.metrics.delivery_received();

        let event = match self.processor.parse_event(&delivery.payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    topic = %delivery.tag.topic,
                    partition = delivery.tag.partition,
                    offset = delivery.tag.offset,
                    error = %e,
                    "Discarding unparseable delivery"
                );
                self.metrics.delivery_discarded();
                return ProcessingOutcome::Discarded;
            }
        };

        let document = self.processor.process(event).await;

        match self.loader.index(&document).await {
            Ok(()) => {
                self.metrics.delivery_committed();
                ProcessingOutcome::Committed
            }
            Err(e) => {
                error!(
                    profile_id = %document.profile_id,
                    error = %e,
                    "Index write failed; delivery will be redelivered"
                );
                self.metrics.delivery_failed();
                ProcessingOutcome::Failed
            }
        }
    }

    /// Trigger a graceful shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Handle that can trigger shutdown from another task while `run` is
    /// executing.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_committed_and_discarded_acknowledge() {
        assert!(ProcessingOutcome::Committed.acknowledges());
        assert!(ProcessingOutcome::Discarded.acknowledges());
    }

    #[test]
    fn test_failed_does_not_acknowledge() {
        assert!(!ProcessingOutcome::Failed.acknowledges());
    }
}
