//! Kafka consumer implementation for the profile indexing pipeline.
//!
//! Pulls profile-event deliveries from Kafka one at a time and commits
//! offsets only when the orchestrator acknowledges a delivery.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use rdkafka::{
    config::ClientConfig,
    consumer::{CommitMode, Consumer as RdKafkaConsumer, StreamConsumer},
    message::Message as KafkaMessage,
    Offset, TopicPartitionList,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, instrument};

use crate::consumer::messages::{Delivery, DeliveryTag, StreamMessage};
use crate::errors::IngestError;
use crate::orchestrator::Consumer;

/// The Kafka topic for profile-discovered events.
const PROFILE_EVENTS_TOPIC: &str = "profiles.discovered";

/// Kafka consumer for profile events.
///
/// The consumer keeps at most one delivery in flight: after forwarding a
/// delivery it waits for the orchestrator's acknowledgment decision before
/// pulling the next message. This bounds in-flight work to one message per
/// worker and keeps per-delivery ordering trivial.
pub struct KafkaConsumer {
    consumer: StreamConsumer,
    topics: Vec<String>,
}

impl KafkaConsumer {
    /// Create a new Kafka consumer.
    ///
    /// Auto-commit is disabled: committing an offset is the acknowledgment.
    /// An unacknowledged delivery is redelivered by seeking the partition
    /// back to its offset, so the committed position never moves past it.
    ///
    /// # Arguments
    ///
    /// * `brokers` - Kafka broker addresses (comma-separated)
    /// * `group_id` - Consumer group ID; running more instances with the same
    ///   group scales out as competing consumers
    pub fn new(brokers: &str, group_id: &str) -> Result<Self, IngestError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "6000")
            .create()
            .map_err(|e| IngestError::kafka(e.to_string()))?;

        info!(
            brokers = %brokers,
            group_id = %group_id,
            "Created Kafka consumer"
        );

        Ok(Self {
            consumer,
            topics: vec![PROFILE_EVENTS_TOPIC.to_string()],
        })
    }

    /// Commit the offset for an acknowledged delivery.
    fn commit_delivery(&self, tag: &DeliveryTag) -> Result<(), IngestError> {
        let mut tpl = TopicPartitionList::new();
        tpl.add_partition_offset(&tag.topic, tag.partition, Offset::Offset(tag.offset + 1))
            .map_err(|e| IngestError::kafka(e.to_string()))?;

        self.consumer
            .commit(&tpl, CommitMode::Async)
            .map_err(|e| IngestError::kafka(e.to_string()))?;

        debug!(
            topic = %tag.topic,
            partition = tag.partition,
            offset = tag.offset,
            "Committed delivery offset"
        );
        Ok(())
    }

    /// Seek the partition back to an unacknowledged delivery.
    ///
    /// Offset commits are per-partition high-water marks: committing a later
    /// offset would implicitly acknowledge every earlier one on the same
    /// partition. Seeking back makes the unacknowledged delivery the next
    /// pull, so it is reprocessed before the committed position can pass it.
    fn rewind_to_delivery(&self, tag: &DeliveryTag) -> Result<(), IngestError> {
        self.consumer
            .seek(
                &tag.topic,
                tag.partition,
                Offset::Offset(tag.offset),
                Duration::from_secs(5),
            )
            .map_err(|e| IngestError::kafka(e.to_string()))?;

        debug!(
            topic = %tag.topic,
            partition = tag.partition,
            offset = tag.offset,
            "Rewound partition to unacknowledged delivery"
        );
        Ok(())
    }

    /// Wait for the orchestrator's terminal decision on the in-flight
    /// delivery: commit its offset if acknowledged, seek back to it if not.
    ///
    /// Returns `false` if the pipeline is shutting down and the pull loop
    /// should stop. A shutdown received here abandons the in-flight delivery
    /// unacknowledged, which is safe: it will be redelivered.
    async fn await_acknowledgment(
        &self,
        ack_receiver: &mut mpsc::Receiver<StreamMessage>,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        tokio::select! {
            _ = shutdown.recv() => {
                info!("Consumer received shutdown signal while awaiting acknowledgment");
                false
            }
            ack_msg = ack_receiver.recv() => {
                match ack_msg {
                    Some(StreamMessage::Acknowledgment { tag, ack }) => {
                        if ack {
                            if let Err(e) = self.commit_delivery(&tag) {
                                error!(error = %e, "Failed to commit offset after acknowledgment");
                            }
                        } else {
                            error!(
                                topic = %tag.topic,
                                partition = tag.partition,
                                offset = tag.offset,
                                "Delivery unacknowledged, rewinding for redelivery"
                            );
                            if let Err(e) = self.rewind_to_delivery(&tag) {
                                error!(error = %e, "Failed to rewind to unacknowledged delivery");
                            }
                        }
                        true
                    }
                    Some(StreamMessage::End) | None => {
                        info!("Acknowledgment channel closed");
                        false
                    }
                    _ => true,
                }
            }
        }
    }
}

#[async_trait]
impl Consumer for KafkaConsumer {
    /// Subscribe to the profile events topic.
    fn subscribe(&self) -> Result<(), IngestError> {
        let topics: Vec<&str> = self.topics.iter().map(|s| s.as_str()).collect();
        self.consumer
            .subscribe(&topics)
            .map_err(|e| IngestError::kafka(e.to_string()))?;

        info!(topics = ?self.topics, "Subscribed to Kafka topics");
        Ok(())
    }

    /// Pull deliveries and forward them to the orchestrator, strictly one at
    /// a time.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel deliveries are forwarded on
    /// * `ack_receiver` - Channel acknowledgment decisions arrive on
    /// * `shutdown` - Shutdown signal receiver, honored between deliveries
    ///   and while waiting for an acknowledgment
    #[instrument(skip(self, sender, ack_receiver, shutdown))]
    async fn run(
        &self,
        sender: mpsc::Sender<StreamMessage>,
        mut ack_receiver: mpsc::Receiver<StreamMessage>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), IngestError> {
        let mut message_stream = self.consumer.stream();

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Consumer received shutdown signal");
                    let _ = sender.send(StreamMessage::End).await;
                    break;
                }
                message = message_stream.next() => {
                    match message {
                        Some(Ok(msg)) => {
                            let delivery = Delivery {
                                payload: msg.payload().unwrap_or_default().to_vec(),
                                tag: DeliveryTag {
                                    topic: msg.topic().to_string(),
                                    partition: msg.partition(),
                                    offset: msg.offset(),
                                },
                            };
                            debug!(
                                topic = %delivery.tag.topic,
                                partition = delivery.tag.partition,
                                offset = delivery.tag.offset,
                                "Received delivery from Kafka"
                            );

                            sender
                                .send(StreamMessage::Delivery(delivery))
                                .await
                                .map_err(|e| IngestError::ChannelError(e.to_string()))?;

                            // The next message is not pulled until this
                            // delivery reaches a terminal state.
                            if !self.await_acknowledgment(&mut ack_receiver, &mut shutdown).await {
                                let _ = sender.send(StreamMessage::End).await;
                                break;
                            }
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "Kafka error");
                            let _ = sender.send(StreamMessage::Error(e.to_string())).await;
                        }
                        None => {
                            info!("Kafka stream ended");
                            let _ = sender.send(StreamMessage::End).await;
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_constant() {
        assert_eq!(PROFILE_EVENTS_TOPIC, "profiles.discovered");
    }
}
