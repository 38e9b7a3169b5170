//! Consumer module for the profile indexing pipeline.
//!
//! Provides the Kafka consumer and the delivery/acknowledgment message types.

mod kafka_consumer;
mod messages;

pub use kafka_consumer::KafkaConsumer;
pub use messages::{Delivery, DeliveryTag, StreamMessage};
