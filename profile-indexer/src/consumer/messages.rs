//! Message types that flow between the consumer and the orchestrator.

/// Handle identifying one delivery for acknowledgment.
///
/// The tag carries no business meaning; it is only used to commit the
/// delivery's offset back to Kafka once processing reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryTag {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// One message handed to the pipeline: the raw payload plus its
/// acknowledgment handle.
///
/// The payload is deliberately kept as raw bytes here - parsing happens in
/// the processor, so a malformed payload can be discarded as a terminal
/// pipeline outcome rather than an error inside the consumer.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub payload: Vec<u8>,
    pub tag: DeliveryTag,
}

/// Messages that flow through the pipeline channels.
#[derive(Debug)]
pub enum StreamMessage {
    /// A delivery pulled from the queue, awaiting processing.
    Delivery(Delivery),
    /// Terminal decision for a delivery: `ack` means the offset may be
    /// committed (the delivery was indexed or deliberately discarded).
    Acknowledgment { tag: DeliveryTag, ack: bool },
    /// Stream has ended.
    End,
    /// An error occurred on the consumer side.
    Error(String),
}
