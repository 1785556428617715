//! Shared state of the producer/consumer model.

use serde::Serialize;

/// Mutable model shared by all producer/consumer work items.
///
/// Counters only ever grow. `queue_length` stays within `[0, capacity]`.
/// An idle flag is true exactly when that side has no process work
/// outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProdConState {
    /// Items produced.
    pub producer_processed: u64,
    /// Consumer kicks sent by the producer.
    pub producer_notified: u64,
    /// Items consumed.
    pub consumer_processed: u64,
    /// Producer kicks sent by the consumer.
    pub consumer_notified: u64,

    /// Items currently in the queue.
    pub queue_length: u32,
    /// The producer has no process work outstanding.
    pub producer_idle: bool,
    /// The consumer has no process work outstanding.
    pub consumer_idle: bool,
}

impl ProdConState {
    /// Initial state: empty queue, both sides idle.
    pub fn new() -> Self {
        Self {
            producer_processed: 0,
            producer_notified: 0,
            consumer_processed: 0,
            consumer_notified: 0,
            queue_length: 0,
            producer_idle: true,
            consumer_idle: true,
        }
    }
}

impl Default for ProdConState {
    fn default() -> Self {
        Self::new()
    }
}
