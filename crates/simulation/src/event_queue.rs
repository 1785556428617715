//! Event queue with deterministic ordering.

use crate::WorkId;
use pipesim_core::{SimTime, ThreadIndex};
use std::cmp::Ordering;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Sequence number (FIFO for the same time)
///
/// The sequence number is assigned at insertion, so two events at the same
/// instant are delivered in the order they were scheduled. In particular a
/// zero-duration work item always starts before it completes.
#[derive(Debug, Clone, Copy)]
pub struct EventKey {
    /// When this event should be processed.
    pub time: SimTime,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl EventKey {
    /// Create a new event key.
    pub fn new(time: SimTime, sequence: u64) -> Self {
        Self { time, sequence }
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.time.total_cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

/// Whether an event marks the start or the completion of its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Work begins executing. Bookkeeping only.
    Start,
    /// Work finishes; its completion action runs.
    Completion,
}

/// A scheduled occurrence on a thread slot.
///
/// Each work item has exactly two events, a start and a completion, both
/// referring to the same [`WorkId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Thread slot the work runs on.
    pub thread: ThreadIndex,
    /// Start or completion.
    pub kind: EventKind,
    /// The work this event belongs to.
    pub work: WorkId,
}

impl Event {
    /// Whether this event marks a work completion.
    pub fn is_completion(&self) -> bool {
        self.kind == EventKind::Completion
    }
}
