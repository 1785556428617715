//! Run statistics.

use crate::workload::{ProdConState, CONSUMER_THREAD, PRODUCER_THREAD};
use pipesim_core::SimTime;
use pipesim_simulation::SimulationStats;
use serde::Serialize;

/// Summary of a finished producer/consumer run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Horizon the run was bounded by.
    pub horizon: SimTime,
    /// Items produced.
    pub producer_processed: u64,
    /// Items consumed.
    pub consumer_processed: u64,
    /// Consumer kicks sent by the producer.
    pub producer_notifications: u64,
    /// Producer kicks sent by the consumer.
    pub consumer_notifications: u64,
    /// Items left in the queue when the run stopped.
    pub queue_length: u32,
    /// Time the producer thread spent executing scheduled work.
    pub producer_busy: SimTime,
    /// Time the consumer thread spent executing scheduled work.
    pub consumer_busy: SimTime,
    /// Events the scheduler processed.
    pub events_processed: u64,
}

impl SimulationReport {
    /// Build a report from the final workload state and scheduler figures.
    ///
    /// `busy` is the per-thread busy time, indexed by thread.
    pub fn new(
        horizon: SimTime,
        state: &ProdConState,
        stats: &SimulationStats,
        busy: &[SimTime],
    ) -> Self {
        let busy_of = |thread: u32| busy.get(thread as usize).copied().unwrap_or(0.0);
        Self {
            horizon,
            producer_processed: state.producer_processed,
            consumer_processed: state.consumer_processed,
            producer_notifications: state.producer_notified,
            consumer_notifications: state.consumer_notified,
            queue_length: state.queue_length,
            producer_busy: busy_of(PRODUCER_THREAD),
            consumer_busy: busy_of(CONSUMER_THREAD),
            events_processed: stats.events_processed,
        }
    }

    /// Average simulated time per consumed item: `horizon / consumed`.
    ///
    /// Zero when nothing was consumed.
    pub fn average_time_per_slot(&self) -> SimTime {
        if self.consumer_processed == 0 {
            0.0
        } else {
            self.horizon / self.consumer_processed as SimTime
        }
    }
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Statistics:")?;
        writeln!(f, "   producer.processed     = {}", self.producer_processed)?;
        writeln!(f, "   consumer.processed     = {}", self.consumer_processed)?;
        writeln!(f, "   producer.notifications = {}", self.producer_notifications)?;
        writeln!(f, "   consumer.notifications = {}", self.consumer_notifications)?;
        write!(f, "Average-time-per-slot = {}", self.average_time_per_slot())
    }
}
