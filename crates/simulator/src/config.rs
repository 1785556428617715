//! Configuration types for the simulator.

use crate::workload::WorkKind;
use pipesim_core::SimTime;
use serde::Serialize;
use thiserror::Error;

/// Errors in a simulator configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A work duration is negative, infinite, or NaN.
    #[error("{field} must be a finite, non-negative duration (got {value})")]
    InvalidDuration { field: &'static str, value: SimTime },

    /// The queue cannot hold a single item.
    #[error("queue capacity must be at least 1")]
    ZeroCapacity,

    /// The horizon would end the run before anything happens.
    #[error("horizon must be positive (got {0})")]
    InvalidHorizon(SimTime),
}

/// Configuration for a producer/consumer run.
///
/// Durations are in simulated ticks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProdConConfig {
    /// Producer start: waking up the producer (SP).
    pub producer_start: SimTime,

    /// Producer notify: kicking the consumer (NP).
    pub producer_notify: SimTime,

    /// Producer process: producing one queue item (WP).
    pub producer_process: SimTime,

    /// Consumer start: waking up the consumer (SC).
    pub consumer_start: SimTime,

    /// Consumer notify: kicking the producer (NC).
    pub consumer_notify: SimTime,

    /// Consumer process: consuming one queue item (WC).
    pub consumer_process: SimTime,

    /// Queue capacity between producer and consumer (L).
    pub queue_capacity: u32,

    /// Simulation length in units of `consumer_process` (T).
    pub horizon_slots: u32,
}

impl ProdConConfig {
    /// Create a configuration with the default timing constants.
    pub fn new() -> Self {
        Self {
            producer_start: 3.0,
            producer_notify: 4.0,
            producer_process: 10.0,
            consumer_start: 3.0,
            consumer_notify: 4.0,
            consumer_process: 13.0,
            queue_capacity: 32,
            horizon_slots: 100,
        }
    }

    /// Set the producer start, notify, and process durations.
    pub fn with_producer(mut self, start: SimTime, notify: SimTime, process: SimTime) -> Self {
        self.producer_start = start;
        self.producer_notify = notify;
        self.producer_process = process;
        self
    }

    /// Set the consumer start, notify, and process durations.
    pub fn with_consumer(mut self, start: SimTime, notify: SimTime, process: SimTime) -> Self {
        self.consumer_start = start;
        self.consumer_notify = notify;
        self.consumer_process = process;
        self
    }

    /// Set the queue capacity.
    pub fn with_queue_capacity(mut self, capacity: u32) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the simulation length in consumer-process units.
    pub fn with_horizon_slots(mut self, slots: u32) -> Self {
        self.horizon_slots = slots;
        self
    }

    /// Simulation horizon in ticks: `horizon_slots * consumer_process`.
    pub fn horizon(&self) -> SimTime {
        self.horizon_slots as SimTime * self.consumer_process
    }

    /// Duration of a given kind of work.
    pub fn duration(&self, kind: WorkKind) -> SimTime {
        match kind {
            WorkKind::ProducerStart => self.producer_start,
            WorkKind::ProducerProcess => self.producer_process,
            WorkKind::ProducerNotify => self.producer_notify,
            WorkKind::ConsumerStart => self.consumer_start,
            WorkKind::ConsumerProcess => self.consumer_process,
            WorkKind::ConsumerNotify => self.consumer_notify,
        }
    }

    /// Check that the configuration describes a runnable simulation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("producer_start", self.producer_start),
            ("producer_notify", self.producer_notify),
            ("producer_process", self.producer_process),
            ("consumer_start", self.consumer_start),
            ("consumer_notify", self.consumer_notify),
            ("consumer_process", self.consumer_process),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }

        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let horizon = self.horizon();
        if horizon <= 0.0 {
            return Err(ConfigError::InvalidHorizon(horizon));
        }

        Ok(())
    }
}

impl Default for ProdConConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProdConConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parameters used:")?;
        writeln!(f, "   SP = {}", self.producer_start)?;
        writeln!(f, "   NP = {}", self.producer_notify)?;
        writeln!(f, "   WP = {}", self.producer_process)?;
        writeln!(f, "   SC = {}", self.consumer_start)?;
        writeln!(f, "   NC = {}", self.consumer_notify)?;
        writeln!(f, "   WC = {}", self.consumer_process)?;
        writeln!(f, "   L  = {}", self.queue_capacity)?;
        write!(f, "   T  = {}", self.horizon_slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProdConConfig::default();
        assert_eq!(config.queue_capacity, 32);
        assert_eq!(config.horizon(), 1300.0);
        assert_eq!(config.duration(WorkKind::ConsumerProcess), 13.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ProdConConfig::new()
            .with_producer(1.0, 2.0, 3.0)
            .with_consumer(4.0, 5.0, 6.0)
            .with_queue_capacity(2)
            .with_horizon_slots(10);

        assert_eq!(config.duration(WorkKind::ProducerStart), 1.0);
        assert_eq!(config.duration(WorkKind::ProducerNotify), 2.0);
        assert_eq!(config.duration(WorkKind::ProducerProcess), 3.0);
        assert_eq!(config.duration(WorkKind::ConsumerStart), 4.0);
        assert_eq!(config.duration(WorkKind::ConsumerNotify), 5.0);
        assert_eq!(config.duration(WorkKind::ConsumerProcess), 6.0);
        assert_eq!(config.horizon(), 60.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = ProdConConfig::new().with_producer(-1.0, 4.0, 10.0);
        assert_eq!(
            negative.validate(),
            Err(ConfigError::InvalidDuration {
                field: "producer_start",
                value: -1.0
            })
        );

        let zero_queue = ProdConConfig::new().with_queue_capacity(0);
        assert_eq!(zero_queue.validate(), Err(ConfigError::ZeroCapacity));

        let no_horizon = ProdConConfig::new().with_horizon_slots(0);
        assert_eq!(no_horizon.validate(), Err(ConfigError::InvalidHorizon(0.0)));
    }

    #[test]
    fn test_display_lists_parameters() {
        let text = ProdConConfig::default().to_string();
        assert!(text.starts_with("Parameters used:"));
        assert!(text.contains("   WC = 13"));
        assert!(text.contains("   L  = 32"));
    }
}
