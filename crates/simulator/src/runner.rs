//! Simulator runner: wires the workload to the scheduler.

use crate::config::{ConfigError, ProdConConfig};
use crate::metrics::SimulationReport;
use crate::workload::{
    ProdConWork, ProdConWorkload, THREAD_COUNT, THREAD_NAMES, TYPE_COUNT, TYPE_NAMES,
};
use pipesim_core::TypeTag;
use pipesim_simulation::{Scheduler, Timeline};
use tracing::info;

/// A producer/consumer simulation, ready to run.
///
/// Owns the scheduler and the workload for the lifetime of one run.
pub struct Simulator {
    config: ProdConConfig,
    scheduler: Scheduler<ProdConWork>,
    workload: ProdConWorkload,
    seeded: bool,
}

impl Simulator {
    /// Create a simulator for a validated configuration.
    pub fn new(config: ProdConConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut scheduler = Scheduler::new(THREAD_COUNT, TYPE_COUNT);
        for (thread, name) in (0..).zip(THREAD_NAMES) {
            scheduler
                .set_thread_name(thread, name)
                .expect("thread names match THREAD_COUNT");
        }
        for (tag, name) in (0..).zip(TYPE_NAMES) {
            scheduler
                .set_type_name(TypeTag::new(tag), name)
                .expect("type names match TYPE_COUNT");
        }

        Ok(Self {
            workload: ProdConWorkload::new(config.clone()),
            config,
            scheduler,
            seeded: false,
        })
    }

    /// Seed the run: kick the producer at time zero.
    ///
    /// Idempotent; [`run`](Self::run) calls it if needed.
    pub fn initialize(&mut self) {
        if self.seeded {
            return;
        }
        let seed = self.workload.seed();
        self.scheduler.schedule(seed.thread, seed.work);
        self.seeded = true;
    }

    /// Run to the configured horizon and report.
    pub fn run(&mut self) -> SimulationReport {
        self.initialize();

        let horizon = self.config.horizon();
        info!(
            horizon,
            queue_capacity = self.config.queue_capacity,
            "Starting producer/consumer simulation"
        );

        self.scheduler.run(horizon, &mut self.workload);
        let report = self.report();

        info!(
            produced = report.producer_processed,
            consumed = report.consumer_processed,
            average_time_per_slot = report.average_time_per_slot(),
            "Simulation finished"
        );
        report
    }

    /// Report on the current state.
    pub fn report(&self) -> SimulationReport {
        let busy: Vec<_> = self
            .scheduler
            .timelines()
            .iter()
            .map(Timeline::busy_time)
            .collect();
        SimulationReport::new(
            self.config.horizon(),
            self.workload.state(),
            self.scheduler.stats(),
            &busy,
        )
    }

    /// Configuration in force.
    pub fn config(&self) -> &ProdConConfig {
        &self.config
    }

    /// The underlying scheduler (timelines, names, statistics).
    pub fn scheduler(&self) -> &Scheduler<ProdConWork> {
        &self.scheduler
    }

    /// The workload and its shared state.
    pub fn workload(&self) -> &ProdConWorkload {
        &self.workload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{CONSUMER_THREAD, PRODUCER_THREAD};
    use tracing_test::traced_test;

    fn short_run() -> ProdConConfig {
        ProdConConfig::new()
            .with_queue_capacity(2)
            .with_horizon_slots(10)
    }

    #[test]
    fn test_new_names_threads_and_types() {
        let simulator = Simulator::new(short_run()).unwrap();
        let scheduler = simulator.scheduler();
        assert_eq!(scheduler.thread_names()[PRODUCER_THREAD as usize], "Producer");
        assert_eq!(scheduler.thread_names()[CONSUMER_THREAD as usize], "Consumer");
        assert_eq!(scheduler.type_names()[3], "Process");
        assert_eq!(scheduler.pending_events(), 0);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut simulator = Simulator::new(short_run()).unwrap();
        simulator.initialize();
        simulator.initialize();
        // One start and one completion for the seed.
        assert_eq!(simulator.scheduler().pending_events(), 2);
    }

    #[traced_test]
    #[test]
    fn test_run_reports_and_logs() {
        let mut simulator = Simulator::new(short_run()).unwrap();
        let report = simulator.run();

        assert_eq!(report.horizon, 130.0);
        assert_eq!(report, simulator.report());
        assert!(report.producer_processed >= report.consumer_processed);
        assert!(report.producer_busy > 0.0);
        assert!(logs_contain("Starting producer/consumer simulation"));
        assert!(logs_contain("Simulation finished"));
    }
}
