//! Pipesim Simulator
//!
//! A producer/consumer pipeline workload built on top of the scheduler in
//! `pipesim-simulation`. Two thread slots, a bounded queue between them, and
//! an idle/notify handshake that keeps both sides cycling.
//!
//! # Architecture
//!
//! The simulator builds on `pipesim-simulation` to provide:
//!
//! - **Configuration**: timing constants and queue capacity with documented defaults
//! - **Workload**: the producer/consumer state machine and its work items
//! - **Metrics**: counters and derived figures once the run is over
//!
//! # Example
//!
//! ```ignore
//! use pipesim_simulator::{ProdConConfig, Simulator};
//!
//! let config = ProdConConfig::default()
//!     .with_queue_capacity(8)
//!     .with_horizon_slots(50);
//!
//! let mut simulator = Simulator::new(config)?;
//! let report = simulator.run();
//!
//! println!("{report}");
//! ```

pub mod config;
pub mod metrics;
pub mod runner;
pub mod workload;

pub use config::{ConfigError, ProdConConfig};
pub use metrics::SimulationReport;
pub use runner::Simulator;
pub use workload::{
    ProdConState, ProdConWork, ProdConWorkload, WorkKind, CONSUMER_THREAD, PRODUCER_THREAD,
    THREAD_COUNT, TYPE_COUNT,
};
