//! Core types for the pipesim discrete-event engine.
//!
//! This crate defines the vocabulary shared by the scheduler, the workloads
//! that drive it, and the trace exporter:
//!
//! - [`WorkItem`]: a unit of simulated processing with a fixed duration
//! - [`Workload`]: the state machine whose completion transitions schedule more work
//! - [`Slice`]: one recorded segment of a thread's timeline
//! - [`TypeTag`]: trace classification of a slice

mod tag;
mod traits;

pub use tag::{Dispatch, Slice, TypeTag};
pub use traits::{WorkItem, Workload};

/// Simulated time, in abstract ticks.
///
/// Simulated time never comes from a clock. It only advances when the
/// scheduler pops an event.
pub type SimTime = f64;

/// Index of a simulated execution slot.
///
/// Thread slots are serially-processing resources, not OS threads.
pub type ThreadIndex = u32;
