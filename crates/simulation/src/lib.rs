//! Discrete-event scheduler.
//!
//! This crate provides the time-ordered event queue and the per-thread
//! timelines that drive a [`Workload`](pipesim_core::Workload). Time and
//! ordering are simulated: a run is a single synchronous loop.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Scheduler                          │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BTreeMap<EventKey, Event>)        │ │
//! │  │     Ordered by: time, sequence                     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     works: WorkArena<W>   timelines: Vec<Timeline> │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Workload::complete → dispatch new work         │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod arena;
mod error;
mod event_queue;
mod scheduler;
mod timeline;

pub use arena::{WorkArena, WorkId};
pub use error::SchedulerError;
pub use event_queue::{Event, EventKey, EventKind};
pub use scheduler::{Scheduler, SimulationStats};
pub use timeline::Timeline;
