//! Scheduler precondition errors.

use pipesim_core::{SimTime, ThreadIndex, TypeTag};
use thiserror::Error;

/// A violated scheduling precondition.
///
/// These indicate a defect in how the workload was built, not a runtime
/// condition. [`Scheduler::schedule`](crate::Scheduler::schedule) turns them
/// into panics; the `try_*` variants return them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// Thread index outside `[0, thread_count)`.
    #[error("thread {thread} out of range (scheduler has {thread_count} threads)")]
    InvalidThread {
        thread: ThreadIndex,
        thread_count: u32,
    },

    /// Type tag outside `[0, type_count)`.
    #[error("{tag} out of range (scheduler has {type_count} types)")]
    UnknownTypeTag { tag: TypeTag, type_count: u32 },

    /// Work duration that is negative, infinite, or NaN.
    #[error("work {name} has invalid duration {duration}")]
    InvalidDuration { name: &'static str, duration: SimTime },
}
