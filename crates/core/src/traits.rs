//! Core traits for work items and the workloads that schedule them.

use crate::{Dispatch, SimTime, TypeTag};

/// A unit of simulated processing.
///
/// A work item occupies one thread slot for [`duration`](WorkItem::duration)
/// ticks. When it completes, the scheduler hands it back to the owning
/// [`Workload`] exactly once and then drops it.
pub trait WorkItem {
    /// How long this work takes to complete. Must be finite and non-negative.
    fn duration(&self) -> SimTime;

    /// Trace classification of this work.
    fn type_tag(&self) -> TypeTag;

    /// Diagnostic label.
    fn name(&self) -> &'static str;
}

/// A state machine driven by work completions.
///
/// This is the counterpart of the scheduler:
///
/// - **Synchronous**: `complete` never blocks and never re-enters the scheduler
/// - **Deterministic**: same state + same work = same dispatches
/// - **Self-scheduling**: follow-up work is returned, not scheduled in place
///
/// # Example
///
/// ```ignore
/// impl Workload for Ticker {
///     type Work = Tick;
///
///     fn complete(&mut self, _now: SimTime, _work: Tick) -> Vec<Dispatch<Tick>> {
///         self.ticks += 1;
///         vec![Dispatch::new(0, Tick)]
///     }
/// }
/// ```
pub trait Workload {
    /// The work items this workload schedules.
    type Work: WorkItem;

    /// Run the completion action of `work`, which finished at `now`.
    ///
    /// Returns the work to schedule next, in order. Every returned dispatch
    /// starts no earlier than `now`.
    fn complete(&mut self, now: SimTime, work: Self::Work) -> Vec<Dispatch<Self::Work>>;
}
