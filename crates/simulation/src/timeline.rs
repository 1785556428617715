//! Per-thread busy/idle timeline.

use pipesim_core::{SimTime, Slice, TypeTag};

/// Timeline of a single thread slot.
///
/// Tracks when the thread next becomes free and records every idle gap and
/// work execution as an append-only sequence of [`Slice`]s.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    /// Time at which the thread becomes free to start new work.
    next_idle_at: SimTime,
    /// Idle gaps and work executions, in chronological order.
    slices: Vec<Slice>,
}

/// Placement of one work item on a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Reservation {
    pub begin: SimTime,
    pub end: SimTime,
    /// Idle gap recorded ahead of the work, if any.
    pub idle_gap: Option<SimTime>,
}

impl Timeline {
    /// Create an empty timeline, free at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time at which the thread becomes free again.
    pub fn next_idle_at(&self) -> SimTime {
        self.next_idle_at
    }

    /// Recorded slices in chronological order.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Total time spent executing work (non-idle slices).
    pub fn busy_time(&self) -> SimTime {
        self.slices
            .iter()
            .filter(|s| !s.is_idle())
            .map(|s| s.duration)
            .sum()
    }

    /// Total time recorded as idle.
    pub fn idle_time(&self) -> SimTime {
        self.slices
            .iter()
            .filter(|s| s.is_idle())
            .map(|s| s.duration)
            .sum()
    }

    /// Place a work item of `duration` that becomes ready at `now`.
    ///
    /// The work starts at `max(next_idle_at, now)`. If the thread has been
    /// idle since before `now`, the gap is recorded first.
    pub(crate) fn reserve(
        &mut self,
        now: SimTime,
        duration: SimTime,
        type_tag: TypeTag,
    ) -> Reservation {
        let mut idle_gap = None;
        if self.next_idle_at < now {
            let gap = now - self.next_idle_at;
            self.slices.push(Slice::idle(gap));
            idle_gap = Some(gap);
        }

        let begin = self.next_idle_at.max(now);
        let end = begin + duration;
        self.next_idle_at = end;
        self.slices.push(Slice::new(duration, type_tag));

        Reservation {
            begin,
            end,
            idle_gap,
        }
    }
}
