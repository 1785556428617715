//! Deterministic event scheduler.
//!
//! The scheduler owns the event queue, the pending work, and one timeline
//! per thread slot. A workload seeds it with [`Scheduler::schedule`] and
//! then drives it with [`Scheduler::run`], which pops events in time order
//! and hands completed work back to the workload.

use crate::event_queue::{Event, EventKey, EventKind};
use crate::timeline::Timeline;
use crate::{SchedulerError, WorkArena, WorkId};
use pipesim_core::{SimTime, Slice, ThreadIndex, TypeTag, WorkItem, Workload};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// Statistics collected by the scheduler.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulationStats {
    /// Total events processed.
    pub events_processed: u64,
    /// Start events processed.
    pub start_events: u64,
    /// Completion events processed (one per completed work item).
    pub completion_events: u64,
    /// Work items accepted by `schedule`.
    pub works_scheduled: u64,
    /// Idle gaps recorded across all timelines.
    pub idle_slices: u64,
}

/// Discrete-event scheduler over a fixed set of thread slots.
///
/// Processes events in deterministic order: by time, then by insertion
/// sequence. Given the same schedule calls and workload, every run produces
/// the same event order.
pub struct Scheduler<W> {
    /// Global event queue, ordered deterministically.
    event_queue: BTreeMap<EventKey, Event>,

    /// Sequence counter for deterministic ordering.
    sequence: u64,

    /// Current simulation time.
    now: SimTime,

    /// Work referenced by queued events.
    works: WorkArena<W>,

    /// One timeline per thread slot.
    timelines: Vec<Timeline>,

    /// Display names, indexed by thread.
    thread_names: Vec<String>,

    /// Display names, indexed by type tag.
    type_names: Vec<String>,

    /// Statistics.
    stats: SimulationStats,
}

impl<W: WorkItem> Scheduler<W> {
    /// Create a scheduler with `thread_count` slots and `type_count` work types.
    ///
    /// Type tag 0 is the idle tag, so `type_count` includes it.
    pub fn new(thread_count: u32, type_count: u32) -> Self {
        Self {
            event_queue: BTreeMap::new(),
            sequence: 0,
            now: 0.0,
            works: WorkArena::new(),
            timelines: (0..thread_count).map(|_| Timeline::new()).collect(),
            thread_names: (0..thread_count).map(|i| format!("thread-{i}")).collect(),
            type_names: (0..type_count).map(|i| format!("type-{i}")).collect(),
            stats: SimulationStats::default(),
        }
    }

    /// Number of thread slots.
    pub fn thread_count(&self) -> u32 {
        self.timelines.len() as u32
    }

    /// Number of work types, including the idle type.
    pub fn type_count(&self) -> u32 {
        self.type_names.len() as u32
    }

    /// Current simulation time.
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Get statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Number of events still queued.
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    /// Number of work items not yet completed.
    pub fn pending_work(&self) -> usize {
        self.works.len()
    }

    /// Get a thread's timeline.
    pub fn timeline(&self, thread: ThreadIndex) -> Option<&Timeline> {
        self.timelines.get(thread as usize)
    }

    /// All timelines, indexed by thread.
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Recorded slices of a thread, or an empty slice for an unknown thread.
    pub fn slices(&self, thread: ThreadIndex) -> &[Slice] {
        self.timeline(thread).map(Timeline::slices).unwrap_or(&[])
    }

    /// Time at which `thread` becomes free again.
    pub fn next_idle_at(&self, thread: ThreadIndex) -> Option<SimTime> {
        self.timeline(thread).map(Timeline::next_idle_at)
    }

    /// Display names, indexed by thread.
    pub fn thread_names(&self) -> &[String] {
        &self.thread_names
    }

    /// Display names, indexed by type tag.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Name a thread slot.
    pub fn set_thread_name(
        &mut self,
        thread: ThreadIndex,
        name: impl Into<String>,
    ) -> Result<(), SchedulerError> {
        let thread_count = self.thread_count();
        let slot = self
            .thread_names
            .get_mut(thread as usize)
            .ok_or(SchedulerError::InvalidThread {
                thread,
                thread_count,
            })?;
        *slot = name.into();
        Ok(())
    }

    /// Name a work type.
    pub fn set_type_name(
        &mut self,
        tag: TypeTag,
        name: impl Into<String>,
    ) -> Result<(), SchedulerError> {
        let type_count = self.type_count();
        let slot = self
            .type_names
            .get_mut(tag.as_u32() as usize)
            .ok_or(SchedulerError::UnknownTypeTag { tag, type_count })?;
        *slot = name.into();
        Ok(())
    }

    /// Schedule `work` on `thread`.
    ///
    /// The work starts when the thread is free and the current time has been
    /// reached, whichever is later. Both its start and completion events are
    /// queued; no action runs now.
    ///
    /// # Panics
    ///
    /// Panics if the thread index, the work's type tag, or its duration is
    /// invalid. See [`try_schedule`](Self::try_schedule).
    pub fn schedule(&mut self, thread: ThreadIndex, work: W) -> WorkId {
        match self.try_schedule(thread, work) {
            Ok(id) => id,
            Err(e) => panic!("invalid schedule request: {e}"),
        }
    }

    /// Schedule `work` on `thread`, reporting precondition violations.
    pub fn try_schedule(&mut self, thread: ThreadIndex, work: W) -> Result<WorkId, SchedulerError> {
        let thread_count = self.thread_count();
        if thread >= thread_count {
            return Err(SchedulerError::InvalidThread {
                thread,
                thread_count,
            });
        }

        let tag = work.type_tag();
        if tag.as_u32() >= self.type_count() {
            return Err(SchedulerError::UnknownTypeTag {
                tag,
                type_count: self.type_count(),
            });
        }

        let duration = work.duration();
        if !duration.is_finite() || duration < 0.0 {
            return Err(SchedulerError::InvalidDuration {
                name: work.name(),
                duration,
            });
        }

        let name = work.name();
        let reservation = self.timelines[thread as usize].reserve(self.now, duration, tag);
        if reservation.idle_gap.is_some() {
            self.stats.idle_slices += 1;
        }

        let id = self.works.insert(work);
        self.push_event(reservation.begin, thread, EventKind::Start, id);
        self.push_event(reservation.end, thread, EventKind::Completion, id);
        self.stats.works_scheduled += 1;

        trace!(
            thread,
            work = name,
            begin = reservation.begin,
            end = reservation.end,
            "Scheduled work"
        );

        Ok(id)
    }

    /// Run the simulation until no events remain or the next event lies
    /// beyond `max_time`.
    ///
    /// Simulation time is reset to zero first. Every completion event hands
    /// its work to `workload`, and the returned dispatches are scheduled in
    /// order before the next event is popped.
    ///
    /// Returns the number of events processed in this call.
    ///
    /// # Panics
    ///
    /// Panics if `max_time` is NaN, or if the workload dispatches an invalid
    /// schedule request.
    pub fn run<L>(&mut self, max_time: SimTime, workload: &mut L) -> u64
    where
        L: Workload<Work = W>,
    {
        assert!(!max_time.is_nan(), "Simulation horizon must not be NaN");

        self.now = 0.0;
        let start = self.stats.events_processed;

        info!(
            max_time,
            threads = self.thread_count(),
            pending_events = self.event_queue.len(),
            "Running simulation"
        );

        while let Some((&key, _)) = self.event_queue.first_key_value() {
            if key.time > max_time {
                debug!(
                    remaining_events = self.event_queue.len(),
                    "Horizon reached"
                );
                break;
            }

            let Some((key, event)) = self.event_queue.pop_first() else {
                break;
            };

            // Virtual time must never go backward.
            debug_assert!(
                key.time >= self.now,
                "Time went backward: now={}, event={}",
                self.now,
                key.time
            );
            self.now = key.time;
            self.stats.events_processed += 1;

            match event.kind {
                EventKind::Start => {
                    self.stats.start_events += 1;
                    let name = self.works.get(event.work).map(WorkItem::name);
                    debug!(
                        time = self.now,
                        thread = event.thread,
                        work = name,
                        "Work starts"
                    );
                }
                EventKind::Completion => {
                    self.stats.completion_events += 1;
                    let work = self
                        .works
                        .remove(event.work)
                        .expect("completion event must refer to live work");
                    debug!(
                        time = self.now,
                        thread = event.thread,
                        work = work.name(),
                        "Work ends"
                    );

                    for dispatch in workload.complete(self.now, work) {
                        self.schedule(dispatch.thread, dispatch.work);
                    }
                }
            }
        }

        let processed = self.stats.events_processed - start;
        info!(
            processed,
            final_time = self.now,
            remaining_events = self.event_queue.len(),
            "Simulation complete"
        );
        processed
    }

    /// Queue an event.
    fn push_event(&mut self, time: SimTime, thread: ThreadIndex, kind: EventKind, work: WorkId) {
        self.sequence += 1;
        let key = EventKey::new(time, self.sequence);
        self.event_queue.insert(key, Event { thread, kind, work });
    }
}
