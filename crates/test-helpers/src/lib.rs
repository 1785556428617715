//! Test fixtures for exercising the scheduler without a real workload.
//!
//! - [`TestWork`]: a work item with an id, a duration, and a tag
//! - [`ScriptedWorkload`]: records completions and replays scripted follow-ups

use pipesim_core::{Dispatch, SimTime, ThreadIndex, TypeTag, WorkItem, Workload};
use std::collections::HashMap;

/// A work item identified by a caller-chosen id.
#[derive(Debug, Clone, PartialEq)]
pub struct TestWork {
    pub id: u64,
    pub duration: SimTime,
    pub tag: TypeTag,
}

impl TestWork {
    /// Default tag for test work.
    pub const TAG: TypeTag = TypeTag::new(1);

    pub fn new(id: u64, duration: SimTime) -> Self {
        Self {
            id,
            duration,
            tag: Self::TAG,
        }
    }

    pub fn with_tag(mut self, tag: TypeTag) -> Self {
        self.tag = tag;
        self
    }
}

impl WorkItem for TestWork {
    fn duration(&self) -> SimTime {
        self.duration
    }

    fn type_tag(&self) -> TypeTag {
        self.tag
    }

    fn name(&self) -> &'static str {
        "TestWork"
    }
}

/// A completion observed by [`ScriptedWorkload`].
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: u64,
    pub time: SimTime,
}

/// Workload that records every completion and, when a work id completes,
/// dispatches the follow-ups registered for it.
///
/// Follow-ups are consumed when they fire, so a script cannot loop forever
/// unless a follow-up re-registers itself through [`then`](Self::then).
#[derive(Debug, Default)]
pub struct ScriptedWorkload {
    followups: HashMap<u64, Vec<Dispatch<TestWork>>>,
    completions: Vec<Completion>,
    invocations: HashMap<u64, usize>,
}

impl ScriptedWorkload {
    pub fn new() -> Self {
        Self::default()
    }

    /// When work `after` completes, dispatch `work` on `thread`.
    pub fn then(mut self, after: u64, thread: ThreadIndex, work: TestWork) -> Self {
        self.followups
            .entry(after)
            .or_default()
            .push(Dispatch::new(thread, work));
        self
    }

    /// All completions in the order they were observed.
    pub fn completions(&self) -> &[Completion] {
        &self.completions
    }

    pub fn completed_ids(&self) -> Vec<u64> {
        self.completions.iter().map(|c| c.id).collect()
    }

    pub fn completion_times(&self) -> Vec<SimTime> {
        self.completions.iter().map(|c| c.time).collect()
    }

    /// How many times the completion action of `id` ran.
    pub fn invocations(&self, id: u64) -> usize {
        self.invocations.get(&id).copied().unwrap_or(0)
    }

    /// Largest per-id invocation count observed.
    pub fn max_invocations(&self) -> usize {
        self.invocations.values().copied().max().unwrap_or(0)
    }
}

impl Workload for ScriptedWorkload {
    type Work = TestWork;

    fn complete(&mut self, now: SimTime, work: TestWork) -> Vec<Dispatch<TestWork>> {
        self.completions.push(Completion { id: work.id, time: now });
        *self.invocations.entry(work.id).or_default() += 1;
        self.followups.remove(&work.id).unwrap_or_default()
    }
}
