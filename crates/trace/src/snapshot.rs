//! Owned snapshot of scheduler timelines.

use crate::TraceError;
use pipesim_core::{SimTime, Slice, WorkItem};
use pipesim_simulation::Scheduler;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Timeline of one thread, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadTrace {
    /// Display name of the thread.
    pub name: String,
    /// Idle gaps and work executions, in chronological order.
    pub slices: Vec<Slice>,
}

impl ThreadTrace {
    /// End of the last recorded slice.
    pub fn span(&self) -> SimTime {
        self.slices.iter().map(|s| s.duration).sum()
    }
}

/// Everything an exporter needs: per-thread slices plus the name tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceData {
    /// One entry per thread, indexed by thread.
    pub threads: Vec<ThreadTrace>,
    /// Display names, indexed by type tag.
    pub type_names: Vec<String>,
}

impl TraceData {
    /// Snapshot the timelines of `scheduler`.
    pub fn capture<W: WorkItem>(scheduler: &Scheduler<W>) -> Self {
        let threads = scheduler
            .thread_names()
            .iter()
            .zip(scheduler.timelines())
            .map(|(name, timeline)| ThreadTrace {
                name: name.clone(),
                slices: timeline.slices().to_vec(),
            })
            .collect();

        Self {
            threads,
            type_names: scheduler.type_names().to_vec(),
        }
    }

    /// Longest thread span.
    pub fn span(&self) -> SimTime {
        self.threads
            .iter()
            .map(ThreadTrace::span)
            .fold(0.0, SimTime::max)
    }
}

/// Write `data` as pretty-printed JSON.
pub fn write_json(path: impl AsRef<Path>, data: &TraceData) -> Result<(), TraceError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), threads = data.threads.len(), "Wrote JSON trace");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipesim_core::TypeTag;
    use pipesim_test_helpers::{ScriptedWorkload, TestWork};

    #[test]
    fn test_capture_copies_names_and_slices() {
        let mut sched = Scheduler::new(2, 2);
        sched.set_thread_name(0, "Left").unwrap();
        sched.set_type_name(TestWork::TAG, "Busy").unwrap();
        sched.schedule(0, TestWork::new(1, 2.0));
        sched.schedule(1, TestWork::new(2, 5.0));
        sched.run(10.0, &mut ScriptedWorkload::new());

        let data = TraceData::capture(&sched);

        assert_eq!(data.threads.len(), 2);
        assert_eq!(data.threads[0].name, "Left");
        assert_eq!(data.threads[1].name, "thread-1");
        assert_eq!(data.threads[0].slices, vec![Slice::new(2.0, TypeTag::new(1))]);
        assert_eq!(data.type_names, vec!["type-0", "Busy"]);
        assert_eq!(data.span(), 5.0);
    }
}
