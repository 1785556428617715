//! Work items of the producer/consumer workload.

use super::{CONSUMER_THREAD, PRODUCER_THREAD, TYPE_NOTIFY, TYPE_PROCESS, TYPE_START};
use crate::config::ProdConConfig;
use pipesim_core::{SimTime, ThreadIndex, TypeTag, WorkItem};

/// What a piece of producer/consumer work does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkKind {
    /// Wake the producer; begins producing if the queue has room.
    ProducerStart,
    /// Produce one item into the queue.
    ProducerProcess,
    /// Kick the consumer.
    ProducerNotify,
    /// Wake the consumer; begins consuming if the queue is non-empty.
    ConsumerStart,
    /// Consume one item from the queue.
    ConsumerProcess,
    /// Kick the producer.
    ConsumerNotify,
}

impl WorkKind {
    /// All kinds, producer side first.
    pub const ALL: [WorkKind; 6] = [
        WorkKind::ProducerStart,
        WorkKind::ProducerProcess,
        WorkKind::ProducerNotify,
        WorkKind::ConsumerStart,
        WorkKind::ConsumerProcess,
        WorkKind::ConsumerNotify,
    ];

    /// Trace classification.
    pub fn type_tag(self) -> TypeTag {
        match self {
            WorkKind::ProducerStart | WorkKind::ConsumerStart => TYPE_START,
            WorkKind::ProducerNotify | WorkKind::ConsumerNotify => TYPE_NOTIFY,
            WorkKind::ProducerProcess | WorkKind::ConsumerProcess => TYPE_PROCESS,
        }
    }

    /// Diagnostic label.
    pub fn name(self) -> &'static str {
        match self {
            WorkKind::ProducerStart => "ProducerStart",
            WorkKind::ProducerProcess => "ProducerProcess",
            WorkKind::ProducerNotify => "ProducerNotify",
            WorkKind::ConsumerStart => "ConsumerStart",
            WorkKind::ConsumerProcess => "ConsumerProcess",
            WorkKind::ConsumerNotify => "ConsumerNotify",
        }
    }

    /// The side this kind of work belongs to.
    pub fn home_thread(self) -> ThreadIndex {
        match self {
            WorkKind::ProducerStart | WorkKind::ProducerProcess | WorkKind::ProducerNotify => {
                PRODUCER_THREAD
            }
            WorkKind::ConsumerStart | WorkKind::ConsumerProcess | WorkKind::ConsumerNotify => {
                CONSUMER_THREAD
            }
        }
    }
}

impl std::fmt::Display for WorkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A producer/consumer work item.
///
/// The duration is fixed when the item is created, from the configuration
/// in force for the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProdConWork {
    kind: WorkKind,
    duration: SimTime,
}

impl ProdConWork {
    /// Create a work item of `kind` timed by `config`.
    pub fn new(kind: WorkKind, config: &ProdConConfig) -> Self {
        Self {
            kind,
            duration: config.duration(kind),
        }
    }

    /// What this work does.
    pub fn kind(&self) -> WorkKind {
        self.kind
    }
}

impl WorkItem for ProdConWork {
    fn duration(&self) -> SimTime {
        self.duration
    }

    fn type_tag(&self) -> TypeTag {
        self.kind.type_tag()
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_takes_duration_from_config() {
        let config = ProdConConfig::default();
        for kind in WorkKind::ALL {
            let work = ProdConWork::new(kind, &config);
            assert_eq!(work.duration(), config.duration(kind));
            assert_eq!(work.kind(), kind);
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(WorkKind::ProducerStart.type_tag(), TYPE_START);
        assert_eq!(WorkKind::ConsumerNotify.type_tag(), TYPE_NOTIFY);
        assert_eq!(WorkKind::ConsumerProcess.type_tag(), TYPE_PROCESS);
        assert_eq!(WorkKind::ProducerNotify.home_thread(), PRODUCER_THREAD);
        assert_eq!(WorkKind::ConsumerStart.home_thread(), CONSUMER_THREAD);
        assert_eq!(WorkKind::ProducerProcess.to_string(), "ProducerProcess");
    }
}
