//! Producer/consumer state machine.

use super::{ProdConState, ProdConWork, WorkKind, CONSUMER_THREAD, PRODUCER_THREAD};
use crate::config::ProdConConfig;
use pipesim_core::{Dispatch, SimTime, Workload};
use tracing::trace;

/// The producer/consumer workload.
///
/// Owns the shared state and applies the transition of each completed work
/// item to it. The transitions are:
///
/// | completed work   | effect                                   | dispatched next                                                  |
/// |------------------|------------------------------------------|------------------------------------------------------------------|
/// | ProducerStart    | producer active if queue has room        | ProducerProcess                                                  |
/// | ProducerProcess  | produced += 1, queue += 1                | ProducerNotify if consumer idle; ProducerProcess if room, else producer idle |
/// | ProducerNotify   | producer notifications += 1              | ConsumerStart                                                    |
/// | ConsumerStart    | consumer active if queue non-empty       | ConsumerProcess                                                  |
/// | ConsumerProcess  | consumed += 1, queue -= 1                | ConsumerNotify if producer idle; ConsumerProcess if non-empty, else consumer idle |
/// | ConsumerNotify   | consumer notifications += 1              | ProducerStart                                                    |
///
/// A start that arrives while its side is already active is absorbed: the
/// running process chain already covers it.
#[derive(Debug, Clone)]
pub struct ProdConWorkload {
    config: ProdConConfig,
    state: ProdConState,
}

impl ProdConWorkload {
    /// Create a workload in its initial state.
    pub fn new(config: ProdConConfig) -> Self {
        Self {
            config,
            state: ProdConState::new(),
        }
    }

    /// The work that kicks off a run: a producer start.
    pub fn seed(&self) -> Dispatch<ProdConWork> {
        self.dispatch(WorkKind::ProducerStart)
    }

    /// Current shared state.
    pub fn state(&self) -> &ProdConState {
        &self.state
    }

    /// Configuration in force.
    pub fn config(&self) -> &ProdConConfig {
        &self.config
    }

    fn dispatch(&self, kind: WorkKind) -> Dispatch<ProdConWork> {
        Dispatch::new(kind.home_thread(), ProdConWork::new(kind, &self.config))
    }

    /// Apply the transition for `kind`, returning the work to schedule.
    fn transition(&mut self, kind: WorkKind) -> Vec<Dispatch<ProdConWork>> {
        let capacity = self.config.queue_capacity;
        let st = &mut self.state;
        let mut next = Vec::with_capacity(2);

        match kind {
            WorkKind::ProducerStart => {
                if st.producer_idle && st.queue_length < capacity {
                    st.producer_idle = false;
                    next.push(WorkKind::ProducerProcess);
                }
            }
            WorkKind::ProducerProcess => {
                st.producer_processed += 1;
                st.queue_length += 1;

                if st.consumer_idle {
                    next.push(WorkKind::ProducerNotify);
                }
                if st.queue_length < capacity {
                    next.push(WorkKind::ProducerProcess);
                } else {
                    st.producer_idle = true;
                }
            }
            WorkKind::ProducerNotify => {
                st.producer_notified += 1;
                next.push(WorkKind::ConsumerStart);
            }
            WorkKind::ConsumerStart => {
                if st.consumer_idle && st.queue_length > 0 {
                    st.consumer_idle = false;
                    next.push(WorkKind::ConsumerProcess);
                }
            }
            WorkKind::ConsumerProcess => {
                st.consumer_processed += 1;
                st.queue_length -= 1;

                if st.producer_idle {
                    next.push(WorkKind::ConsumerNotify);
                }
                if st.queue_length > 0 {
                    next.push(WorkKind::ConsumerProcess);
                } else {
                    st.consumer_idle = true;
                }
            }
            WorkKind::ConsumerNotify => {
                st.consumer_notified += 1;
                next.push(WorkKind::ProducerStart);
            }
        }

        debug_assert!(
            self.state.queue_length <= capacity,
            "queue length {} exceeds capacity {}",
            self.state.queue_length,
            capacity
        );

        next.into_iter().map(|kind| self.dispatch(kind)).collect()
    }
}

impl Workload for ProdConWorkload {
    type Work = ProdConWork;

    fn complete(&mut self, now: SimTime, work: ProdConWork) -> Vec<Dispatch<ProdConWork>> {
        let next = self.transition(work.kind());

        trace!(
            time = now,
            work = %work.kind(),
            queue_length = self.state.queue_length,
            producer_idle = self.state.producer_idle,
            consumer_idle = self.state.consumer_idle,
            dispatched = next.len(),
            "Transition"
        );

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::TYPE_PROCESS;
    use pipesim_core::WorkItem;

    fn workload(capacity: u32) -> ProdConWorkload {
        ProdConWorkload::new(ProdConConfig::default().with_queue_capacity(capacity))
    }

    fn kinds(dispatches: &[Dispatch<ProdConWork>]) -> Vec<WorkKind> {
        dispatches.iter().map(|d| d.work.kind()).collect()
    }

    fn complete(wl: &mut ProdConWorkload, kind: WorkKind) -> Vec<WorkKind> {
        let work = ProdConWork::new(kind, &wl.config);
        kinds(&wl.complete(0.0, work))
    }

    #[test]
    fn test_seed_is_producer_start() {
        let wl = workload(4);
        let seed = wl.seed();
        assert_eq!(seed.thread, PRODUCER_THREAD);
        assert_eq!(seed.work.kind(), WorkKind::ProducerStart);
    }

    #[test]
    fn test_producer_start_with_room() {
        let mut wl = workload(4);
        assert_eq!(
            complete(&mut wl, WorkKind::ProducerStart),
            vec![WorkKind::ProducerProcess]
        );
        assert!(!wl.state().producer_idle);
    }

    #[test]
    fn test_producer_start_stalls_on_full_queue() {
        let mut wl = workload(1);
        wl.state.queue_length = 1;
        assert!(complete(&mut wl, WorkKind::ProducerStart).is_empty());
        assert!(wl.state().producer_idle);
    }

    #[test]
    fn test_producer_process_notifies_idle_consumer_first() {
        let mut wl = workload(4);
        complete(&mut wl, WorkKind::ProducerStart);

        let next = complete(&mut wl, WorkKind::ProducerProcess);
        assert_eq!(
            next,
            vec![WorkKind::ProducerNotify, WorkKind::ProducerProcess]
        );
        assert_eq!(wl.state().producer_processed, 1);
        assert_eq!(wl.state().queue_length, 1);
    }

    #[test]
    fn test_producer_goes_idle_when_queue_fills() {
        let mut wl = workload(1);
        complete(&mut wl, WorkKind::ProducerStart);
        wl.state.consumer_idle = false;

        assert!(complete(&mut wl, WorkKind::ProducerProcess).is_empty());
        assert!(wl.state().producer_idle);
        assert_eq!(wl.state().queue_length, 1);
    }

    #[test]
    fn test_notify_crosses_threads() {
        let mut wl = workload(4);
        let next = wl.complete(
            0.0,
            ProdConWork::new(WorkKind::ProducerNotify, &wl.config),
        );
        assert_eq!(next[0].thread, CONSUMER_THREAD);
        assert_eq!(next[0].work.kind(), WorkKind::ConsumerStart);
        assert_eq!(wl.state().producer_notified, 1);

        let next = wl.complete(
            0.0,
            ProdConWork::new(WorkKind::ConsumerNotify, &wl.config),
        );
        assert_eq!(next[0].thread, PRODUCER_THREAD);
        assert_eq!(next[0].work.kind(), WorkKind::ProducerStart);
        assert_eq!(wl.state().consumer_notified, 1);
    }

    #[test]
    fn test_consumer_start_stalls_on_empty_queue() {
        let mut wl = workload(4);
        assert!(complete(&mut wl, WorkKind::ConsumerStart).is_empty());
        assert!(wl.state().consumer_idle);
    }

    #[test]
    fn test_consumer_drains_and_notifies_idle_producer() {
        let mut wl = workload(2);
        wl.state.queue_length = 2;
        wl.state.producer_idle = true;

        assert_eq!(
            complete(&mut wl, WorkKind::ConsumerStart),
            vec![WorkKind::ConsumerProcess]
        );
        assert_eq!(
            complete(&mut wl, WorkKind::ConsumerProcess),
            vec![WorkKind::ConsumerNotify, WorkKind::ConsumerProcess]
        );
        assert_eq!(
            complete(&mut wl, WorkKind::ConsumerProcess),
            vec![WorkKind::ConsumerNotify]
        );
        assert!(wl.state().consumer_idle);
        assert_eq!(wl.state().queue_length, 0);
        assert_eq!(wl.state().consumer_processed, 2);
    }

    #[test]
    fn test_redundant_start_is_absorbed() {
        let mut wl = workload(4);
        wl.state.queue_length = 2;
        complete(&mut wl, WorkKind::ConsumerStart);

        // A second kick while the consumer is already draining the queue.
        assert!(complete(&mut wl, WorkKind::ConsumerStart).is_empty());

        complete(&mut wl, WorkKind::ProducerStart);
        assert!(complete(&mut wl, WorkKind::ProducerStart).is_empty());
    }

    #[test]
    fn test_process_dispatch_is_classified_as_process() {
        let mut wl = workload(4);
        let next = wl.complete(
            0.0,
            ProdConWork::new(WorkKind::ProducerStart, &wl.config),
        );
        assert_eq!(next[0].work.type_tag(), TYPE_PROCESS);
        assert_eq!(next[0].work.duration(), 10.0);
    }
}
