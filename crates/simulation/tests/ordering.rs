//! Property tests for event ordering and timeline bookkeeping.
//!
//! These tests drive the scheduler with arbitrary schedule sequences,
//! including work dispatched from completion actions, and check the
//! ordering and accounting guarantees of the engine.

use pipesim_core::SimTime;
use pipesim_simulation::Scheduler;
use pipesim_test_helpers::{ScriptedWorkload, TestWork};
use proptest::prelude::*;

const THREADS: u32 = 3;

/// A planned work item: thread, integral duration, and optionally the index
/// of an earlier item whose completion dispatches it.
type Plan = Vec<(u32, u32, Option<prop::sample::Index>)>;

fn plan_strategy() -> impl Strategy<Value = Plan> {
    prop::collection::vec(
        (0..THREADS, 0u32..20, prop::option::of(any::<prop::sample::Index>())),
        1..40,
    )
}

/// Build a scheduler and workload from a plan. Items without a parent (and
/// the first item) are seeded directly; the rest are follow-ups.
fn build(plan: &Plan) -> (Scheduler<TestWork>, ScriptedWorkload, Vec<SimTime>) {
    let mut sched = Scheduler::new(THREADS, 2);
    let mut workload = ScriptedWorkload::new();
    let mut per_thread = vec![0.0; THREADS as usize];

    for (i, (thread, duration, parent)) in plan.iter().enumerate() {
        let work = TestWork::new(i as u64, *duration as f64);
        per_thread[*thread as usize] += *duration as f64;
        match parent {
            Some(parent) if i > 0 => {
                let parent = parent.index(i) as u64;
                workload = workload.then(parent, *thread, work);
            }
            _ => {
                sched.schedule(*thread, work);
            }
        }
    }

    (sched, workload, per_thread)
}

proptest! {
    /// Completions are delivered in non-decreasing time order.
    #[test]
    fn completions_are_time_ordered(plan in plan_strategy()) {
        let (mut sched, mut workload, _) = build(&plan);
        sched.run(f64::MAX, &mut workload);

        let times = workload.completion_times();
        for window in times.windows(2) {
            prop_assert!(window[0] <= window[1], "Time went backward: {:?}", times);
        }
    }

    /// Every planned item completes exactly once when the horizon is unbounded.
    #[test]
    fn every_work_completes_once(plan in plan_strategy()) {
        let (mut sched, mut workload, _) = build(&plan);
        sched.run(f64::MAX, &mut workload);

        prop_assert_eq!(workload.completions().len(), plan.len());
        prop_assert_eq!(workload.max_invocations(), 1);
        prop_assert_eq!(sched.pending_work(), 0);
        prop_assert_eq!(sched.pending_events(), 0);
        prop_assert_eq!(sched.stats().start_events, plan.len() as u64);
    }

    /// Busy time recorded per thread equals the durations scheduled on it.
    #[test]
    fn busy_time_matches_scheduled_durations(plan in plan_strategy()) {
        let (mut sched, mut workload, per_thread) = build(&plan);
        sched.run(f64::MAX, &mut workload);

        for thread in 0..THREADS {
            let timeline = sched.timeline(thread).unwrap();
            prop_assert_eq!(timeline.busy_time(), per_thread[thread as usize]);
            // Idle and busy slices tile the thread's timeline from zero.
            prop_assert_eq!(
                timeline.busy_time() + timeline.idle_time(),
                timeline.next_idle_at()
            );
        }
    }

    /// A thread's next-idle time never moves backward.
    #[test]
    fn next_idle_is_monotonic(steps in prop::collection::vec((0..THREADS, 0u32..20), 1..60)) {
        let mut sched: Scheduler<TestWork> = Scheduler::new(THREADS, 2);
        let mut last = vec![0.0; THREADS as usize];

        for (i, (thread, duration)) in steps.into_iter().enumerate() {
            sched.schedule(thread, TestWork::new(i as u64, duration as f64));
            for t in 0..THREADS {
                let now = sched.next_idle_at(t).unwrap();
                prop_assert!(now >= last[t as usize]);
                last[t as usize] = now;
            }
        }
    }
}

#[test]
fn simultaneous_completions_are_fifo() {
    let mut sched = Scheduler::new(THREADS, 2);
    sched.schedule(2, TestWork::new(10, 5.0));
    sched.schedule(0, TestWork::new(11, 5.0));
    sched.schedule(1, TestWork::new(12, 5.0));

    let mut workload = ScriptedWorkload::new();
    sched.run(5.0, &mut workload);

    assert_eq!(workload.completed_ids(), vec![10, 11, 12]);
}

#[test]
fn rerun_resets_clock_and_keeps_pending_work() {
    let mut sched = Scheduler::new(1, 2);
    sched.schedule(0, TestWork::new(1, 4.0));
    sched.schedule(0, TestWork::new(2, 4.0));

    let mut workload = ScriptedWorkload::new();
    sched.run(4.0, &mut workload);
    assert_eq!(workload.completed_ids(), vec![1]);

    sched.run(8.0, &mut workload);
    assert_eq!(workload.completed_ids(), vec![1, 2]);
    assert_eq!(sched.now(), 8.0);
}
