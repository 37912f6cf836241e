//! Preemptive Shortest-Remaining-Time-First scheduler.
//!
//! # Algorithm
//!
//! At every time unit the arrived, unfinished process with the least
//! remaining burst runs (ties: earlier arrival, then smaller PID). A change
//! of running process closes the open slice of the previous one, so
//! consecutive units of the same process coalesce into a single slice.
//!
//! The selection can only change when a process arrives or completes, so
//! the clock jumps from event to event: the selected process runs until the
//! next arrival or its own completion, whichever comes first. When nothing
//! is runnable the clock jumps straight to the next arrival. Both yield the
//! same timeline as stepping one unit at a time.
//!
//! # Complexity
//! O(n²) where n = number of processes (at most 2n events).
//!
//! # Reference
//! Schrage (1968), "A proof of the optimality of the shortest remaining
//! processing time discipline"

use tracing::{debug, trace};

use super::{Algorithm, CpuScheduler, SchedulerRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
use crate::models::Process;

/// Preemptive shortest-remaining-time scheduler.
#[derive(Debug, Clone)]
pub struct Srtf {
    rule_engine: RuleEngine,
}

impl Srtf {
    /// Creates an SRTF scheduler with the default selection order.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::new()
                .with_rule(rules::Srpt)
                .with_tie_breaker(rules::Fifo)
                .with_final_tie_breaker(TieBreaker::ByPid),
        }
    }
}

impl Default for Srtf {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuScheduler for Srtf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Srtf
    }

    fn schedule(&self, processes: &[Process]) -> SchedulerRun {
        let mut run = SchedulerRun::new(Algorithm::Srtf, processes);
        let mut remaining: Vec<i64> = processes.iter().map(|p| p.burst).collect();
        let mut context = SchedulingContext::default();
        for p in processes {
            context.remaining_work.insert(p.pid, p.burst);
        }

        let mut completed = 0;
        let mut current_time = 0;
        // Process holding the open slice, and where that slice began.
        let mut running: Option<usize> = None;
        let mut slice_start = 0;

        while completed < processes.len() {
            context.current_time = current_time;
            let eligible = (0..processes.len())
                .filter(|&i| processes[i].arrival <= current_time && remaining[i] > 0);

            let Some(selected) = self.rule_engine.select_best(processes, eligible, &context)
            else {
                let Some(next_arrival) = (0..processes.len())
                    .filter(|&i| remaining[i] > 0)
                    .map(|i| processes[i].arrival)
                    .min()
                else {
                    break;
                };
                trace!(from = current_time, to = next_arrival, "cpu idle");
                current_time = next_arrival;
                continue;
            };

            if running != Some(selected) {
                if let Some(previous) = running {
                    debug!(
                        preempted = processes[previous].pid,
                        by = processes[selected].pid,
                        at = current_time,
                        "preemption"
                    );
                    run.execute(previous, slice_start, current_time);
                }
                running = Some(selected);
                slice_start = current_time;
            }

            let next_arrival = processes
                .iter()
                .map(|p| p.arrival)
                .filter(|&a| a > current_time)
                .min();
            let step = match next_arrival {
                Some(arrival) => remaining[selected].min(arrival - current_time),
                None => remaining[selected],
            };

            remaining[selected] -= step;
            context
                .remaining_work
                .insert(processes[selected].pid, remaining[selected]);
            current_time += step;

            if remaining[selected] == 0 {
                run.execute(selected, slice_start, current_time);
                run.complete(selected, current_time);
                completed += 1;
                running = None;
            }
        }

        run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::test_support::{assert_run_invariants, processes};

    #[test]
    fn test_preempts_on_shorter_remaining() {
        let ps = processes(&[(1, 0, 7, 0), (2, 2, 4, 0)]);
        let run = Srtf::new().schedule(&ps);

        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 2), (2, 2, 6), (1, 6, 11)]
        );
        assert_eq!(run.outcome(1).and_then(|o| o.waiting_time()), Some(4));
        assert_eq!(run.outcome(2).and_then(|o| o.waiting_time()), Some(0));
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_consecutive_units_coalesce() {
        let ps = processes(&[(1, 0, 3, 0), (2, 1, 5, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 3), (2, 3, 8)]);
    }

    #[test]
    fn test_equal_remaining_does_not_preempt() {
        // At t=1 both have 3 left; pid 1 arrived earlier and keeps running
        let ps = processes(&[(1, 0, 4, 0), (2, 1, 3, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 4), (2, 4, 7)]);
    }

    #[test]
    fn test_simultaneous_arrival_tie_uses_pid() {
        let ps = processes(&[(7, 0, 2, 0), (3, 0, 2, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(run.schedule.as_tuples(), vec![(3, 0, 2), (7, 2, 4)]);
    }

    #[test]
    fn test_idle_then_arrival() {
        let ps = processes(&[(1, 0, 1, 0), (2, 4, 2, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 1), (2, 4, 6)]);
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_multiple_preemptions() {
        let ps = processes(&[(1, 0, 8, 0), (2, 1, 4, 0), (3, 2, 1, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 1), (2, 1, 2), (3, 2, 3), (2, 3, 6), (1, 6, 13)]
        );
        assert_eq!(run.outcome(1).and_then(|o| o.start_time), Some(0));
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_long_bursts_finish_quickly() {
        let ps = processes(&[(1, 0, 3_000_000_000, 0), (2, 1_000_000_000, 5, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![
                (1, 0, 1_000_000_000),
                (2, 1_000_000_000, 1_000_000_005),
                (1, 1_000_000_005, 3_000_000_005),
            ]
        );
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_late_arrival_with_longer_burst_does_not_split() {
        let ps = processes(&[(1, 0, 6, 0), (2, 2, 9, 0), (3, 3, 8, 0)]);
        let run = Srtf::new().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 6), (3, 6, 14), (2, 14, 23)]
        );
    }

    #[test]
    fn test_empty_input() {
        let run = Srtf::new().schedule(&[]);
        assert!(run.schedule.is_empty());
    }
}
