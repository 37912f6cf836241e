//! Round-Robin scheduler.
//!
//! # Algorithm
//!
//! Processes enter a FIFO ready queue in arrival order. The head of the queue
//! runs for at most one quantum. After each slice, processes that arrived
//! during it join the queue tail *before* the process that was just
//! preempted is re-queued, so a newcomer always gets ahead of a process
//! returning from its own slice.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::{Algorithm, CpuScheduler, SchedulerRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::error::{Result, SchedError};
use crate::models::Process;

/// Default time quantum.
pub const DEFAULT_QUANTUM: i64 = 2;

/// Preemptive fixed-quantum scheduler.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: i64,
    admission: RuleEngine,
}

impl RoundRobin {
    /// Creates a Round-Robin scheduler with [`DEFAULT_QUANTUM`].
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            admission: RuleEngine::new().with_rule(rules::Fifo),
        }
    }

    /// Creates a Round-Robin scheduler with the given quantum.
    ///
    /// # Errors
    /// [`SchedError::InvalidQuantum`] if `quantum <= 0`.
    pub fn with_quantum(quantum: i64) -> Result<Self> {
        if quantum <= 0 {
            return Err(SchedError::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum,
            ..Self::new()
        })
    }

    /// The configured time quantum.
    pub fn quantum(&self) -> i64 {
        self.quantum
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves every process in `order[*next..]` with `arrival <= now` to the queue tail.
fn admit_arrivals(
    processes: &[Process],
    order: &[usize],
    next: &mut usize,
    queue: &mut VecDeque<usize>,
    now: i64,
) {
    while let Some(&index) = order.get(*next) {
        if processes[index].arrival > now {
            break;
        }
        queue.push_back(index);
        *next += 1;
    }
}

impl CpuScheduler for RoundRobin {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Rr
    }

    fn schedule(&self, processes: &[Process]) -> SchedulerRun {
        let mut run = SchedulerRun::new(Algorithm::Rr, processes);
        let order = self
            .admission
            .sort_indices(processes, &SchedulingContext::at_time(0));
        let mut remaining: Vec<i64> = processes.iter().map(|p| p.burst).collect();
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(processes.len());
        let mut next = 0;
        let mut current_time = 0;

        while next < order.len() || !queue.is_empty() {
            admit_arrivals(processes, &order, &mut next, &mut queue, current_time);

            let Some(index) = queue.pop_front() else {
                // Queue empty with arrivals pending: idle until the next one.
                let next_arrival = processes[order[next]].arrival;
                trace!(from = current_time, to = next_arrival, "cpu idle");
                current_time = next_arrival;
                continue;
            };

            let run_time = self.quantum.min(remaining[index]);
            let end = current_time + run_time;
            run.execute(index, current_time, end);
            remaining[index] -= run_time;
            current_time = end;

            admit_arrivals(processes, &order, &mut next, &mut queue, current_time);

            if remaining[index] > 0 {
                trace!(
                    pid = processes[index].pid,
                    remaining = remaining[index],
                    "quantum expired"
                );
                queue.push_back(index);
            } else {
                debug!(pid = processes[index].pid, finish = end, "completed");
                run.complete(index, end);
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
    fn test_new_arrival_precedes_returning_process() {
        let ps = processes(&[(1, 0, 5, 0), (2, 1, 3, 0)]);
        let run = RoundRobin::new().schedule(&ps);

        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
        assert_eq!(run.outcome(1).and_then(|o| o.finish_time), Some(8));
        assert_eq!(run.outcome(2).and_then(|o| o.waiting_time()), Some(3));
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_arrival_at_slice_end_joins_before_requeue() {
        // pid 2 arrives exactly when pid 1's first slice ends
        let ps = processes(&[(1, 0, 4, 0), (2, 2, 2, 0)]);
        let run = RoundRobin::new().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6)]
        );
    }

    #[test]
    fn test_custom_quantum() {
        let ps = processes(&[(1, 0, 5, 0), (2, 0, 3, 0)]);
        let run = RoundRobin::with_quantum(3).unwrap().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 3), (2, 3, 6), (1, 6, 8)]
        );
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_large_quantum_behaves_like_fcfs() {
        let ps = processes(&[(1, 0, 5, 0), (2, 1, 3, 0), (3, 2, 2, 0)]);
        let run = RoundRobin::with_quantum(100).unwrap().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 5), (2, 5, 8), (3, 8, 10)]
        );
    }

    #[test]
    fn test_idle_gap_fast_forward() {
        let ps = processes(&[(1, 0, 1, 0), (2, 10, 3, 0)]);
        let run = RoundRobin::new().schedule(&ps);
        assert_eq!(
            run.schedule.as_tuples(),
            vec![(1, 0, 1), (2, 10, 12), (2, 12, 13)]
        );
        assert_eq!(run.outcome(2).and_then(|o| o.start_time), Some(10));
        assert_run_invariants(&ps, &run);
    }

    #[test]
    fn test_invalid_quantum() {
        assert!(matches!(
            RoundRobin::with_quantum(0),
            Err(SchedError::InvalidQuantum(0))
        ));
        assert!(RoundRobin::with_quantum(-2).is_err());
        assert_eq!(RoundRobin::default().quantum(), DEFAULT_QUANTUM);
    }

    #[test]
    fn test_empty_input() {
        let run = RoundRobin::new().schedule(&[]);
        assert!(run.schedule.is_empty());
    }
}
