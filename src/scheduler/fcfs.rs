//! First-Come-First-Served scheduler.
//!
//! # Algorithm
//!
//! 1. Order processes by arrival (stable: simultaneous arrivals keep input order).
//! 2. Run each to completion, idling forward when the next one has not arrived.

use tracing::trace;

use super::{Algorithm, CpuScheduler, SchedulerRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext};
use crate::models::Process;

/// Non-preemptive arrival-order scheduler.
#[derive(Debug, Clone)]
pub struct Fcfs {
    order: RuleEngine,
}

impl Fcfs {
    /// Creates a new FCFS scheduler.
    pub fn new() -> Self {
        Self {
            order: RuleEngine::new().with_rule(rules::Fifo),
        }
    }
}

impl Default for Fcfs {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuScheduler for Fcfs {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Fcfs
    }

    fn schedule(&self, processes: &[Process]) -> SchedulerRun {
        let mut run = SchedulerRun::new(Algorithm::Fcfs, processes);
        let mut current_time = 0;

        for index in self.order.sort_indices(processes, &SchedulingContext::at_time(0)) {
            let process = &processes[index];
            if current_time < process.arrival {
                trace!(from = current_time, to = process.arrival, "cpu idle");
                current_time = process.arrival;
            }

            let finish = current_time + process.burst;
            run.execute(index, current_time, finish);
            run.complete(index, finish);
            current_time = finish;
        }

        run
    }
}
