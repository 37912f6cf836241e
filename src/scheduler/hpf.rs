//! Non-preemptive Highest-Priority-First scheduler.
//!
//! # Algorithm
//!
//! At every decision point:
//! 1. Collect the arrived, unscheduled processes. If there are none, jump the
//!    clock to the earliest pending arrival.
//! 2. Select by rule engine: lowest priority value, then earliest arrival,
//!    then smallest PID.
//! 3. Run the selected process to completion. Arrivals during its burst
//!    never preempt it.
//!
//! # Complexity
//! O(n²) where n = number of processes.

use tracing::{debug, trace};

use super::{Algorithm, CpuScheduler, SchedulerRun};
use crate::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
use crate::models::Process;

/// Non-preemptive priority scheduler.
#[derive(Debug, Clone)]
pub struct Hpf {
    rule_engine: RuleEngine,
}

impl Hpf {
    /// Creates an HPF scheduler with the default selection order.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::new()
                .with_rule(rules::HighestPriority)
                .with_tie_breaker(rules::Fifo)
                .with_final_tie_breaker(TieBreaker::ByPid),
        }
    }

    /// Replaces the selection rules.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }
}

impl Default for Hpf {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices in `remaining` whose process has arrived by `now`.
fn arrived_by(processes: &[Process], remaining: &[usize], now: i64) -> Vec<usize> {
    remaining
        .iter()
        .copied()
        .filter(|&i| processes[i].arrival <= now)
        .collect()
}

impl CpuScheduler for Hpf {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Hpf
    }

    fn schedule(&self, processes: &[Process]) -> SchedulerRun {
        let mut run = SchedulerRun::new(Algorithm::Hpf, processes);
        let mut remaining: Vec<usize> = (0..processes.len()).collect();
        let mut current_time = 0;

        while !remaining.is_empty() {
            let mut eligible = arrived_by(processes, &remaining, current_time);

            if eligible.is_empty() {
                let Some(next_arrival) = remaining.iter().map(|&i| processes[i].arrival).min()
                else {
                    break;
                };
                trace!(from = current_time, to = next_arrival, "cpu idle");
                current_time = next_arrival;
                eligible = arrived_by(processes, &remaining, current_time);
            }

            let context = SchedulingContext::at_time(current_time);
            let Some(selected) = self.rule_engine.select_best(processes, eligible, &context)
            else {
                break;
            };

            let process = &processes[selected];
            let finish = current_time + process.burst;
            debug!(
                pid = process.pid,
                priority = process.priority,
                start = current_time,
                finish,
                "dispatch"
            );
            run.execute(selected, current_time, finish);
            run.complete(selected, finish);

            current_time = finish;
            remaining.retain(|&i| i != selected);
        }

        run
    }
}
