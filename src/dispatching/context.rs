//! Scheduling context for dispatching rule evaluation.

use std::collections::HashMap;

use crate::models::Pid;

/// Runtime scheduling state passed to dispatching rules.
///
/// Holds the simulated clock and the remaining burst of tracked processes.
/// Preemptive schedulers seed it with every process's full burst and update
/// it as work executes. Rules fall back to the full burst for untracked
/// processes.
#[derive(Debug, Clone, Default)]
pub struct SchedulingContext {
    /// Current simulation time.
    pub current_time: i64,
    /// Remaining burst per process (pid → time units).
    pub remaining_work: HashMap<Pid, i64>,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    /// Sets remaining work for a process.
    pub fn with_remaining_work(mut self, pid: Pid, remaining: i64) -> Self {
        self.remaining_work.insert(pid, remaining);
        self
    }

    /// Remaining work for a process, if tracked.
    pub fn remaining(&self, pid: Pid) -> Option<i64> {
        self.remaining_work.get(&pid).copied()
    }
}
