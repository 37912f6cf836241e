//! Process (job) model.
//!
//! A process is the unit of work competing for the single simulated
//! processor. Its workload fields are fixed at generation time; the timing a
//! scheduler computes for it lives in a separate [`ProcessOutcome`] so that
//! runs of different algorithms never share mutable state.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier. Positive and unique within a workload.
pub type Pid = u32;

/// A process to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Time unit at which the process becomes eligible to run.
    pub arrival: i64,
    /// Total processor time required to complete.
    pub burst: i64,
    /// Scheduling priority (lower value = more important). Used by HPF only.
    pub priority: i32,
}

impl Process {
    /// Creates a process with priority 0.
    pub fn new(pid: Pid, arrival: i64, burst: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Earliest possible completion time (arrival + burst).
    #[inline]
    pub fn earliest_finish(&self) -> i64 {
        self.arrival + self.burst
    }
}

/// Timing computed for one process by one scheduler run.
///
/// Outcomes are kept in an arena parallel to the workload slice the run was
/// given: `outcomes[i]` belongs to `processes[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Process this outcome belongs to.
    pub pid: Pid,
    /// Arrival copied from the workload (for derived metrics).
    pub arrival: i64,
    /// Burst copied from the workload (for derived metrics).
    pub burst: i64,
    /// Time unit of first execution.
    pub start_time: Option<i64>,
    /// Time unit at which the whole burst completed.
    pub finish_time: Option<i64>,
}

impl ProcessOutcome {
    /// Creates an empty (not yet scheduled) outcome for a process.
    pub fn pending(process: &Process) -> Self {
        Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            start_time: None,
            finish_time: None,
        }
    }

    /// Records a period of execution starting at `start`.
    ///
    /// Only the first call sets `start_time`.
    pub(crate) fn mark_started(&mut self, start: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(start);
        }
    }

    /// Records completion at `finish`.
    pub(crate) fn mark_finished(&mut self, finish: i64) {
        self.finish_time = Some(finish);
    }

    /// Whether the process has completed its burst.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }

    /// Time spent eligible but not running: `finish - arrival - burst`.
    pub fn waiting_time(&self) -> Option<i64> {
        self.finish_time.map(|f| f - self.arrival - self.burst)
    }

    /// Total time from arrival to completion: `finish - arrival`.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.finish_time.map(|f| f - self.arrival)
    }

    /// Time from arrival to first execution.
    pub fn response_time(&self) -> Option<i64> {
        self.start_time.map(|s| s - self.arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(7, 3, 5).with_priority(2);
        assert_eq!(p.pid, 7);
        assert_eq!(p.priority, 2);
        assert_eq!(p.earliest_finish(), 8);
    }

    #[test]
    fn test_outcome_pending_has_no_metrics() {
        let o = ProcessOutcome::pending(&Process::new(1, 0, 4));
        assert!(!o.is_finished());
        assert_eq!(o.waiting_time(), None);
        assert_eq!(o.turnaround_time(), None);
        assert_eq!(o.response_time(), None);
    }

    #[test]
    fn test_outcome_derived_times() {
        let mut o = ProcessOutcome::pending(&Process::new(2, 1, 3));
        o.mark_started(5);
        o.mark_started(7); // later slices do not move the first start
        o.mark_finished(8);
        assert_eq!(o.start_time, Some(5));
        assert_eq!(o.waiting_time(), Some(4));
        assert_eq!(o.turnaround_time(), Some(7));
        assert_eq!(o.response_time(), Some(4));
    }
}
