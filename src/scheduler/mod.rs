//! CPU schedulers, KPI evaluation and the run orchestrator.
//!
//! Every scheduler is a pure function from a process slice to a
//! [`SchedulerRun`]: the processor timeline plus one [`ProcessOutcome`] per
//! input process. Input records are never mutated, so runs of different
//! algorithms over the same workload are fully independent.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection |
//! |-----------|-----------|-----------|
//! | FCFS | no | arrival order (stable) |
//! | HPF | no | lowest priority value → arrival → pid |
//! | RR | yes, per quantum | FIFO ready queue |
//! | SRTF | yes, per time unit | least remaining → arrival → pid |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Schrage (1968), optimality of SRPT for mean flow time

mod fcfs;
mod hpf;
mod kpi;
mod round_robin;
mod simulation;
mod srtf;

pub use fcfs::Fcfs;
pub use hpf::Hpf;
pub use kpi::{ProcessMetrics, ScheduleKpi};
pub use round_robin::{RoundRobin, DEFAULT_QUANTUM};
pub use simulation::{AlgorithmReport, Simulation, SimulationConfig, SimulationReport};
pub use srtf::Srtf;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Pid, Process, ProcessOutcome, Schedule, Slice};

/// Scheduling discipline identifier.
///
/// Declaration order is the default reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
    /// Non-preemptive Highest-Priority-First.
    Hpf,
    /// First-Come-First-Served.
    Fcfs,
    /// Round-Robin with a fixed quantum.
    Rr,
    /// Preemptive Shortest-Remaining-Time-First.
    Srtf,
}

impl Algorithm {
    /// All algorithms in reporting order.
    pub const ALL: [Algorithm; 4] = [Self::Hpf, Self::Fcfs, Self::Rr, Self::Srtf];

    /// Short display name (e.g., "FCFS").
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hpf => "HPF",
            Self::Fcfs => "FCFS",
            Self::Rr => "RR",
            Self::Srtf => "SRTF",
        }
    }

    /// Whether the discipline may suspend a running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Self::Rr | Self::Srtf)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A CPU scheduling discipline.
pub trait CpuScheduler: Send + Sync + fmt::Debug {
    /// Which discipline this scheduler implements.
    fn algorithm(&self) -> Algorithm;

    /// Simulates the discipline over `processes`.
    ///
    /// Assumes validated input (see [`crate::models::Workload`]). An empty
    /// slice yields an empty run.
    fn schedule(&self, processes: &[Process]) -> SchedulerRun;
}

/// Output of one scheduler run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerRun {
    /// Discipline that produced this run.
    pub algorithm: Algorithm,
    /// Processor timeline.
    pub schedule: Schedule,
    /// Per-process timing, parallel to the input slice.
    pub outcomes: Vec<ProcessOutcome>,
}

impl SchedulerRun {
    pub(crate) fn new(algorithm: Algorithm, processes: &[Process]) -> Self {
        Self {
            algorithm,
            schedule: Schedule::new(),
            outcomes: processes.iter().map(ProcessOutcome::pending).collect(),
        }
    }

    /// Records that the process at `index` held the processor over `[start, end)`.
    pub(crate) fn execute(&mut self, index: usize, start: i64, end: i64) {
        let outcome = &mut self.outcomes[index];
        outcome.mark_started(start);
        self.schedule.push(Slice::new(outcome.pid, start, end));
    }

    /// Records that the process at `index` completed at `finish`.
    pub(crate) fn complete(&mut self, index: usize, finish: i64) {
        self.outcomes[index].mark_finished(finish);
    }

    /// Outcome for a process.
    pub fn outcome(&self, pid: Pid) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.pid == pid)
    }

    /// Whether every process finished.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(ProcessOutcome::is_finished)
    }
}
