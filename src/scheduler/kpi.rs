//! Schedule quality metrics (KPIs).
//!
//! Computes per-process and aggregate performance indicators from a
//! completed scheduler run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting | finish - arrival - burst |
//! | Turnaround | finish - arrival |
//! | Response | first start - arrival |
//! | Makespan | Latest completion time |
//! | CPU Utilization | busy time / makespan |
//! | Context Switches | Adjacent slices with different PIDs |

use serde::{Deserialize, Serialize};

use super::{Algorithm, SchedulerRun};
use crate::error::{Result, SchedError};
use crate::models::Pid;

/// Timing metrics for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    /// Process identifier.
    pub pid: Pid,
    /// Time spent eligible but not running.
    pub waiting: i64,
    /// Time from arrival to completion.
    pub turnaround: i64,
    /// Time from arrival to first execution.
    pub response: i64,
}

/// Schedule performance indicators for one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Discipline that produced the run.
    pub algorithm: Algorithm,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest completion time.
    pub makespan: i64,
    /// Fraction of `[0, makespan)` the processor was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Number of switches between different processes.
    pub context_switches: usize,
    /// Per-process metrics in workload order.
    pub processes: Vec<ProcessMetrics>,
}

impl ScheduleKpi {
    /// Computes KPIs from a completed run.
    ///
    /// # Errors
    /// - [`SchedError::EmptyWorkload`] if the run has no processes.
    /// - [`SchedError::Incomplete`] if any process has not finished.
    pub fn calculate(run: &SchedulerRun) -> Result<Self> {
        if run.outcomes.is_empty() {
            return Err(SchedError::EmptyWorkload);
        }

        let processes = run
            .outcomes
            .iter()
            .map(|o| -> Result<ProcessMetrics> {
                let incomplete = || SchedError::Incomplete { pid: o.pid };
                Ok(ProcessMetrics {
                    pid: o.pid,
                    waiting: o.waiting_time().ok_or_else(incomplete)?,
                    turnaround: o.turnaround_time().ok_or_else(incomplete)?,
                    response: o.response_time().ok_or_else(incomplete)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let count = processes.len() as f64;
        let mean = |f: fn(&ProcessMetrics) -> i64| {
            processes.iter().map(|m| f(m) as f64).sum::<f64>() / count
        };
        let avg_waiting = mean(|m| m.waiting);
        let avg_turnaround = mean(|m| m.turnaround);
        let avg_response = mean(|m| m.response);

        let makespan = run.schedule.makespan();
        let cpu_utilization = if makespan > 0 {
            run.schedule.busy_time() as f64 / makespan as f64
        } else {
            0.0
        };

        Ok(Self {
            algorithm: run.algorithm,
            avg_waiting,
            avg_turnaround,
            avg_response,
            makespan,
            cpu_utilization,
            context_switches: run.schedule.context_switches(),
            processes,
        })
    }

    /// Metrics for one process.
    pub fn process(&self, pid: Pid) -> Option<&ProcessMetrics> {
        self.processes.iter().find(|m| m.pid == pid)
    }

    /// Total waiting time across all processes.
    pub fn total_waiting(&self) -> i64 {
        self.processes
            .iter()
            .fold(0i64, |total, m| total.saturating_add(m.waiting))
    }
}
