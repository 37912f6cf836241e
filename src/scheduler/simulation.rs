//! Run orchestrator.
//!
//! Runs every configured algorithm over the same workload and collects, per
//! algorithm, the timeline, the per-process outcomes and the KPIs. Each run
//! reads the shared immutable workload and owns its own outcome arena, so no
//! run can observe another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    Algorithm, CpuScheduler, Fcfs, Hpf, RoundRobin, ScheduleKpi, SchedulerRun, Srtf,
    DEFAULT_QUANTUM,
};
use crate::error::{Result, SchedError};
use crate::models::{ProcessOutcome, Schedule, Workload};

/// Simulation settings.
///
/// The Round-Robin quantum is the only algorithm parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round-Robin time quantum (must be positive).
    pub quantum: i64,
    /// Algorithms to run. Duplicates are ignored.
    pub algorithms: Vec<Algorithm>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration (all algorithms, quantum 2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Restricts the run to the given algorithms.
    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    /// [`SchedError::InvalidQuantum`] if the quantum is not positive.
    pub fn validate(&self) -> Result<()> {
        if self.quantum <= 0 {
            return Err(SchedError::InvalidQuantum(self.quantum));
        }
        Ok(())
    }
}

/// Result of one algorithm over the workload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmReport {
    /// Processor timeline.
    pub schedule: Schedule,
    /// Per-process timing, in workload order.
    pub outcomes: Vec<ProcessOutcome>,
    /// Aggregate and per-process metrics.
    pub metrics: ScheduleKpi,
}

/// Results of all configured algorithms, keyed by algorithm.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Per-algorithm results.
    pub runs: BTreeMap<Algorithm, AlgorithmReport>,
}

impl SimulationReport {
    /// Result for one algorithm.
    pub fn get(&self, algorithm: Algorithm) -> Option<&AlgorithmReport> {
        self.runs.get(&algorithm)
    }

    /// Algorithms present in the report.
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.runs.keys().copied()
    }

    /// Algorithm with the lowest average waiting time.
    pub fn best_by_waiting(&self) -> Option<Algorithm> {
        self.runs
            .iter()
            .min_by(|a, b| a.1.metrics.avg_waiting.total_cmp(&b.1.metrics.avg_waiting))
            .map(|(algorithm, _)| *algorithm)
    }
}

/// Runs a set of schedulers over one workload.
///
/// # Example
///
/// ```
/// use cpu_schedule::models::{Process, Workload};
/// use cpu_schedule::scheduler::{Algorithm, Simulation, SimulationConfig};
///
/// let workload = Workload::new(vec![
///     Process::new(1, 0, 5),
///     Process::new(2, 1, 3),
/// ]).unwrap();
///
/// let simulation = Simulation::new(SimulationConfig::default()).unwrap();
/// let report = simulation.run(&workload).unwrap();
///
/// let rr = report.get(Algorithm::Rr).unwrap();
/// assert_eq!(rr.schedule.len(), 5);
/// ```
#[derive(Debug)]
pub struct Simulation {
    schedulers: Vec<Box<dyn CpuScheduler>>,
}

impl Simulation {
    /// Builds the schedulers named in `config`.
    ///
    /// # Errors
    /// [`SchedError::InvalidQuantum`] if the quantum is not positive.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut algorithms = config.algorithms;
        algorithms.sort();
        algorithms.dedup();

        let schedulers = algorithms
            .into_iter()
            .map(|algorithm| -> Result<Box<dyn CpuScheduler>> {
                Ok(match algorithm {
                    Algorithm::Hpf => Box::new(Hpf::new()),
                    Algorithm::Fcfs => Box::new(Fcfs::new()),
                    Algorithm::Rr => Box::new(RoundRobin::with_quantum(config.quantum)?),
                    Algorithm::Srtf => Box::new(Srtf::new()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { schedulers })
    }

    /// Algorithms this simulation runs, in reporting order.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        self.schedulers.iter().map(|s| s.algorithm()).collect()
    }

    /// Runs every scheduler without computing metrics.
    ///
    /// Works for empty workloads (every schedule is empty).
    pub fn run_schedules(&self, workload: &Workload) -> Vec<SchedulerRun> {
        self.schedulers
            .iter()
            .map(|scheduler| scheduler.schedule(workload.processes()))
            .collect()
    }

    /// Runs every scheduler and computes metrics.
    ///
    /// # Errors
    /// [`SchedError::EmptyWorkload`] if the workload has no processes.
    pub fn run(&self, workload: &Workload) -> Result<SimulationReport> {
        info!(
            processes = workload.len(),
            algorithms = self.schedulers.len(),
            "running simulation"
        );

        let mut report = SimulationReport::default();
        for run in self.run_schedules(workload) {
            let metrics = ScheduleKpi::calculate(&run)?;
            debug!(
                algorithm = %run.algorithm,
                avg_waiting = metrics.avg_waiting,
                avg_turnaround = metrics.avg_turnaround,
                slices = run.schedule.len(),
                "algorithm finished"
            );
            report.runs.insert(
                run.algorithm,
                AlgorithmReport {
                    schedule: run.schedule,
                    outcomes: run.outcomes,
                    metrics,
                },
            );
        }

        Ok(report)
    }
}
