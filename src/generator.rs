//! Random workload generation.
//!
//! Samples a workload from a simple statistical model:
//!
//! | Field | Distribution |
//! |-------|-------------|
//! | arrival | max(0, round(N(μ_a, σ_a))) |
//! | burst | max(1, round(N(μ_b, σ_b))) |
//! | priority | Poisson(λ) |
//!
//! PIDs are assigned `1..=count` and the result is sorted by arrival.
//!
//! # Parameter File
//!
//! ```text
//! 5          # count
//! 4.0 2.0    # arrival mean, std
//! 6.0 1.5    # burst mean, std
//! 3.0        # priority lambda
//! ```
//!
//! Anything after `#` on a line is ignored.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchedError};
use crate::models::{Pid, Process, Workload};

/// Parameters of the workload model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    /// Number of processes.
    pub count: usize,
    /// Mean arrival time.
    pub arrival_mean: f64,
    /// Standard deviation of arrival time.
    pub arrival_std: f64,
    /// Mean burst.
    pub burst_mean: f64,
    /// Standard deviation of burst.
    pub burst_std: f64,
    /// Poisson rate for priorities (0 = every priority is 0).
    pub priority_lambda: f64,
}

impl GeneratorParams {
    /// Creates parameters for `count` processes, all arriving at t=0 with
    /// burst 1 and priority 0.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            arrival_mean: 0.0,
            arrival_std: 0.0,
            burst_mean: 1.0,
            burst_std: 0.0,
            priority_lambda: 0.0,
        }
    }

    /// Sets the arrival distribution.
    pub fn with_arrival(mut self, mean: f64, std: f64) -> Self {
        self.arrival_mean = mean;
        self.arrival_std = std;
        self
    }

    /// Sets the burst distribution.
    pub fn with_burst(mut self, mean: f64, std: f64) -> Self {
        self.burst_mean = mean;
        self.burst_std = std;
        self
    }

    /// Sets the priority rate.
    pub fn with_priority_lambda(mut self, lambda: f64) -> Self {
        self.priority_lambda = lambda;
        self
    }

    /// Parses the four-line parameter format.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.split('#').next().unwrap_or("").trim()))
            .filter(|(_, l)| !l.is_empty());

        let last_line = text.lines().count().max(1);
        let mut next_line = |what: &str| {
            lines
                .next()
                .ok_or_else(|| SchedError::parse(last_line, format!("missing {what}")))
        };

        let (line, count_text) = next_line("process count")?;
        let count = count_text
            .parse()
            .map_err(|_| SchedError::parse(line, format!("invalid count '{count_text}'")))?;

        let (line, arrival) = next_line("arrival mean and std")?;
        let [arrival_mean, arrival_std] = parse_floats::<2>(line, arrival)?;

        let (line, burst) = next_line("burst mean and std")?;
        let [burst_mean, burst_std] = parse_floats::<2>(line, burst)?;

        let (line, lambda) = next_line("priority lambda")?;
        let [priority_lambda] = parse_floats::<1>(line, lambda)?;

        Ok(Self {
            count,
            arrival_mean,
            arrival_std,
            burst_mean,
            burst_std,
            priority_lambda,
        })
    }

    /// Reads and parses a parameter file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

fn parse_floats<const N: usize>(line: usize, text: &str) -> Result<[f64; N]> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != N {
        return Err(SchedError::parse(
            line,
            format!("expected {N} number(s), found {}", fields.len()),
        ));
    }

    let mut values = [0.0; N];
    for (value, field) in values.iter_mut().zip(fields) {
        *value = field
            .parse()
            .map_err(|_| SchedError::parse(line, format!("invalid number '{field}'")))?;
    }
    Ok(values)
}

/// Samples a workload.
///
/// # Errors
/// [`SchedError::InvalidGeneratorParams`] if a standard deviation is negative
/// or not finite, or the priority rate is negative or not finite.
pub fn generate<R: Rng + ?Sized>(params: &GeneratorParams, rng: &mut R) -> Result<Workload> {
    let invalid = |what: &str, err: &dyn std::fmt::Display| {
        SchedError::InvalidGeneratorParams(format!("{what}: {err}"))
    };

    let arrival_dist = Normal::new(params.arrival_mean, params.arrival_std)
        .map_err(|e| invalid("arrival", &e))?;
    let burst_dist =
        Normal::new(params.burst_mean, params.burst_std).map_err(|e| invalid("burst", &e))?;
    let priority_dist = if params.priority_lambda == 0.0 {
        None
    } else {
        Some(Poisson::new(params.priority_lambda).map_err(|e| invalid("priority", &e))?)
    };

    let mut processes: Vec<Process> = (1..=params.count)
        .map(|n| -> Result<Process> {
            let pid = Pid::try_from(n).map_err(|_| {
                SchedError::InvalidGeneratorParams(format!(
                    "count {} exceeds PID range",
                    params.count
                ))
            })?;
            let arrival = (arrival_dist.sample(rng).round() as i64).max(0);
            let burst = (burst_dist.sample(rng).round() as i64).max(1);
            let priority = priority_dist
                .as_ref()
                .map_or(0, |d: &Poisson<f64>| d.sample(rng) as i32);
            Ok(Process::new(pid, arrival, burst).with_priority(priority))
        })
        .collect::<Result<_>>()?;

    processes.sort_by_key(|p| p.arrival);
    debug!(count = processes.len(), "generated workload");
    Workload::new(processes)
}
