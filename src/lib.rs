//! CPU scheduling simulator.
//!
//! Computes, for a set of processes with arrival times, bursts and
//! priorities, the exact processor timeline produced by classical
//! scheduling disciplines and the resulting waiting/turnaround metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `Workload`, `ProcessOutcome`,
//!   `Schedule`, `Slice`
//! - **`validation`**: Workload integrity checks (PIDs, arrivals, bursts)
//! - **`dispatching`**: Selection rules and the rule engine used by
//!   selection-based schedulers
//! - **`scheduler`**: FCFS, HPF, Round-Robin and SRTF, KPI evaluation and
//!   the `Simulation` orchestrator
//! - **`generator`**: Random workload sampling
//!
//! # Example
//!
//! ```
//! use cpu_schedule::models::{Process, Workload};
//! use cpu_schedule::scheduler::{CpuScheduler, Srtf};
//!
//! let workload = Workload::new(vec![
//!     Process::new(1, 0, 7),
//!     Process::new(2, 2, 4),
//! ]).unwrap();
//!
//! let run = Srtf::new().schedule(workload.processes());
//! assert_eq!(run.schedule.as_tuples(), vec![(1, 0, 2), (2, 2, 6), (1, 6, 11)]);
//! ```
//!
//! # Logging
//!
//! Scheduling decisions are emitted through `tracing` at `debug`/`trace`
//! level. The crate installs no subscriber.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedError};
