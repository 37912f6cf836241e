//! CPU scheduling domain models.
//!
//! Provides the input and output data types of the simulator: immutable
//! process records, the validated workload that holds them, per-run timing
//! outcomes, and the processor timeline.
//!
//! # Ownership
//!
//! | Type | Produced by | Mutated by |
//! |------|-------------|------------|
//! | Process / Workload | workload source | nobody |
//! | ProcessOutcome | one scheduler run | that run only |
//! | Schedule | one scheduler run | that run only |

mod process;
mod schedule;
mod workload;

pub use process::{Pid, Process, ProcessOutcome};
pub use schedule::{Schedule, Slice};
pub use workload::Workload;
