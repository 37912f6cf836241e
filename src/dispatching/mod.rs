//! Dispatching rules and rule engine for process selection.
//!
//! Selection-based schedulers (HPF, SRTF) pick the next process through a
//! [`RuleEngine`]: a primary rule, optional tie-breaking rules, and a final
//! deterministic tie-breaker by PID. No selection ever depends on the
//! incidental order of the candidate list.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{RuleEngine, SchedulingContext, TieBreaker};
//! use cpu_schedule::dispatching::rules;
//! use cpu_schedule::models::Process;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::HighestPriority)
//!     .with_tie_breaker(rules::Fifo)
//!     .with_final_tie_breaker(TieBreaker::ByPid);
//!
//! let processes = vec![
//!     Process::new(1, 0, 4).with_priority(3),
//!     Process::new(2, 1, 2).with_priority(1),
//! ];
//! let context = SchedulingContext::at_time(1);
//! assert_eq!(engine.select_best(&processes, [0, 1], &context), Some(1));
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = i64;

/// A dispatching rule that ranks processes.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FIFO", "SRPT").
    fn name(&self) -> &'static str;

    /// Evaluates a process given the current scheduling context.
    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
