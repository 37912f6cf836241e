//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Process;

/// First In, First Out.
///
/// Prioritizes the process that arrived earliest.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        process.arrival
    }

    fn description(&self) -> &'static str {
        "First In, First Out (earliest arrival)"
    }
}

/// Highest priority first.
///
/// A smaller `priority` value means a more important process.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process, _context: &SchedulingContext) -> RuleScore {
        i64::from(process.priority)
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest priority value)"
    }
}

/// Shortest Remaining Processing Time.
///
/// Uses `context.remaining_work` when tracked, falls back to the full burst.
#[derive(Debug, Clone, Copy)]
pub struct Srpt;

impl DispatchingRule for Srpt {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(&self, process: &Process, context: &SchedulingContext) -> RuleScore {
        context.remaining(process.pid).unwrap_or(process.burst)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}
