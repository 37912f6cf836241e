//! Rule engine for multi-criteria dispatching.
//!
//! Applies rules in sequence: the next rule is consulted only when every
//! previous rule ties. A final tie-breaker makes the order total.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave ties as equal; the earliest candidate in iteration order wins.
    #[default]
    NextRule,
    /// Deterministic by PID (smallest first).
    ByPid,
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{RuleEngine, TieBreaker};
/// use cpu_schedule::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::Srpt)
///     .with_tie_breaker(rules::Fifo)
///     .with_final_tie_breaker(TieBreaker::ByPid);
/// assert_eq!(engine.rule_names(), vec!["SRPT", "FIFO"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted when all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts processes by priority (highest priority first).
    ///
    /// Returns indices into the process slice. The sort is stable.
    pub fn sort_indices(&self, processes: &[Process], context: &SchedulingContext) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b], context));
        indices
    }

    /// Returns the index of the highest-priority process among `candidates`.
    ///
    /// `candidates` are indices into `processes`. Returns `None` when empty.
    pub fn select_best(
        &self,
        processes: &[Process],
        candidates: impl IntoIterator<Item = usize>,
        context: &SchedulingContext,
    ) -> Option<usize> {
        candidates
            .into_iter()
            .min_by(|&a, &b| self.compare(&processes[a], &processes[b], context))
    }

    /// Evaluates a single process and returns scores from each rule.
    pub fn evaluate(&self, process: &Process, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, context))
            .collect()
    }

    fn compare(&self, a: &Process, b: &Process, context: &SchedulingContext) -> Ordering {
        for rule in &self.rules {
            let ordering = rule
                .evaluate(a, context)
                .cmp(&rule.evaluate(b, context));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        match self.tie_breaker {
            TieBreaker::NextRule => Ordering::Equal,
            TieBreaker::ByPid => a.pid.cmp(&b.pid),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn make_process(pid: u32, arrival: i64, burst: i64, priority: i32) -> Process {
        Process::new(pid, arrival, burst).with_priority(priority)
    }

    #[test]
    fn test_priority_ordering() {
        let processes = vec![
            make_process(1, 0, 5, 3),
            make_process(2, 0, 5, 1),
            make_process(3, 0, 5, 2),
        ];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::HighestPriority);

        let indices = engine.sort_indices(&processes, &ctx);
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_sequential_with_tie_breaker() {
        let processes = vec![make_process(1, 3, 5, 1), make_process(2, 1, 5, 1)];
        let ctx = SchedulingContext::at_time(3);
        let engine = RuleEngine::new()
            .with_rule(rules::HighestPriority)
            .with_tie_breaker(rules::Fifo);

        // Priority ties → FIFO breaks it → pid 2 (earlier arrival) first
        assert_eq!(engine.select_best(&processes, 0..2, &ctx), Some(1));
    }

    #[test]
    fn test_by_pid_tie_breaker() {
        let processes = vec![make_process(9, 0, 4, 0), make_process(4, 0, 4, 0)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::Srpt)
            .with_final_tie_breaker(TieBreaker::ByPid);

        assert_eq!(engine.select_best(&processes, 0..2, &ctx), Some(1));
    }

    #[test]
    fn test_next_rule_keeps_first_candidate_on_tie() {
        let processes = vec![make_process(9, 0, 4, 0), make_process(4, 0, 4, 0)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Srpt);

        assert_eq!(engine.select_best(&processes, 0..2, &ctx), Some(0));
    }

    #[test]
    fn test_srpt_uses_context() {
        let processes = vec![make_process(1, 0, 7, 0), make_process(2, 2, 4, 0)];
        let ctx = SchedulingContext::at_time(2)
            .with_remaining_work(1, 5)
            .with_remaining_work(2, 4);
        let engine = RuleEngine::new().with_rule(rules::Srpt);

        assert_eq!(engine.select_best(&processes, [0, 1], &ctx), Some(1));
    }

    #[test]
    fn test_select_best_subset() {
        let processes = vec![
            make_process(1, 0, 1, 0),
            make_process(2, 0, 9, 0),
            make_process(3, 0, 5, 0),
        ];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Srpt);

        // Index 0 is the shortest but not a candidate
        assert_eq!(engine.select_best(&processes, [1, 2], &ctx), Some(2));
    }

    #[test]
    fn test_empty_candidates() {
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::Srpt);
        assert!(engine.sort_indices(&[], &ctx).is_empty());
        assert!(engine.select_best(&[], std::iter::empty(), &ctx).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = make_process(1, 2, 6, 4);
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::HighestPriority)
            .with_tie_breaker(rules::Fifo);

        assert_eq!(engine.evaluate(&p, &ctx), vec![4, 2]);
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::new()
            .with_rule(rules::HighestPriority)
            .with_final_tie_breaker(TieBreaker::ByPid);
        let debug = format!("{engine:?}");
        assert!(debug.contains("PRIORITY"));
        assert!(debug.contains("ByPid"));
    }
}
