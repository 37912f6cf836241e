//! Schedule (processor timeline) model.
//!
//! A schedule is the ordered list of intervals during which each process
//! occupies the single simulated processor. Preemptive algorithms may give a
//! process several disjoint slices.

use serde::{Deserialize, Serialize};

use super::Pid;

/// An interval `[start, end)` during which `pid` held the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Running process.
    pub pid: Pid,
    /// First time unit of the interval.
    pub start: i64,
    /// First time unit after the interval.
    pub end: i64,
}

impl Slice {
    /// Creates a new slice.
    pub fn new(pid: Pid, start: i64, end: i64) -> Self {
        Self { pid, start, end }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl From<(Pid, i64, i64)> for Slice {
    fn from((pid, start, end): (Pid, i64, i64)) -> Self {
        Self::new(pid, start, end)
    }
}

/// Ordered processor timeline produced by one scheduler run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Slices in non-decreasing start order.
    pub slices: Vec<Slice>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slice. Empty intervals are ignored.
    pub fn push(&mut self, slice: Slice) {
        if slice.end > slice.start {
            self.slices.push(slice);
        }
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether the schedule has no slices.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Slices as `(pid, start, end)` tuples.
    pub fn as_tuples(&self) -> Vec<(Pid, i64, i64)> {
        self.slices.iter().map(|s| (s.pid, s.start, s.end)).collect()
    }

    /// Total time the processor was busy.
    pub fn busy_time(&self) -> i64 {
        self.slices.iter().map(Slice::duration).sum()
    }

    /// Latest end time across all slices.
    pub fn makespan(&self) -> i64 {
        self.slices.iter().map(|s| s.end).max().unwrap_or(0)
    }

    /// Time between t=0 and the makespan during which the processor idled.
    pub fn idle_time(&self) -> i64 {
        self.makespan() - self.busy_time()
    }

    /// All slices for one process, in timeline order.
    pub fn slices_for_process(&self, pid: Pid) -> Vec<&Slice> {
        self.slices.iter().filter(|s| s.pid == pid).collect()
    }

    /// First time the process ran.
    pub fn first_start(&self, pid: Pid) -> Option<i64> {
        self.slices
            .iter()
            .filter(|s| s.pid == pid)
            .map(|s| s.start)
            .min()
    }

    /// Completion time of a process (end of its last slice).
    pub fn completion_time(&self, pid: Pid) -> Option<i64> {
        self.slices
            .iter()
            .filter(|s| s.pid == pid)
            .map(|s| s.end)
            .max()
    }

    /// Number of times the processor switched from one process to another.
    pub fn context_switches(&self) -> usize {
        self.slices
            .windows(2)
            .filter(|w| w[0].pid != w[1].pid)
            .count()
    }

    /// Whether any two slices overlap in time.
    pub fn has_overlap(&self) -> bool {
        let mut sorted: Vec<&Slice> = self.slices.iter().collect();
        sorted.sort_by_key(|s| (s.start, s.end));
        sorted.windows(2).any(|w| w[1].start < w[0].end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.push(Slice::new(1, 0, 2));
        s.push(Slice::new(2, 2, 4));
        s.push(Slice::new(1, 4, 6));
        s.push(Slice::new(3, 8, 9));
        s
    }

    #[test]
    fn test_busy_and_idle_time() {
        let s = sample_schedule();
        assert_eq!(s.busy_time(), 7);
        assert_eq!(s.makespan(), 9);
        assert_eq!(s.idle_time(), 2);
    }

    #[test]
    fn test_per_process_queries() {
        let s = sample_schedule();
        assert_eq!(s.slices_for_process(1).len(), 2);
        assert_eq!(s.first_start(1), Some(0));
        assert_eq!(s.completion_time(1), Some(6));
        assert_eq!(s.completion_time(99), None);
    }

    #[test]
    fn test_context_switches() {
        let s = sample_schedule();
        assert_eq!(s.context_switches(), 3);
    }

    #[test]
    fn test_push_ignores_empty_slice() {
        let mut s = Schedule::new();
        s.push(Slice::new(1, 3, 3));
        assert!(s.is_empty());
    }

    #[test]
    fn test_overlap_detection() {
        assert!(!sample_schedule().has_overlap());

        let mut s = sample_schedule();
        s.push(Slice::new(4, 5, 7));
        assert!(s.has_overlap());
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert_eq!(s.makespan(), 0);
        assert_eq!(s.busy_time(), 0);
        assert_eq!(s.context_switches(), 0);
        assert!(!s.has_overlap());
    }
}
