//! Input validation for workloads.
//!
//! Checks structural integrity of a process list before scheduling.
//! Detects:
//! - Zero PIDs
//! - Duplicate PIDs
//! - Negative arrival times
//! - Non-positive bursts
//! - Workloads whose timeline would not fit in `i64`
//!
//! Schedulers assume validated input and do not re-check.

use crate::models::Process;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same PID.
    DuplicateId,
    /// PID is zero (PIDs must be positive).
    InvalidId,
    /// Arrival time is before t=0.
    NegativeArrival,
    /// Burst is zero or negative.
    NonPositiveBurst,
    /// Latest arrival plus total burst exceeds the time range.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process list.
///
/// Checks:
/// 1. Every PID is positive
/// 2. No duplicate PIDs
/// 3. No negative arrival times
/// 4. Every burst is positive
/// 5. Latest arrival plus the sum of all bursts fits in `i64`, which bounds
///    every clock value a scheduler can reach
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();
    let mut horizon = Some(0i64);
    let mut latest_arrival = 0i64;

    for p in processes {
        if p.pid == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                "PID 0 is not allowed",
            ));
        }

        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate PID: {}", p.pid),
            ));
        }

        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("PID {} has negative arrival {}", p.pid, p.arrival),
            ));
        }

        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("PID {} has burst {}", p.pid, p.burst),
            ));
        }

        latest_arrival = latest_arrival.max(p.arrival);
        horizon = horizon.and_then(|h| h.checked_add(p.burst.max(0)));
    }

    if horizon.and_then(|h| h.checked_add(latest_arrival)).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "latest arrival plus total burst overflows the time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(processes: &[Process]) -> Vec<ValidationErrorKind> {
        validate_workload(processes)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_workload() {
        let processes = vec![Process::new(1, 0, 5), Process::new(2, 3, 1)];
        assert!(validate_workload(&processes).is_ok());
    }

    #[test]
    fn test_empty_workload_is_valid() {
        assert!(validate_workload(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let processes = vec![Process::new(1, 0, 5), Process::new(1, 2, 3)];
        assert_eq!(kinds(&processes), vec![ValidationErrorKind::DuplicateId]);
    }

    #[test]
    fn test_zero_pid() {
        assert_eq!(
            kinds(&[Process::new(0, 0, 1)]),
            vec![ValidationErrorKind::InvalidId]
        );
    }

    #[test]
    fn test_negative_arrival() {
        assert_eq!(
            kinds(&[Process::new(1, -1, 1)]),
            vec![ValidationErrorKind::NegativeArrival]
        );
    }

    #[test]
    fn test_non_positive_burst() {
        let processes = vec![Process::new(1, 0, 0), Process::new(2, 0, -3)];
        assert_eq!(
            kinds(&processes),
            vec![
                ValidationErrorKind::NonPositiveBurst,
                ValidationErrorKind::NonPositiveBurst
            ]
        );
    }

    #[test]
    fn test_time_overflow() {
        assert_eq!(
            kinds(&[Process::new(1, i64::MAX - 1, 5)]),
            vec![ValidationErrorKind::TimeOverflow]
        );
        assert_eq!(
            kinds(&[Process::new(1, 0, i64::MAX), Process::new(2, 0, 1)]),
            vec![ValidationErrorKind::TimeOverflow]
        );
    }

    #[test]
    fn test_time_at_limit_is_valid() {
        let processes = vec![Process::new(1, i64::MAX - 5, 2), Process::new(2, 0, 3)];
        assert!(validate_workload(&processes).is_ok());
    }

    #[test]
    fn test_multiple_errors_collected() {
        let processes = vec![Process::new(1, -2, 0), Process::new(1, 0, 1)];
        let errors = validate_workload(&processes).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].message.contains("negative arrival"));
    }
}
