//! Crate-wide error type.

use thiserror::Error;

use crate::models::Pid;
use crate::validation::ValidationError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchedError>;

/// Errors surfaced by workload construction, scheduling and metrics.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SchedError {
    /// The workload failed structural validation.
    #[error("invalid workload: {}", summarize(.0))]
    InvalidWorkload(Vec<ValidationError>),

    /// Averages were requested over zero processes.
    #[error("metrics are undefined for an empty workload")]
    EmptyWorkload,

    /// Metrics were requested before a process finished.
    #[error("process {pid} has not finished")]
    Incomplete {
        /// Process that has no finish time.
        pid: Pid,
    },

    /// Round-Robin quantum must be strictly positive.
    #[error("invalid time quantum {0}: must be positive")]
    InvalidQuantum(i64),

    /// Malformed workload or parameter text.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Generator parameters rejected by the sampling distributions.
    #[error("invalid generator parameters: {0}")]
    InvalidGeneratorParams(String),

    /// Reading or writing a workload file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchedError {
    /// Creates a parse error for the given 1-based line.
    #[inline]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_workload_message_lists_issues() {
        let err = SchedError::InvalidWorkload(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate PID: 3"),
            ValidationError::new(ValidationErrorKind::NonPositiveBurst, "PID 4 has burst 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid workload: Duplicate PID: 3; PID 4 has burst 0"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = SchedError::parse(3, "expected 4 fields");
        assert_eq!(err.to_string(), "parse error at line 3: expected 4 fields");
    }
}
