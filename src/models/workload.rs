//! Validated workload (input process list).
//!
//! A workload is the immutable input shared by every scheduler run. It is
//! validated once at construction; schedulers assume well-formed input.
//!
//! # Text Format
//!
//! ```text
//! 3
//! PID Arrival Burst Priority
//! 1 0 5 2
//! 2 1 3 0
//! 3 4 1 1
//! ```
//!
//! The first line is the process count, the header line is optional on
//! input, and blank lines are ignored.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Pid, Process};
use crate::error::{Result, SchedError};
use crate::validation::validate_workload;

const HEADER: &str = "PID Arrival Burst Priority";

/// A validated, ordered collection of processes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Process>", into = "Vec<Process>")]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Validates and wraps a process list.
    ///
    /// # Errors
    /// [`SchedError::InvalidWorkload`] listing every detected issue.
    pub fn new(processes: Vec<Process>) -> Result<Self> {
        validate_workload(&processes).map_err(SchedError::InvalidWorkload)?;
        Ok(Self { processes })
    }

    /// An empty workload.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Processes in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether there are no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Looks up a process by pid.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Sum of all bursts.
    pub fn total_burst(&self) -> i64 {
        self.processes.iter().map(|p| p.burst).sum()
    }

    /// Parses the count-prefixed text format.
    ///
    /// # Errors
    /// [`SchedError::Parse`] with the 1-based line of the first malformed
    /// line, or [`SchedError::InvalidWorkload`] if the records are invalid.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (count_line, count_text) = lines
            .next()
            .ok_or_else(|| SchedError::parse(1, "missing process count"))?;
        let count: usize = count_text.parse().map_err(|_| {
            SchedError::parse(count_line, format!("invalid process count '{count_text}'"))
        })?;

        let mut processes = Vec::new();
        let mut header_allowed = true;
        for (line_no, line) in lines {
            if header_allowed && is_header(line) {
                header_allowed = false;
                continue;
            }
            header_allowed = false;
            processes.push(parse_record(line_no, line)?);
        }

        if processes.len() != count {
            return Err(SchedError::parse(
                count_line,
                format!(
                    "count line says {count} but {} processes follow",
                    processes.len()
                ),
            ));
        }

        Self::new(processes)
    }

    /// Renders the workload in the text format (header included).
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{HEADER}\n", self.processes.len());
        for p in &self.processes {
            out.push_str(&format!(
                "{} {} {} {}\n",
                p.pid, p.arrival, p.burst, p.priority
            ));
        }
        out
    }

    /// Reads and parses a workload file.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Writes the workload in the text format.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_text())?;
        Ok(())
    }
}

impl TryFrom<Vec<Process>> for Workload {
    type Error = SchedError;

    fn try_from(processes: Vec<Process>) -> Result<Self> {
        Self::new(processes)
    }
}

impl From<Workload> for Vec<Process> {
    fn from(workload: Workload) -> Self {
        workload.processes
    }
}

fn is_header(line: &str) -> bool {
    line.split_whitespace()
        .map(str::to_ascii_lowercase)
        .eq(HEADER.split_whitespace().map(str::to_ascii_lowercase))
}

fn parse_record(line_no: usize, line: &str) -> Result<Process> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(SchedError::parse(
            line_no,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }

    fn field<T: std::str::FromStr>(line_no: usize, name: &str, text: &str) -> Result<T> {
        text.parse()
            .map_err(|_| SchedError::parse(line_no, format!("invalid {name} '{text}'")))
    }

    Ok(Process {
        pid: field(line_no, "pid", fields[0])?,
        arrival: field(line_no, "arrival", fields[1])?,
        burst: field(line_no, "burst", fields[2])?,
        priority: field(line_no, "priority", fields[3])?,
    })
}
