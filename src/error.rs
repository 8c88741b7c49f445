//! Error kinds surfaced by loading and scheduling.
//!
//! Every error is terminal for the whole run: one bad record or an invalid
//! workload aborts all four reports.

use std::{fmt, io, path::PathBuf};

use crate::core::ProcessId;

#[derive(Debug)]
pub enum SimError {
    /// Wrong command-line usage
    InvalidArguments { usage: String },
    /// Process file missing or unreadable
    FileAccess { path: PathBuf, source: io::Error },
    /// A line of the process file could not be parsed (1-based line number)
    MalformedRecord { line: usize, reason: String },
    /// Nothing to schedule
    EmptyWorkload,
    /// A record parsed but describes an impossible process
    InvalidProcess {
        id: ProcessId,
        reason: &'static str,
    },
    DuplicateProcessId(ProcessId),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments { usage } => write!(f, "invalid arguments, usage: {usage}"),
            Self::FileAccess { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "malformed record on line {line}: {reason}")
            }
            Self::EmptyWorkload => write!(f, "no processes to schedule"),
            Self::InvalidProcess { id, reason } => write!(f, "process {id}: {reason}"),
            Self::DuplicateProcessId(id) => write!(f, "process id {id} appears more than once"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
