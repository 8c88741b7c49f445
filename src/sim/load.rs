//! Process list loader.
//!
//! One record per line: `processId,burstDuration,arrivalTime[,priority]`.
//! Blank lines are skipped and fields are trimmed. Any bad line fails the
//! whole load.

use std::{fs, path::Path};

use super::job::Process;
use crate::error::{SimError, SimResult};

pub fn load_file(path: impl AsRef<Path>) -> SimResult<Vec<Process>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    parse_processes(&text)
}

pub fn parse_processes(text: &str) -> SimResult<Vec<Process>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(index + 1, line))
        .collect()
}

fn parse_record(line: usize, record: &str) -> SimResult<Process> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(SimError::MalformedRecord {
            line,
            reason: format!("expected 3 or 4 fields, found {}", fields.len()),
        });
    }

    let id = parse_field(line, "process id", fields[0])?;
    let burst = parse_field(line, "burst duration", fields[1])?;
    let arrival_time = parse_field(line, "arrival time", fields[2])?;
    let priority = match fields.get(3) {
        Some(field) => parse_field(line, "priority", field)?,
        None => 0,
    };

    Ok(Process::new(id, burst, arrival_time, priority))
}

fn parse_field<T>(line: usize, name: &str, value: &str) -> SimResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| SimError::MalformedRecord {
        line,
        reason: format!("{name} {value:?}: {err}"),
    })
}
