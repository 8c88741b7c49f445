use rustc_hash::FxHashSet;

use crate::{
    core::state::{Priority, ProcessId, Task, Ticks},
    error::{SimError, SimResult},
};

pub const MAX_PRIORITY: Priority = 50;

/// One input record. Never mutated by a run; every run works on its own
/// `Task` copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst: Ticks,
    // Lower is more urgent; 0 when the input omits it
    pub priority: Priority,
}

impl Process {
    /// Arguments follow the input record layout: id, burst, arrival, priority.
    pub fn new(id: ProcessId, burst: Ticks, arrival_time: Ticks, priority: Priority) -> Self {
        Self {
            id,
            arrival_time,
            burst,
            priority,
        }
    }
}

/// Final accounting for one process, written once when its burst is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultRow {
    pub id: ProcessId,
    pub priority: Priority,
    pub burst: Ticks,
    pub remaining: Ticks,
    pub arrival: Ticks,
    pub wait: Ticks,
    pub turnaround: Ticks,
    pub completion: Ticks,
    pub response: Ticks,
}

impl ResultRow {
    /// Returns `None` until the task has completed.
    pub fn from_task(task: &Task) -> Option<Self> {
        let completion = task.completion_time?;
        let first_run = task.first_run?;
        Some(Self {
            id: task.pid,
            priority: task.priority,
            burst: task.required_service,
            remaining: task.remaining(),
            arrival: task.arrival_time,
            wait: task.wait_time,
            turnaround: completion - task.arrival_time,
            completion,
            response: first_run - task.arrival_time,
        })
    }
}

pub fn validate(processes: &[Process]) -> SimResult<()> {
    if processes.is_empty() {
        return Err(SimError::EmptyWorkload);
    }

    let mut seen = FxHashSet::default();
    let mut total_burst: Ticks = 0;
    let mut latest = processes[0];
    for process in processes {
        if process.id == 0 {
            return Err(SimError::InvalidProcess {
                id: process.id,
                reason: "process id must be positive",
            });
        }
        if process.burst == 0 {
            return Err(SimError::InvalidProcess {
                id: process.id,
                reason: "burst duration must be positive",
            });
        }
        if !(0..=MAX_PRIORITY).contains(&process.priority) {
            return Err(SimError::InvalidProcess {
                id: process.id,
                reason: "priority must be within 0..=50",
            });
        }
        if !seen.insert(process.id) {
            return Err(SimError::DuplicateProcessId(process.id));
        }
        total_burst = total_burst
            .checked_add(process.burst)
            .ok_or(SimError::InvalidProcess {
                id: process.id,
                reason: "total burst overflows the clock",
            })?;
        if process.arrival_time > latest.arrival_time {
            latest = *process;
        }
    }

    // No run can finish later than the last arrival plus every burst
    latest
        .arrival_time
        .checked_add(total_burst)
        .ok_or(SimError::InvalidProcess {
            id: latest.id,
            reason: "schedule would run past the end of the clock",
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_workloads() {
        assert!(matches!(validate(&[]), Err(SimError::EmptyWorkload)));
        assert!(matches!(
            validate(&[Process::new(0, 1, 0, 0)]),
            Err(SimError::InvalidProcess { id: 0, .. })
        ));
        assert!(matches!(
            validate(&[Process::new(3, 0, 0, 0)]),
            Err(SimError::InvalidProcess { id: 3, .. })
        ));
        assert!(matches!(
            validate(&[Process::new(3, 1, 0, 51)]),
            Err(SimError::InvalidProcess { id: 3, .. })
        ));
        assert!(matches!(
            validate(&[Process::new(2, 1, 0, 0), Process::new(2, 4, 1, 0)]),
            Err(SimError::DuplicateProcessId(2))
        ));
    }

    #[test]
    fn rejects_workloads_that_outrun_the_clock() {
        assert!(matches!(
            validate(&[Process::new(1, 5, u64::MAX - 1, 0)]),
            Err(SimError::InvalidProcess { id: 1, .. })
        ));
        assert!(matches!(
            validate(&[Process::new(1, u64::MAX, 0, 0), Process::new(2, 1, 0, 0)]),
            Err(SimError::InvalidProcess { id: 2, .. })
        ));
        assert!(matches!(
            validate(&[Process::new(4, 3, 0, 0), Process::new(9, 2, u64::MAX - 4, 0)]),
            Err(SimError::InvalidProcess { id: 9, .. })
        ));
        assert!(validate(&[Process::new(1, 5, u64::MAX - 5, 0)]).is_ok());
    }

    #[test]
    fn accepts_priority_bounds() {
        let procs = [Process::new(1, 1, 0, 0), Process::new(2, 1, 0, 50)];
        assert!(validate(&procs).is_ok());
    }
}
