use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedCoreEvent {
    Arrived {
        task: TaskId,
    },
    Dispatched {
        task: TaskId,
        slice: Ticks,
        // Ticks spent queued since it last became runnable
        queued: Ticks,
    },
    // `task` was displaced by the better-ranked `by`
    Preempted {
        task: TaskId,
        by: TaskId,
    },
    SliceExpired {
        task: TaskId,
    },
    Completed {
        task: TaskId,
    },
    // Nothing runnable; clock fast-forwarded to the next arrival
    CpuIdle {
        from: Ticks,
        to: Ticks,
    },
}
