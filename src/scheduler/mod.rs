pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;

use crate::core::{
    Ticks,
    state::{SimCtx, TaskId},
};
pub use fcfs::FcfsScheduler;
pub use priority::PrioritySjfScheduler;
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

// Run until the burst is exhausted
pub const SLICE_INF: Ticks = u64::MAX;
pub const RR_QUANTUM: Ticks = 2;

#[derive(Debug)]
pub enum DispatchError {
    NoRunnableTask,
}

/// A scheduling policy plugged into `SchedCore`.
pub trait Scheduler {
    /// Title of the policy's report.
    const NAME: &'static str;

    fn init(ctx: &mut SimCtx) -> Self;

    /// Places a runnable task on the policy's DSQ. Called on arrival, on
    /// preemption and on slice expiry alike; the policy's queue order alone
    /// decides where the task lands.
    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId);

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TaskId, DispatchError>;

    /// Asked once per tick while `running` holds the CPU. Returning the
    /// queued task that should replace it preempts `running`; that task must
    /// be the next one `dispatch` hands out.
    fn preempt_by(&self, _ctx: &SimCtx, _running: TaskId) -> Option<TaskId> {
        None
    }
}
