use super::{DispatchError, RR_QUANTUM, Scheduler, SimCtx, TaskId};
use crate::core::{DsqId, Ticks};

/// Round-robin over a single FIFO with a fixed quantum. A task whose slice
/// runs out goes to the back, behind anything that arrived meanwhile.
pub struct RoundRobinScheduler {
    dsq: DsqId,
    quantum: Ticks,
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round-robin scheduling";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            dsq: ctx.create_dsq_fifo(),
            quantum: RR_QUANTUM,
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.dsq_push_fifo(self.dsq, task, self.quantum);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TaskId, DispatchError> {
        ctx.dsq_pop(self.dsq).ok_or(DispatchError::NoRunnableTask)
    }
}
