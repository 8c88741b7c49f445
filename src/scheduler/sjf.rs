use super::{DispatchError, SLICE_INF, Scheduler, SimCtx, TaskId};
use crate::core::{DsqId, Rank};

/// Preemptive shortest-job-first (shortest remaining time). Ranked by
/// remaining burst, then input order; a queued task takes the CPU only
/// when its remaining burst is strictly shorter.
pub struct SjfScheduler {
    dsq: DsqId,
}

impl SjfScheduler {
    fn rank(ctx: &SimCtx, task: TaskId) -> Rank {
        Rank::new(0, ctx.task(task).remaining(), task)
    }
}

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "Shortest-job-first (SJF)";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            dsq: ctx.create_dsq_priq(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        let rank = Self::rank(ctx, task);
        ctx.dsq_push_priq(self.dsq, task, SLICE_INF, rank);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TaskId, DispatchError> {
        ctx.dsq_pop(self.dsq).ok_or(DispatchError::NoRunnableTask)
    }

    fn preempt_by(&self, ctx: &SimCtx, running: TaskId) -> Option<TaskId> {
        let head = ctx.dsq_peek(self.dsq)?;
        (ctx.task(head).remaining() < ctx.task(running).remaining()).then_some(head)
    }
}
