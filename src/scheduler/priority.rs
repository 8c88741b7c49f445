use super::{DispatchError, SLICE_INF, Scheduler, SimCtx, TaskId};
use crate::core::{DsqId, Rank};

/// Preemptive priority scheduling with shortest remaining burst as the
/// tie-break. Lower priority numbers win. Only a strictly better priority
/// preempts the running task.
pub struct PrioritySjfScheduler {
    dsq: DsqId,
}

impl Scheduler for PrioritySjfScheduler {
    const NAME: &'static str = "SJF with Priority scheduling";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            dsq: ctx.create_dsq_priq(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        let t = ctx.task(task);
        let rank = Rank::new(t.priority, t.remaining(), task);
        ctx.dsq_push_priq(self.dsq, task, SLICE_INF, rank);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TaskId, DispatchError> {
        ctx.dsq_pop(self.dsq).ok_or(DispatchError::NoRunnableTask)
    }

    fn preempt_by(&self, ctx: &SimCtx, running: TaskId) -> Option<TaskId> {
        let head = ctx.dsq_peek(self.dsq)?;
        (ctx.task(head).priority < ctx.task(running).priority).then_some(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Process, Schedule, Sim};

    fn run(procs: &[Process]) -> Schedule {
        Sim::<PrioritySjfScheduler>::new(procs)
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn better_priority_preempts_and_burst_breaks_ties() {
        let procs = [
            Process::new(1, 4, 0, 3),
            Process::new(2, 2, 1, 1),
            Process::new(3, 1, 2, 3),
        ];
        let schedule = run(&procs);

        let gantt: Vec<_> = schedule
            .gantt
            .iter()
            .map(|s| (s.pid, s.start, s.stop))
            .collect();
        assert_eq!(gantt, vec![(1, 0, 1), (2, 1, 3), (3, 3, 4), (1, 4, 7)]);

        let rows: Vec<_> = schedule
            .rows
            .iter()
            .map(|r| (r.wait, r.turnaround, r.completion))
            .collect();
        assert_eq!(rows, vec![(3, 7, 7), (0, 2, 3), (1, 2, 4)]);
        assert!(schedule.rows.iter().all(|r| r.remaining == 0));
    }

    #[test]
    fn equal_priority_never_preempts() {
        let procs = [Process::new(1, 5, 0, 2), Process::new(2, 1, 1, 2)];
        let schedule = run(&procs);

        let gantt: Vec<_> = schedule
            .gantt
            .iter()
            .map(|s| (s.pid, s.start, s.stop))
            .collect();
        assert_eq!(gantt, vec![(1, 0, 5), (2, 5, 6)]);
    }

    #[test]
    fn response_is_first_dispatch_not_wait() {
        let procs = [Process::new(1, 4, 0, 3), Process::new(2, 2, 1, 1)];
        let schedule = run(&procs);

        let p1 = &schedule.rows[0];
        assert_eq!(p1.response, 0);
        assert_eq!(p1.wait, 2);
    }
}
