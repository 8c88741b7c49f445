use super::{DispatchError, SLICE_INF, Scheduler, SimCtx, TaskId};
use crate::core::DsqId;

/// Non-preemptive first-come, first-serve: one FIFO, every task keeps the
/// CPU until its burst is done.
pub struct FcfsScheduler {
    dsq: DsqId,
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "First-come, first-serve";

    fn init(ctx: &mut SimCtx) -> Self {
        Self {
            dsq: ctx.create_dsq_fifo(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.dsq_push_fifo(self.dsq, task, SLICE_INF);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Result<TaskId, DispatchError> {
        ctx.dsq_pop(self.dsq).ok_or(DispatchError::NoRunnableTask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Process, Sim};

    #[test]
    fn two_processes_back_to_back() {
        let procs = [Process::new(1, 5, 0, 1), Process::new(2, 3, 2, 1)];
        let schedule = Sim::<FcfsScheduler>::new(&procs).unwrap().run().unwrap();

        let p1 = &schedule.rows[0];
        assert_eq!((p1.wait, p1.turnaround, p1.completion), (0, 5, 5));
        let p2 = &schedule.rows[1];
        assert_eq!((p2.wait, p2.turnaround, p2.completion), (3, 6, 8));

        assert!((schedule.averages.wait - 1.5).abs() < 1e-9);
        assert!((schedule.averages.turnaround - 5.5).abs() < 1e-9);
        assert!((schedule.averages.throughput - 0.25).abs() < 1e-9);
    }

    #[test]
    fn idle_gap_does_not_count_as_wait() {
        let procs = [Process::new(1, 2, 0, 0), Process::new(2, 3, 5, 0)];
        let schedule = Sim::<FcfsScheduler>::new(&procs).unwrap().run().unwrap();

        assert_eq!(schedule.rows[1].wait, 0);
        assert_eq!(schedule.rows[1].completion, 8);
        let spans: Vec<_> = schedule
            .gantt
            .iter()
            .map(|s| (s.pid, s.start, s.stop))
            .collect();
        assert_eq!(spans, vec![(1, 0, 2), (2, 5, 8)]);
    }

    #[test]
    fn rows_follow_input_order() {
        let procs = [
            Process::new(4, 3, 0, 0),
            Process::new(2, 1, 0, 0),
            Process::new(9, 6, 1, 0),
            Process::new(1, 2, 4, 0),
        ];
        let schedule = Sim::<FcfsScheduler>::new(&procs).unwrap().run().unwrap();

        let ids: Vec<_> = schedule.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![4, 2, 9, 1]);
        assert!(
            schedule
                .rows
                .windows(2)
                .all(|w| w[0].completion <= w[1].completion)
        );
        assert_eq!(schedule.rows[3].completion, 12);
    }
}
