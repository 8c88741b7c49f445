use super::state::{SimCtx, TaskState};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn observe(&mut self, ctx: &SimCtx) {
        self.step += 1;

        if let Some(task_id) = ctx.current {
            let task = ctx.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Running,
                "current task {task_id} must be Running"
            );
            debug_assert_eq!(
                ctx.gantt.last().map(|slice| slice.pid),
                Some(task.pid),
                "Open Gantt entry does not belong to running task {task_id}"
            );
        }

        if let [.., prev, last] = ctx.gantt.as_slice() {
            debug_assert!(
                prev.stop <= last.start,
                "step {}: Gantt entries overlap: {prev:?} then {last:?}",
                self.step
            );
        }

        for (&task_id, &dsq_id) in &ctx.task_to_dsq {
            let task = ctx.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Runnable,
                "Task {task_id} in DSQ {dsq_id:?} must be Runnable"
            );
            if let Some(dsq) = ctx.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(task_id),
                    "task_to_dsq claims task {task_id} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "task_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }

        for task in &ctx.tasks {
            debug_assert!(
                task.consumed_service <= task.required_service,
                "Task {} ran past its burst",
                task.id
            );
            debug_assert!(
                task.state != TaskState::Pending || task.consumed_service == 0,
                "Task {} ran before arriving",
                task.id
            );
        }
    }
}
