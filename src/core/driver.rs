use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{SimCtx, TaskId, Ticks},
};
use crate::scheduler::{DispatchError, SLICE_INF, Scheduler};

/// Single-CPU tick engine. Owns the run's private state and drives one
/// `Scheduler` policy through it.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> Default for SchedCore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new() -> Self {
        let mut ctx = SimCtx::new();
        let scheduler = S::init(&mut ctx);
        let observer = Observer::new();
        Self {
            ctx,
            scheduler,
            observer,
        }
    }

    /// Runs the CPU for one tick at the current time.
    ///
    /// Before the tick the running task may lose the CPU, either because its
    /// slice is used up or because the policy wants to preempt it, and an idle
    /// CPU pulls the next task from the policy. If nothing is runnable the
    /// clock is left untouched and the caller decides how far to skip.
    pub fn tick(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();

        if let Some(task) = self.ctx.current {
            if self.ctx.task(task).slice_expired() {
                self.requeue(task);
                events.push(SchedCoreEvent::SliceExpired { task });
            } else if let Some(by) = self.scheduler.preempt_by(&self.ctx, task) {
                self.requeue(task);
                events.push(SchedCoreEvent::Preempted { task, by });
            }
        }

        if self.ctx.cpu_is_idle() {
            if let Some(event) = self.try_schedule_cpu() {
                events.push(event);
            }
        }

        let current_task_id = match self.ctx.current {
            Some(task) => task,
            None => return events,
        };

        self.ctx.advance_time(1);
        self.ctx.charge_current();

        if self.ctx.task(current_task_id).remaining() == 0 {
            self.ctx.clear_cpu();
            self.ctx.mark_completed(current_task_id);
            events.push(SchedCoreEvent::Completed {
                task: current_task_id,
            });
        }

        self.observer.observe(&self.ctx);
        events
    }

    fn try_schedule_cpu(&mut self) -> Option<SchedCoreEvent> {
        match self.scheduler.dispatch(&mut self.ctx) {
            Ok(task) => {
                let queued = self.ctx.set_running(task);
                let slice = self
                    .ctx
                    .task(task)
                    .allocated_timeslice
                    .unwrap_or(SLICE_INF);
                Some(SchedCoreEvent::Dispatched {
                    task,
                    slice,
                    queued,
                })
            }
            // Scheduler left CPU idle.
            Err(DispatchError::NoRunnableTask) => None,
        }
    }

    fn requeue(&mut self, task: TaskId) {
        self.ctx.clear_cpu();
        self.ctx.mark_runnable(task);
        self.scheduler.enqueue(&mut self.ctx, task);
    }

    pub fn wake_task(&mut self, task: TaskId) -> SchedCoreEvent {
        self.ctx.mark_runnable(task);
        self.scheduler.enqueue(&mut self.ctx, task);
        SchedCoreEvent::Arrived { task }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }
}
