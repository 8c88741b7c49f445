use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::{cmp::Ordering, collections::VecDeque};

// Index into Task Vec; equals the process's position in the input list
pub type TaskId = usize;
pub type ProcessId = u64;
pub type Priority = i64;
pub type Ticks = u64;
new_key_type! {
    pub struct DsqId;
}

/// Ordering key of a ranked DSQ. Fields compare in declaration order and
/// the smallest key is popped first; `seq` keeps equal keys in input order.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct Rank {
    pub class: Priority,
    pub remaining: Ticks,
    pub seq: TaskId,
}

impl Rank {
    pub fn new(class: Priority, remaining: Ticks, seq: TaskId) -> Self {
        Self {
            class,
            remaining,
            seq,
        }
    }

    fn key(&self) -> (Priority, Ticks, TaskId) {
        (self.class, self.remaining, self.seq)
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Rank's Ord
impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not arrived yet
    Pending,
    Runnable,
    Running,
    Completed,
}

/// Per-run working copy of one input process.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub pid: ProcessId,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub priority: Priority,
    pub required_service: Ticks,
    pub consumed_service: Ticks,
    pub allocated_timeslice: Option<Ticks>,
    pub consumed_timeslice: Ticks,
    // Start of the current stint in a DSQ
    pub ready_since: Ticks,
    // Sum of all stints spent in a DSQ
    pub wait_time: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn remaining(&self) -> Ticks {
        self.required_service - self.consumed_service
    }

    pub fn slice_expired(&self) -> bool {
        self.allocated_timeslice
            .is_some_and(|slice| self.consumed_timeslice >= slice)
    }
}

/// One Gantt entry: `pid` held the CPU over `[start, stop)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlice {
    pub pid: ProcessId,
    pub start: Ticks,
    pub stop: Ticks,
}

impl TimeSlice {
    pub fn len(&self) -> Ticks {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.stop == self.start
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        tasks: VecDeque<TaskId>,
    },
    Priq {
        tasks: KeyedPriorityQueue<TaskId, Rank>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            tasks: VecDeque::new(),
        }
    }

    pub fn new_priq() -> Self {
        Self::Priq {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        match self {
            Self::Fifo { tasks } => tasks.contains(&task_id),
            Self::Priq { tasks } => tasks.iter().any(|t| *t.0 == task_id),
        }
    }

    pub fn peek(&self) -> Option<TaskId> {
        match self {
            Self::Fifo { tasks } => tasks.front().copied(),
            Self::Priq { tasks } => tasks.peek().map(|t| *t.0),
        }
    }
}

/// State private to one simulation run: the virtual clock, the single CPU,
/// the task arena, the dispatch queues and the Gantt trace.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub current: Option<TaskId>,
    pub tasks: Vec<Task>,
    pub dsqs: SlotMap<DsqId, Dsq>,
    pub task_to_dsq: FxHashMap<TaskId, DsqId>,
    pub gantt: Vec<TimeSlice>,
}

impl Default for SimCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl SimCtx {
    pub fn new() -> Self {
        Self {
            now: 0,
            current: None,
            tasks: Vec::new(),
            dsqs: SlotMap::with_key(),
            task_to_dsq: FxHashMap::default(),
            gantt: Vec::new(),
        }
    }

    pub fn create_task(
        &mut self,
        pid: ProcessId,
        arrival_time: Ticks,
        required_service: Ticks,
        priority: Priority,
    ) -> TaskId {
        let id = self.tasks.len();
        self.tasks.push(Task {
            id,
            pid,
            state: TaskState::Pending,
            arrival_time,
            priority,
            required_service,
            consumed_service: 0,
            allocated_timeslice: None,
            consumed_timeslice: 0,
            ready_since: 0,
            wait_time: 0,
            first_run: None,
            completion_time: None,
        });
        id
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now += delta;
    }

    pub fn advance_to(&mut self, when: Ticks) {
        debug_assert!(when >= self.now, "Clock cannot move backwards");
        self.now = when;
    }

    pub fn create_dsq_fifo(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_fifo())
    }

    pub fn create_dsq_priq(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_priq())
    }

    fn dsq_push(&mut self, dsq_id: DsqId, task_id: TaskId, slice: Ticks, rank: Option<Rank>) {
        assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Task {task_id} already present in some DSQ"
        );

        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.state,
            TaskState::Runnable,
            "Task {task_id} must be Runnable when enqueued"
        );

        task.allocated_timeslice = Some(slice);
        let dsq = self.dsqs.get_mut(dsq_id).expect("Unknown DSQ");

        match dsq {
            Dsq::Fifo { tasks } => tasks.push_back(task_id),
            Dsq::Priq { tasks } => {
                tasks.push(
                    task_id,
                    rank.expect("Attempted to push to a ranked DSQ with no rank"),
                );
            }
        };

        self.task_to_dsq.insert(task_id, dsq_id);
    }

    pub fn dsq_push_fifo(&mut self, dsq_id: DsqId, task_id: TaskId, slice: Ticks) {
        self.dsq_push(dsq_id, task_id, slice, None);
    }

    pub fn dsq_push_priq(&mut self, dsq_id: DsqId, task_id: TaskId, slice: Ticks, rank: Rank) {
        self.dsq_push(dsq_id, task_id, slice, Some(rank));
    }

    pub fn dsq_pop(&mut self, dsq_id: DsqId) -> Option<TaskId> {
        let dsq = self.dsqs.get_mut(dsq_id)?;
        let task = match dsq {
            Dsq::Fifo { tasks } => tasks.pop_front(),
            Dsq::Priq { tasks } => tasks.pop().map(|t| t.0),
        }?;

        let removed = self.task_to_dsq.remove(&task);
        debug_assert!(removed.is_some(), "Task {task} missing DSQ membership");

        Some(task)
    }

    pub fn dsq_peek(&self, dsq_id: DsqId) -> Option<TaskId> {
        self.dsqs.get(dsq_id)?.peek()
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn mark_runnable(&mut self, task_id: TaskId) {
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {} cannot be runnable",
            task.id
        );
        task.state = TaskState::Runnable;
        task.ready_since = now;
    }

    // Return the time the task spent queued since it last became runnable
    pub fn set_running(&mut self, task_id: TaskId) -> Ticks {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Running task {task_id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a task");

        let now = self.now;
        self.current = Some(task_id);
        let task = self.task_mut(task_id);
        debug_assert_eq!(task.state, TaskState::Runnable);

        let queued = now - task.ready_since;
        task.state = TaskState::Running;
        task.wait_time += queued;
        task.consumed_timeslice = 0;
        task.first_run.get_or_insert(now);
        let pid = task.pid;

        self.gantt.push(TimeSlice {
            pid,
            start: now,
            stop: now,
        });
        queued
    }

    // Charge one tick of CPU to the current task; the clock must already be advanced
    pub fn charge_current(&mut self) {
        let Some(task_id) = self.current else {
            return;
        };
        let now = self.now;

        let task = self.task_mut(task_id);
        task.consumed_service += 1;
        task.consumed_timeslice += 1;

        debug_assert!(!self.gantt.is_empty(), "Running task must have an open Gantt entry");
        if let Some(slice) = self.gantt.last_mut() {
            slice.stop = now;
        }
    }

    pub fn clear_cpu(&mut self) {
        self.current = None;
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Completing task {} that is still enqueued",
            task_id
        );

        let now = self.now;
        let task = &mut self.tasks[task_id];
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        debug_assert_eq!(task.consumed_service, task.required_service);
        debug_assert_eq!(
            task.wait_time,
            now - task.arrival_time - task.required_service,
            "Task {task_id} queued time disagrees with its turnaround"
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_dsq_pops_smallest_rank_first() {
        let mut ctx = SimCtx::new();
        let dsq = ctx.create_dsq_priq();
        for (pid, burst, prio) in [(1, 5, 2), (2, 3, 2), (3, 9, 1), (4, 3, 2)] {
            let id = ctx.create_task(pid, 0, burst, prio);
            ctx.mark_runnable(id);
            ctx.dsq_push_priq(dsq, id, 1, Rank::new(prio, burst, id));
        }

        let popped: Vec<_> = std::iter::from_fn(|| ctx.dsq_pop(dsq)).collect();
        let order: Vec<_> = popped.iter().map(|&id| ctx.task(id).pid).collect();
        assert_eq!(order, vec![3, 2, 4, 1]);
        assert!(ctx.task_to_dsq.is_empty());
        assert_eq!(ctx.dsq_peek(dsq), None);
    }

    #[test]
    fn queued_time_accumulates_over_stints() {
        let mut ctx = SimCtx::new();
        let dsq = ctx.create_dsq_fifo();
        let id = ctx.create_task(7, 0, 4, 0);

        ctx.advance_to(1);
        ctx.mark_runnable(id);
        ctx.advance_to(3);
        ctx.dsq_push_fifo(dsq, id, 2);
        assert_eq!(ctx.dsq_pop(dsq), Some(id));
        assert_eq!(ctx.set_running(id), 2);

        ctx.advance_time(1);
        ctx.charge_current();
        ctx.clear_cpu();
        ctx.mark_runnable(id);
        ctx.advance_to(6);
        assert_eq!(ctx.set_running(id), 2);

        assert_eq!(ctx.task(id).wait_time, 4);
        assert_eq!(ctx.task(id).first_run, Some(3));
        assert_eq!(ctx.gantt.len(), 2);
        assert_eq!(ctx.gantt[0], TimeSlice { pid: 7, start: 3, stop: 4 });
    }
}
