use log::{debug, info, trace};

use super::{
    job::{Process, ResultRow, validate},
    metrics::{Averages, Metrics},
};
use crate::{
    core::{
        SchedCoreEvent,
        driver::SchedCore,
        state::{TaskId, Ticks, TimeSlice},
    },
    error::SimResult,
    scheduler::Scheduler,
};

/// Everything one policy run hands to the report emitter.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub title: String,
    pub gantt: Vec<TimeSlice>,
    // One row per input process, in input order
    pub rows: Vec<ResultRow>,
    pub averages: Averages,
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    pub processes: Vec<Process>,
    rows: Vec<Option<ResultRow>>,
    // Task ids ordered by arrival time, ties in input order
    arrivals: Vec<TaskId>,
    arrival_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: &[Process]) -> SimResult<Self> {
        validate(processes)?;

        let mut core = SchedCore::<S>::new();
        for process in processes {
            core.ctx.create_task(
                process.id,
                process.arrival_time,
                process.burst,
                process.priority,
            );
        }

        let mut arrivals: Vec<TaskId> = (0..processes.len()).collect();
        arrivals.sort_by_key(|&task| processes[task].arrival_time);

        Ok(Self {
            core,
            processes: processes.to_vec(),
            rows: vec![None; processes.len()],
            arrivals,
            arrival_cursor: 0,
        })
    }

    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = self.handle_arrivals();

        let before = self.core.now();
        events.extend(self.core.tick());

        // CPU stayed idle: skip straight to the next arrival
        if self.core.now() == before {
            if let Some(next) = self.next_arrival() {
                self.core.ctx.advance_to(next);
                events.push(SchedCoreEvent::CpuIdle {
                    from: before,
                    to: next,
                });
            }
        }

        for event in &events {
            if let SchedCoreEvent::Completed { task } = *event {
                self.record_completion(task);
            }
        }

        events
    }

    fn handle_arrivals(&mut self) -> Vec<SchedCoreEvent> {
        let now = self.core.now();
        let arrived = self.arrivals[self.arrival_cursor..]
            .iter()
            .take_while(|&&task| self.processes[task].arrival_time <= now)
            .count();

        let end = self.arrival_cursor + arrived;
        let mut events = Vec::with_capacity(arrived);
        for &task in &self.arrivals[self.arrival_cursor..end] {
            events.push(self.core.wake_task(task));
        }
        self.arrival_cursor = end;
        events
    }

    fn next_arrival(&self) -> Option<Ticks> {
        self.arrivals
            .get(self.arrival_cursor)
            .map(|&task| self.processes[task].arrival_time)
    }

    fn record_completion(&mut self, task: TaskId) {
        debug_assert!(
            self.rows[task].is_none(),
            "Task {task} completed more than once"
        );
        self.rows[task] = ResultRow::from_task(self.core.ctx.task(task));
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.rows.iter().all(Option::is_some)
    }

    pub fn run(mut self) -> SimResult<Schedule> {
        info!("{}: {} processes", S::NAME, self.processes.len());

        while !self.all_jobs_completed() {
            let now = self.core.now();
            for event in self.step() {
                self.log_event(now, event);
            }
        }

        let schedule = self.into_schedule()?;
        info!(
            "{}: done at t={} avg wait {:.2}, avg turnaround {:.2}, throughput {:.2}/t",
            schedule.title,
            schedule.gantt.last().map_or(0, |slice| slice.stop),
            schedule.averages.wait,
            schedule.averages.turnaround,
            schedule.averages.throughput
        );
        Ok(schedule)
    }

    fn log_event(&self, now: Ticks, event: SchedCoreEvent) {
        let pid = |task: TaskId| self.core.ctx.task(task).pid;
        match event {
            SchedCoreEvent::Dispatched {
                task,
                slice,
                queued,
            } => debug!(
                "t={now} dispatch P{} (queued {queued}, slice {slice})",
                pid(task)
            ),
            SchedCoreEvent::Preempted { task, by } => {
                debug!("t={now} P{} preempted by P{}", pid(task), pid(by))
            }
            SchedCoreEvent::Completed { task } => {
                debug!("t={} P{} completed", self.core.now(), pid(task))
            }
            _ => trace!("t={now} {event:?}"),
        }
    }

    fn into_schedule(self) -> SimResult<Schedule> {
        let rows: Vec<ResultRow> = self.rows.into_iter().flatten().collect();
        debug_assert_eq!(rows.len(), self.processes.len());

        let averages = rows.iter().collect::<Metrics>().summary()?;
        Ok(Schedule {
            title: S::NAME.to_owned(),
            gantt: self.core.ctx.gantt,
            rows,
            averages,
        })
    }
}
