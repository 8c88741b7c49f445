pub mod driver;
pub mod job;
pub mod load;
pub mod metrics;
pub mod report;

pub use driver::{Schedule, Sim};
pub use job::{Process, ResultRow};
pub use metrics::{Averages, Metrics};

use crate::{
    error::SimResult,
    scheduler::{
        FcfsScheduler, PrioritySjfScheduler, RoundRobinScheduler, Scheduler, SjfScheduler,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Sjf,
    PrioritySjf,
    RoundRobin,
}

impl Policy {
    /// Report order.
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::PrioritySjf,
        Policy::RoundRobin,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Policy::Fcfs => FcfsScheduler::NAME,
            Policy::Sjf => SjfScheduler::NAME,
            Policy::PrioritySjf => PrioritySjfScheduler::NAME,
            Policy::RoundRobin => RoundRobinScheduler::NAME,
        }
    }

    pub fn simulate(self, processes: &[Process]) -> SimResult<Schedule> {
        match self {
            Policy::Fcfs => Sim::<FcfsScheduler>::new(processes)?.run(),
            Policy::Sjf => Sim::<SjfScheduler>::new(processes)?.run(),
            Policy::PrioritySjf => Sim::<PrioritySjfScheduler>::new(processes)?.run(),
            Policy::RoundRobin => Sim::<RoundRobinScheduler>::new(processes)?.run(),
        }
    }
}

pub fn simulate(policy: Policy, processes: &[Process]) -> SimResult<Schedule> {
    policy.simulate(processes)
}

/// Runs every policy against the same input. Fails as a whole on the first
/// error, so callers never see a partial set of schedules.
pub fn simulate_all(processes: &[Process]) -> SimResult<Vec<Schedule>> {
    Policy::ALL
        .iter()
        .map(|policy| policy.simulate(processes))
        .collect()
}
