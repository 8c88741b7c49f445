pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{SimError, SimResult};
pub use scheduler::Scheduler;
pub use sim::{Policy, Process, ResultRow, Schedule, Sim, simulate, simulate_all};
