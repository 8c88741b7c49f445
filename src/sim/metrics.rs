use average::{Estimate, Mean};

use super::job::ResultRow;
use crate::{
    core::Ticks,
    error::{SimError, SimResult},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub wait: f64,
    pub turnaround: f64,
    pub response: f64,
    // Completed processes per tick, up to the last completion
    pub throughput: f64,
}

/// Running totals over completed rows.
#[derive(Debug, Clone)]
pub struct Metrics {
    wait: Mean,
    turnaround: Mean,
    response: Mean,
    last_completion: Ticks,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            wait: Mean::new(),
            turnaround: Mean::new(),
            response: Mean::new(),
            last_completion: 0,
        }
    }

    pub fn add(&mut self, row: &ResultRow) {
        self.wait.add(row.wait as f64);
        self.turnaround.add(row.turnaround as f64);
        self.response.add(row.response as f64);
        self.last_completion = self.last_completion.max(row.completion);
    }

    pub fn len(&self) -> u64 {
        self.wait.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> SimResult<Averages> {
        if self.is_empty() || self.last_completion == 0 {
            return Err(SimError::EmptyWorkload);
        }

        Ok(Averages {
            wait: self.wait.estimate(),
            turnaround: self.turnaround.estimate(),
            response: self.response.estimate(),
            throughput: self.len() as f64 / self.last_completion as f64,
        })
    }
}

impl<'a> FromIterator<&'a ResultRow> for Metrics {
    fn from_iter<I: IntoIterator<Item = &'a ResultRow>>(iter: I) -> Self {
        let mut metrics = Metrics::new();
        for row in iter {
            metrics.add(row);
        }
        metrics
    }
}
