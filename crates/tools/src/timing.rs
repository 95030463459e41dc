use std::time::Duration;

/// Ring buffer of recent step durations.
///
/// With a budget set, frames that exceed it are counted and logged, which is
/// how a host notices the physics starting to eat into its frame time.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
    budget: Option<Duration>,
    over_budget: u64,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
            budget: None,
            over_budget: 0,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Record one duration. Returns `true` if it exceeded the budget.
    pub fn record(&mut self, dt: Duration) -> bool {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
        match self.budget {
            Some(budget) if dt > budget => {
                self.over_budget += 1;
                tracing::debug!(?dt, ?budget, "step over budget");
                true
            }
            _ => false,
        }
    }

    fn recorded(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.recorded().iter().sum();
        total / count as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }

    /// Total number of recordings that exceeded the budget.
    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }
}
