//! Soft time budgets measured on the monotonic clock.

use std::time::{Duration, Instant};

/// A start instant plus an optional budget.
///
/// Drivers poll [`expired`](Deadline::expired) at their suspension points
/// (item evaluation, k-subset, chain step, generation). Nothing is
/// preempted, so a run may overshoot by one unit of work.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    budget: Option<Duration>,
}

impl Deadline {
    /// A deadline that never expires.
    pub fn unbounded() -> Self {
        Self {
            start: Instant::now(),
            budget: None,
        }
    }

    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            budget: Some(budget),
        }
    }

    /// Converts a `time_limit_ms` config field.
    pub fn from_millis(limit: Option<u64>) -> Self {
        match limit {
            Some(ms) => Self::after(Duration::from_millis(ms)),
            None => Self::unbounded(),
        }
    }

    /// Whether a budget is set.
    pub fn is_bounded(&self) -> bool {
        self.budget.is_some()
    }

    /// The total budget, if any.
    pub fn budget(&self) -> Option<Duration> {
        self.budget
    }

    /// Time since the deadline was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time left, or `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.budget.map(|b| b.saturating_sub(self.elapsed()))
    }

    /// Whether the budget has run out. Always `false` when unbounded.
    #[inline]
    pub fn expired(&self) -> bool {
        match self.budget {
            Some(b) => self.start.elapsed() >= b,
            None => false,
        }
    }

    /// A nested deadline starting now with `slice`, never outliving `self`.
    pub fn sub(&self, slice: Duration) -> Self {
        let slice = match self.remaining() {
            Some(left) => slice.min(left),
            None => slice,
        };
        Self::after(slice)
    }
}
