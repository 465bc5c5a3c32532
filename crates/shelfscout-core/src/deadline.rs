//! Wall-clock budget shared by every step of one crawl run.

use std::time::{Duration, Instant};

/// A fixed point in time after which a run stops starting new work.
///
/// Individual waits stay bounded by their own timeouts; the deadline caps the
/// sum of them.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Shortens `limit` so it never outlives the deadline.
    #[must_use]
    pub fn cap(&self, limit: Duration) -> Duration {
        limit.min(self.remaining())
    }
}
