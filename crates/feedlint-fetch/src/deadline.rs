//! Run deadlines, threaded through every fetch.

use std::time::{Duration, Instant};

/// A cooperative deadline. `Deadline::none()` never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    /// No deadline.
    pub fn none() -> Self {
        Self { at: None }
    }

    /// Expires `after` from now.
    pub fn after(after: Duration) -> Self {
        Self {
            at: Some(Instant::now() + after),
        }
    }

    pub fn expired(&self) -> bool {
        self.at.is_some_and(|at| Instant::now() >= at)
    }

    /// Time left, `None` when unbounded. Zero when already expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.at.map(|at| at.saturating_duration_since(Instant::now()))
    }

    /// The effective timeout for one request: the per-request budget capped
    /// by whatever the run has left.
    pub fn cap(&self, per_request: Duration) -> Duration {
        match self.remaining() {
            Some(left) => per_request.min(left),
            None => per_request,
        }
    }
}
