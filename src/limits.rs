use std::time::{Duration, Instant};

/// Bounds on a search, checked at the top of every iteration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SearchLimits {
    /// Stop after this many iterations. [`None`] leaves the choice to the solver.
    pub max_iterations: Option<u64>,
    /// Stop once this much wall-clock time has passed. [`None`] means no timeout.
    pub timeout: Option<Duration>,
}

impl SearchLimits {
    const BLIND_MAX_ITERATIONS: u64 = 100_000;
    const BLIND_TIMEOUT: Duration = Duration::from_secs(30);

    /// Limits suited to the blind solver: 100 000 iterations or 30 seconds, whichever comes first.
    pub fn blind() -> Self {
        Self {
            max_iterations: Some(Self::BLIND_MAX_ITERATIONS),
            timeout: Some(Self::BLIND_TIMEOUT),
        }
    }

    /// Limits suited to the heuristic solver: the iteration cap is derived from the board's state space and there is no timeout.
    pub fn heuristic() -> Self {
        Self::unbounded()
    }

    /// No explicit bounds at all.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: None,
            timeout: None,
        }
    }

    /// Replace the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Replace the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a search begun at `start` that has run `iterations` iterations must stop, given `default_cap` when no cap is set.
    pub(crate) fn exceeded(&self, start: Instant, iterations: u64, default_cap: u64) -> bool {
        iterations >= self.max_iterations.unwrap_or(default_cap)
            || self.timeout.is_some_and(|timeout| start.elapsed() >= timeout)
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::blind()
    }
}
