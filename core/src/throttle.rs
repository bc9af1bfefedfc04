use std::time::{Duration, Instant};

/// Minimum time between two refreshes of the same overlay.
///
/// Map view update events fire every frame while the map is open.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(500);

/// Rate limiter for a single overlay
#[derive(Debug, Clone)]
pub struct UpdateThrottle {
    interval: Duration,
    last_run: Option<Instant>,
}

impl Default for UpdateThrottle {
    fn default() -> Self {
        Self::new(UPDATE_INTERVAL)
    }
}

impl UpdateThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub fn last_run(&self) -> Option<Instant> {
        self.last_run
    }

    /// Whether enough time has passed since the last recorded run.
    /// Does not change any state.
    pub fn should_run(&self, now: Instant) -> bool {
        match self.last_run {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn record_run(&mut self, now: Instant) {
        self.last_run = Some(now);
    }
}
