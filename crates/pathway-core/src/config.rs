//! Client configuration defaults.

use std::time::Duration;

/// Service address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Timing and heuristics of a plan generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Pause between submitting a plan and the first discovery listing
    pub settle_delay: Duration,
    /// Listings tried before falling back to a guessed identifier
    pub discovery_attempts: u32,
    /// Pause between discovery listings
    pub discovery_interval: Duration,
    /// Pause between status checks while polling
    pub poll_interval: Duration,
    /// Hard ceiling on the polling phase
    pub poll_timeout: Duration,
    /// Content longer than this counts as generated even before the status
    /// says so
    pub content_threshold: usize,
    /// Pause between progress messages
    pub status_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(1500),
            discovery_attempts: 10,
            discovery_interval: Duration::from_secs(2),
            poll_interval: Duration::from_secs(3),
            poll_timeout: Duration::from_secs(30),
            content_threshold: 20,
            status_interval: Duration::from_millis(2500),
        }
    }
}

impl TrackerConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn with_discovery(mut self, attempts: u32, interval: Duration) -> Self {
        self.discovery_attempts = attempts.max(1);
        self.discovery_interval = interval;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
