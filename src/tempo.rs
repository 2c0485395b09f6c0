use std::time::Duration;

/// Amount the interval changes per slower/faster press, and its floor
pub const STEP: Duration = Duration::from_millis(100);
pub const MIN_INTERVAL: Duration = STEP;
pub const MAX_INTERVAL: Duration = Duration::from_secs(60);

/// Time between generations while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    interval: Duration,
}

impl Tempo {
    /// Clamped to `MIN_INTERVAL..=MAX_INTERVAL`.
    pub fn new(interval: Duration) -> Self {
        Tempo {
            interval: interval.clamp(MIN_INTERVAL, MAX_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Lengthen the interval by one step. Returns false at the ceiling.
    pub fn slower(&mut self) -> bool {
        if self.interval >= MAX_INTERVAL {
            return false;
        }
        self.interval = (self.interval + STEP).min(MAX_INTERVAL);
        true
    }

    /// Shorten the interval by one step. Returns false at the floor.
    pub fn faster(&mut self) -> bool {
        if self.interval <= MIN_INTERVAL {
            return false;
        }
        self.interval = self.interval.saturating_sub(STEP).max(MIN_INTERVAL);
        true
    }

    /// Short human label: `100ms`, `1s`, `1.5s`.
    pub fn label(&self) -> String {
        let ms = self.interval.as_millis();
        if ms < 1000 {
            format!("{}ms", ms)
        } else {
            format!("{}s", ms as f64 / 1000.0)
        }
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo::new(STEP)
    }
}
