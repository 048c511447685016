use std::time::Duration;

/// All-time inference latency of one role. No windowing; cleared on reload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyStats {
    frame_count: u64,
    total: Duration,
}

impl LatencyStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.frame_count += 1;
        self.total += elapsed;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// `total / frame_count`, zero before the first frame.
    pub fn mean(&self) -> Duration {
        if self.frame_count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / self.frame_count as u128;
        Duration::from_nanos(nanos as u64)
    }

    pub fn mean_ms(&self) -> f64 {
        self.mean().as_secs_f64() * 1000.0
    }
}
