use web_time::{Duration, Instant};

/// Turns wall-clock time into whole timer ticks, carrying the remainder over between polls.
#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    anchor: Instant,
}

impl TickClock {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(period, Instant::now())
    }

    fn starting_at(period: Duration, anchor: Instant) -> Self {
        assert!(!period.is_zero(), "tick period must be positive");
        Self { period, anchor }
    }

    /// Drops any partial tick and starts counting from now.
    pub fn rearm(&mut self) {
        self.anchor = Instant::now();
    }

    pub fn poll(&mut self) -> u32 {
        self.poll_at(Instant::now())
    }

    fn poll_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.anchor);
        let ticks = elapsed.as_nanos() / self.period.as_nanos();
        let ticks = u32::try_from(ticks).unwrap_or(u32::MAX);
        self.anchor += self.period * ticks;
        ticks
    }
}
