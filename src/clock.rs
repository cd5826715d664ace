//! Time management: the per-room animation accumulator and the wall clock
//! driving the frame loop.

use std::time::{Duration, Instant};

/// Monotonically increasing elapsed-time accumulator, in seconds.
///
/// Reset to zero whenever the active room changes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f64,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一帧的时长
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt.as_secs_f64();
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Trait for time management
pub trait Clock {
    /// Get the current time
    fn now(&self) -> Instant;

    /// Sleep for duration
    fn sleep(&self, duration: Duration);

    /// Target duration of one frame
    fn tick_rate(&self) -> Duration;
}

/// Wall clock implementation
pub struct SystemClock {
    tick_rate: Duration,
}

impl SystemClock {
    pub fn new(frame_rate: u32) -> Self {
        let frame_rate = frame_rate.max(1);
        Self {
            tick_rate: Duration::from_nanos(1_000_000_000 / u64::from(frame_rate)),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}
