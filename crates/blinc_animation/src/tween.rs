//! Time-based tweens
//!
//! A [`Tween`] interpolates a scalar from `from` to `to` over a fixed
//! wall-clock duration. Progress is derived from elapsed time rather than
//! from counted frames, so dropped frames shorten nothing.

use std::time::{Duration, Instant};

use crate::easing::Easing;

/// A scalar interpolation driven by elapsed wall-clock time
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    /// Create a tween starting at `started_at`, eased with [`Easing::EaseOutCubic`]
    pub fn new(from: f32, to: f32, duration: Duration, started_at: Instant) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing: Easing::default(),
        }
    }

    /// Create a tween from a duration expressed in seconds
    ///
    /// Negative and non-finite durations collapse to zero.
    pub fn from_secs(from: f32, to: f32, duration_secs: f32, started_at: Instant) -> Self {
        let duration = if duration_secs.is_finite() && duration_secs > 0.0 {
            Duration::from_secs_f32(duration_secs)
        } else {
            Duration::ZERO
        };
        Self::new(from, to, duration, started_at)
    }

    /// Replace the easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn to(&self) -> f32 {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear time fraction in `[0, 1]`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the full duration has elapsed
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }

    /// Sample the eased value at `now`
    ///
    /// Once finished this returns `to` exactly, with no residual
    /// floating-point error from the easing polynomial.
    pub fn sample(&self, now: Instant) -> f32 {
        if self.is_finished(now) {
            return self.to;
        }
        let eased = self.easing.apply(self.progress(now));
        self.from + eased * (self.to - self.from)
    }
}
