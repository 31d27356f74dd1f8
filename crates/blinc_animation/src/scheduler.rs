//! Frame driver
//!
//! A single-slot animation scheduler. At most one tween is active at a
//! time: starting a new one cancels whatever is in flight, so two
//! animations never race for the same value. Between calls to
//! [`FrameDriver::tick`] a pending animation is inert state; the host's
//! frame loop decides when the next frame happens.

use std::time::Instant;

use slotmap::{new_key_type, SlotMap};

use crate::tween::Tween;

new_key_type! {
    /// Handle to an animation started on a [`FrameDriver`]
    ///
    /// Handles of cancelled or completed animations go stale and are never
    /// reused for a later animation.
    pub struct AnimationId;
}

/// Outcome of [`FrameDriver::animate`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Animate {
    /// Nothing to animate; the value should be applied right away
    Immediate(f32),
    /// A tween was scheduled and will complete on a later tick
    Scheduled(AnimationId),
}

/// Result of advancing the driver by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStatus {
    /// No animation is active
    Idle,
    /// The active animation produced an intermediate value
    Running(f32),
    /// The active animation reached its end value and was retired
    Finished {
        /// Handle of the retired animation
        id: AnimationId,
        /// Exact end value
        value: f32,
    },
}

/// Drives at most one [`Tween`] per frame
#[derive(Debug, Default)]
pub struct FrameDriver {
    tweens: SlotMap<AnimationId, Tween>,
    active: Option<AnimationId>,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate from `from` to `to` over `duration_secs`, starting at `now`
    ///
    /// - `from == to`: nothing moves, returns [`Animate::Immediate`] with `from`.
    /// - zero duration: returns [`Animate::Immediate`] with `to`.
    ///
    /// Either way the in-flight animation is cancelled first.
    pub fn animate(&mut self, from: f32, to: f32, duration_secs: f32, now: Instant) -> Animate {
        self.cancel();

        if from == to {
            return Animate::Immediate(from);
        }
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Animate::Immediate(to);
        }

        Animate::Scheduled(self.start(Tween::from_secs(from, to, duration_secs, now)))
    }

    /// Start a prepared tween, cancelling the in-flight animation
    pub fn start(&mut self, tween: Tween) -> AnimationId {
        self.cancel();
        let id = self.tweens.insert(tween);
        self.active = Some(id);
        tracing::debug!(
            "FrameDriver: start {:?} {:.3} -> {:.3} over {:?}",
            id,
            tween.from(),
            tween.to(),
            tween.duration()
        );
        id
    }

    /// Cancel the in-flight animation, returning its handle
    pub fn cancel(&mut self) -> Option<AnimationId> {
        let id = self.active.take()?;
        self.tweens.remove(id);
        tracing::debug!("FrameDriver: cancel {:?}", id);
        Some(id)
    }

    /// Whether any animation is in flight
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `id` still refers to the in-flight animation
    pub fn is_active(&self, id: AnimationId) -> bool {
        self.active == Some(id)
    }

    /// The in-flight tween, if any
    pub fn active(&self) -> Option<&Tween> {
        self.active.and_then(|id| self.tweens.get(id))
    }

    /// Advance the active animation to `now`
    pub fn tick(&mut self, now: Instant) -> FrameStatus {
        let Some(id) = self.active else {
            return FrameStatus::Idle;
        };
        let Some(tween) = self.tweens.get(id) else {
            self.active = None;
            return FrameStatus::Idle;
        };

        let value = tween.sample(now);
        if tween.is_finished(now) {
            self.tweens.remove(id);
            self.active = None;
            tracing::debug!("FrameDriver: finished {:?} at {:.3}", id, value);
            FrameStatus::Finished { id, value }
        } else {
            tracing::trace!("FrameDriver: {:?} -> {:.4}", id, value);
            FrameStatus::Running(value)
        }
    }
}
