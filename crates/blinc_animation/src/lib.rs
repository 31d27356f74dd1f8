//! Blinc Animation System
//!
//! Frame-driven animation primitives for interactive widgets.
//!
//! # Features
//!
//! - **Easing Curves**: Polynomial easing functions mapping linear time to progress
//! - **Tweens**: Wall-clock driven interpolation between two scalar values
//! - **Momentum**: Constant-deceleration projectile motion for flick gestures
//! - **Frame Driver**: Single-slot scheduler where starting an animation cancels
//!   the one in flight
//!
//! Nothing in this crate reads the clock on its own. Callers pass an
//! [`std::time::Instant`] into every time-dependent call, which keeps the
//! primitives deterministic under test.

pub mod easing;
pub mod momentum;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use momentum::{duration_for_distance, Momentum};
pub use scheduler::{AnimationId, Animate, FrameDriver, FrameStatus};
pub use tween::Tween;
