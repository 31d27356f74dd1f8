//! Momentum physics
//!
//! Flick gestures are modelled as constant-deceleration projectile motion:
//! the value keeps moving in the direction of the release velocity while a
//! fixed deceleration opposes it, stopping after `|v / a|` seconds.

/// Resting point and travel time of a decelerating flick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Momentum {
    /// Integer resting position
    pub target: f32,
    /// Seconds until the motion stops
    pub duration: f32,
}

impl Momentum {
    /// Project a flick starting at `start` with `velocity` (units/s) under a
    /// constant `deceleration` magnitude (units/s²)
    ///
    /// The target is rounded to the nearest whole unit so the motion always
    /// comes to rest on an item boundary.
    pub fn project(start: f32, velocity: f32, deceleration: f32) -> Self {
        if velocity == 0.0 || !velocity.is_finite() || deceleration <= 0.0 {
            return Self {
                target: start.round(),
                duration: 0.0,
            };
        }

        let duration = (velocity / deceleration).abs();
        let signed = -velocity.signum() * deceleration;
        let travel = velocity * duration + 0.5 * signed * duration * duration;

        Self {
            target: (start + travel).round(),
            duration,
        }
    }
}

/// Time needed to cover `distance` while decelerating to rest at `deceleration`
///
/// Inverse of `d = ½·a·t²`, used when a projected target gets clamped and
/// the animation has to be retimed for the shorter trip.
pub fn duration_for_distance(distance: f32, deceleration: f32) -> f32 {
    if deceleration <= 0.0 {
        return 0.0;
    }
    (2.0 * distance.abs() / deceleration).sqrt()
}
