//! Easing functions
//!
//! Map a linear time fraction `t` in `[0, 1]` to an eased progress value.

/// Easing curve applied to a tween's time fraction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic acceleration from rest
    EaseInQuad,
    /// Quadratic deceleration to rest
    EaseOutQuad,
    /// Quadratic acceleration then deceleration
    EaseInOutQuad,
    /// Cubic acceleration from rest
    EaseInCubic,
    /// Cubic deceleration to rest: fast start, gentle arrival
    #[default]
    EaseOutCubic,
    /// Cubic acceleration then deceleration
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve to `t`, clamping `t` into `[0, 1]` first
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => t * (2.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let p = t - 1.0;
                p * p * p + 1.0
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let p = 2.0 * t - 2.0;
                    0.5 * p * p * p + 1.0
                }
            }
        }
    }
}
