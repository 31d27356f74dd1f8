//! Wheel picker configuration
//!
//! [`WheelConfig`] is fixed for the lifetime of a picker. Changing it means
//! building a new picker. All fields have serde defaults so a config file
//! only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WheelError};

// ============================================================================
// Physics Tuning
// ============================================================================

/// Empirical "feel" constants for drag, flick and wheel handling
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Fraction of drag movement applied past the ends of a bounded list
    pub resistance: f32,
    /// Release velocity cap in items/second
    pub max_velocity: f32,
    /// Minimum spacing between accepted wheel events, in milliseconds
    pub wheel_debounce_ms: u64,
    /// Pointer travel in pixels after which a press is no longer a tap
    pub click_threshold_px: f32,
    /// Deceleration in items/s² used to pull an overscrolled list back in
    pub snap_back_deceleration: f32,
    /// Flick deceleration per unit of drag sensitivity, in items/s²
    pub deceleration_factor: f32,
    /// Number of pointer samples kept for velocity estimation
    pub history_len: usize,
    /// Lowest opacity reached by the optional fade
    pub fade_floor: f32,
    /// Fraction of the quarter turn over which the fade reaches its floor
    pub fade_span: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            resistance: 0.3,
            max_velocity: 30.0,
            wheel_debounce_ms: 100,
            click_threshold_px: 5.0,
            snap_back_deceleration: 10.0,
            deceleration_factor: 10.0,
            history_len: 5,
            fade_floor: 0.2,
            fade_span: 0.8,
        }
    }
}

impl PhysicsTuning {
    fn validate(&self) -> Result<()> {
        let positive = [
            ("max_velocity", self.max_velocity),
            ("snap_back_deceleration", self.snap_back_deceleration),
            ("deceleration_factor", self.deceleration_factor),
            ("fade_span", self.fade_span),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(WheelError::InvalidTuning { name, value });
            }
        }

        let unit = [
            ("resistance", self.resistance),
            ("fade_floor", self.fade_floor),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(WheelError::InvalidTuning { name, value });
            }
        }

        if !(self.click_threshold_px.is_finite() && self.click_threshold_px >= 0.0) {
            return Err(WheelError::InvalidTuning {
                name: "click_threshold_px",
                value: self.click_threshold_px,
            });
        }
        if self.history_len < 2 {
            return Err(WheelError::InvalidTuning {
                name: "history_len",
                value: self.history_len as f32,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Wheel Configuration
// ============================================================================

/// Configuration for a wheel picker
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WheelConfig {
    /// Loop the option list seamlessly instead of stopping at the ends
    #[serde(default)]
    pub infinite: bool,
    /// Number of item slots around the full ring (a multiple of 4)
    #[serde(default = "default_visible_count")]
    pub visible_count: u32,
    /// Height of one item face in pixels
    #[serde(default = "default_item_height")]
    pub item_height: f32,
    /// Scales flick deceleration
    #[serde(default = "default_sensitivity")]
    pub drag_sensitivity: f32,
    /// Scales step animation speed for wheel ticks and taps
    #[serde(default = "default_sensitivity")]
    pub scroll_sensitivity: f32,
    /// Fade items toward the edge of the visible arc
    #[serde(default)]
    pub fade_opacity: bool,
    /// Feel constants
    #[serde(default)]
    pub tuning: PhysicsTuning,
}

fn default_visible_count() -> u32 {
    20
}

fn default_item_height() -> f32 {
    36.0
}

fn default_sensitivity() -> f32 {
    1.0
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            infinite: false,
            visible_count: default_visible_count(),
            item_height: default_item_height(),
            drag_sensitivity: default_sensitivity(),
            scroll_sensitivity: default_sensitivity(),
            fade_opacity: false,
            tuning: PhysicsTuning::default(),
        }
    }
}

impl WheelConfig {
    /// Create config for a looping wheel
    pub fn looping() -> Self {
        Self {
            infinite: true,
            ..Default::default()
        }
    }

    /// Enable or disable seamless looping
    pub fn infinite(mut self, infinite: bool) -> Self {
        self.infinite = infinite;
        self
    }

    /// Set the number of item slots around the ring
    pub fn visible_count(mut self, count: u32) -> Self {
        self.visible_count = count;
        self
    }

    /// Set the item height in pixels
    pub fn item_height(mut self, px: f32) -> Self {
        self.item_height = px;
        self
    }

    /// Set flick sensitivity
    pub fn drag_sensitivity(mut self, sensitivity: f32) -> Self {
        self.drag_sensitivity = sensitivity;
        self
    }

    /// Set wheel/tap step sensitivity
    pub fn scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }

    /// Enable the distance-based opacity fade
    pub fn fade_opacity(mut self, enabled: bool) -> Self {
        self.fade_opacity = enabled;
        self
    }

    /// Replace the feel constants
    pub fn tuning(mut self, tuning: PhysicsTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Flick deceleration magnitude in items/s²
    pub fn deceleration(&self) -> f32 {
        self.drag_sensitivity * self.tuning.deceleration_factor
    }

    /// Check the configuration contract
    ///
    /// Pickers built from an invalid config still run, but their geometry is
    /// degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.visible_count < 4 || self.visible_count % 4 != 0 {
            return Err(WheelError::InvalidVisibleCount(self.visible_count));
        }
        if !(self.item_height.is_finite() && self.item_height > 0.0) {
            return Err(WheelError::InvalidItemHeight(self.item_height));
        }
        let sensitivities = [
            ("Drag", self.drag_sensitivity),
            ("Scroll", self.scroll_sensitivity),
        ];
        for (name, value) in sensitivities {
            if !(value.is_finite() && value > 0.0) {
                return Err(WheelError::InvalidSensitivity { name, value });
            }
        }
        self.tuning.validate()
    }
}
