//! Barrel geometry
//!
//! Derives the ring constants from the two configuration values that shape
//! the wheel: how many item slots share the full circle and how tall each
//! item face is.

use crate::config::WheelConfig;

/// Derived ring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Angle between adjacent items, in degrees
    pub item_angle: f32,
    /// Distance from the ring axis to an item face, in pixels
    pub radius: f32,
    /// Pixel height of the control
    pub container_height: f32,
    /// Items per quarter turn; items further than this from center are hidden
    pub quarter_count: i32,
    /// Height of one item face, in pixels
    pub item_height: f32,
    /// Item slots around the full ring
    pub visible_count: u32,
}

impl Geometry {
    /// Compute geometry for `visible_count` slots of `item_height` pixels
    ///
    /// Degenerate inputs (zero slots, zero height) produce non-finite or zero
    /// values rather than panicking.
    pub fn new(visible_count: u32, item_height: f32) -> Self {
        let item_angle = 360.0 / visible_count as f32;
        let radius = item_height / item_angle.to_radians().tan();
        let container_height = (2.0 * radius + item_height * 0.25).round();

        Self {
            item_angle,
            radius,
            container_height,
            quarter_count: (visible_count >> 2) as i32,
            item_height,
            visible_count,
        }
    }

    /// Compute geometry from a picker configuration
    pub fn from_config(config: &WheelConfig) -> Self {
        Self::new(config.visible_count, config.item_height)
    }

    /// Minimum working list length for a looping wheel
    ///
    /// `ceil(visible_count / 2)` keeps a full quarter turn of distinct items
    /// on both sides of center.
    pub fn min_loop_len(&self) -> usize {
        self.visible_count.div_ceil(2) as usize
    }
}
