//! Render projection
//!
//! Turns a scroll position into per-item transform parameters for the
//! rendering layer. The barrel illusion comes from two transforms: every
//! item is rotated to its slot on the ring and pushed out by the radius,
//! then the whole ring is pulled back by the radius and rotated by the
//! scroll angle.
//!
//! The projector also owns the *segment table*: the pixel band each
//! visible item face covers in projection, used to map a tap to the item
//! under the pointer.

use crate::config::WheelConfig;
use crate::geometry::Geometry;
use crate::options::{normalize, RingItem};

// ============================================================================
// Frame Types
// ============================================================================

/// Transform applied to the whole ring
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelTransform {
    /// Depth translation in pixels (negative = away from viewer)
    pub translate_z: f32,
    /// Rotation about the horizontal axis, in degrees
    pub rotate_x: f32,
}

/// Transform and visibility of one ring slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    /// Signed slot position around the ring
    pub ring_index: i32,
    /// Index into the working list
    pub index: usize,
    /// Rotation about the horizontal axis, in degrees
    pub rotate_x: f32,
    /// Depth translation in pixels, applied after `rotate_x`
    pub translate_z: f32,
    /// Distance from center in item units
    pub distance: f32,
    /// False once the item has turned past a quarter of the ring
    pub visible: bool,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

impl ItemTransform {
    /// Net angle of the item face relative to the viewer, in degrees
    pub fn face_angle(&self, wheel: &WheelTransform) -> f32 {
        wheel.rotate_x + self.rotate_x
    }

    /// Vertical pixel offset of the face center from the control's center
    ///
    /// Negative values are above center.
    pub fn offset_y(&self, wheel: &WheelTransform) -> f32 {
        -self.translate_z * self.face_angle(wheel).to_radians().sin()
    }

    /// Apparent pixel height of the face after foreshortening
    pub fn projected_height(&self, wheel: &WheelTransform, item_height: f32) -> f32 {
        (item_height * self.face_angle(wheel).to_radians().cos()).max(0.0)
    }
}

/// Everything the rendering layer needs to paint one frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelFrame {
    /// Scroll position the frame was projected from
    pub scroll: f32,
    /// Ring-level transform
    pub wheel: WheelTransform,
    /// One entry per ring slot, in ring order
    pub items: Vec<ItemTransform>,
}

impl WheelFrame {
    /// Visible items, in ring order
    pub fn visible(&self) -> impl Iterator<Item = &ItemTransform> {
        self.items.iter().filter(|item| item.visible)
    }

    /// The item closest to center, if any is visible
    pub fn centered(&self) -> Option<&ItemTransform> {
        self.visible()
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Paints committed frames
///
/// Implemented by the rendering collaborator. Calls happen at most once per
/// projected frame and must be cheap.
pub trait FrameSink {
    fn commit(&mut self, frame: &WheelFrame);
}

impl<F> FrameSink for F
where
    F: FnMut(&WheelFrame),
{
    fn commit(&mut self, frame: &WheelFrame) {
        self(frame)
    }
}

// ============================================================================
// Segment Table
// ============================================================================

/// Pixel band covered by one visible item face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Position in the table, top to bottom
    pub index: usize,
    /// Item offset from center (positive = above center)
    pub relative: i32,
    /// Top edge in container pixels
    pub start: f32,
    /// Bottom edge in container pixels
    pub end: f32,
}

impl Segment {
    /// Scroll steps needed to bring this segment's item to center
    pub fn step(&self) -> i32 {
        -self.relative
    }
}

/// Tap hit-testing table for the front half of the ring
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentTable {
    segments: Vec<Segment>,
}

impl SegmentTable {
    /// Build the table for `geometry`
    ///
    /// Segments run from `quarter_count - 1` items above center down to
    /// `quarter_count - 1` below, each `item_height * cos(angle)` tall. The
    /// band is centered vertically in the container.
    pub fn new(geometry: &Geometry) -> Self {
        let reach = geometry.quarter_count - 1;
        if reach < 0 {
            return Self::default();
        }

        let heights: Vec<(i32, f32)> = (-reach..=reach)
            .rev()
            .map(|relative| {
                let angle = (geometry.item_angle * relative as f32).to_radians();
                (relative, geometry.item_height * angle.cos())
            })
            .collect();

        let total: f32 = heights.iter().map(|(_, h)| h).sum();
        let mut cursor = (geometry.container_height - total) * 0.5;

        let segments = heights
            .into_iter()
            .enumerate()
            .map(|(index, (relative, height))| {
                let start = cursor;
                cursor += height;
                Segment {
                    index,
                    relative,
                    start,
                    end: cursor,
                }
            })
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Find the segment containing container-relative `y`
    pub fn hit(&self, y: f32) -> Option<&Segment> {
        self.segments.iter().find(|s| y >= s.start && y < s.end)
    }
}

// ============================================================================
// Projector
// ============================================================================

/// Projects scroll positions into frames
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    geometry: Geometry,
    infinite: bool,
    /// (floor, span) of the optional opacity fade
    fade: Option<(f32, f32)>,
}

impl Projector {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            geometry: Geometry::from_config(config),
            infinite: config.infinite,
            fade: config
                .fade_opacity
                .then_some((config.tuning.fade_floor, config.tuning.fade_span)),
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Project `scroll` over `ring` for a working list of `len` entries
    pub fn project(&self, scroll: f32, ring: &[RingItem], len: usize) -> WheelFrame {
        let scroll = if self.infinite {
            normalize(scroll, len)
        } else {
            scroll
        };
        let g = &self.geometry;
        let quarter = g.quarter_count as f32;

        let items = ring
            .iter()
            .map(|slot| {
                let distance = (slot.ring_index as f32 - scroll).abs();
                ItemTransform {
                    ring_index: slot.ring_index,
                    index: slot.index,
                    rotate_x: -g.item_angle * slot.ring_index as f32,
                    translate_z: g.radius,
                    distance,
                    visible: distance <= quarter,
                    opacity: self.opacity(distance, quarter),
                }
            })
            .collect();

        WheelFrame {
            scroll,
            wheel: WheelTransform {
                translate_z: -g.radius,
                rotate_x: g.item_angle * scroll,
            },
            items,
        }
    }

    fn opacity(&self, distance: f32, quarter: f32) -> f32 {
        let Some((floor, span)) = self.fade else {
            return 1.0;
        };
        let reach = quarter * span;
        if reach <= 0.0 {
            return floor;
        }
        (1.0 - (1.0 - floor) * distance / reach).max(floor)
    }
}
