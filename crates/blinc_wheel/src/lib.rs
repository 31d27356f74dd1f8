//! Blinc Wheel Picker
//!
//! Interaction and physics engine for an iOS-style barrel selector: a
//! vertical ring of discrete options that can be dragged, flicked, tapped
//! or stepped with a mouse wheel, and always comes to rest on exactly one
//! option.
//!
//! # Features
//!
//! - **Geometry**: Ring angle, radius and container height from two parameters
//! - **Looping Wheels**: Short option lists are repeated and wrapped seamlessly
//! - **Projection**: Per-item 3D transforms, quarter-turn culling and tap segments
//! - **Input**: Drag with rubber-band overscroll, fling, tap-to-step, debounced wheel
//! - **Selection**: Settled, de-duplicated value change notifications
//!
//! The engine paints nothing itself. A rendering layer receives
//! [`WheelFrame`]s through [`FrameSink`] and maps them onto its own
//! elements.
//!
//! # Example
//!
//! ```
//! use blinc_wheel::{WheelConfig, WheelOption, WheelPicker};
//!
//! let hours = (0..24u32).map(WheelOption::from).collect();
//! let mut picker = WheelPicker::new(hours, WheelConfig::looping().visible_count(16))
//!     .with_model_value(9)
//!     .on_change(|hour| println!("hour: {hour}"));
//! picker.mount();
//!
//! assert_eq!(picker.selected_value(), Some(&9));
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod options;
pub mod picker;
pub mod projector;
pub mod selection;
pub mod state;

pub use config::{PhysicsTuning, WheelConfig};
pub use error::{Result, WheelError};
pub use geometry::Geometry;
pub use input::{DragSession, GestureToken, PointerSample, Release};
pub use options::{build_ring_items, build_working_list, normalize, RingItem, WheelOption};
pub use picker::{ChangeCallback, Completion, WheelPicker};
pub use projector::{
    FrameSink, ItemTransform, Projector, Segment, SegmentTable, WheelFrame, WheelTransform,
};
pub use selection::resolve_index;
pub use state::{PickerEvent, PickerState};
