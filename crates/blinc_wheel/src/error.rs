//! Error types for blinc_wheel
//!
//! The engine itself never fails at runtime. These errors only come out of
//! configuration validation before a picker is built.

use thiserror::Error;

/// Configuration errors reported by [`crate::WheelConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    /// Visible item count must be a positive multiple of 4
    #[error("Visible count must be a positive multiple of 4, got {0}")]
    InvalidVisibleCount(u32),

    /// Item height must be positive and finite
    #[error("Item height must be positive, got {0}")]
    InvalidItemHeight(f32),

    /// Drag or scroll sensitivity must be positive and finite
    #[error("{name} sensitivity must be positive, got {value}")]
    InvalidSensitivity {
        /// Which sensitivity was rejected
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A physics tuning constant is out of range
    #[error("Invalid tuning constant `{name}`: {value}")]
    InvalidTuning {
        /// Field name in [`crate::PhysicsTuning`]
        name: &'static str,
        /// The rejected value
        value: f32,
    },
}

/// Result type for blinc_wheel operations
pub type Result<T> = std::result::Result<T, WheelError>;
