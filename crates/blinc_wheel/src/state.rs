//! Interaction state
//!
//! The picker is always in exactly one of three phases. Transitions are
//! driven by [`PickerEvent`]s; events that make no sense in the current
//! phase are ignored.

/// Interaction phase of a picker
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PickerState {
    /// At rest on a settled index
    #[default]
    Idle,
    /// A pointer is down and the wheel follows it
    Dragging,
    /// A tween is driving the scroll position
    Animating,
}

/// Events that move a picker between phases
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickerEvent {
    /// A pointer was pressed on the wheel
    PointerDown,
    /// The active pointer was released
    PointerUp,
    /// A scheduled animation began
    AnimationStart,
    /// The in-flight animation completed
    AnimationEnd,
    /// The gesture or animation was abandoned
    Cancel,
}

impl PickerState {
    /// Returns true if the wheel may be moving
    pub fn is_active(&self) -> bool {
        !matches!(self, PickerState::Idle)
    }

    /// Returns true while a pointer drives the wheel
    pub fn is_dragging(&self) -> bool {
        matches!(self, PickerState::Dragging)
    }

    /// Returns true while a tween drives the wheel
    pub fn is_animating(&self) -> bool {
        matches!(self, PickerState::Animating)
    }

    /// Next phase after `event`, or `None` if the event is ignored
    pub fn on_event(&self, event: PickerEvent) -> Option<Self> {
        use PickerEvent::*;

        match (self, event) {
            // Press grabs the wheel, interrupting any animation
            (PickerState::Idle, PointerDown) => Some(PickerState::Dragging),
            (PickerState::Animating, PointerDown) => Some(PickerState::Dragging),

            // Release returns to rest; a fling follows with AnimationStart
            (PickerState::Dragging, PointerUp) => Some(PickerState::Idle),
            (PickerState::Dragging, Cancel) => Some(PickerState::Idle),

            // Wheel steps and programmatic animations
            (PickerState::Idle, AnimationStart) => Some(PickerState::Animating),
            (PickerState::Animating, AnimationStart) => None,

            (PickerState::Animating, AnimationEnd) => Some(PickerState::Idle),
            (PickerState::Animating, Cancel) => Some(PickerState::Idle),

            _ => None,
        }
    }

    /// Apply `event` in place, returning whether the phase changed
    pub fn apply(&mut self, event: PickerEvent) -> bool {
        match self.on_event(event) {
            Some(next) => {
                tracing::trace!("WheelPicker: {:?} --{:?}--> {:?}", self, event, next);
                *self = next;
                true
            }
            None => false,
        }
    }
}
