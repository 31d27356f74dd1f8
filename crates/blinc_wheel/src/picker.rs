//! Wheel picker
//!
//! [`WheelPicker`] owns the scroll position and wires the pieces together:
//! input decides what the pointer or wheel wants, the frame driver animates
//! toward it, the projector turns every new position into a frame, and the
//! selection resolver reports settled values.
//!
//! The picker is driven imperatively. Hosts feed it input events and call
//! [`WheelPicker::tick`] once per frame while it reports more frames are
//! needed, then paint through [`WheelPicker::commit`].
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use blinc_wheel::{WheelConfig, WheelOption, WheelPicker};
//!
//! let options = ["a", "b", "c"].into_iter().map(WheelOption::from).collect();
//! let mut picker = WheelPicker::new(options, WheelConfig::default())
//!     .with_default_value("b");
//! picker.mount();
//! assert_eq!(picker.selected_index(), Some(1));
//!
//! let t0 = Instant::now();
//! picker.wheel(40.0, t0);
//! let mut now = t0;
//! while picker.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(picker.selected_value(), Some(&"c"));
//! ```

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use blinc_animation::{
    duration_for_distance, Animate, AnimationId, FrameDriver, FrameStatus, Momentum,
};

use crate::config::WheelConfig;
use crate::error::Result;
use crate::geometry::Geometry;
use crate::input::{GestureToken, InputController, PointerSample, Release};
use crate::options::{build_ring_items, build_working_list, RingItem, WheelOption};
use crate::projector::{FrameSink, Projector, SegmentTable, WheelFrame};
use crate::selection::{find_index, resolve_index, Selection};
use crate::state::{PickerEvent, PickerState};

/// Callback invoked with each settled, de-duplicated value change
pub type ChangeCallback<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// What happens when an animation reaches its end value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    /// Leave the wheel where the animation stopped
    #[default]
    Stay,
    /// Settle on the nearest item and report the value
    Resolve,
}

/// An iOS-style barrel selector over a list of options
pub struct WheelPicker<V> {
    config: WheelConfig,
    options: Vec<WheelOption<V>>,
    working: Vec<WheelOption<V>>,
    ring: Vec<RingItem>,
    projector: Projector,
    segments: SegmentTable,
    input: InputController,
    driver: FrameDriver,
    pending: Option<(AnimationId, Completion)>,
    state: PickerState,
    scroll: f32,
    selected_index: Option<usize>,
    selection: Selection<V>,
    model_value: Option<V>,
    default_value: Option<V>,
    frame: WheelFrame,
    needs_commit: bool,
    on_change: Option<ChangeCallback<V>>,
}

impl<V: Clone + PartialEq + Debug> WheelPicker<V> {
    /// Build a picker without checking `config`
    ///
    /// An invalid configuration yields degenerate geometry but never
    /// panics. Use [`WheelPicker::try_new`] to reject it up front.
    pub fn new(options: Vec<WheelOption<V>>, config: WheelConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!("WheelPicker: degenerate configuration: {}", err);
        }

        let projector = Projector::new(&config);
        let segments = SegmentTable::new(projector.geometry());
        let working = build_working_list(&options, config.infinite, config.visible_count);
        let ring = build_ring_items(&working, projector.geometry(), config.infinite);

        let mut picker = Self {
            config,
            options,
            working,
            ring,
            projector,
            segments,
            input: InputController::new(&config),
            driver: FrameDriver::new(),
            pending: None,
            state: PickerState::Idle,
            scroll: 0.0,
            selected_index: None,
            selection: Selection::default(),
            model_value: None,
            default_value: None,
            frame: WheelFrame::default(),
            needs_commit: false,
            on_change: None,
        };
        picker.reproject();
        picker
    }

    /// Build a picker, rejecting an invalid configuration
    pub fn try_new(options: Vec<WheelOption<V>>, config: WheelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(options, config))
    }

    /// Set the caller's current value
    pub fn with_model_value(mut self, value: V) -> Self {
        self.model_value = Some(value);
        self
    }

    /// Set the value selected on mount when no model value is given
    pub fn with_default_value(mut self, value: V) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Register the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Attach input and select the initial value
    ///
    /// The initial value is the model value, else the default value. It is
    /// treated as already reported, so mounting on it emits nothing. With no
    /// usable initial value the first option is selected and reported.
    pub fn mount(&mut self) {
        if self.input.is_mounted() {
            return;
        }
        self.input.mount();
        tracing::debug!(
            "WheelPicker: mount with {} options ({} working)",
            self.options.len(),
            self.working.len()
        );

        let initial = self.model_value.clone().or_else(|| self.default_value.clone());
        self.selection.set(initial.clone());

        match initial {
            Some(value) if find_index(&self.working, &value).is_some() => {
                self.select_by_value(&value);
            }
            Some(value) => {
                tracing::warn!("WheelPicker: initial value {:?} not in options", value);
                self.settle_at(0);
            }
            None => {
                self.settle_at(0);
            }
        }
    }

    /// Detach input, revoke any gesture and stop any animation
    pub fn unmount(&mut self) {
        if !self.input.is_mounted() {
            return;
        }
        self.input.unmount();
        self.stop_animation();
        self.state = PickerState::Idle;
        tracing::debug!("WheelPicker: unmount");
    }

    pub fn is_mounted(&self) -> bool {
        self.input.is_mounted()
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Press at `y` pixels from the top of the control
    ///
    /// Returns the gesture token move and up events must present, or `None`
    /// while unmounted.
    pub fn pointer_down(&mut self, y: f32, now: Instant) -> Option<GestureToken> {
        let token = self
            .input
            .pointer_down(PointerSample { y, time: now }, self.scroll)?;
        self.stop_animation();
        self.state.apply(PickerEvent::PointerDown);
        Some(token)
    }

    /// Follow the pointer; returns false if `token` is stale
    pub fn pointer_move(&mut self, token: GestureToken, y: f32, now: Instant) -> bool {
        let sample = PointerSample { y, time: now };
        match self.input.pointer_move(token, sample, self.working.len()) {
            Some(next) => {
                self.set_scroll(next);
                true
            }
            None => false,
        }
    }

    /// Release the pointer; returns false if `token` is stale
    ///
    /// A release inside the click threshold steps toward the tapped item.
    /// Any other release flings with the pointer's last velocity.
    pub fn pointer_up(&mut self, token: GestureToken, y: f32, now: Instant) -> bool {
        let sample = PointerSample { y, time: now };
        let Some(release) = self.input.pointer_up(token, sample, &self.segments) else {
            return false;
        };
        self.state.apply(PickerEvent::PointerUp);

        match release {
            Release::Click { step } => {
                let target = self.clamp_target(self.scroll + step as f32);
                let duration = self.step_duration(step);
                self.animate(self.scroll, target, duration, now, Completion::Resolve);
            }
            Release::Fling { velocity } => self.momentum_decelerate(velocity, now),
        }
        true
    }

    /// Abandon the gesture and settle as if released without velocity
    pub fn pointer_cancel(&mut self, token: GestureToken, now: Instant) -> bool {
        if !self.input.pointer_cancel(token) {
            return false;
        }
        self.state.apply(PickerEvent::Cancel);
        self.momentum_decelerate(0.0, now);
        true
    }

    /// Step one item in the direction of `delta_y`
    ///
    /// Returns false if the event was rejected (unmounted, dragging, zero
    /// delta, or debounced). Unlike a strict idle-only wheel, an event that
    /// arrives while an animation runs is accepted: it restarts the animation
    /// from the current scroll position toward one item past the old target.
    pub fn wheel(&mut self, delta_y: f32, now: Instant) -> bool {
        let Some(step) = self.input.wheel(delta_y, now) else {
            return false;
        };
        if self.working.is_empty() {
            return false;
        }

        let base = self
            .driver
            .active()
            .map(|tween| tween.to())
            .unwrap_or(self.scroll)
            .round();
        let target = self.clamp_target(base + step as f32);
        let duration = self.step_duration(1);
        tracing::debug!("WheelPicker: wheel step {:+} -> {:.0}", step, target);
        self.animate(self.scroll, target, duration, now, Completion::Resolve);
        true
    }

    // ========================================================================
    // Animation
    // ========================================================================

    /// Advance the in-flight animation to `now`
    ///
    /// Returns true while more frames are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.driver.tick(now) {
            FrameStatus::Idle => false,
            FrameStatus::Running(value) => {
                self.set_scroll(value);
                true
            }
            FrameStatus::Finished { id, value } => {
                self.set_scroll(value);
                self.state.apply(PickerEvent::AnimationEnd);
                if let Some((pending, Completion::Resolve)) = self.pending.take() {
                    if pending == id {
                        self.resolve();
                    }
                }
                self.driver.is_running()
            }
        }
    }

    /// Animate the scroll position from `start` to `end`
    ///
    /// Cancels any in-flight animation and ends any drag first. When there is
    /// nothing to animate the end value is applied at once, and `completion`
    /// still runs.
    pub fn animate(
        &mut self,
        start: f32,
        end: f32,
        duration_secs: f32,
        now: Instant,
        completion: Completion,
    ) {
        self.end_drag();
        self.pending = None;

        match self.driver.animate(start, end, duration_secs, now) {
            Animate::Immediate(value) => {
                self.state.apply(PickerEvent::Cancel);
                self.set_scroll(value);
                if completion == Completion::Resolve {
                    self.resolve();
                }
            }
            Animate::Scheduled(id) => {
                self.pending = Some((id, completion));
                self.state.apply(PickerEvent::AnimationStart);
                self.set_scroll(start);
            }
        }
    }

    /// Decay from the current position with `velocity` items/s
    ///
    /// Bounded wheels already past an end snap back to it instead. Targets
    /// past an end are clamped and retimed from the clamped distance.
    pub fn momentum_decelerate(&mut self, velocity: f32, now: Instant) {
        let len = self.working.len();
        if len == 0 {
            return;
        }
        let start = self.scroll;
        let tuning = self.config.tuning;

        if !self.config.infinite {
            let max = (len - 1) as f32;
            if start < 0.0 || start > max {
                let bound = start.clamp(0.0, max);
                let duration = duration_for_distance(bound - start, tuning.snap_back_deceleration);
                tracing::debug!("WheelPicker: snap back {:.3} -> {:.0}", start, bound);
                self.animate(start, bound, duration, now, Completion::Resolve);
                return;
            }
        }

        let deceleration = self.config.deceleration();
        let momentum = Momentum::project(start, velocity, deceleration);
        let mut target = momentum.target;
        let mut duration = momentum.duration;

        if !self.config.infinite {
            let clamped = target.clamp(0.0, (len - 1) as f32);
            if clamped != target {
                target = clamped;
                duration = duration_for_distance(target - start, deceleration);
            }
        }
        if duration <= 0.0 && target != start {
            // No velocity left to carry the wheel; ease onto the nearest item
            duration = duration_for_distance(target - start, tuning.snap_back_deceleration);
        }

        tracing::debug!(
            "WheelPicker: momentum v={:.2} {:.3} -> {:.0} over {:.3}s",
            velocity,
            start,
            target,
            duration
        );
        self.animate(start, target, duration, now, Completion::Resolve);
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Settle on the item under the current scroll position
    ///
    /// Returns the value if it was reported as a change. Bounded wheels that
    /// are still overscrolled do not settle.
    pub fn resolve(&mut self) -> Option<V> {
        let len = self.working.len();
        let Some(index) = resolve_index(self.scroll, len, self.config.infinite) else {
            if len > 0 {
                tracing::debug!("WheelPicker: unsettled at {:.3}, not resolving", self.scroll);
            }
            return None;
        };

        self.selected_index = Some(index);
        self.set_scroll(index as f32);

        let value = self.working[index].value.clone();
        if !self.selection.update(&value) {
            return None;
        }
        tracing::debug!("WheelPicker: selected {:?} at {}", value, index);
        self.model_value = Some(value.clone());
        if let Some(callback) = &self.on_change {
            callback(&value);
        }
        Some(value)
    }

    /// Jump to the first item holding `value`
    ///
    /// Unknown values are ignored.
    pub fn select_by_value(&mut self, value: &V) -> Option<V> {
        let Some(index) = find_index(&self.working, value) else {
            tracing::warn!("WheelPicker: value {:?} not in options", value);
            return None;
        };
        self.settle_at(index)
    }

    /// Push a new value from the caller
    ///
    /// Jumps to it without animating when it differs from the tracked value.
    pub fn set_model_value(&mut self, value: V) -> Option<V> {
        if self.selection.current() == Some(&value) {
            self.model_value = Some(value);
            return None;
        }
        self.select_by_value(&value)
    }

    /// Replace the option list
    ///
    /// Stops any gesture or animation. While mounted the tracked value is
    /// re-selected, or the first option if it disappeared.
    pub fn set_options(&mut self, options: Vec<WheelOption<V>>) -> Option<V> {
        self.end_drag();
        self.stop_animation();
        self.state = PickerState::Idle;

        let infinite = self.config.infinite;
        self.working = build_working_list(&options, infinite, self.config.visible_count);
        self.ring = build_ring_items(&self.working, self.projector.geometry(), infinite);
        self.options = options;
        self.selected_index = None;
        self.scroll = 0.0;
        tracing::debug!(
            "WheelPicker: options replaced, {} working",
            self.working.len()
        );

        if !self.is_mounted() {
            self.reproject();
            return None;
        }

        let index = self
            .selection
            .current()
            .and_then(|value| find_index(&self.working, value))
            .unwrap_or(0);
        self.settle_at(index)
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Paint the latest frame if it has not been painted yet
    pub fn commit(&mut self, sink: &mut impl FrameSink) -> bool {
        if !self.needs_commit {
            return false;
        }
        self.needs_commit = false;
        sink.commit(&self.frame);
        true
    }

    /// Check and clear the pending-frame flag
    pub fn take_needs_commit(&mut self) -> bool {
        std::mem::take(&mut self.needs_commit)
    }

    /// The latest projected frame
    pub fn frame(&self) -> &WheelFrame {
        &self.frame
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Working list index of the last settled item
    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// The last reported value
    pub fn selected_value(&self) -> Option<&V> {
        self.selection.current()
    }

    pub fn model_value(&self) -> Option<&V> {
        self.model_value.as_ref()
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        self.projector.geometry()
    }

    pub fn segments(&self) -> &SegmentTable {
        &self.segments
    }

    pub fn options(&self) -> &[WheelOption<V>] {
        &self.options
    }

    pub fn working_list(&self) -> &[WheelOption<V>] {
        &self.working
    }

    pub fn ring_items(&self) -> &[RingItem] {
        &self.ring
    }

    /// Whether the wheel rests on an item with no gesture or animation
    pub fn is_settled(&self) -> bool {
        self.state == PickerState::Idle && self.scroll.fract() == 0.0
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn settle_at(&mut self, index: usize) -> Option<V> {
        if self.working.is_empty() {
            return None;
        }
        self.end_drag();
        self.stop_animation();
        self.state.apply(PickerEvent::Cancel);
        self.scroll = index as f32;
        self.resolve()
    }

    fn stop_animation(&mut self) {
        self.pending = None;
        self.driver.cancel();
    }

    fn end_drag(&mut self) {
        if let Some(token) = self.input.active_token() {
            self.input.pointer_cancel(token);
            self.state.apply(PickerEvent::Cancel);
        }
    }

    fn clamp_target(&self, target: f32) -> f32 {
        if self.config.infinite || self.working.is_empty() {
            return target;
        }
        target.clamp(0.0, (self.working.len() - 1) as f32)
    }

    fn step_duration(&self, step: i32) -> f32 {
        (step.unsigned_abs() as f32 / self.config.scroll_sensitivity).sqrt()
    }

    fn set_scroll(&mut self, scroll: f32) {
        if !scroll.is_finite() {
            tracing::warn!("WheelPicker: ignoring non-finite scroll");
            return;
        }
        self.scroll = scroll;
        self.reproject();
        tracing::trace!("WheelPicker: scroll {:.4}", scroll);
    }

    fn reproject(&mut self) {
        self.frame = self
            .projector
            .project(self.scroll, &self.ring, self.working.len());
        self.needs_commit = true;
    }
}
