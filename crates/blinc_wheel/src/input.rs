//! Input controller
//!
//! Consumes pointer and wheel input and turns it into either direct scroll
//! updates (drag) or release decisions (click-to-step, fling) for the
//! picker to animate.
//!
//! Each drag is a gesture subscription identified by a [`GestureToken`].
//! The token is issued on pointer-down and revoked on pointer-up, cancel, a
//! newer pointer-down, or unmount. Move and up events carrying a revoked
//! token are ignored, so a late event from an old gesture can never drive
//! the wheel.

use std::time::{Duration, Instant};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::config::{PhysicsTuning, WheelConfig};
use crate::options::normalize;
use crate::projector::SegmentTable;

new_key_type! {
    /// Live subscription to one drag gesture
    pub struct GestureToken;
}

/// A pointer position sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Vertical position relative to the top of the control, in pixels
    pub y: f32,
    pub time: Instant,
}

/// How a drag ended
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// The pointer never left the click threshold; step toward the tapped item
    Click { step: i32 },
    /// The pointer moved; decay with this velocity in items/s
    Fling { velocity: f32 },
}

/// State of one drag, alive between pointer-down and pointer-up
#[derive(Clone, Debug)]
pub struct DragSession {
    start_y: f32,
    scroll_at_start: f32,
    history: SmallVec<[PointerSample; 5]>,
    history_len: usize,
    is_click: bool,
}

impl DragSession {
    fn new(sample: PointerSample, scroll_at_start: f32, history_len: usize) -> Self {
        let mut history = SmallVec::new();
        history.push(sample);
        Self {
            start_y: sample.y,
            scroll_at_start,
            history,
            history_len: history_len.max(2),
            is_click: true,
        }
    }

    pub fn start_y(&self) -> f32 {
        self.start_y
    }

    pub fn scroll_at_start(&self) -> f32 {
        self.scroll_at_start
    }

    /// Whether the gesture has stayed within the click threshold so far
    pub fn is_click(&self) -> bool {
        self.is_click
    }

    /// Recent samples, oldest first
    pub fn history(&self) -> &[PointerSample] {
        &self.history
    }

    fn record(&mut self, sample: PointerSample, click_threshold: f32) {
        if self.history.len() >= self.history_len {
            self.history.remove(0);
        }
        self.history.push(sample);
        self.track_click(sample.y, click_threshold);
    }

    fn track_click(&mut self, y: f32, click_threshold: f32) {
        if (y - self.start_y).abs() > click_threshold {
            self.is_click = false;
        }
    }

    /// Release velocity in items/s from the last two samples
    ///
    /// Dragging up scrolls forward, so the sign is flipped relative to the
    /// pointer's movement.
    pub fn velocity(&self, item_height: f32, max_velocity: f32) -> f32 {
        let [.., prev, last] = self.history.as_slice() else {
            return 0.0;
        };
        let dt = last.time.saturating_duration_since(prev.time).as_secs_f32();
        if dt <= 0.0 || item_height <= 0.0 {
            return 0.0;
        }
        let velocity = -(last.y - prev.y) / dt / item_height;
        velocity.clamp(-max_velocity, max_velocity)
    }
}

/// Accepts at most one wheel event per debounce window
#[derive(Clone, Copy, Debug)]
pub struct WheelGate {
    debounce: Duration,
    last_accepted: Option<Instant>,
}

impl WheelGate {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_accepted: None,
        }
    }

    /// Try to accept an event at `time`
    pub fn accept(&mut self, time: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if time.saturating_duration_since(last) < self.debounce {
                return false;
            }
        }
        self.last_accepted = Some(time);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

/// Pointer and wheel state machine
#[derive(Debug)]
pub struct InputController {
    mounted: bool,
    sessions: SlotMap<GestureToken, DragSession>,
    active: Option<GestureToken>,
    wheel_gate: WheelGate,
    infinite: bool,
    item_height: f32,
    tuning: PhysicsTuning,
}

impl InputController {
    pub fn new(config: &WheelConfig) -> Self {
        Self {
            mounted: false,
            sessions: SlotMap::with_key(),
            active: None,
            wheel_gate: WheelGate::new(Duration::from_millis(config.tuning.wheel_debounce_ms)),
            infinite: config.infinite,
            item_height: config.item_height,
            tuning: config.tuning,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Attach the input surface
    pub fn mount(&mut self) {
        self.mounted = true;
    }

    /// Detach the input surface and revoke any live gesture
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.revoke();
        self.wheel_gate.reset();
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The live gesture token, if a drag is in progress
    pub fn active_token(&self) -> Option<GestureToken> {
        self.active
    }

    /// The live drag session, if any
    pub fn session(&self) -> Option<&DragSession> {
        self.active.and_then(|token| self.sessions.get(token))
    }

    /// Start a drag at `sample` with the wheel at `scroll`
    ///
    /// Returns `None` while unmounted. A drag already in progress is revoked.
    pub fn pointer_down(&mut self, sample: PointerSample, scroll: f32) -> Option<GestureToken> {
        if !self.mounted {
            return None;
        }
        self.revoke();

        let session = DragSession::new(sample, scroll, self.tuning.history_len);
        let token = self.sessions.insert(session);
        self.active = Some(token);
        tracing::debug!(
            "WheelPicker: drag start {:?} y={:.1} scroll={:.3}",
            token,
            sample.y,
            scroll
        );
        Some(token)
    }

    /// Follow the pointer, returning the new scroll position
    ///
    /// Returns `None` if `token` is not the live gesture. `len` is the
    /// working list length.
    pub fn pointer_move(
        &mut self,
        token: GestureToken,
        sample: PointerSample,
        len: usize,
    ) -> Option<f32> {
        if self.active != Some(token) {
            return None;
        }
        let click_threshold = self.tuning.click_threshold_px;
        let session = self.sessions.get_mut(token)?;
        session.record(sample, click_threshold);

        let delta = (session.start_y - sample.y) / self.item_height;
        let next = session.scroll_at_start + delta;
        Some(self.constrain(next, len))
    }

    /// End the drag and decide what happens next
    ///
    /// Returns `None` if `token` is not the live gesture. `segments` maps a
    /// tap position to the item under it.
    pub fn pointer_up(
        &mut self,
        token: GestureToken,
        sample: PointerSample,
        segments: &SegmentTable,
    ) -> Option<Release> {
        if self.active != Some(token) {
            return None;
        }
        self.active = None;
        let mut session = self.sessions.remove(token)?;
        session.track_click(sample.y, self.tuning.click_threshold_px);

        let release = if session.is_click {
            let step = segments.hit(sample.y).map(|s| s.step()).unwrap_or(0);
            Release::Click { step }
        } else {
            Release::Fling {
                velocity: session.velocity(self.item_height, self.tuning.max_velocity),
            }
        };
        tracing::debug!("WheelPicker: drag end {:?} -> {:?}", token, release);
        Some(release)
    }

    /// Abandon the drag without a click or fling
    ///
    /// Returns false if `token` is not the live gesture.
    pub fn pointer_cancel(&mut self, token: GestureToken) -> bool {
        if self.active != Some(token) {
            return false;
        }
        self.revoke();
        tracing::debug!("WheelPicker: drag cancelled {:?}", token);
        true
    }

    /// Gate a wheel event, returning the step it contributes
    ///
    /// Rejected while unmounted, while dragging, for zero deltas and inside
    /// the debounce window of the last accepted event.
    pub fn wheel(&mut self, delta_y: f32, time: Instant) -> Option<i32> {
        if !self.mounted || self.is_dragging() {
            return None;
        }
        if delta_y == 0.0 || !delta_y.is_finite() {
            return None;
        }
        if !self.wheel_gate.accept(time) {
            tracing::debug!("WheelPicker: wheel event debounced");
            return None;
        }
        Some(if delta_y > 0.0 { 1 } else { -1 })
    }

    /// Wrap (looping) or rubber-band (bounded) a raw drag position
    ///
    /// The rubber band starts past `[0, len]`. Positions between the last
    /// item and `len` follow the pointer and snap back on release.
    fn constrain(&self, next: f32, len: usize) -> f32 {
        if self.infinite {
            return normalize(next, len);
        }
        if len == 0 {
            return 0.0;
        }
        let max = len as f32;
        let resistance = self.tuning.resistance;
        if next < 0.0 {
            next * resistance
        } else if next > max {
            max + (next - max) * resistance
        } else {
            next
        }
    }

    fn revoke(&mut self) {
        self.active = None;
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;

    fn controller(config: WheelConfig) -> InputController {
        let mut input = InputController::new(&config);
        input.mount();
        input
    }

    fn at(t0: Instant, ms: u64, y: f32) -> PointerSample {
        PointerSample {
            y,
            time: t0 + Duration::from_millis(ms),
        }
    }

    fn table() -> SegmentTable {
        SegmentTable::new(&Geometry::new(20, 30.0))
    }

    #[test]
    fn test_unmounted_input_is_ignored() {
        let t0 = Instant::now();
        let mut input = InputController::new(&WheelConfig::default());
        assert!(input.pointer_down(at(t0, 0, 50.0), 0.0).is_none());
        assert!(input.wheel(1.0, t0).is_none());
    }

    #[test]
    fn test_drag_maps_one_to_one() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default().item_height(30.0));
        let token = input.pointer_down(at(t0, 0, 100.0), 2.0).unwrap();

        // Up by 1.5 items
        let scroll = input.pointer_move(token, at(t0, 16, 55.0), 10).unwrap();
        assert!((scroll - 3.5).abs() < 1e-5);
        assert!(!input.session().unwrap().is_click());
    }

    #[test]
    fn test_bounded_drag_resistance() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default().item_height(30.0));
        let token = input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();

        // One item past the top
        let scroll = input.pointer_move(token, at(t0, 16, 130.0), 5).unwrap();
        assert!((scroll + 0.3).abs() < 1e-5);

        // Between the last item and the list length: no damping
        let scroll = input.pointer_move(token, at(t0, 32, -35.0), 5).unwrap();
        assert!((scroll - 4.5).abs() < 1e-4);

        // One item past the list length (len = 5)
        let scroll = input.pointer_move(token, at(t0, 48, -80.0), 5).unwrap();
        assert!((scroll - 5.3).abs() < 1e-4);
    }

    #[test]
    fn test_infinite_drag_wraps() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::looping().item_height(30.0));
        let token = input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();

        let scroll = input.pointer_move(token, at(t0, 16, 130.0), 10).unwrap();
        assert!((scroll - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_history_is_capped() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default());
        let token = input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();
        for i in 1..10 {
            input.pointer_move(token, at(t0, i * 10, 100.0 - i as f32), 10);
        }
        let history = input.session().unwrap().history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[4].y, 91.0);
    }

    #[test]
    fn test_fling_velocity_from_last_two_samples() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default().item_height(30.0));
        let token = input.pointer_down(at(t0, 0, 150.0), 0.0).unwrap();
        input.pointer_move(token, at(t0, 50, 140.0), 10);
        // 30px up in 100ms = 10 items/s forward
        input.pointer_move(token, at(t0, 150, 110.0), 10);

        match input.pointer_up(token, at(t0, 150, 110.0), &table()) {
            Some(Release::Fling { velocity }) => assert!((velocity - 10.0).abs() < 1e-3),
            other => panic!("expected fling, got {:?}", other),
        }
        assert!(!input.is_dragging());
    }

    #[test]
    fn test_fling_velocity_is_capped() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default().item_height(30.0));
        let token = input.pointer_down(at(t0, 0, 150.0), 0.0).unwrap();
        input.pointer_move(token, at(t0, 1, 149.0), 10);
        input.pointer_move(token, at(t0, 2, 0.0), 10);

        match input.pointer_up(token, at(t0, 2, 0.0), &table()) {
            Some(Release::Fling { velocity }) => assert_eq!(velocity, 30.0),
            other => panic!("expected fling, got {:?}", other),
        }
    }

    #[test]
    fn test_click_maps_to_segment_step() {
        let t0 = Instant::now();
        let geometry = Geometry::new(20, 30.0);
        let segments = SegmentTable::new(&geometry);
        let mut input = controller(WheelConfig::default().item_height(30.0));

        let center = geometry.container_height * 0.5;
        let token = input.pointer_down(at(t0, 0, center), 0.0).unwrap();
        input.pointer_move(token, at(t0, 10, center + 2.0), 10);
        assert_eq!(
            input.pointer_up(token, at(t0, 20, center + 2.0), &segments),
            Some(Release::Click { step: 0 })
        );

        // Tap on the face just below center steps forward by one
        let below = segments.segments()[5];
        let y = (below.start + below.end) * 0.5;
        let token = input.pointer_down(at(t0, 100, y), 0.0).unwrap();
        assert_eq!(
            input.pointer_up(token, at(t0, 110, y), &segments),
            Some(Release::Click { step: 1 })
        );
    }

    #[test]
    fn test_stale_tokens_are_rejected() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default());
        let first = input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();
        let second = input.pointer_down(at(t0, 10, 100.0), 0.0).unwrap();

        assert_ne!(first, second);
        assert!(input.pointer_move(first, at(t0, 20, 50.0), 10).is_none());
        assert!(input.pointer_up(first, at(t0, 20, 50.0), &table()).is_none());
        assert!(!input.pointer_cancel(first));

        assert!(input.pointer_cancel(second));
        assert!(input.pointer_move(second, at(t0, 30, 50.0), 10).is_none());
    }

    #[test]
    fn test_unmount_revokes_gesture() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default());
        let token = input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();
        input.unmount();

        assert!(!input.is_dragging());
        assert!(input.pointer_move(token, at(t0, 10, 50.0), 10).is_none());
    }

    #[test]
    fn test_wheel_debounce() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default());

        assert_eq!(input.wheel(40.0, t0), Some(1));
        assert_eq!(input.wheel(40.0, t0 + Duration::from_millis(50)), None);
        assert_eq!(input.wheel(-3.0, t0 + Duration::from_millis(100)), Some(-1));
        assert_eq!(input.wheel(0.0, t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_wheel_rejected_while_dragging() {
        let t0 = Instant::now();
        let mut input = controller(WheelConfig::default());
        input.pointer_down(at(t0, 0, 100.0), 0.0).unwrap();
        assert_eq!(input.wheel(1.0, t0), None);
    }
}
