//! End-to-end picker scenarios

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use blinc_wheel::{
    build_working_list, normalize, Geometry, PickerState, SegmentTable, WheelConfig, WheelOption,
    WheelPicker,
};

fn letters(labels: &[&'static str]) -> Vec<WheelOption<&'static str>> {
    labels.iter().copied().map(WheelOption::from).collect()
}

fn recorder<V: Clone + Send + 'static>() -> (Arc<Mutex<Vec<V>>>, impl Fn(&V) + Send + Sync) {
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = emitted.clone();
    (emitted, move |value: &V| sink.lock().unwrap().push(value.clone()))
}

fn settle<V>(picker: &mut WheelPicker<V>, from: Instant) -> Instant
where
    V: Clone + PartialEq + std::fmt::Debug,
{
    let mut now = from;
    let mut frames = 0;
    while picker.tick(now) {
        now += Duration::from_millis(16);
        frames += 1;
        assert!(frames < 10_000, "animation never finished");
    }
    now
}

fn assert_settled<V: Clone + PartialEq + std::fmt::Debug>(picker: &WheelPicker<V>) {
    assert_eq!(picker.state(), PickerState::Idle);
    assert_eq!(picker.scroll().fract(), 0.0);
    let index = picker.selected_index().expect("settled picker has a selection");
    assert_eq!(picker.scroll(), index as f32);
    assert_eq!(
        picker.selected_value(),
        Some(&picker.working_list()[index].value)
    );
}

#[test]
fn wheel_step_emits_once_and_debounces() {
    let (emitted, on_change) = recorder::<&'static str>();
    let mut picker = WheelPicker::new(letters(&["A", "B", "C"]), WheelConfig::default())
        .with_default_value("B")
        .on_change(on_change);
    picker.mount();

    assert_eq!(picker.selected_index(), Some(1));
    assert!(emitted.lock().unwrap().is_empty());

    let t0 = Instant::now();
    assert!(picker.wheel(120.0, t0));
    assert!(!picker.wheel(120.0, t0 + Duration::from_millis(40)));
    settle(&mut picker, t0);

    assert_eq!(picker.selected_index(), Some(2));
    assert_eq!(*emitted.lock().unwrap(), vec!["C"]);
    assert_settled(&picker);
}

#[test]
fn wheel_inside_debounce_after_settle_is_ignored() {
    let (emitted, on_change) = recorder::<&'static str>();
    let config = WheelConfig::default().scroll_sensitivity(400.0);
    let mut picker = WheelPicker::new(letters(&["A", "B", "C"]), config)
        .with_model_value("B")
        .on_change(on_change);
    picker.mount();

    // A fast step finishes well inside the debounce window
    let t0 = Instant::now();
    assert!(picker.wheel(1.0, t0));
    let done = settle(&mut picker, t0);
    assert!(done < t0 + Duration::from_millis(100));

    assert!(!picker.wheel(1.0, done));
    assert!(!picker.tick(done + Duration::from_millis(16)));
    assert_eq!(picker.selected_index(), Some(2));
    assert_eq!(*emitted.lock().unwrap(), vec!["C"]);
}

#[test]
fn infinite_two_options_wrap() {
    let config = WheelConfig::looping().visible_count(20);
    let options = letters(&["X", "Y"]);
    let working = build_working_list(&options, true, config.visible_count);
    assert!(working.len() >= 10);
    assert_eq!(normalize(-1.0, working.len()), (working.len() - 1) as f32);

    let (emitted, on_change) = recorder::<&'static str>();
    let mut picker = WheelPicker::new(options, config)
        .with_model_value("X")
        .on_change(on_change);
    picker.mount();
    assert_eq!(picker.selected_index(), Some(0));
    assert_eq!(picker.ring_items().len(), working.len() + 10);

    let t0 = Instant::now();
    assert!(picker.wheel(-5.0, t0));
    settle(&mut picker, t0);

    assert_eq!(picker.selected_index(), Some(working.len() - 1));
    assert_eq!(picker.selected_value(), Some(&"Y"));
    assert_eq!(*emitted.lock().unwrap(), vec!["Y"]);
    assert_settled(&picker);
}

#[test]
fn normalization_is_periodic() {
    let n = 7;
    for s in [-13.25f32, -1.0, 0.0, 0.5, 3.75, 6.99] {
        for k in [-3i32, -1, 1, 4] {
            let shifted = s + (k * n as i32) as f32;
            assert!((normalize(s, n) - normalize(shifted, n)).abs() < 1e-3);
        }
    }
}

#[test]
fn repeated_resolve_emits_once() {
    let (emitted, on_change) = recorder::<&'static str>();
    let mut picker = WheelPicker::new(letters(&["A", "B", "C", "D"]), WheelConfig::default())
        .with_model_value("A")
        .on_change(on_change);
    picker.mount();

    assert_eq!(picker.select_by_value(&"C"), Some("C"));
    assert_eq!(picker.select_by_value(&"C"), None);
    assert_eq!(picker.resolve(), None);
    assert_eq!(*emitted.lock().unwrap(), vec!["C"]);
}

#[test]
fn bounded_flings_never_emit_out_of_range() {
    let (emitted, on_change) = recorder::<u32>();
    let options: Vec<WheelOption<u32>> = (0..8).map(WheelOption::from).collect();
    let config = WheelConfig::default().item_height(30.0);
    let mut picker = WheelPicker::new(options, config).on_change(on_change);
    picker.mount();

    let t0 = Instant::now();
    let mut now = t0;
    for (dy, ms) in [(-400.0f32, 80u64), (600.0, 60), (-45.0, 300), (900.0, 40)] {
        let token = picker.pointer_down(150.0, now).unwrap();
        let steps = 5;
        for i in 1..=steps {
            let y = 150.0 + dy * i as f32 / steps as f32;
            picker.pointer_move(token, y, now + Duration::from_millis(ms * i / steps));
            if picker.scroll() < 0.0 || picker.scroll() > 7.0 {
                assert!(picker.resolve().is_none());
            }
        }
        now += Duration::from_millis(ms);
        picker.pointer_up(token, 150.0 + dy, now);
        now = settle(&mut picker, now);
        assert_settled(&picker);
    }

    let emitted = emitted.lock().unwrap();
    assert!(!emitted.is_empty());
    assert!(emitted.iter().all(|&index| index <= 7));
    assert!(emitted.windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn center_tap_is_a_zero_step() {
    let geometry = Geometry::new(20, 30.0);
    let segments = SegmentTable::new(&geometry);
    let center = segments.segments()[geometry.quarter_count as usize - 1];
    assert_eq!(center.step(), 0);

    let (emitted, on_change) = recorder::<u32>();
    let options: Vec<WheelOption<u32>> = (0..10).map(WheelOption::from).collect();
    let config = WheelConfig::default().visible_count(20).item_height(30.0);
    let mut picker = WheelPicker::new(options, config)
        .with_model_value(4)
        .on_change(on_change);
    picker.mount();

    let t0 = Instant::now();
    let y = (center.start + center.end) * 0.5;
    let token = picker.pointer_down(y, t0).unwrap();
    picker.pointer_up(token, y + 1.0, t0 + Duration::from_millis(80));

    assert_eq!(picker.state(), PickerState::Idle);
    assert_eq!(picker.selected_index(), Some(4));
    assert!(emitted.lock().unwrap().is_empty());
}

#[test]
fn stale_gesture_cannot_drive_the_wheel() {
    let options: Vec<WheelOption<u32>> = (0..10).map(WheelOption::from).collect();
    let mut picker = WheelPicker::new(options, WheelConfig::default());
    picker.mount();

    let t0 = Instant::now();
    let old = picker.pointer_down(100.0, t0).unwrap();
    let current = picker.pointer_down(100.0, t0 + Duration::from_millis(10)).unwrap();

    assert!(!picker.pointer_move(old, 0.0, t0 + Duration::from_millis(20)));
    assert_eq!(picker.scroll(), 0.0);
    assert!(picker.pointer_move(current, 64.0, t0 + Duration::from_millis(20)));
    assert!(picker.scroll() > 0.0);
    assert!(!picker.pointer_up(old, 64.0, t0 + Duration::from_millis(30)));
    assert_eq!(picker.state(), PickerState::Dragging);
}

#[test]
fn unmounted_picker_ignores_input() {
    let (emitted, on_change) = recorder::<u32>();
    let options: Vec<WheelOption<u32>> = (0..10).map(WheelOption::from).collect();
    let mut picker = WheelPicker::new(options, WheelConfig::default()).on_change(on_change);

    let t0 = Instant::now();
    assert!(picker.pointer_down(100.0, t0).is_none());
    assert!(!picker.wheel(10.0, t0));
    assert!(emitted.lock().unwrap().is_empty());

    picker.mount();
    picker.wheel(10.0, t0);
    picker.unmount();
    assert!(!picker.tick(t0 + Duration::from_secs(2)));
    assert_eq!(*emitted.lock().unwrap(), vec![0]);
}
