//! Scripted gesture replay
//!
//! A script is a comma-separated list of steps:
//!
//! - `wheel:+1` / `wheel:-1` - one wheel event in that direction
//! - `drag:<dy>:<ms>` - press at center, move `dy` pixels over `ms`, release
//! - `tap:<y>` - press and release at `y` pixels from the top
//! - `wait:<ms>` - let time pass
//! - `set:<value>` - push a new value from the caller
//!
//! Steps run against a virtual clock. After every input step the picker is
//! ticked at the frame interval until it stops asking for frames.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use blinc_wheel::{FrameSink, WheelPicker};

/// Press-to-release time for a tap
const TAP_MS: u64 = 60;

/// Upper bound on frames per step
const MAX_FRAMES: usize = 10_000;

/// One scripted action
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Wheel(f32),
    Drag { dy: f32, ms: u64 },
    Tap { y: f32 },
    Wait { ms: u64 },
    Set(String),
}

/// Parse a comma-separated script
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(|step| parse_step(step).with_context(|| format!("Invalid step '{}'", step)))
        .collect()
}

fn parse_step(step: &str) -> Result<Step> {
    let mut parts = step.split(':');
    let kind = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    let parsed = match (kind, args.as_slice()) {
        ("wheel", [delta]) => Step::Wheel(delta.parse().context("wheel delta")?),
        ("drag", [dy, ms]) => Step::Drag {
            dy: dy.parse().context("drag distance")?,
            ms: ms.parse().context("drag duration")?,
        },
        ("tap", [y]) => Step::Tap {
            y: y.parse().context("tap position")?,
        },
        ("wait", [ms]) => Step::Wait {
            ms: ms.parse().context("wait duration")?,
        },
        ("set", [value]) => Step::Set(value.to_string()),
        _ => anyhow::bail!(
            "expected wheel:<delta>, drag:<dy>:<ms>, tap:<y>, wait:<ms> or set:<value>"
        ),
    };
    Ok(parsed)
}

/// Drives a picker through a script on a virtual clock
pub struct Simulation {
    picker: WheelPicker<String>,
    now: Instant,
    frame_interval: Duration,
    changes: Arc<Mutex<Vec<String>>>,
}

impl Simulation {
    /// Mount `picker` and start the clock
    pub fn new(picker: WheelPicker<String>, fps: u32) -> Self {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let recorder = changes.clone();
        let mut picker = picker.on_change(move |value: &String| {
            if let Ok(mut changes) = recorder.lock() {
                changes.push(value.clone());
            }
        });
        picker.mount();

        Self {
            picker,
            now: Instant::now(),
            frame_interval: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            changes,
        }
    }

    pub fn picker(&self) -> &WheelPicker<String> {
        &self.picker
    }

    /// Time elapsed on the virtual clock
    pub fn elapsed_since(&self, start: Instant) -> Duration {
        self.now.saturating_duration_since(start)
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Paint the current frame if it has not been painted yet
    pub fn commit(&mut self, sink: &mut impl FrameSink) -> bool {
        self.picker.commit(sink)
    }

    /// Values reported since the last call
    pub fn take_changes(&mut self) -> Vec<String> {
        self.changes
            .lock()
            .map(|mut changes| std::mem::take(&mut *changes))
            .unwrap_or_default()
    }

    /// Run one step, painting every frame into `sink`
    pub fn run(&mut self, step: &Step, sink: &mut impl FrameSink) -> Result<()> {
        tracing::debug!("step {:?}", step);
        match step {
            Step::Wheel(delta) => {
                if !self.picker.wheel(*delta, self.now) {
                    tracing::info!("wheel event ignored");
                }
            }
            Step::Drag { dy, ms } => self.drag(*dy, *ms, sink)?,
            Step::Tap { y } => self.tap(*y, sink)?,
            Step::Wait { ms } => {
                let until = self.now + Duration::from_millis(*ms);
                while self.now < until {
                    self.frame(sink);
                }
                return Ok(());
            }
            Step::Set(value) => {
                if self.picker.set_model_value(value.clone()).is_none()
                    && self.picker.selected_value() != Some(value)
                {
                    tracing::info!("value '{}' is not an option", value);
                }
            }
        }
        self.settle(sink)
    }

    fn drag(&mut self, dy: f32, ms: u64, sink: &mut impl FrameSink) -> Result<()> {
        let start_y = self.picker.geometry().container_height * 0.5;
        let token = self
            .picker
            .pointer_down(start_y, self.now)
            .context("picker is not mounted")?;

        let frames = (Duration::from_millis(ms).as_secs_f64() / self.frame_interval.as_secs_f64())
            .ceil()
            .max(1.0) as u32;
        for i in 1..=frames {
            self.now += self.frame_interval;
            let y = start_y + dy * i as f32 / frames as f32;
            self.picker.pointer_move(token, y, self.now);
            self.picker.commit(sink);
        }
        self.picker.pointer_up(token, start_y + dy, self.now);
        Ok(())
    }

    fn tap(&mut self, y: f32, sink: &mut impl FrameSink) -> Result<()> {
        let token = self
            .picker
            .pointer_down(y, self.now)
            .context("picker is not mounted")?;
        self.now += Duration::from_millis(TAP_MS);
        self.picker.pointer_up(token, y, self.now);
        self.picker.commit(sink);
        Ok(())
    }

    /// Tick until the picker stops asking for frames
    fn settle(&mut self, sink: &mut impl FrameSink) -> Result<()> {
        self.picker.commit(sink);
        for _ in 0..MAX_FRAMES {
            if !self.picker.tick(self.now) {
                self.picker.commit(sink);
                return Ok(());
            }
            self.picker.commit(sink);
            self.now += self.frame_interval;
        }
        anyhow::bail!("picker did not settle within {} frames", MAX_FRAMES)
    }

    fn frame(&mut self, sink: &mut impl FrameSink) {
        self.picker.tick(self.now);
        self.picker.commit(sink);
        self.now += self.frame_interval;
    }
}
