//! Text rendering of wheel frames
//!
//! Paints each committed frame as a small barrel: visible items ordered top
//! to bottom by their projected offset, the centered item marked, and a
//! bar showing how much of the item face survives foreshortening.

use blinc_wheel::{FrameSink, WheelFrame};

const BAR_WIDTH: usize = 12;

/// Collects rendered frames as text
pub struct TextRenderer {
    labels: Vec<String>,
    item_height: f32,
    frames: Vec<String>,
}

impl TextRenderer {
    /// `labels` are indexed by working list position
    pub fn new(labels: Vec<String>, item_height: f32) -> Self {
        Self {
            labels,
            item_height,
            frames: Vec::new(),
        }
    }

    /// Take the frames rendered since the last drain
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.frames)
    }

    /// Render one frame
    pub fn render(&self, frame: &WheelFrame) -> String {
        let mut visible: Vec<_> = frame.visible().collect();
        visible.sort_by(|a, b| {
            a.offset_y(&frame.wheel)
                .total_cmp(&b.offset_y(&frame.wheel))
        });
        let centered = frame.centered().map(|item| item.ring_index);

        let mut out = format!("scroll {:>8.3}\n", frame.scroll);
        for item in visible {
            let marker = if Some(item.ring_index) == centered { '>' } else { ' ' };
            let label = self
                .labels
                .get(item.index)
                .map(String::as_str)
                .unwrap_or("?");
            let face = item.projected_height(&frame.wheel, self.item_height) / self.item_height;
            let filled = ((face * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
            out.push_str(&format!(
                "{} {:>7.1} {:<w$} {}\n",
                marker,
                item.offset_y(&frame.wheel),
                "#".repeat(filled),
                label,
                w = BAR_WIDTH
            ));
        }
        out
    }
}

impl FrameSink for TextRenderer {
    fn commit(&mut self, frame: &WheelFrame) {
        let text = self.render(frame);
        self.frames.push(text);
    }
}
