//! Textual progress bar rendered with color markup.

use crate::color::{Color, ColorKey, color_string};

/// A fixed-width character progress bar.
///
/// Completed and uncompleted segments use distinct characters and
/// colors; `generate_text` renders the bar at the current fraction.
#[derive(Debug, Clone)]
pub struct TextBar {
    completed_char: char,
    uncompleted_char: char,
    length: usize,
    completed_color: ColorKey,
    uncompleted_color: ColorKey,
    percent: f32,
}

impl TextBar {
    pub fn new(
        completed_char: char,
        uncompleted_char: char,
        length: usize,
        completed_color: ColorKey,
        uncompleted_color: ColorKey,
    ) -> Self {
        Self {
            completed_char,
            uncompleted_char,
            length: length.max(1),
            completed_color,
            uncompleted_color,
            percent: 0.0,
        }
    }

    /// Current fill fraction in `[0, 1]`.
    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Set the fill fraction, clamped to `[0, 1]`.
    pub fn set_percent(&mut self, value: f32) {
        self.percent = value.clamp(0.0, 1.0);
    }

    /// Render the bar at the current fraction.
    pub fn generate_text(&self) -> String {
        let completed_count =
            (self.percent * self.length as f32).round() as usize;
        let completed_count = completed_count.min(self.length);

        let completed: String =
            std::iter::repeat_n(self.completed_char, completed_count).collect();
        let uncompleted: String =
            std::iter::repeat_n(self.uncompleted_char, self.length - completed_count).collect();

        let mut text = color_string(&completed, self.completed_color.color);
        text.push_str(&color_string(&uncompleted, self.uncompleted_color.color));
        text
    }
}

impl Default for TextBar {
    fn default() -> Self {
        Self::new(
            '█',
            '░',
            10,
            ColorKey::new("green", Color::rgb(0x67, 0xff, 0x76)),
            ColorKey::new("red", Color::rgb(0xe2, 0x42, 0x4a)),
        )
    }
}
