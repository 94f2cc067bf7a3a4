//! Sending indicator: a small spinner + label rendered in the top-right
//! corner of a given area while a form submission is in flight.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

pub struct SendingIndicator {
    pub visible: bool,
    pub tick: u64,
    pub style: Style,
}

impl Widget for SendingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 16 || area.height == 0 {
            return;
        }

        let label = format!(" {} sending ", spinner_frame(self.tick));
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);

        let line = Line::from(Span::styled(label, self.style.add_modifier(Modifier::BOLD)));
        buf.set_line(x, area.y, &line, label_width);
    }
}
