//! Bottom status bar: transient message or key hints on the left, current
//! section (and the sending spinner) on the right.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::config::{Action, AppConfig};
use crate::core::nav::Section;

use super::spinner::SendingIndicator;
use super::theme::Theme;

/// Key hints shown when there is no status message.
pub fn status_hint(config: &AppConfig) -> String {
    let pairs = [
        (Action::NextSection, "section"),
        (Action::NextCard, "card"),
        (Action::OpenProject, "open"),
        (Action::ToggleMenu, "menu"),
        (Action::ToggleTheme, "theme"),
        (Action::EditContact, "contact"),
        (Action::Quit, "quit"),
    ];
    let mut parts: Vec<String> = pairs
        .iter()
        .map(|(action, what)| format!("{} {what}", config.short_binding(*action)))
        .collect();
    parts.push("? keys".to_string());
    format!(" {}", parts.join("  "))
}

pub struct StatusBar<'a> {
    pub message: Option<&'a str>,
    pub hint: &'a str,
    pub section: Section,
    pub sending: bool,
    pub tick: u64,
    pub theme: &'a Theme,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = self.theme.status_bar_style();
        buf.set_style(area, style);

        let right = format!(" #{} ", self.section.anchor());
        let right_w = right.chars().count() as u16;
        let left = match self.message {
            Some(m) => format!(" {m}"),
            None => self.hint.to_string(),
        };
        let left_w = area.width.saturating_sub(right_w) as usize;
        buf.set_stringn(area.x, area.y, &left, left_w, style);

        if self.sending {
            SendingIndicator {
                visible: true,
                tick: self.tick,
                style,
            }
            .render(area, buf);
        } else if area.width > right_w {
            buf.set_string(area.x + area.width - right_w, area.y, &right, style);
        }
    }
}
