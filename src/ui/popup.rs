//! Popup overlays: project details, submission result, the compact menu
//! dropdown and the key help.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};
use crate::core::contact::{SubmissionResult, SubmissionStatus};
use crate::core::content::ProjectEntry;
use crate::core::nav::Section;

use super::layout::centered_fixed;
use super::spinner::spinner_frame;
use super::theme::Theme;
use super::wrap;

fn popup_block<'a>(title: String, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_style(theme.heading_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.focus_border_style())
        .style(theme.surface_style())
}

// ───────────────────────────────────────── project popup ─────

/// Where the project popup sits for a given screen area; the handler uses
/// this to tell clicks inside from clicks on the backdrop.
pub fn project_popup_rect(project: &ProjectEntry, area: Rect) -> Rect {
    let width = 64.min(area.width.saturating_sub(4)).max(20);
    let text_w = width.saturating_sub(4) as usize;
    let body = wrap::height(project.description, text_w) as u16;
    let height = body + 9 + u16::from(!project.tech.is_empty());
    centered_fixed(width, height, area)
}

/// Detail overlay for the open project.
pub struct ProjectPopup<'a> {
    pub project: &'a ProjectEntry,
    pub position: (usize, usize),
    pub theme: &'a Theme,
}

impl Widget for ProjectPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let popup = project_popup_rect(self.project, area);
        Clear.render(popup, buf);

        let (n, total) = self.position;
        let block = popup_block(format!(" {} ({}/{}) ", self.project.title, n + 1, total), theme);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        lines.push(Line::styled(self.project.description, theme.surface_style()));
        lines.push(Line::raw(""));
        if !self.project.tech.is_empty() {
            let mut tags = Vec::new();
            for (i, t) in self.project.tech.iter().enumerate() {
                if i > 0 {
                    tags.push(Span::raw(" "));
                }
                tags.push(Span::styled(format!(" {t} "), theme.tag_style()));
            }
            lines.push(Line::from(tags));
        }
        lines.push(Line::from(vec![
            Span::styled("Link: ", theme.surface_style()),
            Span::styled(self.project.link, theme.link_style()),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::styled("←/→ previous/next   Esc close", theme.muted_style()));

        Paragraph::new(lines)
            .style(theme.surface_style())
            .wrap(Wrap { trim: false })
            .render(inner.inner(ratatui::layout::Margin::new(1, 0)), buf);
    }
}

// ───────────────────────────────────────── result popup ──────

pub struct ResultPopup<'a> {
    pub result: &'a SubmissionResult,
    pub theme: &'a Theme,
    pub tick: u64,
}

impl Widget for ResultPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let width = 56.min(area.width);
        let text_w = width.saturating_sub(4) as usize;
        let body = wrap::height(&self.result.message, text_w) as u16;
        let popup = centered_fixed(width, body + 6, area);
        Clear.render(popup, buf);

        let (title, style) = match self.result.status {
            SubmissionStatus::Pending => (format!(" {} Sending ", spinner_frame(self.tick)), theme.muted_style()),
            SubmissionStatus::Success => (" ✔ Sent ".to_string(), theme.success_style()),
            SubmissionStatus::Failure => (" ✖ Not sent ".to_string(), theme.error_style()),
        };
        let block = popup_block(title, theme).title_style(style);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let hint = match self.result.status {
            SubmissionStatus::Pending => "",
            _ => "Enter/Esc close",
        };
        let lines = vec![
            Line::raw(""),
            Line::styled(self.result.message.clone(), style),
            Line::raw(""),
            Line::styled(hint, theme.muted_style()),
        ];
        Paragraph::new(lines)
            .style(theme.surface_style())
            .wrap(Wrap { trim: false })
            .render(inner.inner(ratatui::layout::Margin::new(1, 0)), buf);
    }
}

// ───────────────────────────────────────── menu dropdown ─────

/// Dropdown under the ☰ button, anchored to the top-right of `area`.
pub fn menu_rect(area: Rect) -> Rect {
    let width = 24.min(area.width);
    let height = (Section::NAV.len() as u16 + 2).min(area.height);
    Rect::new(area.x + area.width - width, area.y, width, height)
}

/// Menu entry under a click, if any.
pub fn menu_item_at(area: Rect, col: u16, row: u16) -> Option<Section> {
    let rect = menu_rect(area);
    if !super::layout::point_in_rect(rect, col, row) || row == rect.y {
        return None;
    }
    Section::NAV.get((row - rect.y - 1) as usize).copied()
}

pub struct MenuDropdown<'a> {
    pub highlighted: usize,
    pub active: Section,
    pub theme: &'a Theme,
}

impl Widget for MenuDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let rect = menu_rect(area);
        Clear.render(rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .style(theme.menu_style());
        let inner = block.inner(rect);
        block.render(rect, buf);

        let lines: Vec<Line> = Section::NAV
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let style = if i == self.highlighted {
                    theme.menu_selected_style()
                } else if *s == self.active {
                    theme.menu_style().add_modifier(Modifier::UNDERLINED)
                } else {
                    theme.menu_style()
                };
                let prefix = if i == self.highlighted { " ▸ " } else { "   " };
                Line::styled(format!("{prefix}{}", s.label()), style)
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── help popup ────────

/// Read-only key reference, built from the live bindings.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
    pub theme: &'a Theme,
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let height = Action::ALL.len() as u16 + 7;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Keys ".to_string(), theme);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let key_style = theme.link_style().remove_modifier(Modifier::UNDERLINED);
        let mut lines = vec![Line::raw("")];
        for &action in Action::ALL {
            let label_col = format!("   {:<22}", action.label());
            let keys_width = (inner.width as usize).saturating_sub(label_col.len()).max(1);
            let keys = self.config.display_bindings(action);
            lines.push(Line::from(vec![
                Span::styled(label_col, theme.surface_style()),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled("   In forms: Tab/Shift-Tab move, Enter submits", theme.muted_style()));
        lines.push(Line::styled("   ? or Esc closes this help", theme.muted_style()));

        Paragraph::new(lines).style(theme.surface_style()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::content::Portfolio;
    use crate::core::theme::ThemeMode;

    fn text_of(buf: &Buffer) -> String {
        let area = buf.area;
        let mut s = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                s.push_str(buf[(x, y)].symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn project_popup_shows_title_and_link() {
        let p = Portfolio::builtin().unwrap();
        let theme = Theme::new(ThemeMode::Light);
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        ProjectPopup {
            project: &p.projects[0],
            position: (0, p.projects.len()),
            theme: &theme,
        }
        .render(area, &mut buf);
        let text = text_of(&buf);
        assert!(text.contains(p.projects[0].title));
        assert!(text.contains("(1/4)"));
        assert!(text.contains("Link:"));
    }

    #[test]
    fn result_popup_uses_status_title() {
        let theme = Theme::new(ThemeMode::Dark);
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        let result = SubmissionResult {
            status: SubmissionStatus::Failure,
            message: "Network error: refused".into(),
        };
        ResultPopup { result: &result, theme: &theme, tick: 0 }.render(area, &mut buf);
        let text = text_of(&buf);
        assert!(text.contains("Not sent"));
        assert!(text.contains("Network error: refused"));
    }

    #[test]
    fn menu_rows_map_to_sections() {
        let area = Rect::new(0, 1, 60, 20);
        let rect = menu_rect(area);
        assert_eq!(menu_item_at(area, rect.x + 2, rect.y), None);
        assert_eq!(menu_item_at(area, rect.x + 2, rect.y + 1), Some(Section::About));
        assert_eq!(menu_item_at(area, rect.x + 2, rect.y + 6), Some(Section::Contact));
        assert_eq!(menu_item_at(area, 0, rect.y + 1), None);
    }

    #[test]
    fn help_lists_every_action() {
        let theme = Theme::new(ThemeMode::Light);
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        HelpPopup { config: &config, theme: &theme }.render(area, &mut buf);
        let text = text_of(&buf);
        for action in Action::ALL {
            assert!(text.contains(action.label()), "missing {}", action.label());
        }
    }
}
