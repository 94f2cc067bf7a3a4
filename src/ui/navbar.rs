//! Fixed navigation bar.
//!
//! Wide terminals get the full link row with number hotkeys; narrow ones
//! get the brand, a theme switch and the ☰ menu button.

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier, widgets::Widget};

use crate::core::nav::Section;
use crate::core::theme::ThemeMode;

use super::layout::is_compact;
use super::theme::Theme;

pub const MENU_BUTTON: &str = " ☰ ";

/// Something clickable in the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Brand,
    Link(Section),
    Menu,
    ThemeSwitch,
}

fn theme_glyph(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => " ☾ ",
        ThemeMode::Dark => " ☀ ",
    }
}

fn link_label(index: usize, section: Section) -> String {
    format!(" {} {} ", index + 1, section.label())
}

/// Hit zones for the navbar at a given width, left to right.
pub fn nav_targets(area: Rect, brand: &str, mode: ThemeMode) -> Vec<(NavTarget, Rect)> {
    let mut zones = Vec::new();
    let brand_w = (brand.chars().count() as u16 + 2).min(area.width);
    zones.push((NavTarget::Brand, Rect::new(area.x, area.y, brand_w, 1)));

    let right = area.x + area.width;
    let glyph_w = theme_glyph(mode).chars().count() as u16;
    let mut x = right.saturating_sub(glyph_w);
    let theme_zone = (NavTarget::ThemeSwitch, Rect::new(x, area.y, glyph_w, 1));

    if is_compact(area.width) {
        let menu_w = MENU_BUTTON.chars().count() as u16;
        x = x.saturating_sub(menu_w + 1);
        zones.push((NavTarget::Menu, Rect::new(x, area.y, menu_w, 1)));
    } else {
        let labels: Vec<String> = Section::NAV
            .iter()
            .enumerate()
            .map(|(i, s)| link_label(i, *s))
            .collect();
        let total: u16 = labels.iter().map(|l| l.chars().count() as u16).sum();
        x = x.saturating_sub(total + 1);
        for (label, section) in labels.iter().zip(Section::NAV.iter().copied()) {
            let w = label.chars().count() as u16;
            zones.push((NavTarget::Link(section), Rect::new(x, area.y, w, 1)));
            x += w;
        }
    }
    zones.push(theme_zone);
    zones
}

pub fn target_at(area: Rect, brand: &str, mode: ThemeMode, col: u16, row: u16) -> Option<NavTarget> {
    nav_targets(area, brand, mode)
        .into_iter()
        .find(|(_, r)| super::layout::point_in_rect(*r, col, row))
        .map(|(t, _)| t)
}

pub struct Navbar<'a> {
    pub brand: &'a str,
    pub theme: &'a Theme,
    pub active: Section,
    pub menu_open: bool,
}

impl Widget for Navbar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let theme = self.theme;
        buf.set_style(area, theme.navbar_style());

        for (target, rect) in nav_targets(area, self.brand, theme.mode) {
            let (text, style) = match target {
                NavTarget::Brand => (
                    format!(" {} ", self.brand),
                    theme.navbar_style().add_modifier(Modifier::BOLD),
                ),
                NavTarget::Link(section) => {
                    let idx = Section::NAV.iter().position(|s| *s == section).unwrap_or(0);
                    let style = if section == self.active {
                        theme.nav_active_style()
                    } else {
                        theme.navbar_style()
                    };
                    (link_label(idx, section), style)
                }
                NavTarget::Menu => {
                    let style = if self.menu_open {
                        theme.nav_active_style()
                    } else {
                        theme.navbar_style()
                    };
                    (MENU_BUTTON.to_string(), style)
                }
                NavTarget::ThemeSwitch => (theme_glyph(theme.mode).to_string(), theme.navbar_style()),
            };
            buf.set_stringn(rect.x, rect.y, &text, rect.width as usize, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_bar_lists_every_nav_link() {
        let zones = nav_targets(Rect::new(0, 0, 120, 1), "Portfolio", ThemeMode::Light);
        let links: Vec<Section> = zones
            .iter()
            .filter_map(|(t, _)| match t {
                NavTarget::Link(s) => Some(*s),
                _ => None,
            })
            .collect();
        assert_eq!(links, Section::NAV.to_vec());
        assert!(!zones.iter().any(|(t, _)| *t == NavTarget::Menu));
    }

    #[test]
    fn narrow_bar_shows_menu_button_only() {
        let area = Rect::new(0, 0, 60, 1);
        let zones = nav_targets(area, "Portfolio", ThemeMode::Dark);
        assert!(zones.iter().any(|(t, _)| *t == NavTarget::Menu));
        assert!(!zones.iter().any(|(t, _)| matches!(t, NavTarget::Link(_))));
        let (_, menu) = zones.iter().find(|(t, _)| *t == NavTarget::Menu).unwrap();
        assert_eq!(target_at(area, "Portfolio", ThemeMode::Dark, menu.x, 0), Some(NavTarget::Menu));
    }

    #[test]
    fn active_link_is_highlighted() {
        let theme = Theme::new(ThemeMode::Light);
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        Navbar {
            brand: "Portfolio",
            theme: &theme,
            active: Section::Skills,
            menu_open: false,
        }
        .render(area, &mut buf);
        let (_, rect) = nav_targets(area, "Portfolio", ThemeMode::Light)
            .into_iter()
            .find(|(t, _)| *t == NavTarget::Link(Section::Skills))
            .unwrap();
        assert_eq!(buf[(rect.x, 0u16)].style().bg, theme.nav_active_style().bg);
    }

    #[test]
    fn zero_height_bar_draws_nothing() {
        let theme = Theme::new(ThemeMode::Dark);
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 1));
        Navbar {
            brand: "Portfolio",
            theme: &theme,
            active: Section::About,
            menu_open: false,
        }
        .render(Rect::new(0, 1, 40, 0), &mut buf);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 40, 1)));
    }
}
