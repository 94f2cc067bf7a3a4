//! Colour palette and text styles used across the UI.
//!
//! A [`Theme`] is built from the current [`ThemeMode`] each frame and passed
//! down to every renderer.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::ThemeMode;

// Tailwind-ish palette.
const BLUE_100: Color = Color::Rgb(219, 234, 254);
const BLUE_400: Color = Color::Rgb(96, 165, 250);
const BLUE_500: Color = Color::Rgb(59, 130, 246);
const BLUE_600: Color = Color::Rgb(37, 99, 235);
const BLUE_900: Color = Color::Rgb(30, 58, 138);
const GRAY_100: Color = Color::Rgb(243, 244, 246);
const GRAY_400: Color = Color::Rgb(156, 163, 175);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_800: Color = Color::Rgb(31, 41, 55);
const GRAY_900: Color = Color::Rgb(17, 24, 39);
const GREEN_500: Color = Color::Rgb(34, 197, 94);
const RED_500: Color = Color::Rgb(239, 68, 68);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub mode: ThemeMode,
    page_bg: Color,
    surface_bg: Color,
    text: Color,
    muted: Color,
    tag_bg: Color,
    tag_fg: Color,
    hero_bg: Color,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self {
                mode,
                page_bg: GRAY_100,
                surface_bg: Color::White,
                text: GRAY_900,
                muted: GRAY_600,
                tag_bg: BLUE_100,
                tag_fg: BLUE_600,
                hero_bg: BLUE_400,
            },
            ThemeMode::Dark => Self {
                mode,
                page_bg: GRAY_900,
                surface_bg: GRAY_800,
                text: GRAY_100,
                muted: GRAY_400,
                tag_bg: BLUE_900,
                tag_fg: BLUE_100,
                hero_bg: BLUE_900,
            },
        }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style(&self) -> Style {
        Style::default().bg(self.page_bg).fg(self.text)
    }

    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface_bg).fg(self.text)
    }

    pub fn heading_style(&self) -> Style {
        self.surface_style().add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        self.surface_style().fg(self.muted)
    }

    pub fn link_style(&self) -> Style {
        self.surface_style()
            .fg(BLUE_500)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn hero_style(&self) -> Style {
        Style::default().bg(self.hero_bg).fg(Color::White)
    }

    pub fn button_style(&self) -> Style {
        Style::default()
            .bg(BLUE_500)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tag_style(&self) -> Style {
        Style::default().bg(self.tag_bg).fg(self.tag_fg)
    }

    pub fn border_style(&self) -> Style {
        self.surface_style().fg(self.muted)
    }

    pub fn focus_border_style(&self) -> Style {
        self.surface_style().fg(BLUE_500).add_modifier(Modifier::BOLD)
    }

    /// Card body style for fade-in step `step` (0 = hidden … 3 = full).
    pub fn fade_style(&self, step: u8) -> Style {
        match step {
            0 => Style::default().bg(self.page_bg).fg(self.page_bg),
            1 => Style::default().bg(self.page_bg).fg(self.muted),
            2 => self.surface_style().fg(self.muted),
            _ => self.surface_style(),
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn navbar_style(&self) -> Style {
        Style::default().bg(BLUE_500).fg(Color::White)
    }

    pub fn nav_active_style(&self) -> Style {
        Style::default()
            .bg(BLUE_600)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn menu_style(&self) -> Style {
        Style::default().bg(BLUE_600).fg(Color::White)
    }

    pub fn menu_selected_style(&self) -> Style {
        Style::default()
            .bg(BLUE_900)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style(&self) -> Style {
        match self.mode {
            ThemeMode::Light => Style::default().bg(GRAY_700).fg(Color::White),
            ThemeMode::Dark => Style::default().bg(Color::Black).fg(GRAY_400),
        }
    }

    pub fn input_style(&self, focused: bool) -> Style {
        let base = self.surface_style();
        if focused {
            base.fg(BLUE_500).add_modifier(Modifier::BOLD)
        } else {
            base.fg(self.muted)
        }
    }

    pub fn success_style(&self) -> Style {
        self.surface_style().fg(GREEN_500).add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        self.surface_style().fg(RED_500).add_modifier(Modifier::BOLD)
    }
}
