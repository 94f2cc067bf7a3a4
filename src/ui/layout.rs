//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Below this many columns the navbar collapses into the ☰ menu.
pub const COMPACT_NAV_WIDTH: u16 = 80;

/// Fixed navbar on top, scrolling page, status bar at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub navbar_area: Rect,
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // navbar
                Constraint::Min(1),    // page viewport
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            navbar_area: chunks[0],
            page_area: chunks[1],
            status_area: chunks[2],
        }
    }
}

/// Whether a bar this wide shows the ☰ menu instead of the link row.
pub fn is_compact(width: u16) -> bool {
    width < COMPACT_NAV_WIDTH
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_takes_everything_between_bars() {
        let l = AppLayout::from_area(Rect::new(0, 0, 100, 30));
        assert_eq!(l.navbar_area, Rect::new(0, 0, 100, 1));
        assert_eq!(l.page_area, Rect::new(0, 1, 100, 28));
        assert_eq!(l.status_area, Rect::new(0, 29, 100, 1));
        assert!(!is_compact(l.navbar_area.width));
        assert!(is_compact(AppLayout::from_area(Rect::new(0, 0, 79, 30)).navbar_area.width));
    }

    #[test]
    fn tiny_terminals_starve_the_bars() {
        let l = AppLayout::from_area(Rect::new(0, 0, 40, 2));
        let heights = [l.navbar_area.height, l.page_area.height, l.status_area.height];
        assert_eq!(heights.iter().sum::<u16>(), 2);
        assert_eq!(AppLayout::from_area(Rect::new(0, 0, 40, 0)).navbar_area.height, 0);
    }

    #[test]
    fn centered_rect_is_clamped() {
        let r = centered_fixed(50, 10, Rect::new(0, 0, 40, 8));
        assert_eq!(r, Rect::new(0, 0, 40, 8));
        let r = centered_fixed(10, 4, Rect::new(0, 0, 40, 8));
        assert_eq!(r, Rect::new(15, 2, 10, 4));
    }
}
