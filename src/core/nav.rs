//! Page sections and the compact navigation menu.

/// Every section on the page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    About,
    Projects,
    Skills,
    Resume,
    ProjectRequest,
    Contact,
}

impl Section {
    /// Page order.
    pub const ALL: &[Section] = &[
        Section::Hero,
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Resume,
        Section::ProjectRequest,
        Section::Contact,
    ];

    /// Sections reachable from the navbar, in link order.
    pub const NAV: &[Section] = &[
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Resume,
        Section::ProjectRequest,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::About => "About",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Resume => "Resume",
            Section::ProjectRequest => "Give Project",
            Section::Contact => "Contact",
        }
    }

    /// Anchor id, also accepted on the command line.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Hero => "home",
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Resume => "resume",
            Section::ProjectRequest => "project-request",
            Section::Contact => "contact",
        }
    }

    pub fn from_anchor(s: &str) -> Option<Self> {
        let s = s.trim_start_matches('#');
        Self::ALL.iter().copied().find(|sec| sec.anchor() == s)
    }
}

/// Open/closed state of the compact (narrow terminal) menu, plus the
/// highlighted entry while it is open.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    open: bool,
    highlighted: usize,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.highlighted = 0;
    }

    /// Follow a navigation link.  Always closes the menu.
    pub fn navigate(&mut self, section: Section) -> Section {
        self.open = false;
        section
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        if self.highlighted + 1 < Section::NAV.len() {
            self.highlighted += 1;
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Navigate to the highlighted link.
    pub fn activate(&mut self) -> Section {
        let section = Section::NAV[self.highlighted.min(Section::NAV.len() - 1)];
        self.navigate(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_open_state() {
        let mut m = MenuState::default();
        m.toggle();
        assert!(m.is_open());
        m.toggle();
        assert!(!m.is_open());
    }

    #[test]
    fn navigation_always_closes() {
        let mut m = MenuState::default();
        m.toggle();
        assert_eq!(m.navigate(Section::Skills), Section::Skills);
        assert!(!m.is_open());

        m.navigate(Section::Contact);
        assert!(!m.is_open());
    }

    #[test]
    fn activate_uses_highlighted_link() {
        let mut m = MenuState::default();
        m.toggle();
        m.highlight_next();
        m.highlight_next();
        assert_eq!(m.activate(), Section::Skills);
        assert!(!m.is_open());
    }

    #[test]
    fn highlight_is_clamped() {
        let mut m = MenuState::default();
        m.highlight_prev();
        assert_eq!(m.highlighted(), 0);
        for _ in 0..20 {
            m.highlight_next();
        }
        assert_eq!(m.highlighted(), Section::NAV.len() - 1);
    }

    #[test]
    fn anchors_round_trip() {
        assert_eq!(Section::from_anchor("#project-request"), Some(Section::ProjectRequest));
        assert_eq!(Section::from_anchor("about"), Some(Section::About));
        assert_eq!(Section::from_anchor("blog"), None);
    }
}
