//! Project detail overlay: `Closed` ⇄ `Open(index)`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectOverlay {
    #[default]
    Closed,
    Open(usize),
}

impl ProjectOverlay {
    /// Show `index`.  Replaces whichever project was open.
    pub fn open(&mut self, index: usize) {
        *self = ProjectOverlay::Open(index);
    }

    pub fn close(&mut self) {
        *self = ProjectOverlay::Closed;
    }

    pub fn active(&self) -> Option<usize> {
        match *self {
            ProjectOverlay::Open(i) => Some(i),
            ProjectOverlay::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ProjectOverlay::Open(_))
    }

    /// Open the project after the active one, wrapping at `count`.
    pub fn open_next(&mut self, count: usize) {
        if let (Some(i), true) = (self.active(), count > 0) {
            self.open((i + 1) % count);
        }
    }

    /// Open the project before the active one, wrapping at `count`.
    pub fn open_prev(&mut self, count: usize) {
        if let (Some(i), true) = (self.active(), count > 0) {
            self.open((i + count - 1) % count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let o = ProjectOverlay::default();
        assert!(!o.is_open());
        assert_eq!(o.active(), None);
    }

    #[test]
    fn opening_second_project_replaces_first() {
        let mut o = ProjectOverlay::default();
        o.open(0);
        o.open(2);
        assert_eq!(o, ProjectOverlay::Open(2));
    }

    #[test]
    fn close_clears_active_project() {
        let mut o = ProjectOverlay::default();
        o.open(1);
        o.close();
        assert_eq!(o.active(), None);
        o.close();
        assert_eq!(o, ProjectOverlay::Closed);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut o = ProjectOverlay::Open(3);
        o.open_next(4);
        assert_eq!(o.active(), Some(0));
        o.open_prev(4);
        assert_eq!(o.active(), Some(3));
    }

    #[test]
    fn stepping_while_closed_does_nothing() {
        let mut o = ProjectOverlay::Closed;
        o.open_next(4);
        assert!(!o.is_open());
    }
}
