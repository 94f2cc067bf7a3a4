//! Row-level smooth scroll with exponential ease-out.
//!
//! Section navigation sets a target offset; each tick the displayed offset
//! closes a fixed fraction of the remaining distance, so long jumps start
//! fast and visibly decelerate into place.

/// Page scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Displayed offset in rows (fractional while animating).
    position: f64,
    target: u16,
    /// Fraction of the remaining distance covered per tick.
    speed: f64,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(0.35)
    }
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0,
            speed: speed.clamp(0.05, 1.0),
        }
    }

    /// Move immediately, cancelling any running animation.
    pub fn jump_to(&mut self, offset: u16) {
        self.position = f64::from(offset);
        self.target = offset;
    }

    /// Start easing toward `offset`.
    pub fn scroll_to(&mut self, offset: u16) {
        self.target = offset;
    }

    /// Advance one frame.  Returns `true` if the displayed offset moved.
    pub fn tick(&mut self) -> bool {
        let before = self.offset();
        let remaining = f64::from(self.target) - self.position;
        self.position += remaining * self.speed;
        if (f64::from(self.target) - self.position).abs() < 0.5 {
            self.position = f64::from(self.target);
        }
        self.offset() != before
    }

    /// Current displayed offset.
    pub fn offset(&self) -> u16 {
        self.position.round().clamp(0.0, f64::from(u16::MAX)) as u16
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    pub fn is_animating(&self) -> bool {
        self.position != f64::from(self.target)
    }

    /// Clamp both the displayed offset and the target to `max`.
    pub fn clamp(&mut self, max: u16) {
        self.target = self.target.min(max);
        self.position = self.position.min(f64::from(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_out_and_settles_on_target() {
        let mut s = SmoothScroll::new(0.5);
        s.scroll_to(40);
        let mut steps = Vec::new();
        while s.is_animating() {
            s.tick();
            steps.push(s.offset());
            assert!(steps.len() < 50, "never settled");
        }
        assert_eq!(*steps.last().unwrap(), 40);
        // First step covers more ground than later ones.
        assert!(steps[0] > steps[2] - steps[1]);
    }

    #[test]
    fn jump_cancels_animation() {
        let mut s = SmoothScroll::default();
        s.scroll_to(100);
        s.tick();
        s.jump_to(7);
        assert!(!s.is_animating());
        assert_eq!(s.offset(), 7);
        assert!(!s.tick());
    }

    #[test]
    fn clamp_pulls_target_back() {
        let mut s = SmoothScroll::default();
        s.jump_to(80);
        s.scroll_to(90);
        s.clamp(50);
        assert_eq!(s.target(), 50);
        assert_eq!(s.offset(), 50);
    }
}
