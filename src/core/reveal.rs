//! Scroll-reveal tracking for project cards.
//!
//! Cards register the page rows they occupy; after each scroll or layout
//! pass the tracker is handed the current viewport and marks every card whose
//! visible fraction reaches [`REVEAL_THRESHOLD`].  Revealed indices are never
//! removed, so a card that scrolls back out of view stays revealed.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Fraction of a card's height that must be on screen before it reveals.
pub const REVEAL_THRESHOLD: f32 = 0.3;

/// Identifies a registered region.  Wraps the project index it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey(pub usize);

/// Vertical span of a region in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub top: usize,
    pub height: usize,
}

/// The currently visible window of page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub height: usize,
}

impl Region {
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }

    /// Share of this region that lies inside `viewport`, in `[0, 1]`.
    pub fn visible_fraction(&self, viewport: Viewport) -> f32 {
        let vp_bottom = viewport.top + viewport.height;
        if self.height == 0 {
            let inside = self.top >= viewport.top && self.top < vp_bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let start = self.top.max(viewport.top);
        let end = self.bottom().min(vp_bottom);
        if end <= start {
            return 0.0;
        }
        (end - start) as f32 / self.height as f32
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevealError {
    #[error("region {index} is outside the {count} known cards")]
    OutOfRange { index: usize, count: usize },
}

#[derive(Debug)]
pub struct VisibilityTracker {
    card_count: usize,
    regions: BTreeMap<RegionKey, Region>,
    revealed: BTreeSet<usize>,
}

impl VisibilityTracker {
    pub fn new(card_count: usize) -> Self {
        Self {
            card_count,
            regions: BTreeMap::new(),
            revealed: BTreeSet::new(),
        }
    }

    /// Start observing `region` under `key`, replacing any earlier span.
    pub fn register(&mut self, key: RegionKey, region: Region) -> Result<(), RevealError> {
        if key.0 >= self.card_count {
            return Err(RevealError::OutOfRange {
                index: key.0,
                count: self.card_count,
            });
        }
        self.regions.insert(key, region);
        Ok(())
    }

    /// Stop observing `key`.  Its revealed state, if any, is kept.
    pub fn deregister(&mut self, key: RegionKey) -> bool {
        self.regions.remove(&key).is_some()
    }

    /// Replace the registered set with `regions`: new keys are registered,
    /// moved ones updated, and keys missing from `regions` deregistered.
    pub fn sync_regions<I>(&mut self, regions: I) -> Result<(), RevealError>
    where
        I: IntoIterator<Item = (RegionKey, Region)>,
    {
        let mut present = BTreeSet::new();
        for (key, region) in regions {
            self.register(key, region)?;
            present.insert(key);
        }
        let stale: Vec<RegionKey> = self
            .regions
            .keys()
            .filter(|k| !present.contains(*k))
            .copied()
            .collect();
        for key in stale {
            self.deregister(key);
        }
        Ok(())
    }

    /// Feed the current viewport.  Returns the indices revealed by this call.
    pub fn observe(&mut self, viewport: Viewport) -> Vec<usize> {
        let mut newly = Vec::new();
        for (key, region) in &self.regions {
            if region.visible_fraction(viewport) >= REVEAL_THRESHOLD && self.revealed.insert(key.0) {
                newly.push(key.0);
            }
        }
        if !newly.is_empty() {
            tracing::debug!(?newly, "cards revealed");
        }
        newly
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    #[cfg(test)]
    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    #[cfg(test)]
    pub fn is_registered(&self, key: RegionKey) -> bool {
        self.regions.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(top: usize, height: usize) -> Region {
        Region { top, height }
    }

    fn vp(top: usize, height: usize) -> Viewport {
        Viewport { top, height }
    }

    #[test]
    fn fraction_of_partially_visible_region() {
        let r = region(10, 10);
        assert_eq!(r.visible_fraction(vp(0, 13)), 0.3);
        assert_eq!(r.visible_fraction(vp(0, 10)), 0.0);
        assert_eq!(r.visible_fraction(vp(5, 100)), 1.0);
        assert_eq!(r.visible_fraction(vp(18, 10)), 0.2);
    }

    #[test]
    fn zero_height_region_counts_when_inside() {
        assert_eq!(region(4, 0).visible_fraction(vp(0, 5)), 1.0);
        assert_eq!(region(5, 0).visible_fraction(vp(0, 5)), 0.0);
    }

    #[test]
    fn reveals_at_threshold_and_not_below() {
        let mut t = VisibilityTracker::new(2);
        t.register(RegionKey(0), region(10, 10)).unwrap();
        t.register(RegionKey(1), region(30, 10)).unwrap();

        assert!(t.observe(vp(0, 12)).is_empty());
        assert_eq!(t.observe(vp(0, 13)), vec![0]);
        assert!(t.is_revealed(0));
        assert!(!t.is_revealed(1));
    }

    #[test]
    fn revealed_set_only_grows() {
        let mut t = VisibilityTracker::new(3);
        for i in 0..3 {
            t.register(RegionKey(i), region(i * 20, 10)).unwrap();
        }

        let viewports = [vp(0, 10), vp(40, 10), vp(0, 5), vp(100, 10), vp(20, 10), vp(0, 0)];
        let mut previous = BTreeSet::new();
        for v in viewports {
            t.observe(v);
            assert!(t.revealed().is_superset(&previous));
            previous = t.revealed().clone();
        }
        assert_eq!(t.revealed().len(), 3);
    }

    #[test]
    fn re_observing_a_revealed_card_is_a_noop() {
        let mut t = VisibilityTracker::new(1);
        t.register(RegionKey(0), region(0, 4)).unwrap();
        assert_eq!(t.observe(vp(0, 10)), vec![0]);
        assert!(t.observe(vp(0, 10)).is_empty());
        assert_eq!(t.revealed().len(), 1);
    }

    #[test]
    fn out_of_range_keys_are_rejected() {
        let mut t = VisibilityTracker::new(2);
        assert_eq!(
            t.register(RegionKey(2), region(0, 1)),
            Err(RevealError::OutOfRange { index: 2, count: 2 })
        );
        assert!(!t.is_registered(RegionKey(2)));
    }

    #[test]
    fn unregistered_regions_never_fire() {
        let mut t = VisibilityTracker::new(2);
        t.register(RegionKey(0), region(0, 5)).unwrap();
        t.register(RegionKey(1), region(0, 5)).unwrap();
        assert!(t.deregister(RegionKey(1)));

        assert_eq!(t.observe(vp(0, 10)), vec![0]);
        assert!(!t.is_revealed(1));
    }

    #[test]
    fn sync_drops_regions_that_disappeared() {
        let mut t = VisibilityTracker::new(3);
        t.sync_regions([(RegionKey(0), region(0, 5)), (RegionKey(1), region(50, 5))])
            .unwrap();
        t.observe(vp(0, 10));

        t.sync_regions([(RegionKey(2), region(60, 5))]).unwrap();
        assert!(!t.is_registered(RegionKey(0)));
        assert!(!t.is_registered(RegionKey(1)));

        assert_eq!(t.observe(vp(50, 20)), vec![2]);
        // Card 0 was revealed before it was dropped and stays revealed.
        assert!(t.is_revealed(0));
        assert!(!t.is_revealed(1));
    }
}
