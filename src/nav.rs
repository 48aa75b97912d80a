//! Navigation state and the scroll-position resolver.
//!
//! The viewport's scroll offset drives a single probe point (the
//! mid-viewport row); the probe decides both which event section is
//! active and which date mark inside it is active. User actions (rail
//! jumps, carousel arrows and dots) flow through the same state, so
//! rail, sections and carousels never disagree.

/// Measured vertical extent of one event section, in document rows.
///
/// Supplied by the layout pass; sections are stacked contiguously, so
/// at most one section can contain any given probe point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    pub top: f32,
    pub height: f32,
}

impl SectionGeometry {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open span test: `[top, top + height)`.
    ///
    /// A zero-height (unmeasured) section contains nothing and is
    /// thereby excluded from the scan.
    pub fn contains(&self, probe: f32) -> bool {
        probe >= self.top && probe < self.bottom()
    }
}

/// The one mutable navigation state instance.
///
/// `active_date` is only meaningful while the active event has dates;
/// for a dateless event the resolver leaves it clamped at 0 and the
/// renderer ignores it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub active_event: usize,
    pub active_date: usize,
    slide_by_event: Vec<usize>,
}

impl NavState {
    pub fn new(event_count: usize) -> Self {
        Self {
            active_event: 0,
            active_date: 0,
            slide_by_event: vec![0; event_count],
        }
    }

    /// Current slide index for an event's carousel.
    pub fn slide(&self, event: usize) -> usize {
        self.slide_by_event.get(event).copied().unwrap_or(0)
    }

    /// Commit a resolver result.
    pub fn set_active(&mut self, event: usize, date: usize) {
        self.active_event = event;
        self.active_date = date;
    }

    /// Step an event's carousel by `direction` (−1 or +1) with true
    /// modulo wraparound in both directions. Only that event's index
    /// moves; every other carousel is untouched.
    ///
    /// `count` is the event's slide count (≥ 1, guaranteed by catalog
    /// validation).
    pub fn advance_slide(&mut self, event: usize, count: usize, direction: i64) {
        if count == 0 {
            return;
        }
        if let Some(slot) = self.slide_by_event.get_mut(event) {
            let n = count as i64;
            *slot = (((*slot as i64 + direction) % n + n) % n) as usize;
        }
    }

    /// Select a slide directly (dot selection). The target is clamped
    /// into range at this boundary rather than trusted.
    pub fn set_slide(&mut self, event: usize, count: usize, target: usize) {
        if count == 0 {
            return;
        }
        if let Some(slot) = self.slide_by_event.get_mut(event) {
            *slot = target.min(count - 1);
        }
    }
}

/// Resolve the scroll position into `(active_event, active_date)`.
///
/// Returns `None` when nothing changes: either the probe point falls in
/// no measured section (state holds its previous value, no "closest"
/// fallback), or the resolved pair equals `current` (idempotent, so
/// repeated calls with the same inputs cause no extra transitions).
pub fn resolve(
    scroll_offset: f32,
    viewport_height: f32,
    sections: &[SectionGeometry],
    date_counts: &[usize],
    current: (usize, usize),
) -> Option<(usize, usize)> {
    let probe = scroll_offset + viewport_height / 2.0;

    let (event, geometry) = sections
        .iter()
        .enumerate()
        .find(|(_, g)| g.contains(probe))?;

    let dates = date_counts.get(event).copied().unwrap_or(0);

    // The section is split into `dates + 1` equal bands; the first band
    // is lead-in, so the first date mark activates only once the probe
    // has moved one band past the section top.
    let band = geometry.height / (dates as f32 + 1.0);
    let raw = ((probe - geometry.top) / band).floor() as i64 - 1;
    let date = raw.clamp(0, dates.saturating_sub(1) as i64) as usize;

    let resolved = (event, date);
    if resolved == current {
        None
    } else {
        Some(resolved)
    }
}

/// Scroll offset that puts an event's section top at the top of the
/// viewport. The caller clamps the event index into range before
/// invoking; an unmeasured index yields no target.
pub fn scroll_target(sections: &[SectionGeometry], event: usize) -> Option<f32> {
    sections.get(event).map(|g| g.top)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(heights: &[f32]) -> Vec<SectionGeometry> {
        let mut top = 0.0;
        heights
            .iter()
            .map(|&h| {
                let g = SectionGeometry::new(top, h);
                top += h;
                g
            })
            .collect()
    }

    #[test]
    fn test_band_scenario() {
        // One 900-row section with 4 dates; probe at 500.
        let sections = stacked(&[900.0]);
        let resolved = resolve(100.0, 800.0, &sections, &[4], (usize::MAX, 0));
        // band = 180, floor(500/180) - 1 = 1
        assert_eq!(resolved, Some((0, 1)));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let sections = stacked(&[900.0]);
        let first = resolve(100.0, 800.0, &sections, &[4], (usize::MAX, 0)).unwrap();
        let second = resolve(100.0, 800.0, &sections, &[4], first);
        assert_eq!(second, None);
    }

    #[test]
    fn test_probe_outside_sections_holds_state() {
        // Geometry not yet measured: empty scan.
        assert_eq!(resolve(10.0, 50.0, &[], &[], (0, 0)), None);

        // Probe past the last section bottom.
        let sections = stacked(&[100.0, 100.0]);
        assert_eq!(resolve(300.0, 50.0, &sections, &[2, 2], (1, 1)), None);
    }

    #[test]
    fn test_at_most_one_section_matches() {
        let sections = stacked(&[120.0, 80.0, 200.0]);
        for probe in [0.0, 119.9, 120.0, 199.9, 200.0, 399.9] {
            let matches = sections.iter().filter(|g| g.contains(probe)).count();
            assert_eq!(matches, 1, "probe {} matched {} sections", probe, matches);
        }
    }

    #[test]
    fn test_zero_height_section_is_skipped() {
        let sections = vec![
            SectionGeometry::new(0.0, 0.0),
            SectionGeometry::new(0.0, 100.0),
        ];
        let resolved = resolve(0.0, 100.0, &sections, &[3, 3], (usize::MAX, 0));
        assert_eq!(resolved.unwrap().0, 1);
    }

    #[test]
    fn test_fine_index_clamps() {
        let sections = stacked(&[100.0]);
        // Probe in the lead-in band: raw index is -1, clamped to 0.
        assert_eq!(resolve(0.0, 10.0, &sections, &[3], (usize::MAX, 0)), Some((0, 0)));
        // Probe at the very bottom of the section: clamped to d - 1.
        assert_eq!(resolve(94.8, 10.0, &sections, &[3], (usize::MAX, 0)), Some((0, 2)));
    }

    #[test]
    fn test_band_monotonicity() {
        let sections = stacked(&[300.0]);
        let mut last = 0;
        let mut probe = 0.5f32;
        while probe < 300.0 {
            if let Some((event, date)) = resolve(probe, 0.0, &sections, &[5], (usize::MAX, 0)) {
                assert_eq!(event, 0);
                assert!(date >= last, "date index fell from {} to {}", last, date);
                last = date;
            }
            probe += 0.5;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn test_dateless_event_resolves_to_zero() {
        let sections = stacked(&[100.0]);
        assert_eq!(resolve(40.0, 20.0, &sections, &[0], (usize::MAX, 1)), Some((0, 0)));
    }

    #[test]
    fn test_wraparound_both_directions() {
        let mut nav = NavState::new(1);
        nav.set_slide(0, 3, 2);
        nav.advance_slide(0, 3, 1);
        assert_eq!(nav.slide(0), 0);
        nav.advance_slide(0, 3, -1);
        assert_eq!(nav.slide(0), 2);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        for direction in [-1i64, 1] {
            let mut nav = NavState::new(1);
            nav.set_slide(0, 5, 3);
            for _ in 0..5 {
                nav.advance_slide(0, 5, direction);
            }
            assert_eq!(nav.slide(0), 3);
        }
    }

    #[test]
    fn test_carousels_are_independent() {
        let mut nav = NavState::new(3);
        nav.advance_slide(1, 4, 1);
        assert_eq!(nav.slide(0), 0);
        assert_eq!(nav.slide(1), 1);
        assert_eq!(nav.slide(2), 0);
    }

    #[test]
    fn test_set_slide_clamps_target() {
        let mut nav = NavState::new(1);
        nav.set_slide(0, 3, 99);
        assert_eq!(nav.slide(0), 2);
    }

    #[test]
    fn test_jump_target_then_resolve() {
        let sections = stacked(&[400.0, 400.0, 400.0, 400.0, 400.0]);
        let target = scroll_target(&sections, 2).unwrap();
        assert_eq!(target, 800.0);

        let resolved = resolve(target, 100.0, &sections, &[2, 2, 2, 2, 2], (0, 0));
        assert_eq!(resolved.unwrap().0, 2);
    }

    #[test]
    fn test_jump_target_out_of_range() {
        let sections = stacked(&[400.0]);
        assert_eq!(scroll_target(&sections, 7), None);
    }
}
