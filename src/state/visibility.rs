// Visibility tracking - turns scrolling into navigation
use std::collections::HashMap;

/// Frames the scroll offset must hold still before a programmatic scroll counts as done
const SETTLE_FRAMES: u32 = 3;

pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Share of a section that must be on screen before its entrance plays
pub const ENTRANCE_THRESHOLD: f32 = 0.3;

/// One section's standing in the viewport for a single frame
#[derive(Clone, Debug, PartialEq)]
pub struct SectionVisibility {
    pub id: String,
    /// Visible share of the section, or of the viewport for sections taller than it
    pub fraction: f32,
    /// Distance between the section top and the viewport top
    pub top_offset: f32,
}

impl SectionVisibility {
    /// Measure `section` (top, bottom) against `viewport` (top, bottom), in screen space
    pub fn measure(id: &str, section: (f32, f32), viewport: (f32, f32)) -> Self {
        let (top, bottom) = section;
        let (view_top, view_bottom) = viewport;
        let visible = (bottom.min(view_bottom) - top.max(view_top)).max(0.0);
        let basis = (bottom - top).min(view_bottom - view_top);
        let fraction = if basis > 0.0 { visible / basis } else { 0.0 };
        Self {
            id: id.to_string(),
            fraction: fraction.clamp(0.0, 1.0),
            top_offset: (top - view_top).abs(),
        }
    }
}

/// Reports sections that cross the visibility threshold.
///
/// Only rising edges count. Within one frame the crossings come back ordered so the
/// section nearest the viewport top is last, which makes it the final position when
/// each report is applied in turn.
pub struct VisibilityTracker {
    threshold: f32,
    intersecting: HashMap<String, bool>,
    baseline_taken: bool,
    settling: bool,
    stable_frames: u32,
    last_offset: Option<f32>,
}

impl VisibilityTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: if threshold.is_finite() {
                threshold.clamp(0.01, 1.0)
            } else {
                DEFAULT_THRESHOLD
            },
            intersecting: HashMap::new(),
            baseline_taken: false,
            settling: false,
            stable_frames: 0,
            last_offset: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Called when the view starts a scroll on the navigator's behalf
    pub fn begin_settling(&mut self) {
        self.settling = true;
        self.stable_frames = 0;
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn observe(&mut self, scroll_offset: f32, batch: &[SectionVisibility]) -> Vec<String> {
        self.track_settling(scroll_offset);

        let mut crossings: Vec<(&str, f32)> = Vec::new();
        for entry in batch {
            let now = entry.fraction >= self.threshold;
            let was = self.intersecting.insert(entry.id.clone(), now).unwrap_or(false);
            if now && !was {
                crossings.push((&entry.id, entry.top_offset));
            }
        }

        if !self.baseline_taken {
            self.baseline_taken = true;
            return Vec::new();
        }
        if self.settling {
            return Vec::new();
        }

        // Farthest first; stable for equal offsets
        crossings.sort_by(|a, b| b.1.total_cmp(&a.1));
        crossings.into_iter().map(|(id, _)| id.to_string()).collect()
    }

    fn track_settling(&mut self, scroll_offset: f32) {
        let unchanged = self
            .last_offset
            .map(|last| (last - scroll_offset).abs() < 0.5)
            .unwrap_or(false);
        self.last_offset = Some(scroll_offset);

        if !self.settling {
            return;
        }
        if unchanged {
            self.stable_frames += 1;
            if self.stable_frames >= SETTLE_FRAMES {
                self.settling = false;
            }
        } else {
            self.stable_frames = 0;
        }
    }
}

/// Reports sections scrolling into view, so each replays its entrance.
///
/// Unlike `VisibilityTracker` the first frame counts and programmatic scrolls are not
/// filtered; a section passed on the way to a target animates too.
#[derive(Default)]
pub struct EntranceTracker {
    entered: HashMap<String, bool>,
}

impl EntranceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, batch: &[SectionVisibility]) -> Vec<String> {
        batch
            .iter()
            .filter_map(|entry| {
                let now = entry.fraction >= ENTRANCE_THRESHOLD;
                let was = self.entered.insert(entry.id.clone(), now).unwrap_or(false);
                (now && !was).then(|| entry.id.clone())
            })
            .collect()
    }
}
