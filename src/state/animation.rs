// Entrance animations for sections and their boxes
use std::collections::HashMap;
use std::time::{Duration, Instant};

const SECTION_DELAY: f32 = 0.1;
const SECTION_DURATION: f32 = 0.8;
pub const SECTION_RISE: f32 = 30.0;
const ITEM_DELAY: f32 = 0.2;
const ITEM_STAGGER: f32 = 0.1;
const ITEM_DURATION: f32 = 0.6;
pub const ITEM_SLIDE: f32 = 20.0;
const POP_DELAY: f32 = 0.1;
const POP_DURATION: f32 = 0.3;
const BOUNCE_DURATION: f32 = 0.5;

/// Opacity and offset for one animated element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub opacity: f32,
    /// Horizontal shift in points
    pub offset_x: f32,
    /// Vertical shift in points
    pub offset_y: f32,
}

impl Frame {
    pub const SETTLED: Frame = Frame {
        opacity: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

/// Start times of the most recent entrance per section
#[derive(Default)]
pub struct Animations {
    started: HashMap<String, Instant>,
    longest: Duration,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart(&mut self, section_id: &str, item_count: usize) {
        self.restart_at(section_id, item_count, Instant::now());
    }

    pub fn restart_at(&mut self, section_id: &str, item_count: usize, now: Instant) {
        self.started.insert(section_id.to_string(), now);
        let items_end = ITEM_DELAY + ITEM_STAGGER * item_count as f32 + ITEM_DURATION;
        let end = items_end.max(SECTION_DELAY + SECTION_DURATION);
        self.longest = self.longest.max(Duration::from_secs_f32(end));
    }

    pub fn section(&self, section_id: &str, now: Instant) -> Frame {
        match self.elapsed(section_id, now) {
            Some(t) => {
                let p = progress(t, SECTION_DELAY, SECTION_DURATION);
                Frame {
                    opacity: p,
                    offset_x: 0.0,
                    offset_y: SECTION_RISE * (1.0 - p),
                }
            }
            None => Frame::SETTLED,
        }
    }

    /// Boxes inside a section, staggered by position
    pub fn item(&self, section_id: &str, index: usize, now: Instant) -> Frame {
        match self.elapsed(section_id, now) {
            Some(t) => {
                let delay = ITEM_DELAY + ITEM_STAGGER * index as f32;
                let p = progress(t, delay, ITEM_DURATION);
                Frame {
                    opacity: p,
                    offset_x: -ITEM_SLIDE * (1.0 - p),
                    offset_y: 0.0,
                }
            }
            None => Frame::SETTLED,
        }
    }

    /// True while any entrance may still be moving
    pub fn is_running(&self, now: Instant) -> bool {
        self.started
            .values()
            .any(|start| now.saturating_duration_since(*start) < self.longest)
    }

    fn elapsed(&self, section_id: &str, now: Instant) -> Option<f32> {
        self.started
            .get(section_id)
            .map(|start| now.saturating_duration_since(*start).as_secs_f32())
    }
}

/// Scale for output and feedback boxes popping in after an update
pub fn pop_scale(started: Instant, from: f32, now: Instant) -> f32 {
    let t = now.saturating_duration_since(started).as_secs_f32();
    let p = if t < POP_DELAY {
        0.0
    } else {
        ((t - POP_DELAY) / POP_DURATION).clamp(0.0, 1.0)
    };
    from + (1.0 - from) * ease_out(p)
}

pub fn pop_running(started: Instant, now: Instant) -> bool {
    now.saturating_duration_since(started).as_secs_f32() < POP_DELAY + POP_DURATION
}

/// Vertical offset of the title bounce: 0, 20, 60, 100% at rest, -20 at 40%, -10 at 80%
pub fn bounce_offset(started: Instant, now: Instant) -> f32 {
    let t = now.saturating_duration_since(started).as_secs_f32() / BOUNCE_DURATION;
    const KEYS: [(f32, f32); 6] = [
        (0.0, 0.0),
        (0.2, 0.0),
        (0.4, -20.0),
        (0.6, 0.0),
        (0.8, -10.0),
        (1.0, 0.0),
    ];
    if t >= 1.0 {
        return 0.0;
    }
    for pair in KEYS.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let local = (t - t0) / (t1 - t0);
            return v0 + (v1 - v0) * local.clamp(0.0, 1.0);
        }
    }
    0.0
}

pub fn bounce_running(started: Instant, now: Instant) -> bool {
    now.saturating_duration_since(started).as_secs_f32() < BOUNCE_DURATION
}

fn progress(elapsed: f32, delay: f32, duration: f32) -> f32 {
    if elapsed <= delay {
        return 0.0;
    }
    standard_ease(((elapsed - delay) / duration).clamp(0.0, 1.0))
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// `cubic-bezier(0.4, 0, 0.2, 1)`
pub fn standard_ease(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, t)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let curve = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };

    // Bisection on the monotonic x(s)
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    let mut s = x;
    for _ in 0..24 {
        let cx = curve(x1, x2, s);
        if (cx - x).abs() < 1e-5 {
            break;
        }
        if cx < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    curve(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ease_endpoints_and_shape() {
        assert_eq!(standard_ease(0.0), 0.0);
        assert_eq!(standard_ease(1.0), 1.0);
        let mid = standard_ease(0.5);
        // Decelerating curve: past the linear midpoint
        assert!(mid > 0.7 && mid < 0.85, "mid = {}", mid);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = standard_ease(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_unstarted_section_is_settled() {
        let animations = Animations::new();
        let now = Instant::now();
        assert_eq!(animations.section("intro", now), Frame::SETTLED);
        assert_eq!(animations.item("intro", 2, now), Frame::SETTLED);
        assert!(!animations.is_running(now));
    }

    #[test]
    fn test_section_entrance_timeline() {
        let mut animations = Animations::new();
        let start = Instant::now();
        animations.restart_at("intro", 2, start);

        let hidden = animations.section("intro", start + Duration::from_millis(50));
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.offset_y, 30.0);

        let done = animations.section("intro", start + Duration::from_millis(950));
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.offset_y, 0.0);

        assert!(animations.is_running(start + Duration::from_millis(500)));
        assert!(!animations.is_running(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_items_are_staggered() {
        let mut animations = Animations::new();
        let start = Instant::now();
        animations.restart_at("intro", 3, start);

        let at = start + Duration::from_millis(450);
        let first = animations.item("intro", 0, at);
        let third = animations.item("intro", 2, at);
        assert!(first.opacity > third.opacity);
        assert!(third.offset_x < first.offset_x);
    }

    #[test]
    fn test_pop_scale() {
        let start = Instant::now();
        assert_eq!(pop_scale(start, 0.95, start), 0.95);
        assert!((pop_scale(start, 0.95, start + Duration::from_millis(500)) - 1.0).abs() < 1e-6);
        assert!(!pop_running(start, start + Duration::from_millis(500)));
    }

    #[test]
    fn test_bounce_keyframes() {
        let start = Instant::now();
        let at = |ms: u64| bounce_offset(start, start + Duration::from_millis(ms));
        assert_eq!(at(0), 0.0);
        assert!((at(200) - -20.0).abs() < 0.01);
        assert!((at(400) - -10.0).abs() < 0.01);
        assert_eq!(at(600), 0.0);
    }
}
