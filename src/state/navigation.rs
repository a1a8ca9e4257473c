// Navigation state - current slide, presenter sync and persistence
use super::progress::ProgressStore;
use log::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Everything the navigator drives on screen. Slide indices are 1-based.
pub trait SlidePresenter {
    fn update_indicator(&mut self, current: usize, total: usize);
    fn update_progress(&mut self, percentage: f32, rounded: u32);
    fn update_buttons(&mut self, prev_disabled: bool, next_disabled: bool);
    fn set_active_link(&mut self, index: usize);
    fn scroll_into_view(&mut self, section_id: &str);
}

/// Owns the current slide index. `current` is always within `1..=total`.
pub struct Navigator<P: SlidePresenter> {
    sections: Vec<String>,
    current: usize,
    presenter: P,
    progress: ProgressStore,
}

impl<P: SlidePresenter> Navigator<P> {
    /// `sections` must be non-empty; decks are validated before they get here.
    pub fn new(sections: Vec<String>, presenter: P, progress: ProgressStore) -> Self {
        debug_assert!(!sections.is_empty());
        Self {
            sections,
            current: 1,
            presenter,
            progress,
        }
    }

    /// Seed the position from the stored progress and draw it once.
    /// Out-of-range stored values are dropped; nothing is written back.
    pub fn restore(&mut self) {
        if let Some(saved) = self.progress.load() {
            match self.checked(saved) {
                Some(index) => {
                    debug!("Restored progress at slide {}", index);
                    self.current = index;
                }
                None => warn!(
                    "Ignoring stored progress {} outside 1..={}",
                    saved,
                    self.total()
                ),
            }
        }
        self.sync();
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        let candidate = self.current as i64 + direction.delta();
        self.jump_to(candidate)
    }

    pub fn jump_to(&mut self, target: i64) -> bool {
        match self.checked(target) {
            Some(index) => {
                self.transition(index);
                true
            }
            None => false,
        }
    }

    /// Jump by section id, as reported by the visibility tracker
    pub fn jump_to_section(&mut self, section_id: &str) -> bool {
        match self.sections.iter().position(|id| id == section_id) {
            Some(position) => self.jump_to(position as i64 + 1),
            None => false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.sections.len()
    }

    pub fn current_section(&self) -> &str {
        &self.sections[self.current - 1]
    }

    pub fn percentage(&self) -> f32 {
        self.current as f32 / self.total() as f32 * 100.0
    }

    pub fn rounded_percentage(&self) -> u32 {
        self.percentage().round() as u32
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[cfg(test)]
    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressStore {
        &mut self.progress
    }

    fn checked(&self, candidate: i64) -> Option<usize> {
        if candidate >= 1 && candidate <= self.total() as i64 {
            Some(candidate as usize)
        } else {
            None
        }
    }

    fn transition(&mut self, index: usize) {
        debug!("Slide {} -> {}", self.current, index);
        self.current = index;
        self.sync();
        self.progress.save(index);
    }

    fn sync(&mut self) {
        let current = self.current;
        let total = self.total();
        self.presenter.update_indicator(current, total);
        self.presenter
            .update_progress(self.percentage(), self.rounded_percentage());
        self.presenter
            .update_buttons(!self.can_go_previous(), !self.can_go_next());
        self.presenter.set_active_link(current);
        let section_id = self.sections[current - 1].clone();
        self.presenter.scroll_into_view(&section_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::progress::{MemoryBackend, PROGRESS_KEY};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Indicator(usize, usize),
        Progress(u32),
        Buttons(bool, bool),
        ActiveLink(usize),
        Scroll(String),
    }

    #[derive(Default)]
    struct RecordingPresenter {
        calls: Vec<Call>,
        active_links: Vec<usize>,
    }

    impl SlidePresenter for RecordingPresenter {
        fn update_indicator(&mut self, current: usize, total: usize) {
            self.calls.push(Call::Indicator(current, total));
        }

        fn update_progress(&mut self, _percentage: f32, rounded: u32) {
            self.calls.push(Call::Progress(rounded));
        }

        fn update_buttons(&mut self, prev_disabled: bool, next_disabled: bool) {
            self.calls.push(Call::Buttons(prev_disabled, next_disabled));
        }

        fn set_active_link(&mut self, index: usize) {
            self.active_links = vec![index];
            self.calls.push(Call::ActiveLink(index));
        }

        fn scroll_into_view(&mut self, section_id: &str) {
            self.calls.push(Call::Scroll(section_id.to_string()));
        }
    }

    fn sections() -> Vec<String> {
        [
            "introduction",
            "classes-objects",
            "inheritance",
            "polymorphism",
            "encapsulation",
            "abstraction",
            "video-resources",
            "exercises",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn navigator_with(backend: MemoryBackend) -> Navigator<RecordingPresenter> {
        let mut nav = Navigator::new(
            sections(),
            RecordingPresenter::default(),
            ProgressStore::new(Box::new(backend)),
        );
        nav.restore();
        nav.presenter_mut().calls.clear();
        nav
    }

    fn navigator() -> Navigator<RecordingPresenter> {
        navigator_with(MemoryBackend::new())
    }

    #[test]
    fn test_starts_at_first_slide() {
        let nav = navigator();
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.total(), 8);
        assert_eq!(nav.current_section(), "introduction");
        assert!(!nav.can_go_previous());
        assert!(nav.can_go_next());
    }

    #[test]
    fn test_jump_to_every_valid_index() {
        let mut nav = navigator();
        for i in 1..=8usize {
            assert!(nav.jump_to(i as i64));
            assert_eq!(nav.current(), i);
            let expected = (i as f64 / 8.0 * 100.0).round() as u32;
            assert_eq!(nav.rounded_percentage(), expected);
            assert_eq!(nav.presenter().active_links, vec![i]);
        }
    }

    #[test]
    fn test_jump_to_five_scenario() {
        let mut nav = navigator();
        assert!(nav.jump_to(5));

        assert_eq!(nav.current(), 5);
        assert_eq!(nav.rounded_percentage(), 63);
        assert_eq!(nav.progress().load(), Some(5));
        assert_eq!(
            nav.presenter().calls,
            vec![
                Call::Indicator(5, 8),
                Call::Progress(63),
                Call::Buttons(false, false),
                Call::ActiveLink(5),
                Call::Scroll("encapsulation".to_string()),
            ]
        );
    }

    #[test]
    fn test_step_past_end_is_noop() {
        let mut nav = navigator();
        nav.jump_to(8);
        nav.presenter_mut().calls.clear();
        let persisted = nav.progress().load();

        assert!(!nav.step(Direction::Next));

        assert_eq!(nav.current(), 8);
        assert_eq!(nav.progress().load(), persisted);
        assert!(nav.presenter().calls.is_empty());
        assert!(!nav.can_go_next());
    }

    #[test]
    fn test_step_before_start_is_noop() {
        let mut nav = navigator();

        assert!(!nav.step(Direction::Previous));

        assert_eq!(nav.current(), 1);
        assert_eq!(nav.progress().load(), None);
        assert!(nav.presenter().calls.is_empty());
    }

    #[test]
    fn test_step_moves_one_slide() {
        let mut nav = navigator();
        assert!(nav.step(Direction::Next));
        assert!(nav.step(Direction::Next));
        assert_eq!(nav.current(), 3);
        assert!(nav.step(Direction::Previous));
        assert_eq!(nav.current(), 2);
        assert_eq!(nav.progress().load(), Some(2));
    }

    #[test]
    fn test_out_of_range_jumps_are_ignored() {
        let mut nav = navigator();
        nav.jump_to(4);
        nav.presenter_mut().calls.clear();

        for target in [0, -1, 9, 100, i64::MIN, i64::MAX] {
            assert!(!nav.jump_to(target));
        }

        assert_eq!(nav.current(), 4);
        assert_eq!(nav.progress().load(), Some(4));
        assert!(nav.presenter().calls.is_empty());
    }

    #[test]
    fn test_buttons_at_the_edges() {
        let mut nav = navigator();
        nav.jump_to(8);
        assert!(nav.presenter().calls.contains(&Call::Buttons(false, true)));

        nav.jump_to(1);
        assert!(nav.presenter().calls.contains(&Call::Buttons(true, false)));
    }

    #[test]
    fn test_jump_to_section_by_id() {
        let mut nav = navigator();
        assert!(nav.jump_to_section("polymorphism"));
        assert_eq!(nav.current(), 4);

        assert!(!nav.jump_to_section("missing"));
        assert_eq!(nav.current(), 4);
    }

    #[test]
    fn test_restore_from_stored_progress() {
        let mut nav = Navigator::new(
            sections(),
            RecordingPresenter::default(),
            ProgressStore::new(Box::new(MemoryBackend::with_value(PROGRESS_KEY, "3"))),
        );
        nav.restore();

        assert_eq!(nav.current(), 3);
        assert_eq!(nav.rounded_percentage(), 38);
        assert_eq!(
            nav.presenter().calls,
            vec![
                Call::Indicator(3, 8),
                Call::Progress(38),
                Call::Buttons(false, false),
                Call::ActiveLink(3),
                Call::Scroll("inheritance".to_string()),
            ]
        );
    }

    #[test]
    fn test_restore_discards_out_of_range_value() {
        let nav = navigator_with(MemoryBackend::with_value(PROGRESS_KEY, "42"));
        assert_eq!(nav.current(), 1);
        // Left untouched until the next accepted transition
        assert_eq!(nav.progress().load(), Some(42));
    }

    #[test]
    fn test_restore_ignores_garbage() {
        let nav = navigator_with(MemoryBackend::with_value(PROGRESS_KEY, "abc"));
        assert_eq!(nav.current(), 1);
    }

    #[test]
    fn test_restore_with_unavailable_storage() {
        let mut nav = navigator_with(MemoryBackend::unavailable());
        assert_eq!(nav.current(), 1);
        assert!(nav.jump_to(2));
        assert_eq!(nav.current(), 2);
    }
}
