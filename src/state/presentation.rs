// Presentation state - what the header, nav bar and footer draw each frame
use super::navigation::SlidePresenter;

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    pub current: usize,
    pub total: usize,
    /// Progress bar fill in 0.0..=1.0
    pub progress_fraction: f32,
    pub progress_text: String,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub active_link: Option<usize>,
    pending_scroll: Option<String>,
}

impl PresentationState {
    pub fn new() -> Self {
        Self {
            current: 0,
            total: 0,
            progress_fraction: 0.0,
            progress_text: String::new(),
            prev_enabled: false,
            next_enabled: false,
            active_link: None,
            pending_scroll: None,
        }
    }

    pub fn indicator_text(&self) -> String {
        format!("{} / {}", self.current, self.total)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_link == Some(index)
    }

    /// Section the view should bring into view this frame, if any
    pub fn take_pending_scroll(&mut self) -> Option<String> {
        self.pending_scroll.take()
    }
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new()
    }
}

impl SlidePresenter for PresentationState {
    fn update_indicator(&mut self, current: usize, total: usize) {
        self.current = current;
        self.total = total;
    }

    fn update_progress(&mut self, percentage: f32, rounded: u32) {
        self.progress_fraction = (percentage / 100.0).clamp(0.0, 1.0);
        self.progress_text = format!("{}% Complete", rounded);
    }

    fn update_buttons(&mut self, prev_disabled: bool, next_disabled: bool) {
        self.prev_enabled = !prev_disabled;
        self.next_enabled = !next_disabled;
    }

    fn set_active_link(&mut self, index: usize) {
        self.active_link = Some(index);
    }

    fn scroll_into_view(&mut self, section_id: &str) {
        self.pending_scroll = Some(section_id.to_string());
    }
}
