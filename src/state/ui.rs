// UI state - theme, messages, modals and small per-widget toggles
use crate::style::Theme;
use std::collections::HashMap;
use std::time::Instant;

pub const EASTER_EGG_MESSAGE: &str = "🎉 You found the Easter egg! You're a true Java explorer!";
const EASTER_EGG_CLICKS: u32 = 5;

pub struct UIState {
    pub theme: Theme,
    pub error_message: Option<(String, Instant)>,
    pub info_message: Option<(String, Instant)>,
    /// Blocking notice shown in a modal until dismissed
    pub alert: Option<String>,
    pub show_help: bool,
    pub title_clicks: u32,
    pub egg_started: Option<Instant>,
    /// Exercise answers currently shown, with the time they were revealed
    pub revealed: HashMap<String, Instant>,
    /// Set while a code editor holds keyboard focus
    pub editor_focused: bool,
}

impl UIState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            error_message: None,
            info_message: None,
            alert: None,
            show_help: false,
            title_clicks: 0,
            egg_started: None,
            revealed: HashMap::new(),
            editor_focused: false,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some((message, Instant::now()));
    }

    pub fn set_info(&mut self, message: String) {
        self.info_message = Some((message, Instant::now()));
    }

    pub fn clear_expired_messages(&mut self, timeout_secs: u64) {
        if let Some((_, time)) = &self.error_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.error_message = None;
            }
        }
        if let Some((_, time)) = &self.info_message {
            if time.elapsed().as_secs() >= timeout_secs {
                self.info_message = None;
            }
        }
    }

    pub fn has_modal(&self) -> bool {
        self.show_help || self.alert.is_some()
    }

    pub fn close_modals(&mut self) {
        self.show_help = false;
        self.alert = None;
    }

    pub fn toggle_answer(&mut self, exercise_id: &str) {
        if self.revealed.remove(exercise_id).is_none() {
            self.revealed.insert(exercise_id.to_string(), Instant::now());
        }
    }

    pub fn revealed_at(&self, exercise_id: &str) -> Option<Instant> {
        self.revealed.get(exercise_id).copied()
    }

    pub fn latest_reveal(&self) -> Option<Instant> {
        self.revealed.values().copied().max()
    }

    /// Count a click on the deck title. Returns true on the click that triggers the egg.
    pub fn register_title_click(&mut self) -> bool {
        self.title_clicks += 1;
        if self.title_clicks < EASTER_EGG_CLICKS {
            return false;
        }
        self.title_clicks = 0;
        self.egg_started = Some(Instant::now());
        self.set_info(EASTER_EGG_MESSAGE.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_click_triggers_egg_and_resets() {
        let mut ui = UIState::new(Theme::Dark);
        for _ in 0..4 {
            assert!(!ui.register_title_click());
        }
        assert!(ui.egg_started.is_none());

        assert!(ui.register_title_click());
        assert_eq!(ui.title_clicks, 0);
        assert!(ui.egg_started.is_some());
        let (message, _) = ui.info_message.as_ref().expect("egg message");
        assert_eq!(message, EASTER_EGG_MESSAGE);

        assert!(!ui.register_title_click());
        assert_eq!(ui.title_clicks, 1);
    }

    #[test]
    fn test_toggle_answer() {
        let mut ui = UIState::new(Theme::Light);
        assert!(ui.revealed_at("answer-1").is_none());
        ui.toggle_answer("answer-1");
        assert!(ui.revealed_at("answer-1").is_some());
        ui.toggle_answer("answer-1");
        assert!(ui.revealed_at("answer-1").is_none());
    }

    #[test]
    fn test_close_modals() {
        let mut ui = UIState::new(Theme::Dark);
        ui.show_help = true;
        ui.alert = Some("Please select an answer first! 🤔".into());
        assert!(ui.has_modal());
        ui.close_modals();
        assert!(!ui.has_modal());
    }

    #[test]
    fn test_messages_expire() {
        let mut ui = UIState::new(Theme::Dark);
        ui.set_error("boom".into());
        ui.clear_expired_messages(5);
        assert!(ui.error_message.is_some());
        ui.clear_expired_messages(0);
        assert!(ui.error_message.is_none());
    }
}
