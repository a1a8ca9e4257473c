// Keyboard input for the slide deck

use crate::app::{SlidesApp, ViewAction};
use crate::state::Direction;
use eframe::egui;

/// Keys the deck listens for, checked in this order each frame
const BOUND_KEYS: [egui::Key; 7] = [
    egui::Key::ArrowRight,
    egui::Key::Space,
    egui::Key::ArrowLeft,
    egui::Key::Questionmark,
    egui::Key::F1,
    egui::Key::Escape,
    egui::Key::Enter,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Previous,
    ToggleHelp,
    Dismiss,
}

pub fn key_action(key: egui::Key) -> Option<KeyAction> {
    match key {
        egui::Key::ArrowRight | egui::Key::Space => Some(KeyAction::Next),
        egui::Key::ArrowLeft => Some(KeyAction::Previous),
        egui::Key::Questionmark | egui::Key::F1 => Some(KeyAction::ToggleHelp),
        egui::Key::Escape | egui::Key::Enter => Some(KeyAction::Dismiss),
        _ => None,
    }
}

/// Escape and Enter are left to focused widgets unless a modal is open
fn is_dismiss_key(key: egui::Key) -> bool {
    matches!(key, egui::Key::Escape | egui::Key::Enter)
}

/// While a modal is open only dismiss and help keys do anything
pub fn resolve(action: KeyAction, modal_open: bool) -> Option<ViewAction> {
    match (action, modal_open) {
        (KeyAction::Dismiss, true) => Some(ViewAction::CloseModals),
        (KeyAction::Dismiss, false) => None,
        (KeyAction::ToggleHelp, _) => Some(ViewAction::ToggleHelp),
        (_, true) => None,
        (KeyAction::Next, false) => Some(ViewAction::Step(Direction::Next)),
        (KeyAction::Previous, false) => Some(ViewAction::Step(Direction::Previous)),
    }
}

impl SlidesApp {
    pub fn handle_input(&mut self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        // Keys belong to the editor while it has focus
        if self.ui.editor_focused {
            return;
        }

        let modal_open = self.ui.has_modal();
        let pressed: Vec<egui::Key> = ctx.input_mut(|i| {
            BOUND_KEYS
                .iter()
                .copied()
                .filter(|key| modal_open || !is_dismiss_key(*key))
                .filter(|key| i.consume_key(egui::Modifiers::NONE, *key))
                .collect()
        });

        for key in pressed {
            if let Some(action) = key_action(key).and_then(|a| resolve(a, modal_open)) {
                actions.push(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_action(egui::Key::ArrowRight), Some(KeyAction::Next));
        assert_eq!(key_action(egui::Key::Space), Some(KeyAction::Next));
        assert_eq!(key_action(egui::Key::ArrowLeft), Some(KeyAction::Previous));
        assert_eq!(key_action(egui::Key::F1), Some(KeyAction::ToggleHelp));
        assert_eq!(key_action(egui::Key::Escape), Some(KeyAction::Dismiss));
        assert_eq!(key_action(egui::Key::J), None);
    }

    #[test]
    fn test_navigation_keys_ignored_under_modal() {
        assert_eq!(resolve(KeyAction::Next, true), None);
        assert_eq!(resolve(KeyAction::Previous, true), None);
        assert_eq!(
            resolve(KeyAction::Next, false),
            Some(ViewAction::Step(Direction::Next))
        );
    }

    #[test]
    fn test_dismiss_only_closes_open_modals() {
        assert_eq!(resolve(KeyAction::Dismiss, true), Some(ViewAction::CloseModals));
        assert_eq!(resolve(KeyAction::Dismiss, false), None);
        assert_eq!(resolve(KeyAction::ToggleHelp, true), Some(ViewAction::ToggleHelp));
    }
}
