// Modal windows: key bindings help and blocking notices

use crate::app::{SlidesApp, ViewAction};
use crate::style;
use eframe::egui;

const KEY_BINDINGS: &[(&str, &str)] = &[
    ("→ / Space", "Next slide"),
    ("←", "Previous slide"),
    ("? / F1", "Toggle help"),
    ("Esc / Enter", "Close dialog"),
    ("Nav links", "Jump to a slide"),
];

impl SlidesApp {
    pub(crate) fn render_help_modal(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        if !self.ui.show_help {
            return;
        }
        egui::Window::new("Help")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                ui.set_max_height(style::modal_max_height(ctx));
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Key Bindings");
                    ui.separator();
                    egui::Grid::new("help_grid").striped(true).show(ui, |ui| {
                        for (keys, description) in KEY_BINDINGS {
                            ui.label(*keys);
                            ui.label(*description);
                            ui.end_row();
                        }
                    });
                    ui.add_space(10.0);
                    ui.label(
                        egui::RichText::new("Your position is saved after every move.").weak(),
                    );
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        if ui.button("Reset progress").clicked() {
                            actions.push(ViewAction::ResetProgress);
                        }
                        if ui.button("Close").clicked() {
                            actions.push(ViewAction::CloseModals);
                        }
                    });
                });
            });
    }

    pub(crate) fn render_alert_modal(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        let Some(message) = &self.ui.alert else {
            return;
        };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .title_bar(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .default_width(style::modal_width(ctx))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(message).size(style::BODY_SIZE));
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        actions.push(ViewAction::CloseModals);
                    }
                });
            });
    }
}
