// Panel rendering: header, navigation bar, footer and the scrolling deck

use crate::app::{SlidesApp, ViewAction};
use crate::state::animation;
use crate::state::{Direction, SectionVisibility};
use crate::style;
use crate::view::section::{self, SectionContext};
use eframe::egui;
use std::time::Instant;

/// Headroom above the title for the bounce
const BOUNCE_ROOM: f32 = 20.0;

impl SlidesApp {
    pub(crate) fn render_header(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        let now = Instant::now();
        let bounce = self
            .ui
            .egg_started
            .map(|started| animation::bounce_offset(started, now))
            .unwrap_or(0.0);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.add_space(BOUNCE_ROOM + bounce);
                    let title = ui.add(
                        egui::Label::new(
                            egui::RichText::new(&self.deck.title)
                                .size(style::TITLE_SIZE)
                                .strong(),
                        )
                        .sense(egui::Sense::click()),
                    );
                    if title.clicked() {
                        actions.push(ViewAction::TitleClicked);
                    }
                    ui.add_space(-bounce);
                    if !self.deck.subtitle.is_empty() {
                        ui.label(egui::RichText::new(&self.deck.subtitle).weak());
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("?").on_hover_text("Keyboard shortcuts").clicked() {
                        actions.push(ViewAction::ToggleHelp);
                    }
                    let theme_icon = match self.ui.theme {
                        style::Theme::Dark => "☀",
                        style::Theme::Light => "🌙",
                    };
                    if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                        actions.push(ViewAction::ToggleTheme);
                    }
                    if self.narrator.is_available()
                        && ui.button(self.narrator.button_label()).clicked()
                    {
                        actions.push(ViewAction::ToggleNarration);
                    }
                });
            });

            let presenter = self.navigator.presenter();
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let bar_width = (ui.available_width() - 120.0).max(80.0);
                ui.add(
                    egui::ProgressBar::new(presenter.progress_fraction)
                        .desired_width(bar_width)
                        .desired_height(style::PROGRESS_BAR_HEIGHT)
                        .fill(style::ACCENT),
                );
                ui.label(&presenter.progress_text);
            });
            ui.add_space(6.0);
        });
    }

    pub(crate) fn render_nav_bar(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                let presenter = self.navigator.presenter();
                for (position, section) in self.deck.sections.iter().enumerate() {
                    let index = position + 1;
                    if ui
                        .selectable_label(presenter.is_active(index), &section.nav_label)
                        .clicked()
                    {
                        actions.push(ViewAction::JumpTo(index));
                    }
                }
            });
            ui.add_space(4.0);
        });
    }

    pub(crate) fn render_footer(&self, ctx: &egui::Context, actions: &mut Vec<ViewAction>) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let presenter = self.navigator.presenter();
                if ui
                    .add_enabled(presenter.prev_enabled, egui::Button::new("← Previous"))
                    .clicked()
                {
                    actions.push(ViewAction::Step(Direction::Previous));
                }
                ui.label(egui::RichText::new(presenter.indicator_text()).monospace());
                if ui
                    .add_enabled(presenter.next_enabled, egui::Button::new("Next →"))
                    .clicked()
                {
                    actions.push(ViewAction::Step(Direction::Next));
                }

                if let Some((message, _)) = &self.ui.error_message {
                    ui.colored_label(style::FAILURE, format!(" | {}", message));
                } else if let Some((message, _)) = &self.ui.info_message {
                    ui.label(format!(" | {}", message));
                }
            });
            ui.add_space(4.0);
        });
    }

    /// Draw every section, carry out pending scrolls and report visibility crossings
    pub(crate) fn render_deck(&mut self, ui: &mut egui::Ui, actions: &mut Vec<ViewAction>) {
        if let Some(target) = self.navigator.presenter_mut().take_pending_scroll() {
            self.scroll_target = Some(target);
        }

        let now = Instant::now();
        let theme = self.ui.theme;
        let threshold = self.visibility.threshold();
        let SlidesApp {
            deck,
            playgrounds,
            quizzes,
            ui: ui_state,
            animations,
            highlighter,
            visibility,
            entrances,
            scroll_target,
            ..
        } = self;
        ui_state.editor_focused = false;

        let output = egui::ScrollArea::vertical()
            .id_salt("deck_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.set_max_width(style::CONTENT_MAX_WIDTH.min(ui.available_width()));
                let viewport = ui.clip_rect();
                let mut cx = SectionContext {
                    playgrounds: &mut *playgrounds,
                    quizzes: &*quizzes,
                    ui_state: &mut *ui_state,
                    animations: &*animations,
                    highlighter: &*highlighter,
                    theme,
                    now,
                    actions: &mut *actions,
                };

                let mut batch = Vec::with_capacity(deck.sections.len());
                for section in &deck.sections {
                    let rect = section::render_section(ui, section, &mut cx);
                    let seen = SectionVisibility::measure(
                        &section.id,
                        (rect.top(), rect.bottom()),
                        (viewport.top(), viewport.bottom()),
                    );
                    if scroll_target.as_deref() == Some(section.id.as_str()) {
                        // Sections already on screen stay put
                        if seen.fraction < threshold {
                            ui.scroll_to_rect(rect, Some(egui::Align::TOP));
                            visibility.begin_settling();
                        }
                        *scroll_target = None;
                    }
                    batch.push(seen);
                    ui.add_space(style::SECTION_SPACING);
                }
                batch
            });

        for section_id in entrances.observe(&output.inner) {
            actions.push(ViewAction::SectionEntered(section_id));
        }
        for section_id in visibility.observe(output.state.offset.y, &output.inner) {
            actions.push(ViewAction::SectionVisible(section_id));
        }
    }
}
