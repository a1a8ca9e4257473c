// One slide: title, body and its interactive boxes

use crate::app::ViewAction;
use crate::deck::{Exercise, Quiz, Resource, Section};
use crate::state::animation::{self, Frame};
use crate::state::{Animations, Playgrounds, QuizState, UIState};
use crate::style::{self, Theme};
use crate::view::markdown::{self, CodeHighlighter};
use eframe::egui;
use std::time::Instant;

/// Borrowed app state a section needs while drawing
pub(crate) struct SectionContext<'a> {
    pub playgrounds: &'a mut Playgrounds,
    pub quizzes: &'a QuizState,
    pub ui_state: &'a mut UIState,
    pub animations: &'a Animations,
    pub highlighter: &'a CodeHighlighter,
    pub theme: Theme,
    pub now: Instant,
    pub actions: &'a mut Vec<ViewAction>,
}

/// Draw `section` and return the screen rect it occupies
pub(crate) fn render_section(
    ui: &mut egui::Ui,
    section: &Section,
    cx: &mut SectionContext<'_>,
) -> egui::Rect {
    let frame = cx.animations.section(&section.id, cx.now);

    ui.vertical(|ui| {
        // The rise is paid back below so the section keeps its height
        ui.add_space(frame.offset_y);
        ui.scope(|ui| {
            ui.multiply_opacity(frame.opacity);
            ui.label(
                egui::RichText::new(&section.title)
                    .size(style::SECTION_TITLE_SIZE)
                    .strong()
                    .color(style::ACCENT),
            );
            ui.add_space(8.0);
            markdown::render_markdown(ui, &section.body, cx.highlighter, cx.theme);

            let mut index = 0;
            if section.playground.is_some() {
                let item = cx.animations.item(&section.id, index, cx.now);
                animated_item(ui, item, |ui| render_playground(ui, &section.id, cx));
                index += 1;
            }
            for quiz in &section.quizzes {
                let item = cx.animations.item(&section.id, index, cx.now);
                animated_item(ui, item, |ui| render_quiz(ui, quiz, cx));
                index += 1;
            }
            for exercise in &section.exercises {
                let item = cx.animations.item(&section.id, index, cx.now);
                animated_item(ui, item, |ui| render_exercise(ui, exercise, cx));
                index += 1;
            }
            if !section.resources.is_empty() {
                let item = cx.animations.item(&section.id, index, cx.now);
                animated_item(ui, item, |ui| {
                    render_resources(ui, &section.id, &section.resources, cx)
                });
            }
        });
        ui.add_space(animation::SECTION_RISE - frame.offset_y);
    })
    .response
    .rect
}

/// Fixed-width box that slides in from the left while fading in
fn animated_item(ui: &mut egui::Ui, frame: Frame, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.add_space(12.0);
    let width = (ui.available_width() - animation::ITEM_SLIDE).max(0.0);
    ui.horizontal_top(|ui| {
        ui.add_space(animation::ITEM_SLIDE + frame.offset_x);
        ui.vertical(|ui| {
            ui.set_width(width);
            ui.multiply_opacity(frame.opacity);
            egui::Frame::group(ui.style())
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    add_contents(ui);
                });
        });
    });
}

fn render_playground(ui: &mut egui::Ui, section_id: &str, cx: &mut SectionContext<'_>) {
    let Some(state) = cx.playgrounds.get_mut(section_id) else {
        return;
    };

    ui.label(egui::RichText::new("💻 Try it yourself").strong());
    ui.add_space(4.0);

    let rows = state.code.lines().count().max(4);
    let response = ui.add(
        egui::TextEdit::multiline(&mut state.code)
            .id_salt(("playground", section_id))
            .code_editor()
            .desired_rows(rows)
            .desired_width(f32::INFINITY),
    );
    if response.has_focus() {
        cx.ui_state.editor_focused = true;
    }

    ui.add_space(4.0);
    if ui.button("▶ Run Code").clicked() {
        cx.actions.push(ViewAction::RunCode(section_id.to_string()));
    }

    if let Some(output) = &state.output {
        let scale = state
            .output_at
            .map(|at| animation::pop_scale(at, 0.95, cx.now))
            .unwrap_or(1.0);
        ui.add_space(6.0);
        egui::Frame::new()
            .fill(ui.visuals().extreme_bg_color)
            .corner_radius(6.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(output)
                        .monospace()
                        .size(style::CODE_SIZE * scale),
                );
            });
    }
}

fn render_quiz(ui: &mut egui::Ui, quiz: &Quiz, cx: &mut SectionContext<'_>) {
    ui.label(egui::RichText::new("🧠 Quick Check").strong());
    ui.label(egui::RichText::new(&quiz.question).size(style::BODY_SIZE));
    ui.add_space(4.0);

    let selected = cx.quizzes.selected(&quiz.name);
    let highlighted = cx.quizzes.highlighted_answer(&quiz.name);
    for option in &quiz.options {
        let mut text = egui::RichText::new(&option.label);
        if highlighted == Some(option.value.as_str()) {
            text = text.color(style::CORRECT_OPTION).strong();
        }
        if ui
            .radio(selected == Some(option.value.as_str()), text)
            .clicked()
        {
            cx.actions.push(ViewAction::SelectOption {
                quiz: quiz.name.clone(),
                value: option.value.clone(),
            });
        }
    }

    ui.add_space(4.0);
    if ui.button("Check Answer").clicked() {
        cx.actions.push(ViewAction::CheckQuiz(quiz.name.clone()));
    }

    if let Some((feedback, at)) = cx.quizzes.feedback(&quiz.name) {
        let (color, size) = if feedback.is_correct() {
            let scale = animation::pop_scale(at, 0.95, cx.now);
            (style::SUCCESS, style::BODY_SIZE * scale)
        } else {
            (style::FAILURE, style::BODY_SIZE)
        };
        ui.add_space(4.0);
        ui.label(egui::RichText::new(feedback.message()).color(color).size(size));
    }
}

fn render_exercise(ui: &mut egui::Ui, exercise: &Exercise, cx: &mut SectionContext<'_>) {
    markdown::render_markdown(ui, &exercise.prompt, cx.highlighter, cx.theme);

    let Some(answer) = &exercise.answer else {
        return;
    };
    let revealed = cx.ui_state.revealed_at(&exercise.id);
    let label = if revealed.is_some() {
        "Hide Answer"
    } else {
        "Show Answer"
    };
    if ui.button(label).clicked() {
        cx.actions.push(ViewAction::ToggleAnswer(exercise.id.clone()));
    }

    if let Some(at) = revealed {
        let p = (cx.now.saturating_duration_since(at).as_secs_f32() / style::REVEAL_SECS)
            .clamp(0.0, 1.0);
        ui.scope(|ui| {
            ui.multiply_opacity(p);
            ui.add_space(4.0 + 10.0 * (1.0 - p));
            markdown::code_block(ui, cx.highlighter.highlight(answer.trim_end(), "java", cx.theme));
            ui.add_space(10.0 * p);
        });
    }
}

fn render_resources(
    ui: &mut egui::Ui,
    section_id: &str,
    resources: &[Resource],
    cx: &mut SectionContext<'_>,
) {
    use egui_extras::{Column, TableBuilder};

    ui.label(egui::RichText::new("🎬 Resources").strong());
    ui.add_space(4.0);
    ui.push_id(("resources", section_id), |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(220.0))
            .column(Column::remainder().clip(true))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Link");
                });
                header.col(|ui| {
                    ui.strong("About");
                });
            })
            .body(|mut body| {
                for resource in resources {
                    body.row(24.0, |mut row| {
                        row.col(|ui| {
                            if ui
                                .link(&resource.title)
                                .on_hover_text(&resource.url)
                                .clicked()
                            {
                                cx.actions
                                    .push(ViewAction::OpenResource(resource.url.clone()));
                            }
                        });
                        row.col(|ui| {
                            ui.label(&resource.description);
                        });
                    });
                }
            });
    });
}
