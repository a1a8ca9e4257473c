use crate::config::Config;
use crate::deck::Deck;
use crate::error::QuizError;
use crate::state::animation::{bounce_running, pop_running};
use crate::state::{
    Animations, Direction, EntranceTracker, Narrator, Navigator, Playgrounds, PresentationState, ProgressStore,
    QuizState, UIState, VisibilityTracker,
};
use crate::style::{self, Theme};
use crate::view::markdown::CodeHighlighter;
use eframe::egui;
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Everything a frame's widgets asked for, applied once drawing is done
#[derive(Clone, Debug, PartialEq)]
pub enum ViewAction {
    Step(Direction),
    /// 1-based slide index from a nav link
    JumpTo(usize),
    /// A section crossed the visibility threshold while scrolling
    SectionVisible(String),
    /// A section came far enough into view to replay its entrance
    SectionEntered(String),
    RunCode(String),
    SelectOption { quiz: String, value: String },
    CheckQuiz(String),
    ToggleAnswer(String),
    ToggleNarration,
    TitleClicked,
    OpenResource(String),
    ResetProgress,
    ToggleHelp,
    ToggleTheme,
    CloseModals,
}

pub struct SlidesApp {
    pub(crate) deck: Deck,
    pub(crate) config: Config,
    pub(crate) navigator: Navigator<PresentationState>,
    pub(crate) visibility: VisibilityTracker,
    pub(crate) entrances: EntranceTracker,
    pub(crate) animations: Animations,
    pub(crate) playgrounds: Playgrounds,
    pub(crate) quizzes: QuizState,
    pub(crate) narrator: Narrator,
    pub(crate) ui: UIState,
    pub(crate) highlighter: CodeHighlighter,
    /// Section the deck view still has to bring into view
    pub(crate) scroll_target: Option<String>,
}

impl SlidesApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: Config,
        deck: Deck,
        store: ProgressStore,
    ) -> Self {
        let narrator = Narrator::from_config(&config.narration);
        Self::with_parts(cc.egui_ctx.clone(), config, deck, store, narrator)
    }

    pub fn with_parts(
        ctx: egui::Context,
        config: Config,
        deck: Deck,
        store: ProgressStore,
        narrator: Narrator,
    ) -> Self {
        let theme = Theme::from_config(&config.theme.mode);
        style::apply_theme(&ctx, theme);

        let mut navigator = Navigator::new(deck.section_ids(), PresentationState::new(), store);
        navigator.restore();

        let mut app = Self {
            visibility: VisibilityTracker::new(config.navigation.visibility_threshold),
            entrances: EntranceTracker::new(),
            playgrounds: Playgrounds::new(&deck, config.run_delay(), ctx),
            animations: Animations::new(),
            quizzes: QuizState::new(),
            ui: UIState::new(theme),
            highlighter: CodeHighlighter::new(),
            scroll_target: None,
            narrator,
            navigator,
            config,
            deck,
        };
        app.animate_current();
        info!("Java OOP Guide loaded");
        app
    }

    pub(crate) fn apply_actions(&mut self, ctx: &egui::Context, actions: Vec<ViewAction>) {
        for action in actions {
            self.apply_action(ctx, action);
        }
    }

    pub(crate) fn apply_action(&mut self, ctx: &egui::Context, action: ViewAction) {
        match action {
            ViewAction::Step(direction) => {
                if self.navigator.step(direction) {
                    self.animate_current();
                }
            }
            ViewAction::JumpTo(index) => {
                if self.navigator.jump_to(index as i64) {
                    self.animate_current();
                }
            }
            ViewAction::SectionVisible(section_id) => {
                if self.navigator.jump_to_section(&section_id) {
                    self.animate_current();
                }
            }
            ViewAction::SectionEntered(section_id) => self.animate_section(&section_id),
            ViewAction::RunCode(section_id) => self.playgrounds.run(&section_id),
            ViewAction::SelectOption { quiz, value } => self.quizzes.select(&quiz, &value),
            ViewAction::CheckQuiz(name) => self.check_quiz(&name),
            ViewAction::ToggleAnswer(exercise_id) => self.ui.toggle_answer(&exercise_id),
            ViewAction::ToggleNarration => {
                debug!("Narration toggled on slide {}", self.navigator.current());
                let section = self.deck.section(self.navigator.current_section());
                self.narrator.toggle(section);
            }
            ViewAction::TitleClicked => {
                if self.ui.register_title_click() {
                    debug!("Easter egg found");
                }
            }
            ViewAction::OpenResource(url) => {
                if let Err(e) = open::that(&url) {
                    warn!("Failed to open {}: {}", url, e);
                    self.ui.set_error(format!("Could not open link: {}", e));
                }
            }
            ViewAction::ResetProgress => {
                self.navigator.progress_mut().clear();
                self.ui.set_info("Progress reset".to_string());
            }
            ViewAction::ToggleHelp => self.ui.show_help = !self.ui.show_help,
            ViewAction::CloseModals => self.ui.close_modals(),
            ViewAction::ToggleTheme => {
                self.ui.theme = self.ui.theme.toggle();
                style::apply_theme(ctx, self.ui.theme);
                self.config.theme.mode = self.ui.theme.config_name().to_string();
                if let Err(e) = self.config.save() {
                    warn!("Failed to save theme: {}", e);
                }
            }
        }
    }

    fn check_quiz(&mut self, name: &str) {
        let Some(quiz) = self.deck.quiz(name) else {
            warn!("{}", QuizError::UnknownQuiz(name.to_string()));
            return;
        };
        match self.quizzes.check(quiz) {
            Ok(feedback) => debug!("Quiz {} checked, correct: {}", name, feedback.is_correct()),
            Err(e) => self.ui.alert = Some(e.to_string()),
        }
    }

    /// Replay the entrance of the slide the navigator is on
    fn animate_current(&mut self) {
        let section_id = self.navigator.current_section().to_string();
        self.animate_section(&section_id);
    }

    fn animate_section(&mut self, section_id: &str) {
        let item_count = self
            .deck
            .section(section_id)
            .map(|section| section.item_count())
            .unwrap_or(0);
        self.animations.restart(section_id, item_count);
    }

    fn is_animating(&self, now: Instant) -> bool {
        let revealing = self.ui.latest_reveal().is_some_and(|at| {
            now.saturating_duration_since(at).as_secs_f32() < style::REVEAL_SECS
        });
        self.animations.is_running(now)
            || revealing
            || self.ui.egg_started.is_some_and(|at| bounce_running(at, now))
            || self.playgrounds.latest_output().is_some_and(|at| pop_running(at, now))
            || self.quizzes.latest_feedback().is_some_and(|at| pop_running(at, now))
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        if self.is_animating(Instant::now()) || self.visibility.is_settling() {
            ctx.request_repaint();
        } else if self.narrator.is_narrating() || self.playgrounds.any_pending() {
            ctx.request_repaint_after(Duration::from_millis(200));
        } else if self.ui.info_message.is_some() || self.ui.error_message.is_some() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

impl eframe::App for SlidesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        self.handle_input(ctx, &mut actions);

        self.playgrounds.poll();
        self.narrator.poll();
        self.ui.clear_expired_messages(style::MESSAGE_TIMEOUT_SECS);

        self.render_header(ctx, &mut actions);
        self.render_nav_bar(ctx, &mut actions);
        self.render_footer(ctx, &mut actions);
        egui::CentralPanel::default().show(ctx, |ui| self.render_deck(ui, &mut actions));
        self.render_help_modal(ctx, &mut actions);
        self.render_alert_modal(ctx, &mut actions);

        self.apply_actions(ctx, actions);
        self.schedule_repaint(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::progress::{MemoryBackend, PROGRESS_KEY};
    use crate::state::quiz::INCORRECT_MESSAGE;
    use crate::state::ui::EASTER_EGG_MESSAGE;

    fn app_with(backend: MemoryBackend) -> SlidesApp {
        let deck = Deck::bundled().expect("bundled deck");
        SlidesApp::with_parts(
            egui::Context::default(),
            Config::default(),
            deck,
            ProgressStore::new(Box::new(backend)),
            Narrator::new(None),
        )
    }

    fn app() -> SlidesApp {
        app_with(MemoryBackend::new())
    }

    #[test]
    fn test_starts_from_saved_slide() {
        let app = app_with(MemoryBackend::with_value(PROGRESS_KEY, "3"));
        assert_eq!(app.navigator.current(), 3);
        assert_eq!(app.navigator.presenter().indicator_text(), "3 / 8");
        assert_eq!(app.navigator.presenter().progress_text, "38% Complete");
    }

    #[test]
    fn test_step_moves_and_persists() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::Step(Direction::Next));
        assert_eq!(app.navigator.current(), 2);
        assert_eq!(app.navigator.progress().load(), Some(2));
        assert!(app.animations.is_running(Instant::now()));

        app.apply_action(&ctx, ViewAction::Step(Direction::Previous));
        app.apply_action(&ctx, ViewAction::Step(Direction::Previous));
        assert_eq!(app.navigator.current(), 1);
        assert_eq!(app.navigator.progress().load(), Some(1));
    }

    #[test]
    fn test_jump_and_visibility_reports() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::JumpTo(5));
        assert_eq!(app.navigator.current_section(), "encapsulation");
        assert_eq!(app.navigator.presenter().progress_text, "63% Complete");

        app.apply_action(&ctx, ViewAction::JumpTo(42));
        assert_eq!(app.navigator.current(), 5);

        app.apply_action(&ctx, ViewAction::SectionVisible("abstraction".into()));
        assert_eq!(app.navigator.current(), 6);
        assert_eq!(app.navigator.progress().load(), Some(6));
    }

    #[test]
    fn test_entering_section_replays_its_entrance_only() {
        let ctx = egui::Context::default();
        let mut app = app();
        assert_eq!(app.animations.section("video-resources", Instant::now()).opacity, 1.0);

        app.apply_action(&ctx, ViewAction::SectionEntered("video-resources".into()));
        assert!(app.animations.section("video-resources", Instant::now()).opacity < 1.0);
        assert_eq!(app.navigator.current(), 1);
        assert_eq!(app.navigator.progress().load(), None);
    }

    #[test]
    fn test_check_without_selection_raises_alert() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::CheckQuiz("q-classes".into()));
        assert_eq!(
            app.ui.alert.as_deref(),
            Some("Please select an answer first! 🤔")
        );

        app.apply_action(&ctx, ViewAction::CloseModals);
        assert!(app.ui.alert.is_none());
    }

    #[test]
    fn test_wrong_then_right_answer() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(
            &ctx,
            ViewAction::SelectOption {
                quiz: "q-classes".into(),
                value: "class".into(),
            },
        );
        app.apply_action(&ctx, ViewAction::CheckQuiz("q-classes".into()));
        let (feedback, _) = app.quizzes.feedback("q-classes").expect("feedback");
        assert_eq!(feedback.message(), INCORRECT_MESSAGE);
        assert_eq!(app.quizzes.highlighted_answer("q-classes"), Some("new"));

        app.apply_action(
            &ctx,
            ViewAction::SelectOption {
                quiz: "q-classes".into(),
                value: "new".into(),
            },
        );
        app.apply_action(&ctx, ViewAction::CheckQuiz("q-classes".into()));
        let (feedback, _) = app.quizzes.feedback("q-classes").expect("feedback");
        assert!(feedback.is_correct());
    }

    #[test]
    fn test_unknown_quiz_is_ignored() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::CheckQuiz("missing".into()));
        assert!(app.ui.alert.is_none());
    }

    #[test]
    fn test_title_clicks_find_easter_egg() {
        let ctx = egui::Context::default();
        let mut app = app();
        for _ in 0..5 {
            app.apply_action(&ctx, ViewAction::TitleClicked);
        }
        let (message, _) = app.ui.info_message.as_ref().expect("message");
        assert_eq!(message, EASTER_EGG_MESSAGE);
        assert!(app.ui.egg_started.is_some());
    }

    #[test]
    fn test_reset_progress_clears_store() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::JumpTo(4));
        assert_eq!(app.navigator.progress().load(), Some(4));
        app.apply_action(&ctx, ViewAction::ResetProgress);
        assert_eq!(app.navigator.progress().load(), None);
        assert_eq!(app.navigator.current(), 4);
    }

    #[test]
    fn test_narration_toggle_without_backend_is_noop() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::ToggleNarration);
        assert!(!app.narrator.is_narrating());
    }

    #[test]
    fn test_help_toggle() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.apply_action(&ctx, ViewAction::ToggleHelp);
        assert!(app.ui.show_help);
        app.apply_action(&ctx, ViewAction::ToggleHelp);
        assert!(!app.ui.show_help);
    }
}
