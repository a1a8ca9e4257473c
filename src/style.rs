use eframe::egui;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Anything other than "light" is dark
    pub fn from_config(mode: &str) -> Self {
        if mode.trim().eq_ignore_ascii_case("light") {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn config_name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn syntax_theme(self) -> &'static str {
        match self {
            Theme::Light => "base16-ocean.light",
            Theme::Dark => "base16-ocean.dark",
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }
}

// --- Colors ---
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x42, 0x85, 0xf4);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(0x34, 0xa8, 0x53);
pub const CORRECT_OPTION: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
pub const FAILURE: egui::Color32 = egui::Color32::from_rgb(0xea, 0x43, 0x35);

// --- Sizing ---
pub const TITLE_SIZE: f32 = 26.0;
pub const SECTION_TITLE_SIZE: f32 = 22.0;
pub const BODY_SIZE: f32 = 15.0;
pub const CODE_SIZE: f32 = 13.0;
pub const CONTENT_MAX_WIDTH: f32 = 860.0;
pub const SECTION_SPACING: f32 = 48.0;
pub const PROGRESS_BAR_HEIGHT: f32 = 6.0;

// --- Modals ---
pub const MODAL_MIN_WIDTH: f32 = 300.0;
pub const MODAL_MAX_WIDTH: f32 = 500.0;
pub const MODAL_WIDTH_RATIO: f32 = 0.6;
pub const MODAL_HEIGHT_RATIO: f32 = 0.8;

// --- Timing ---
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;
pub const REVEAL_SECS: f32 = 0.3;

// --- Helper functions ---

pub fn modal_width(ctx: &egui::Context) -> f32 {
    let width = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.width())
            .unwrap_or(800.0)
    });
    (width * MODAL_WIDTH_RATIO).clamp(MODAL_MIN_WIDTH, MODAL_MAX_WIDTH)
}

pub fn modal_max_height(ctx: &egui::Context) -> f32 {
    let height = ctx.input(|i| {
        i.viewport()
            .inner_rect
            .map(|r| r.height())
            .unwrap_or(600.0)
    });
    height * MODAL_HEIGHT_RATIO
}

pub fn apply_theme(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(theme.visuals());
}
