pub mod animation;
pub mod narration;
pub mod navigation;
pub mod playground;
pub mod presentation;
pub mod progress;
pub mod quiz;
pub mod ui;
pub mod visibility;

pub use animation::Animations;
pub use narration::Narrator;
pub use navigation::{Direction, Navigator};
pub use playground::Playgrounds;
pub use presentation::PresentationState;
pub use progress::ProgressStore;
pub use quiz::QuizState;
pub use ui::UIState;
pub use visibility::{EntranceTracker, SectionVisibility, VisibilityTracker};
