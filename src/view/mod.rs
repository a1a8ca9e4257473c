pub mod markdown;
pub mod modals;
pub mod panels;
pub mod section;
