//! UI layer: app shell, page panels, and modal dialogs.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::UserConsoleApp;
