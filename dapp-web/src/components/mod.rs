//! UI Components

pub mod log_panel;
pub mod no_provider;
pub mod screen;
pub mod sidebar;

pub use log_panel::LogPanel;
pub use no_provider::NoProvider;
pub use screen::{screen, Screen};
pub use sidebar::Sidebar;
