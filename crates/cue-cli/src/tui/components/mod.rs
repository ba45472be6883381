//! Reusable TUI components

mod status_bar;
mod toast;
mod toolbar;

pub use status_bar::{render_status_bar, EngineIndicator};
pub use toast::{render_toasts, Toast, ToastQueue};
pub use toolbar::render_toolbar;
