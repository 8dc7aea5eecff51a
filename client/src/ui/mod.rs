//! UI module

pub mod hud;
pub mod pause_menu;
pub mod styles;

pub use hud::HudPlugin;
pub use pause_menu::PauseMenuPlugin;
