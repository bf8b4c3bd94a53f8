// UI module - egui screens and in-game overlays

mod hud;
mod menu;
mod overlay;
mod settings;

// Re-export the public interface
pub use hud::draw_play_ui;
pub use menu::{MenuAction, draw_menu};
pub use settings::{SettingsAction, draw_settings};
