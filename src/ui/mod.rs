//! UI module - heads-up display.

mod hud;
mod plugin;

pub use plugin::UiPlugin;
