//! Core game module - states, events, timers, and level bookkeeping.
//!
//! This module provides the foundation that all other game systems build upon.

mod error;
mod events;
mod plugin;
mod session;
mod states;
mod timer;
mod tween;

pub use error::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use session::*;
pub use states::*;
pub use timer::*;
pub use tween::*;
