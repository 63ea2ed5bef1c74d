//! Player module - the movement state machine and the systems that drive it.

mod components;
mod config;
mod controller;
mod movement;
mod plugin;
mod probe;
mod state;

pub use components::*;
pub use config::{BodyDimensions, MovementConfig};
pub use controller::{MovementController, MovementInput, MovementSignal, PhysicsStep};
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
pub use probe::*;
pub use state::*;
