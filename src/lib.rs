//! Wirebound - a rolling-ball platformer where the player bridges gaps in
//! a live wire.
//!
//! The player steers a physically simulated ball: it can jump, ride up
//! walls, and kick off them. Meanwhile a current runs along the level's
//! wires. Where a wire is broken, the current only crosses if the player is
//! standing by the gap; otherwise it fizzles and the level is lost.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, timers, level outcome
//! - **Player**: Movement state machine, contact probes, input
//! - **Wires**: Wire chain sorting and the current
//! - **World**: Data loading, level construction, void-out
//! - **UI**: Wall-ride meter and result banner
//!
//! The movement controller and the current are plain structs with explicit
//! tick functions; the plugins only feed them input and apply their output.

pub mod core;
pub mod player;
pub mod ui;
pub mod wires;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct WireboundPlugin;

impl Plugin for WireboundPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Wires and the current
            .add_plugins(wires::WiresPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
