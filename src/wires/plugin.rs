//! Wires plugin - registry upkeep and the current.

use bevy::prelude::*;

use super::components::LevelWires;
use super::systems::*;
use crate::core::GameState;

/// Wires plugin - registers level wires and runs the current over them.
pub struct WiresPlugin;

impl Plugin for WiresPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelWires>()
            .add_systems(
                Update,
                (
                    (register_wires, deregister_wires),
                    start_current,
                    detect_player_near_gaps,
                    halt_current_on_transition,
                    advance_current,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), reset_level_wires);
    }
}
