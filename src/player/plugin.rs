//! Player plugin - input, movement, and level-transition handling.

use bevy::prelude::*;

use super::components::PlayerIntent;
use super::movement::*;
use crate::core::GameState;

/// Player plugin - drives the movement controller from input.
///
/// The player itself is spawned by the level builder.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>()
            .add_systems(
                Update,
                (
                    read_player_input,
                    halt_player_on_level_transition,
                    tick_player_frame,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                FixedUpdate,
                tick_player_physics.run_if(in_state(GameState::InGame)),
            );
    }
}
