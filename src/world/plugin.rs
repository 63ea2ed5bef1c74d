//! World plugin - data loading, level construction, bolts, and void-out.

use bevy::prelude::*;

use crate::core::GameState;
use crate::player::{spawn_player, MovementConfig, Player};
use crate::wires::{CurrentConfig, CurrentFlow};

use super::bolts::{collect_bolts, float_bolts, BoltTally};
use super::builder::{build_level_from_data, LevelGeometry};
use super::data::{finish_loading, load_level_definitions, load_tuning, CurrentLevel, LevelRegistry};
use super::void_out::{check_void_out, KillPlane};

/// World plugin - handles data loading and level setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoltTally>()
            .add_systems(
                Startup,
                (load_tuning, load_level_definitions, finish_loading).chain(),
            )
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level)
            .add_systems(
                Update,
                (check_void_out, (float_bolts, collect_bolts).chain())
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Set up the level from data.
#[allow(clippy::too_many_arguments)]
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    movement_config: Res<MovementConfig>,
    current_config: Res<CurrentConfig>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(level) = level_registry.get(&current_level.name) else {
        error!("Level '{}' not found in registry!", current_level.name);
        exit.send(AppExit::error());
        return;
    };

    info!("Building level: {}", level.name);

    let player_pos = build_level_from_data(
        &mut commands,
        &mut meshes,
        &mut materials,
        level,
        &current_config,
    );

    if let Err(e) = spawn_player(
        &mut commands,
        &mut meshes,
        &mut materials,
        player_pos,
        &movement_config,
    ) {
        error!("Cannot spawn the player: {}", e);
        exit.send(AppExit::error());
    }
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, Or<(With<LevelGeometry>, With<Player>, With<CurrentFlow>)>>,
) {
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<KillPlane>();
}
