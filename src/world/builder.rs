//! Level construction from data definitions.

use bevy::prelude::*;

use super::bolts::BoltTally;
use super::data::LevelDefinition;
use super::geometry::{spawn_bolt, spawn_gap_trigger, spawn_platform, spawn_wire};
use super::materials::MaterialRegistry;
use super::void_out::KillPlane;
use crate::player::Orienter;
use crate::wires::CurrentConfig;

/// Marker for all level entities that should be cleaned up.
#[derive(Component)]
pub struct LevelGeometry;

/// Build a level from a level definition.
///
/// Returns the player spawn position.
pub fn build_level_from_data(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    level: &LevelDefinition,
    current_config: &CurrentConfig,
) -> Vec3 {
    let mat_registry = MaterialRegistry::new(materials);

    setup_environment(commands, level);

    for platform in &level.platforms {
        spawn_platform(commands, meshes, &mat_registry, platform);
    }

    for (id, wire) in &level.wires {
        spawn_wire(commands, meshes, &mat_registry, *id, *wire);
    }

    for (anchor, wires) in level.chain.gaps() {
        spawn_gap_trigger(
            commands,
            meshes,
            &mat_registry,
            anchor,
            wires,
            current_config.gap_trigger_radius,
        );
    }

    for position in &level.bolts {
        spawn_bolt(commands, meshes, &mat_registry, *position);
    }
    commands.insert_resource(BoltTally {
        collected: 0,
        total: level.bolts.len() as u32,
    });

    commands.insert_resource(KillPlane {
        height: level.kill_plane_height,
    });

    level.player_start
}

/// Set up lights and the camera.
fn setup_environment(commands: &mut Commands, level: &LevelDefinition) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb(
            level.global_ambient.color.0,
            level.global_ambient.color.1,
            level.global_ambient.color.2,
        ),
        brightness: level.global_ambient.brightness,
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_3, // ~60 degrees down from horizontal
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
        LevelGeometry,
    ));

    // Fixed camera; its yaw decides which way "forward" is for the player.
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(level.camera_position)
            .looking_at(level.camera_look_at, Vec3::Y),
        Orienter,
        LevelGeometry,
    ));
}
