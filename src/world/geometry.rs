//! Geometry spawning functions for level construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::bolts::{Bolt, BOLT_RADIUS};
use super::builder::LevelGeometry;
use super::data::Platform;
use super::materials::MaterialRegistry;
use crate::wires::{GapTrigger, Wire, WireId, WireSegment};

/// Thickness of the visual wire.
const WIRE_THICKNESS: f32 = 0.06;

/// Spawn a solid box platform.
pub fn spawn_platform(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    platform: &Platform,
) {
    let size = platform.half_extents * 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(mat_registry.get_platform(&platform.material)),
        Transform::from_translation(platform.center),
        Collider::cuboid(
            platform.half_extents.x,
            platform.half_extents.y,
            platform.half_extents.z,
        ),
        LevelGeometry,
    ));
}

/// Spawn a wire as a thin bar from its start to its end.
///
/// The wire has no collider; it is decoration the current follows.
pub fn spawn_wire(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    id: WireId,
    wire: Wire,
) {
    let length = wire.length();
    let direction = (wire.end - wire.start).normalize_or_zero();
    // Bar modeled along Z, rotated onto the wire.
    let rotation = if direction == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Z, direction)
    };
    let material = if wire.kind.gap_anchor().is_some() {
        mat_registry.broken_wire.clone()
    } else {
        mat_registry.wire.clone()
    };

    commands.spawn((
        WireSegment { id, wire },
        Mesh3d(meshes.add(Cuboid::new(WIRE_THICKNESS, WIRE_THICKNESS, length))),
        MeshMaterial3d(material),
        Transform::from_translation(wire.midpoint()).with_rotation(rotation),
        LevelGeometry,
    ));
}

/// Spawn the proximity trigger around a gap, with a faint marker showing
/// where the player has to stand.
pub fn spawn_gap_trigger(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    anchor: Vec3,
    wires: [WireId; 2],
    radius: f32,
) {
    commands.spawn((
        GapTrigger {
            wires,
            radius,
            player_inside: false,
        },
        Mesh3d(meshes.add(Sphere::new(radius))),
        MeshMaterial3d(mat_registry.gap_marker.clone()),
        Transform::from_translation(anchor),
        LevelGeometry,
    ));
}

/// Spawn a bolt pickup. It has no collider; pickup is an overlap test
/// against the player's ball.
pub fn spawn_bolt(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    mat_registry: &MaterialRegistry,
    position: Vec3,
) {
    commands.spawn((
        Bolt::new(position.y),
        Mesh3d(meshes.add(Cylinder::new(BOLT_RADIUS * 0.6, BOLT_RADIUS))),
        MeshMaterial3d(mat_registry.bolt.clone()),
        // Stood on edge so the spin reads.
        Transform::from_translation(position)
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
        LevelGeometry,
    ));
}
