//! Bolt pickups scattered through a level.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::player::{touches_player, Player};

/// Pickup radius of a bolt.
pub const BOLT_RADIUS: f32 = 0.3;

/// How far a bolt bobs above and below its resting height.
const BOB_DISTANCE: f32 = 0.1;
/// Radians per second.
const BOB_SPEED: f32 = 1.5;
/// Radians per second, about 25 degrees.
const SPIN_SPEED: f32 = 0.436;

/// A collectible bolt, bobbing around `rest_height`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Bolt {
    rest_height: f32,
    bob_angle: f32,
}

impl Bolt {
    pub fn new(rest_height: f32) -> Self {
        Self {
            rest_height,
            bob_angle: 0.0,
        }
    }
}

/// Bolts picked up in the level in progress.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BoltTally {
    pub collected: u32,
    pub total: u32,
}

/// Bob and spin every bolt.
pub fn float_bolts(time: Res<Time>, mut bolt_query: Query<(&mut Bolt, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut bolt, mut transform) in &mut bolt_query {
        bolt.bob_angle = (bolt.bob_angle + BOB_SPEED * dt) % TAU;
        transform.translation.y = bolt.rest_height + BOB_DISTANCE * bolt.bob_angle.sin();
        transform.rotate_y(SPIN_SPEED * dt);
    }
}

/// Pick up every bolt the player touches.
pub fn collect_bolts(
    mut commands: Commands,
    mut tally: ResMut<BoltTally>,
    player_query: Query<&Transform, With<Player>>,
    bolt_query: Query<(Entity, &Transform), With<Bolt>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (entity, transform) in &bolt_query {
        if touches_player(transform.translation, BOLT_RADIUS, player.translation) {
            commands.entity(entity).despawn_recursive();
            tally.collected += 1;
            info!("Bolt collected ({}/{})", tally.collected, tally.total);
        }
    }
}
