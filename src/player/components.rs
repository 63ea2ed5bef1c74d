//! Player-related components and resources.

use bevy::prelude::*;

use super::controller::MovementController;

/// Radius of the player's ball collider, also used by the contact probes.
pub const PLAYER_RADIUS: f32 = 0.5;

/// Whether a spherical trigger at `center` touches the player's ball.
pub fn touches_player(center: Vec3, radius: f32, player_position: Vec3) -> bool {
    center.distance(player_position) <= radius + PLAYER_RADIUS
}

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Drives the player's rigid body through the movement state machine.
#[derive(Component)]
pub struct PlayerMotor {
    pub controller: MovementController,
}

/// Marker for the entity whose yaw orients the move input (the camera).
#[derive(Component)]
pub struct Orienter;

/// Input sampled this frame, in screen terms.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PlayerIntent {
    /// x is right, y is forward. Not normalized.
    pub move_axis: Vec2,
    /// Jump went down this frame.
    pub jump_pressed: bool,
    pub jump_held: bool,
    /// Boost is held. Forced off once the level has ended.
    pub boost_held: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_reach_the_edge_of_the_ball() {
        let center = Vec3::ZERO;
        assert!(touches_player(center, 1.5, Vec3::new(1.9, 0.0, 0.0)));
        assert!(touches_player(center, 1.5, Vec3::new(0.0, 2.0, 0.0)));
        assert!(!touches_player(center, 1.5, Vec3::new(2.1, 0.0, 0.0)));
    }
}
