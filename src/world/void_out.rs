//! Losing the level by falling out of it.

use bevy::prelude::*;

use crate::core::{LevelEndEvent, LevelOutcome, LevelSession};
use crate::player::Player;

/// Height below which the player has fallen out of the level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct KillPlane {
    pub height: f32,
}

/// Whether a body at `position` has fallen through the kill plane.
pub fn below_kill_plane(kill_plane: &KillPlane, position: Vec3) -> bool {
    position.y < kill_plane.height
}

/// End the level in failure when the player falls below the kill plane.
/// Inert once the level has been decided.
pub fn check_void_out(
    kill_plane: Option<Res<KillPlane>>,
    mut session: ResMut<LevelSession>,
    player_query: Query<&Transform, With<Player>>,
    mut level_end_events: EventWriter<LevelEndEvent>,
) {
    let Some(kill_plane) = kill_plane else {
        return;
    };
    if session.is_concluded() {
        return;
    }

    for transform in &player_query {
        if below_kill_plane(&kill_plane, transform.translation)
            && session.conclude(LevelOutcome::Failure)
        {
            info!("Player fell out of the level");
            level_end_events.send(LevelEndEvent { success: false });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_strictly_below_counts() {
        let plane = KillPlane { height: -10.0 };
        assert!(!below_kill_plane(&plane, Vec3::new(0.0, -10.0, 0.0)));
        assert!(below_kill_plane(&plane, Vec3::new(0.0, -10.5, 0.0)));
    }
}
