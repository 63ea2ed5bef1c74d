//! Global events used for cross-system communication.
//!
//! The simulation cores never dispatch these themselves. They return their
//! outcomes (or queue them for draining) and the plugin systems forward
//! them here, so listeners are wired through the schedule rather than a
//! global dispatcher.

use bevy::prelude::*;

/// Sent exactly once per level, when the level has been won or lost.
///
/// Listeners use this to start the level-end choreography; it is also the
/// trigger for [`LevelTransitionStarted`].
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEndEvent {
    pub success: bool,
}

/// Sent once the level has started winding down.
///
/// After this, the player can no longer jump and the current ignores
/// boost input.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LevelTransitionStarted;

/// Sent when the player's recorded wall contact appears, changes, or clears.
///
/// Consumed by cosmetic systems (wall-ride sparks and the like).
#[derive(Event, Debug, Clone, Copy)]
pub struct WallContactChanged {
    /// The player entity whose contact changed.
    pub player: Entity,
    /// Surface normal of the wall, or `None` once contact is lost.
    pub normal: Option<Vec3>,
}

/// Sent each time the player executes a jump.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerJumped {
    pub player: Entity,
    /// Whether the jump pushed off a wall.
    pub off_wall: bool,
}
