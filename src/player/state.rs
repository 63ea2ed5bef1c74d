//! Discrete player state and the mutable runtime state behind it.

use bevy::prelude::*;

use super::probe::ProbeHit;
use crate::core::{Countdown, Stopwatch};

/// What the player is doing right now. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing on a walkable surface.
    Grounded,
    /// In the air with no wall contact.
    #[default]
    Airborne,
    /// Running up a wall; gravity is off while this holds.
    WallRiding,
    /// Pushed off a wall; input is deadened for a moment.
    WallJumping,
}

impl PlayerState {
    /// States a jump can be started from (before coyote time is applied).
    pub fn can_jump_from(self) -> bool {
        matches!(self, PlayerState::Grounded | PlayerState::WallRiding)
    }
}

/// Which kind of jump was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Straight up from the ground (or coyote time after it).
    Ground,
    /// Up and away from the last wall ridden.
    Wall,
}

/// Mutable movement state, one per player.
///
/// Created at spawn, mutated every physics and frame tick, and reset when
/// the level restarts.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRuntimeState {
    pub player_state: PlayerState,
    pub velocity: Vec3,
    /// Last wall touched while riding. Cleared on grounding.
    pub wall_hit: Option<ProbeHit>,
    /// Time since the player last stood in a jumpable state.
    pub jump_leeway: Stopwatch,
    pub wall_ride: Stopwatch,
    pub sticky_wall: Stopwatch,
    pub wall_jump_deaden: Stopwatch,
    pub jump_cooldown: Countdown,
    pub jump_buffer: Countdown,
    /// Whether coyote time still allows a jump.
    pub can_jump: bool,
    pub jump_held: bool,
    /// The jumpable state the player was last in; decides ground vs. wall jump.
    pub last_jump_state: PlayerState,
}

impl Default for MovementRuntimeState {
    fn default() -> Self {
        Self {
            player_state: PlayerState::Airborne,
            velocity: Vec3::ZERO,
            wall_hit: None,
            jump_leeway: Stopwatch::default(),
            wall_ride: Stopwatch::default(),
            sticky_wall: Stopwatch::default(),
            wall_jump_deaden: Stopwatch::default(),
            jump_cooldown: Countdown::default(),
            jump_buffer: Countdown::default(),
            can_jump: false,
            jump_held: false,
            last_jump_state: PlayerState::Grounded,
        }
    }
}

impl MovementRuntimeState {
    pub fn on_jump_cooldown(&self) -> bool {
        self.jump_cooldown.is_running()
    }

    pub fn jump_buffered(&self) -> bool {
        self.jump_buffer.is_running()
    }
}
