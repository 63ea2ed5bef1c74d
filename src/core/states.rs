//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player movement and
//! the current only run while `InGame`.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while tuning and level data are read
/// - Enter `InGame` once data is ready; the level is built on entry
/// - `Restarting` is a one-frame hop out of `InGame` so the level is torn
///   down and rebuilt from scratch
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Level teardown before re-entering `InGame`
    Restarting,
}
