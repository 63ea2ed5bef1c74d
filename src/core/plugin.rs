//! Core plugin that sets up game states, events, and level bookkeeping.

use bevy::prelude::*;

use super::events::*;
use super::session::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Restarting)
/// - Global events (LevelEndEvent, LevelTransitionStarted, ...)
/// - The level session and the level-end hand-off
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Level bookkeeping
            .init_resource::<LevelSession>()

            // Register global events
            .add_event::<LevelEndEvent>()
            .add_event::<LevelTransitionStarted>()
            .add_event::<WallContactChanged>()
            .add_event::<PlayerJumped>()

            // Every level end starts the level transition
            .add_systems(
                Update,
                (announce_level_transition, restart_input).run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnEnter(GameState::Restarting), resume_after_restart)
            .add_systems(OnExit(GameState::InGame), reset_session);
    }
}

/// Forward each level end as the start of the level transition.
fn announce_level_transition(
    mut level_end_events: EventReader<LevelEndEvent>,
    mut transition_events: EventWriter<LevelTransitionStarted>,
) {
    for event in level_end_events.read() {
        info!(
            "Level ended ({}), starting level transition",
            if event.success { "success" } else { "failure" }
        );
        transition_events.send(LevelTransitionStarted);
    }
}

/// Restart the level with R once it has been decided.
fn restart_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    session: Res<LevelSession>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if session.is_concluded() && keyboard.just_pressed(KeyCode::KeyR) {
        next_state.set(GameState::Restarting);
    }
}

fn resume_after_restart(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

fn reset_session(mut session: ResMut<LevelSession>) {
    session.reset();
}
