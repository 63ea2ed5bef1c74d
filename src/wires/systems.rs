//! Systems that keep the wire registry in sync and run the current.

use bevy::prelude::*;

use super::components::*;
use super::config::CurrentConfig;
use super::traversal::CurrentTraversal;
use crate::core::{LevelEndEvent, LevelSession, LevelTransitionStarted};
use crate::player::{touches_player, Player, PlayerIntent};

const CURRENT_RADIUS: f32 = 0.15;

/// Register newly spawned wire segments.
pub fn register_wires(
    mut level_wires: ResMut<LevelWires>,
    added: Query<(Entity, &WireSegment), Added<WireSegment>>,
) {
    for (entity, segment) in &added {
        level_wires.registry.register(segment.id, segment.wire);
        level_wires.entities.insert(entity, segment.id);
    }
}

/// Deregister despawned wire segments.
pub fn deregister_wires(
    mut level_wires: ResMut<LevelWires>,
    mut removed: RemovedComponents<WireSegment>,
) {
    for entity in removed.read() {
        if let Some(id) = level_wires.entities.remove(&entity) {
            level_wires.registry.deregister(id);
        }
    }
}

/// Sort the registered wires and spawn the current at the chain start.
///
/// A level whose wires do not form a single chain cannot be played; the
/// error is logged and the app exits.
pub fn start_current(
    mut commands: Commands,
    mut level_wires: ResMut<LevelWires>,
    config: Res<CurrentConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut exit: EventWriter<AppExit>,
) {
    if level_wires.current_started || level_wires.registry.is_empty() {
        return;
    }
    level_wires.current_started = true;

    let chain = match level_wires.registry.sort() {
        Ok(chain) => chain,
        Err(err) => {
            error!("Level wires do not form a chain: {}", err);
            exit.send(AppExit::error());
            return;
        }
    };

    let traversal = match CurrentTraversal::new(chain, config.clone()) {
        Ok(traversal) => traversal,
        Err(err) => {
            error!("Invalid current config: {}", err);
            exit.send(AppExit::error());
            return;
        }
    };

    info!(
        "Current starting on a chain of {} wires",
        traversal.chain().len()
    );
    let start = traversal.position();

    commands.spawn((
        CurrentFlow { traversal },
        Mesh3d(meshes.add(Sphere::new(CURRENT_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.4, 0.8, 1.0),
            emissive: LinearRgba::rgb(2.0, 4.0, 6.0),
            ..default()
        })),
        Transform::from_translation(start),
    ));
}

/// Track whether the player is inside each gap trigger and pass it on to
/// the current.
pub fn detect_player_near_gaps(
    player_query: Query<&Transform, With<Player>>,
    mut trigger_query: Query<(&Transform, &mut GapTrigger)>,
    mut current_query: Query<&mut CurrentFlow>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    for (transform, mut trigger) in &mut trigger_query {
        let inside = touches_player(transform.translation, trigger.radius, player.translation);
        if inside != trigger.player_inside {
            debug!(
                "Player {} the gap between {} and {}",
                if inside { "entered" } else { "left" },
                trigger.wires[0],
                trigger.wires[1]
            );
            trigger.player_inside = inside;
        }

        for mut current in &mut current_query {
            for wire in trigger.wires {
                current.traversal.set_player_near(wire, inside);
            }
        }
    }
}

/// Move the current, and end the level when it finishes.
///
/// The current waits while there is no player to cross gaps toward.
pub fn advance_current(
    mut commands: Commands,
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    mut session: ResMut<LevelSession>,
    player_query: Query<&Transform, (With<Player>, Without<CurrentFlow>)>,
    mut current_query: Query<(Entity, &mut CurrentFlow, &mut Transform)>,
    mut level_end_events: EventWriter<LevelEndEvent>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let player_position = player.translation;

    for (entity, mut current, mut transform) in &mut current_query {
        current.traversal.set_boost(intent.boost_held);
        let outcome = current.traversal.tick(time.delta_secs(), player_position);
        transform.translation = current.traversal.position();

        let Some(outcome) = outcome else {
            continue;
        };

        commands.entity(entity).despawn_recursive();
        if session.conclude(outcome) {
            info!("Current finished: {:?}", outcome);
            level_end_events.send(LevelEndEvent {
                success: outcome.is_success(),
            });
        }
    }
}

/// Stop boosting and stop reporting outcomes once the level winds down.
pub fn halt_current_on_transition(
    mut transition_events: EventReader<LevelTransitionStarted>,
    mut current_query: Query<&mut CurrentFlow>,
) {
    if transition_events.read().last().is_none() {
        return;
    }

    for mut current in &mut current_query {
        current.traversal.begin_level_transition();
    }
}

/// Forget the previous level's wires.
pub fn reset_level_wires(mut level_wires: ResMut<LevelWires>) {
    *level_wires = LevelWires::default();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::wires::{sort_wires, Wire, WireId, WireKind};

    const FRAME: Duration = Duration::from_millis(250);

    /// App running the current's per-frame systems with a fixed frame time.
    fn current_app() -> App {
        let mut time = Time::<()>::default();
        time.advance_by(FRAME);

        let mut app = App::new();
        app.insert_resource(time)
            .init_resource::<PlayerIntent>()
            .init_resource::<LevelSession>()
            .add_event::<LevelEndEvent>()
            .add_systems(Update, (detect_player_near_gaps, advance_current).chain());
        app
    }

    fn spawn_current(app: &mut App, wires: Vec<(WireId, Wire)>) -> Vec3 {
        let chain = sort_wires(wires).unwrap();
        let traversal = CurrentTraversal::new(chain, CurrentConfig::default()).unwrap();
        let start = traversal.position();
        app.world_mut()
            .spawn((CurrentFlow { traversal }, Transform::from_translation(start)));
        start
    }

    fn current_position(app: &mut App) -> Vec3 {
        let mut query = app.world_mut().query::<&CurrentFlow>();
        query.single(app.world()).traversal.position()
    }

    #[test]
    fn disconnected_wires_stop_the_app() {
        let mut app = App::new();
        app.init_resource::<LevelWires>()
            .insert_resource(CurrentConfig::default())
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, (register_wires, start_current).chain());
        for (id, x) in [(0, 0.0), (1, 5.0)] {
            app.world_mut().spawn(WireSegment {
                id: WireId(id),
                wire: Wire::continuous(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 0.0, 0.0)),
            });
        }

        app.update();

        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
        let mut currents = app.world_mut().query::<&CurrentFlow>();
        assert_eq!(currents.iter(app.world()).count(), 0);
    }

    #[test]
    fn current_waits_without_a_player() {
        let mut app = current_app();
        let start = spawn_current(
            &mut app,
            vec![(WireId(0), Wire::continuous(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0)))],
        );

        app.update();
        app.update();
        assert_eq!(current_position(&mut app), start);

        app.world_mut()
            .spawn((Player, Transform::from_xyz(0.0, 5.0, 0.0)));
        app.update();
        assert!(current_position(&mut app).x > start.x);
    }

    #[test]
    fn gap_trigger_counts_the_edge_of_the_player() {
        let anchor = Vec3::new(1.5, 0.0, 0.0);
        let mut app = current_app();
        spawn_current(
            &mut app,
            vec![
                (
                    WireId(0),
                    Wire {
                        start: Vec3::ZERO,
                        end: Vec3::X,
                        kind: WireKind::BrokenAtEnd { gap_anchor: anchor },
                    },
                ),
                (
                    WireId(1),
                    Wire {
                        start: Vec3::new(2.0, 0.0, 0.0),
                        end: Vec3::new(3.0, 0.0, 0.0),
                        kind: WireKind::BrokenAtStart { gap_anchor: anchor },
                    },
                ),
            ],
        );
        let trigger = app
            .world_mut()
            .spawn((
                GapTrigger {
                    wires: [WireId(0), WireId(1)],
                    radius: 1.0,
                    player_inside: false,
                },
                Transform::from_translation(anchor),
            ))
            .id();

        // The player's centre is outside the radius but the ball overlaps it.
        let player = app
            .world_mut()
            .spawn((Player, Transform::from_translation(anchor + Vec3::Y * 1.4)))
            .id();
        app.update();
        assert!(app.world().get::<GapTrigger>(trigger).unwrap().player_inside);

        app.world_mut().get_mut::<Transform>(player).unwrap().translation =
            anchor + Vec3::Y * 1.6;
        app.update();
        assert!(!app.world().get::<GapTrigger>(trigger).unwrap().player_inside);
    }
}
