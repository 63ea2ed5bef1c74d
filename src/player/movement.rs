//! Systems that drive the movement controller from the engine schedule.
//!
//! Rapier owns the player's body; these systems sync its velocity into the
//! controller, tick it, and write the result back.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::config::{BodyDimensions, MovementConfig};
use super::controller::{MovementController, MovementInput, MovementSignal};
use super::probe::RapierProbe;
use super::state::JumpKind;
use crate::core::{ConfigError, LevelSession, LevelTransitionStarted, PlayerJumped, WallContactChanged};

/// Sample the keyboard into [`PlayerIntent`].
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    session: Res<LevelSession>,
    mut intent: ResMut<PlayerIntent>,
) {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    intent.move_axis = axis;
    intent.jump_pressed = keyboard.just_pressed(KeyCode::Space);
    intent.jump_held = keyboard.pressed(KeyCode::Space);
    // Boost stops being forwarded once the level has been decided.
    intent.boost_held = keyboard.pressed(KeyCode::ShiftLeft) && !session.is_concluded();
}

/// Turn the move axis into a world direction in the orienter's yaw frame.
fn oriented_direction(axis: Vec2, orienter: Option<&GlobalTransform>) -> Vec3 {
    let (forward, right) = match orienter {
        Some(transform) => {
            let forward = Vec3::from(transform.forward());
            let right = Vec3::from(transform.right());
            (
                Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero(),
                Vec3::new(right.x, 0.0, right.z).normalize_or_zero(),
            )
        }
        None => (Vec3::NEG_Z, Vec3::X),
    };

    forward * axis.y + right * axis.x
}

fn movement_input(intent: &PlayerIntent, orienter: Option<&GlobalTransform>) -> MovementInput {
    MovementInput {
        move_direction: oriented_direction(intent.move_axis, orienter),
        jump_pressed: intent.jump_pressed,
        jump_held: intent.jump_held,
    }
}

/// Fixed-timestep half of the controller: steering and acceleration.
pub fn tick_player_physics(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    rapier_context: Query<&RapierContext>,
    orienter_query: Query<&GlobalTransform, With<Orienter>>,
    mut player_query: Query<
        (Entity, &Transform, &mut PlayerMotor, &mut Velocity, &mut GravityScale),
        With<Player>,
    >,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let input = movement_input(&intent, orienter_query.get_single().ok());

    for (entity, transform, mut motor, mut velocity, mut gravity) in &mut player_query {
        let probe = RapierProbe::new(context, entity);
        let controller = &mut motor.controller;

        controller.set_velocity(velocity.linvel);
        let step = controller.tick_physics(time.delta_secs(), transform.translation, &input, &probe);
        velocity.linvel = controller.velocity();

        gravity.0 = if step.gravity_enabled { 1.0 } else { 0.0 };
    }
}

/// Per-frame half of the controller: grounding, jumps, and jump gravity.
pub fn tick_player_frame(
    time: Res<Time>,
    intent: Res<PlayerIntent>,
    rapier_context: Query<&RapierContext>,
    orienter_query: Query<&GlobalTransform, With<Orienter>>,
    mut player_query: Query<
        (Entity, &Transform, &mut PlayerMotor, &mut Velocity, &mut ExternalImpulse),
        With<Player>,
    >,
    mut wall_events: EventWriter<WallContactChanged>,
    mut jump_events: EventWriter<PlayerJumped>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let dt = time.delta_secs();
    let input = movement_input(&intent, orienter_query.get_single().ok());

    for (entity, transform, mut motor, mut velocity, mut impulse) in &mut player_query {
        let probe = RapierProbe::new(context, entity);
        let controller = &mut motor.controller;

        controller.set_velocity(velocity.linvel);
        controller.tick_frame(dt, transform.translation, &input, &probe);
        velocity.linvel = controller.velocity();

        for signal in controller.drain_signals() {
            match signal {
                MovementSignal::WallContactChanged(normal) => {
                    wall_events.send(WallContactChanged { player: entity, normal });
                }
                MovementSignal::Jumped { kind, torque } => {
                    // Spin the ball a little in the direction of travel.
                    impulse.torque_impulse += torque * dt;
                    jump_events.send(PlayerJumped {
                        player: entity,
                        off_wall: kind == JumpKind::Wall,
                    });
                }
            }
        }
    }
}

/// No more jumps once the level is winding down.
pub fn halt_player_on_level_transition(
    mut transition_events: EventReader<LevelTransitionStarted>,
    mut player_query: Query<&mut PlayerMotor, With<Player>>,
) {
    if transition_events.read().last().is_none() {
        return;
    }

    for mut motor in &mut player_query {
        motor.controller.begin_level_transition();
    }
}

/// Spawn the player ball.
///
/// Fails if the movement tuning is degenerate.
pub fn spawn_player(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    position: Vec3,
    config: &MovementConfig,
) -> Result<Entity, ConfigError> {
    let controller = MovementController::new(
        config.clone(),
        BodyDimensions {
            probe_radius: PLAYER_RADIUS,
        },
    )?;

    let player = commands
        .spawn((
            Player,
            PlayerMotor { controller },
            Mesh3d(meshes.add(Sphere::new(PLAYER_RADIUS))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.85, 0.75, 0.3),
                perceptual_roughness: 0.6,
                ..default()
            })),
            Transform::from_translation(position),
            // Rapier physics components
            RigidBody::Dynamic,
            Collider::ball(PLAYER_RADIUS),
            Velocity::zero(),
            GravityScale(1.0),
            ExternalImpulse::default(),
            Friction::coefficient(0.6),
            Ccd::enabled(),
        ))
        .id();

    info!("Spawned player at {:?}", position);
    Ok(player)
}
