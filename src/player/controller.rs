//! Player movement state machine.
//!
//! A physically simulated ball controller: the host physics engine owns
//! integration and collisions, while this controller decides how input turns
//! into velocity each tick. It handles grounding, coyote time, jump
//! buffering, jump cooldown, wall riding, wall jumping, sticky walls, and
//! variable jump gravity.
//!
//! Two entry points are driven by the host:
//!
//! - [`MovementController::tick_physics`] once per fixed timestep. Steers
//!   the move direction (sticky walls, wall riding, wall-jump deadening) and
//!   applies it to the horizontal velocity.
//! - [`MovementController::tick_frame`] once per rendered frame. Probes for
//!   ground, tracks jump leeway and the jump buffer, executes jumps, and adds
//!   the extra jump gravity.
//!
//! The host syncs the body's velocity in with [`MovementController::set_velocity`]
//! before each tick and reads it back with [`MovementController::velocity`]
//! afterwards. Side effects the host should know about are queued as
//! [`MovementSignal`]s and drained with [`MovementController::drain_signals`].

use bevy::prelude::*;

use super::config::{BodyDimensions, MovementConfig};
use super::probe::{ProbeHit, SurfaceProbe, WallContactProbe};
use super::state::{JumpKind, MovementRuntimeState, PlayerState};
use crate::core::{inverse_lerp, ConfigError};

/// Input sampled for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementInput {
    /// World-space move direction in the orienter's frame. Zero when idle.
    pub move_direction: Vec3,
    /// True only on the tick the jump input went from released to pressed.
    pub jump_pressed: bool,
    /// True while the jump input is held.
    pub jump_held: bool,
}

/// What the host physics needs to know after a physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsStep {
    /// Gravity is off exactly while wall riding.
    pub gravity_enabled: bool,
}

/// Side effects produced by the controller, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementSignal {
    /// The recorded wall normal appeared, changed, or was cleared.
    WallContactChanged(Option<Vec3>),
    /// A jump was executed. `torque` is purely cosmetic rolling feedback.
    Jumped { kind: JumpKind, torque: Vec3 },
}

/// The movement state machine for one player.
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    probe: WallContactProbe,
    state: MovementRuntimeState,
    signals: Vec<MovementSignal>,
    level_transitioning: bool,
}

impl MovementController {
    /// Build a controller. Fails if the tuning or the body is degenerate.
    pub fn new(config: MovementConfig, body: BodyDimensions) -> Result<Self, ConfigError> {
        config.validate()?;
        body.validate()?;

        Ok(Self {
            config,
            probe: WallContactProbe::new(body.probe_radius),
            state: MovementRuntimeState::default(),
            signals: Vec::new(),
            level_transitioning: false,
        })
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn state(&self) -> &MovementRuntimeState {
        &self.state
    }

    pub fn player_state(&self) -> PlayerState {
        self.state.player_state
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Sync in the body's velocity as integrated by the host physics.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.state.velocity = velocity;
    }

    /// Normal of the wall last ridden, while that information is fresh.
    pub fn wall_normal(&self) -> Option<Vec3> {
        self.state.wall_hit.map(|hit| hit.normal)
    }

    pub fn wall_hit(&self) -> Option<ProbeHit> {
        self.state.wall_hit
    }

    /// How much of the wall ride is left, from 1 (fresh) to 0 (used up).
    pub fn wall_ride_remaining_fraction(&self) -> f32 {
        inverse_lerp(
            self.config.wall_ride_max_time,
            0.0,
            self.state.wall_ride.elapsed(),
        )
    }

    pub fn is_level_transitioning(&self) -> bool {
        self.level_transitioning
    }

    /// Take every signal queued since the last drain.
    pub fn drain_signals(&mut self) -> Vec<MovementSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Stop jumping for the rest of the level. Movement keeps working.
    pub fn begin_level_transition(&mut self) {
        self.level_transitioning = true;
        self.state.jump_buffer.clear();
    }

    /// Return to the state of a freshly spawned player.
    pub fn reset(&mut self) {
        self.state = MovementRuntimeState::default();
        self.signals.clear();
        self.level_transitioning = false;
    }

    // --- Fixed timestep --- //

    /// Steer and apply the move input for one physics tick.
    ///
    /// The order matters: each step adjusts the direction the next one sees.
    pub fn tick_physics(
        &mut self,
        dt: f32,
        position: Vec3,
        input: &MovementInput,
        probe: &impl SurfaceProbe,
    ) -> PhysicsStep {
        let mut direction = input.move_direction;

        let holding_wall = self.stick_to_wall(dt, &mut direction);
        self.try_wall_ride(dt, position, probe, holding_wall, &mut direction);
        self.deaden_after_wall_jump(dt, &mut direction);

        let direction = direction.normalize_or_zero();
        if direction != Vec3::ZERO {
            self.move_with_direction(direction);
        }

        PhysicsStep {
            gravity_enabled: self.state.player_state != PlayerState::WallRiding,
        }
    }

    /// Strip the away-from-wall part of the input for a short while, so a
    /// wall ride survives the player steering away long enough to wall jump.
    ///
    /// Returns whether the player is being held on the wall this tick.
    fn stick_to_wall(&mut self, dt: f32, direction: &mut Vec3) -> bool {
        let state = &mut self.state;
        let steering_away = match state.wall_hit {
            Some(hit) if state.player_state == PlayerState::WallRiding => {
                hit.normal.dot(*direction) > 0.0
            }
            _ => false,
        };

        if !steering_away {
            state.sticky_wall.reset();
            return false;
        }

        if state.sticky_wall.elapsed() >= self.config.sticky_wall_time {
            return false;
        }

        if let Some(hit) = state.wall_hit {
            *direction -= direction.project_onto(hit.normal);
        }
        state.sticky_wall.tick(dt);
        true
    }

    /// Turn movement into a wall into movement up the wall.
    fn try_wall_ride(
        &mut self,
        dt: f32,
        position: Vec3,
        probe: &impl SurfaceProbe,
        holding_wall: bool,
        direction: &mut Vec3,
    ) {
        let can_ride = self.state.player_state != PlayerState::Grounded
            && self.state.wall_ride.elapsed() < self.config.wall_ride_max_time
            && (*direction != Vec3::ZERO || holding_wall);

        if can_ride {
            // While held on the wall the input no longer points at it, so
            // look for the wall where it was last seen.
            let cast_direction = match (holding_wall, self.state.wall_hit) {
                (true, Some(hit)) => -hit.normal,
                _ => *direction,
            };

            if let Some(hit) = self.probe.wall_check(probe, position, cast_direction) {
                // The probe reaches a little past the body; right after a
                // jump that reach must not pull the player back onto the wall.
                if !self.state.on_jump_cooldown()
                    && self.state.player_state != PlayerState::WallRiding
                {
                    debug!("Wall ride started against {:?}", hit.normal);
                    self.state.player_state = PlayerState::WallRiding;
                }

                self.state.wall_ride.tick(dt);

                let toward_wall = direction.project_onto(hit.normal);
                *direction -= toward_wall;
                *direction += Vec3::Y * toward_wall.length();

                self.record_wall_hit(Some(hit));
                return;
            }
        }

        if self.state.player_state != PlayerState::WallJumping {
            self.state.player_state = PlayerState::Airborne;
        }
    }

    /// Ignore input for a moment after a wall jump, so the jump's outward
    /// momentum is not cancelled and mashing jump cannot climb a wall.
    fn deaden_after_wall_jump(&mut self, dt: f32, direction: &mut Vec3) {
        if self.state.player_state != PlayerState::WallJumping {
            self.state.wall_jump_deaden.reset();
            return;
        }

        self.state.wall_jump_deaden.tick(dt);
        if self.state.wall_jump_deaden.elapsed() < self.config.wall_jump_input_deaden_time {
            *direction = Vec3::ZERO;
        }
    }

    /// Accelerate along `direction`, keeping horizontal speed under the cap.
    fn move_with_direction(&mut self, direction: Vec3) {
        let velocity = self.state.velocity;
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);

        let new_velocity = (horizontal + direction * self.config.move_accel)
            .clamp_length_max(self.config.max_move_velocity);

        // Upward input only comes from wall riding, where gravity is off.
        self.state.velocity = if new_velocity.y > 0.0 {
            new_velocity
        } else {
            Vec3::new(new_velocity.x, velocity.y, new_velocity.z)
        };
    }

    // --- Per frame --- //

    /// Grounding, jump leeway, buffering, jumping, and jump gravity.
    pub fn tick_frame(
        &mut self,
        dt: f32,
        position: Vec3,
        input: &MovementInput,
        probe: &impl SurfaceProbe,
    ) {
        self.state.jump_held = input.jump_held;
        self.state.jump_cooldown.tick(dt);
        self.state.jump_buffer.tick(dt);

        self.update_grounding(position, probe);
        self.update_jump_leeway(dt);

        // A new press replaces any buffer window still running.
        if input.jump_pressed && !self.level_transitioning {
            self.state.jump_buffer.start(self.config.jump_buffer_time);
        }

        self.try_jump();
        self.apply_jump_gravity(dt);
    }

    fn update_grounding(&mut self, position: Vec3, probe: &impl SurfaceProbe) {
        // The probe reaches slightly below the body, so right after a jump it
        // would still see the floor that was just left.
        if !self.state.on_jump_cooldown() && self.probe.ground_check(probe, position).is_some() {
            if self.state.player_state != PlayerState::Grounded {
                debug!("Landed from {:?}", self.state.player_state);
            }
            self.state.player_state = PlayerState::Grounded;
        }

        if self.state.player_state == PlayerState::Grounded {
            self.state.wall_ride.reset();
            self.record_wall_hit(None);
        }
    }

    /// Coyote time: jumping stays allowed for a moment after leaving a
    /// jumpable state.
    fn update_jump_leeway(&mut self, dt: f32) {
        let state = &mut self.state;
        if state.player_state.can_jump_from() {
            state.jump_leeway.reset();
            state.can_jump = true;
            state.last_jump_state = state.player_state;
        } else {
            state.jump_leeway.tick(dt);
            if state.jump_leeway.elapsed() > self.config.jump_leeway_time {
                state.can_jump = false;
            }
        }
    }

    fn try_jump(&mut self) {
        let state = &mut self.state;
        if self.level_transitioning
            || state.on_jump_cooldown()
            || !state.jump_buffered()
            || !state.can_jump
        {
            return;
        }

        state.jump_cooldown.start(self.config.jump_cooldown_time);

        let kind = match (state.last_jump_state, state.wall_hit) {
            (PlayerState::WallRiding, Some(hit)) => {
                let launch = (Vec3::Y + hit.normal).normalize_or_zero();
                state.velocity += launch * self.config.jump_power;
                state.player_state = PlayerState::WallJumping;
                JumpKind::Wall
            }
            _ => {
                state.velocity.y = self.config.jump_power;
                state.player_state = PlayerState::Airborne;
                JumpKind::Ground
            }
        };

        state.can_jump = false;
        state.jump_buffer.clear();

        let torque = Vec3::Y.cross(state.velocity);
        debug!("{:?} jump, velocity {:?}", kind, state.velocity);
        self.signals.push(MovementSignal::Jumped { kind, torque });
    }

    /// Extra gravity for a short hop when jump is released early, and for a
    /// weightier fall. The host already integrates gravity once, so only the
    /// extra `multiplier - 1` share is added here.
    fn apply_jump_gravity(&mut self, dt: f32) {
        let vertical = self.state.velocity.y;
        let rising_released = vertical > 0.0 && !self.state.jump_held;
        if rising_released || vertical < 0.0 {
            self.state.velocity.y -=
                self.config.gravity * (self.config.fall_gravity_multiplier - 1.0) * dt;
        }
    }

    fn record_wall_hit(&mut self, hit: Option<ProbeHit>) {
        let previous = self.state.wall_hit.map(|hit| hit.normal);
        let current = hit.map(|hit| hit.normal);
        self.state.wall_hit = hit;

        if previous != current {
            self.signals.push(MovementSignal::WallContactChanged(current));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 64.0;
    const RADIUS: f32 = 0.5;

    /// Floor at y = 0 everywhere.
    struct Floor;

    impl SurfaceProbe for Floor {
        fn probe_shape(&self, origin: Vec3, radius: f32, direction: Vec3, max_distance: f32) -> Option<ProbeHit> {
            let clearance = origin.y - radius;
            let approach = -direction.y;
            if clearance < 0.0 || approach <= 0.0 || clearance / approach > max_distance {
                return None;
            }
            Some(ProbeHit {
                normal: Vec3::Y,
                point: Vec3::new(origin.x, 0.0, origin.z),
            })
        }
    }

    /// Nothing to touch.
    struct Void;

    impl SurfaceProbe for Void {
        fn probe_shape(&self, _: Vec3, _: f32, _: Vec3, _: f32) -> Option<ProbeHit> {
            None
        }
    }

    fn controller() -> MovementController {
        MovementController::new(MovementConfig::default(), BodyDimensions { probe_radius: RADIUS })
            .unwrap()
    }

    fn on_floor() -> Vec3 {
        Vec3::new(0.0, RADIUS, 0.0)
    }

    #[test]
    fn rejects_degenerate_config() {
        let config = MovementConfig {
            fall_gravity_multiplier: 1.0,
            ..default()
        };
        let result = MovementController::new(config, BodyDimensions { probe_radius: RADIUS });
        assert_eq!(result.err(), Some(ConfigError::FallGravityMultiplier(1.0)));

        let result = MovementController::new(
            MovementConfig::default(),
            BodyDimensions { probe_radius: 0.0 },
        );
        assert!(result.is_err());
    }

    #[test]
    fn frame_probe_grounds_the_player() {
        let mut controller = controller();
        assert_eq!(controller.player_state(), PlayerState::Airborne);

        controller.tick_frame(DT, on_floor(), &MovementInput::default(), &Floor);
        assert_eq!(controller.player_state(), PlayerState::Grounded);
        assert!(controller.state().can_jump);
    }

    #[test]
    fn physics_tick_drops_to_airborne_without_a_wall() {
        let mut controller = controller();
        controller.tick_frame(DT, on_floor(), &MovementInput::default(), &Floor);

        let step = controller.tick_physics(DT, on_floor(), &MovementInput::default(), &Floor);
        assert!(step.gravity_enabled);
        assert_eq!(controller.player_state(), PlayerState::Airborne);
    }

    #[test]
    fn horizontal_speed_is_capped() {
        let mut controller = controller();
        let input = MovementInput {
            move_direction: Vec3::X,
            ..default()
        };
        controller.set_velocity(Vec3::new(0.0, -2.0, 0.0));

        for _ in 0..20 {
            controller.tick_physics(DT, Vec3::new(0.0, 10.0, 0.0), &input, &Void);
        }

        let velocity = controller.velocity();
        assert!((velocity.x - controller.config().max_move_velocity).abs() < 1e-5);
        assert_eq!(velocity.y, -2.0);
    }

    #[test]
    fn ground_jump_sets_vertical_velocity() {
        let mut controller = controller();
        controller.set_velocity(Vec3::new(1.0, -0.5, 0.0));
        let press = MovementInput {
            jump_pressed: true,
            jump_held: true,
            ..default()
        };

        controller.tick_frame(DT, on_floor(), &press, &Floor);

        assert_eq!(controller.velocity().y, controller.config().jump_power);
        assert_eq!(controller.velocity().x, 1.0);
        assert_eq!(controller.player_state(), PlayerState::Airborne);
        assert!(controller.state().on_jump_cooldown());

        let signals = controller.drain_signals();
        assert!(matches!(
            signals.as_slice(),
            [MovementSignal::Jumped { kind: JumpKind::Ground, .. }]
        ));
        assert!(controller.drain_signals().is_empty());
    }

    #[test]
    fn jump_torque_rolls_along_velocity() {
        let mut controller = controller();
        controller.set_velocity(Vec3::new(0.0, 0.0, 2.0));
        let press = MovementInput {
            jump_pressed: true,
            jump_held: true,
            ..default()
        };
        controller.tick_frame(DT, on_floor(), &press, &Floor);

        let Some(MovementSignal::Jumped { torque, .. }) = controller.drain_signals().pop() else {
            panic!("expected a jump");
        };
        assert_eq!(torque, Vec3::Y.cross(controller.velocity()));
        assert!(torque.x > 0.0);
    }

    #[test]
    fn no_jumps_after_level_transition() {
        let mut controller = controller();
        controller.begin_level_transition();
        let press = MovementInput {
            jump_pressed: true,
            jump_held: true,
            ..default()
        };
        controller.tick_frame(DT, on_floor(), &press, &Floor);

        assert_eq!(controller.velocity().y, 0.0);
        assert!(controller.drain_signals().is_empty());
        assert!(controller.is_level_transitioning());

        controller.reset();
        assert!(!controller.is_level_transitioning());
        assert_eq!(controller.state(), &MovementRuntimeState::default());
    }

    #[test]
    fn fall_gravity_only_applies_when_falling_or_released() {
        let mut controller = controller();
        let held = MovementInput {
            jump_held: true,
            ..default()
        };
        let extra = controller.config().gravity
            * (controller.config().fall_gravity_multiplier - 1.0)
            * DT;

        controller.set_velocity(Vec3::new(0.0, 2.0, 0.0));
        controller.tick_frame(DT, Vec3::new(0.0, 10.0, 0.0), &held, &Void);
        assert_eq!(controller.velocity().y, 2.0);

        controller.tick_frame(DT, Vec3::new(0.0, 10.0, 0.0), &MovementInput::default(), &Void);
        assert!((controller.velocity().y - (2.0 - extra)).abs() < 1e-6);

        controller.set_velocity(Vec3::new(0.0, -1.0, 0.0));
        controller.tick_frame(DT, Vec3::new(0.0, 10.0, 0.0), &held, &Void);
        assert!((controller.velocity().y - (-1.0 - extra)).abs() < 1e-6);
    }

    #[test]
    fn wall_ride_fraction_runs_down() {
        let controller = controller();
        assert_eq!(controller.wall_ride_remaining_fraction(), 1.0);
    }
}
