//! The current: a point that follows the wire chain from start to finish.
//!
//! Along a wire the current moves at a constant speed (faster while
//! boosted). At the end of a wire broken by a gap, it only carries on if the
//! player is standing near the gap; it then detours through the player to
//! the far side over a fixed time. Otherwise it fizzles and the level is
//! lost. Running off the end of the last wire wins the level.

use bevy::prelude::*;

use super::chain::WireChain;
use super::config::CurrentConfig;
use super::wire::WireId;
use crate::core::{move_towards, three_point_lerp, ConfigError, LevelOutcome};

/// Where the current is in its life.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraversalPhase {
    /// Moving along the active wire toward its end.
    Advancing,
    /// Crossing the gap into the active wire. `progress` runs from 0 to 1.
    TransitioningGap { progress: f32 },
    /// Done. Nothing moves any more.
    Finished(LevelOutcome),
}

/// Runtime state of the current over one level's wire chain.
#[derive(Debug, Clone)]
pub struct CurrentTraversal {
    chain: WireChain,
    config: CurrentConfig,
    wire_index: usize,
    phase: TraversalPhase,
    position: Vec3,
    boosting: bool,
    /// Per chain index: the player is close enough to bridge this wire's gap.
    player_near: Vec<bool>,
    level_transitioning: bool,
}

impl CurrentTraversal {
    /// Spawn the current at the start of the first wire.
    pub fn new(chain: WireChain, config: CurrentConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let position = chain.first().start;
        let player_near = vec![false; chain.len()];
        Ok(Self {
            chain,
            config,
            wire_index: 0,
            phase: TraversalPhase::Advancing,
            position,
            boosting: false,
            player_near,
            level_transitioning: false,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn phase(&self) -> TraversalPhase {
        self.phase
    }

    /// Index into the chain of the wire being followed (or entered).
    pub fn wire_index(&self) -> usize {
        self.wire_index
    }

    pub fn chain(&self) -> &WireChain {
        &self.chain
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TraversalPhase::Finished(_))
    }

    pub fn is_boosting(&self) -> bool {
        self.boosting
    }

    /// Hold or release boost. Ignored once the level is winding down.
    pub fn set_boost(&mut self, held: bool) {
        self.boosting = held && !self.level_transitioning;
    }

    /// Mark whether the player is near the gap of the given wire.
    /// Unknown ids are ignored.
    pub fn set_player_near(&mut self, wire: WireId, near: bool) {
        if let Some(index) = self.chain.index_of(wire) {
            self.player_near[index] = near;
        }
    }

    /// Stop boosting and never report an outcome from here on.
    pub fn begin_level_transition(&mut self) {
        self.level_transitioning = true;
        self.boosting = false;
    }

    fn speed(&self) -> f32 {
        if self.boosting {
            self.config.boost_speed
        } else {
            self.config.normal_speed
        }
    }

    /// Advance by `dt` seconds.
    ///
    /// Returns the level outcome on the tick the current finishes, and
    /// `None` on every other tick, including every tick after that one.
    pub fn tick(&mut self, dt: f32, player_position: Vec3) -> Option<LevelOutcome> {
        match self.phase {
            TraversalPhase::Advancing => {
                let target = self.chain.wire(self.wire_index)?.end;
                self.position = move_towards(self.position, target, self.speed() * dt);
                if self.position == target {
                    return self.go_to_next_wire();
                }
                None
            }
            TraversalPhase::TransitioningGap { progress } => {
                self.cross_gap(progress, dt, player_position);
                None
            }
            TraversalPhase::Finished(_) => None,
        }
    }

    fn go_to_next_wire(&mut self) -> Option<LevelOutcome> {
        let finished = self.wire_index;
        let broken = self
            .chain
            .wire(finished)
            .is_some_and(|wire| wire.kind.is_broken_at_end());
        self.wire_index += 1;

        if broken {
            if self.player_near[finished] {
                debug!("Current bridging the gap after {:?}", self.chain.id(finished));
                self.phase = TraversalPhase::TransitioningGap { progress: 0.0 };
                return None;
            }
            return self.finish(LevelOutcome::Failure);
        }

        match self.chain.wire(self.wire_index) {
            Some(next) => {
                self.position = next.start;
                None
            }
            None => self.finish(LevelOutcome::Success),
        }
    }

    fn cross_gap(&mut self, progress: f32, dt: f32, player_position: Vec3) {
        let (Some(previous), Some(next)) = (
            self.chain.wire(self.wire_index - 1),
            self.chain.wire(self.wire_index),
        ) else {
            return;
        };
        let (from, to) = (previous.end, next.start);

        let progress = progress + dt / self.config.transition_length;
        if progress >= 1.0 {
            self.position = to;
            self.phase = TraversalPhase::Advancing;
            return;
        }

        self.position = three_point_lerp(from, player_position, to, progress);
        self.phase = TraversalPhase::TransitioningGap { progress };
    }

    fn finish(&mut self, outcome: LevelOutcome) -> Option<LevelOutcome> {
        debug!("Current finished: {:?}", outcome);
        self.phase = TraversalPhase::Finished(outcome);
        self.boosting = false;
        (!self.level_transitioning).then_some(outcome)
    }
}
