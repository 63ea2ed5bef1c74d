//! Wire-related components and the level's wire bookkeeping.

use std::collections::HashMap;

use bevy::prelude::*;

use super::chain::WireRegistry;
use super::traversal::CurrentTraversal;
use super::wire::{Wire, WireId};

/// A wire placed in the level. Registers itself with [`LevelWires`] when
/// spawned and deregisters when despawned.
#[derive(Component, Debug, Clone, Copy)]
pub struct WireSegment {
    pub id: WireId,
    pub wire: Wire,
}

/// Spherical trigger around a gap anchor. The player inside it lets the
/// current cross the gap between the listed wires.
#[derive(Component, Debug, Clone)]
pub struct GapTrigger {
    pub wires: [WireId; 2],
    pub radius: f32,
    pub player_inside: bool,
}

/// The moving current.
#[derive(Component)]
pub struct CurrentFlow {
    pub traversal: CurrentTraversal,
}

/// Wires of the level in progress.
#[derive(Resource, Default)]
pub struct LevelWires {
    pub registry: WireRegistry,
    /// Which wire each spawned segment registered, for deregistration.
    pub entities: HashMap<Entity, WireId>,
    /// Set once the current has been spawned for this level.
    pub current_started: bool,
}
