//! Wire segments: straight pieces of the current's path.

use std::fmt;

use bevy::prelude::*;

/// Two points closer than this are the same point when chaining wires.
pub const POINT_EPSILON: f32 = 1e-3;

/// Stable identifier of a wire within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wire #{}", self.0)
    }
}

/// How a wire connects to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireKind {
    /// Joined end-to-start with the next wire.
    Continuous,
    /// The current leaves this wire through a gap at its end. `gap_anchor`
    /// marks the gap and is shared with the wire on the other side.
    BrokenAtEnd { gap_anchor: Vec3 },
    /// The current enters this wire from a gap at its start.
    BrokenAtStart { gap_anchor: Vec3 },
}

impl WireKind {
    pub fn gap_anchor(&self) -> Option<Vec3> {
        match self {
            WireKind::Continuous => None,
            WireKind::BrokenAtEnd { gap_anchor } | WireKind::BrokenAtStart { gap_anchor } => {
                Some(*gap_anchor)
            }
        }
    }

    pub fn is_broken_at_end(&self) -> bool {
        matches!(self, WireKind::BrokenAtEnd { .. })
    }

    pub fn is_broken_at_start(&self) -> bool {
        matches!(self, WireKind::BrokenAtStart { .. })
    }
}

/// A straight wire segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wire {
    pub start: Vec3,
    pub end: Vec3,
    pub kind: WireKind,
}

impl Wire {
    pub fn continuous(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            kind: WireKind::Continuous,
        }
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Vec3 {
        self.start.lerp(self.end, 0.5)
    }
}

/// Whether two points coincide for chaining purposes.
pub fn points_meet(a: Vec3, b: Vec3) -> bool {
    a.distance_squared(b) <= POINT_EPSILON * POINT_EPSILON
}
