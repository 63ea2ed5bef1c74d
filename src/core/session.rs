//! Level-scoped bookkeeping of how the level ended.

use bevy::prelude::*;

/// How a level was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// The current reached the end of the wire chain.
    Success,
    /// The current fizzled at a gap, or the player fell out of the level.
    Failure,
}

impl LevelOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, LevelOutcome::Success)
    }
}

/// The outcome of the level in progress, if it has been decided.
///
/// Every source of a level end goes through [`LevelSession::conclude`], so
/// only the first one wins and `LevelEndEvent` fires once per level.
#[derive(Resource, Debug, Default)]
pub struct LevelSession {
    outcome: Option<LevelOutcome>,
}

impl LevelSession {
    /// Record the outcome. Returns `false` if the level was already decided.
    pub fn conclude(&mut self, outcome: LevelOutcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.outcome
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    /// Forget the outcome when the level is torn down.
    pub fn reset(&mut self) {
        self.outcome = None;
    }
}
