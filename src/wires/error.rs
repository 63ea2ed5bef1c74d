//! Errors raised while ordering a level's wires into a chain.

use thiserror::Error;

use super::wire::WireId;

/// Why a set of wires does not form a single traversable chain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireChainError {
    #[error("level has no wires")]
    Empty,

    #[error("{0} is registered twice")]
    DuplicateId(WireId),

    #[error("{0} is broken at its end but no wire is broken at the matching start")]
    UnpairedBrokenEnd(WireId),

    #[error("{0} is broken at its start but no wire is broken at the matching end")]
    UnpairedBrokenStart(WireId),

    #[error("{0} has its gap anchor nearer the unbroken end")]
    MisplacedGapAnchor(WireId),

    #[error("{wire} could continue into {first} or {second}")]
    AmbiguousSuccessor {
        wire: WireId,
        first: WireId,
        second: WireId,
    },

    #[error("{0} is entered from more than one wire")]
    Branch(WireId),

    #[error("expected exactly one first wire, found {0}")]
    NoUniqueStart(usize),

    #[error("expected exactly one last wire, found {0}")]
    NoUniqueEnd(usize),

    #[error("only {reached} of {total} wires are reachable from the first wire")]
    Disconnected { reached: usize, total: usize },
}
