//! Wires module - the wire chain and the current that runs along it.

mod chain;
mod components;
mod config;
mod error;
mod plugin;
mod systems;
mod traversal;
mod wire;

pub use chain::{sort_wires, WireChain, WireRegistry};
pub use components::*;
pub use config::CurrentConfig;
pub use error::WireChainError;
pub use plugin::WiresPlugin;
pub use traversal::{CurrentTraversal, TraversalPhase};
pub use wire::*;
