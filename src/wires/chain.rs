//! Ordering a level's wires into the chain the current follows.
//!
//! Wires are placed in the level in any order. At level start they are
//! sorted once into a [`WireChain`]: a single path where each wire's end
//! meets the next wire's start, or where a broken wire hands over to its
//! partner across a gap sharing the same anchor. Anything else (a branch,
//! a loop, a dangling broken wire, a piece not connected to the rest) is
//! malformed level geometry and reported as a [`WireChainError`].

use std::collections::HashSet;

use bevy::prelude::*;

use super::error::WireChainError;
use super::wire::{points_meet, Wire, WireId, WireKind};

/// The wires of one level, in registration order.
///
/// Owned by the level and dropped with it; wires register as they are
/// spawned and deregister when despawned.
#[derive(Debug, Clone, Default)]
pub struct WireRegistry {
    wires: Vec<(WireId, Wire)>,
}

impl WireRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a wire. Registering an id twice is reported by [`Self::sort`].
    pub fn register(&mut self, id: WireId, wire: Wire) {
        self.wires.push((id, wire));
    }

    /// Remove every wire registered under `id`. Returns whether any was.
    pub fn deregister(&mut self, id: WireId) -> bool {
        let before = self.wires.len();
        self.wires.retain(|(wire_id, _)| *wire_id != id);
        self.wires.len() != before
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    pub fn get(&self, id: WireId) -> Option<&Wire> {
        self.wires
            .iter()
            .find(|(wire_id, _)| *wire_id == id)
            .map(|(_, wire)| wire)
    }

    /// Order the registered wires into a chain.
    pub fn sort(&self) -> Result<WireChain, WireChainError> {
        sort_wires(self.wires.clone())
    }
}

/// Wires in the order the current visits them.
#[derive(Debug, Clone, PartialEq)]
pub struct WireChain {
    wires: Vec<(WireId, Wire)>,
}

impl WireChain {
    /// Never zero; an empty chain fails to sort.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn wire(&self, index: usize) -> Option<&Wire> {
        self.wires.get(index).map(|(_, wire)| wire)
    }

    pub fn id(&self, index: usize) -> Option<WireId> {
        self.wires.get(index).map(|(id, _)| *id)
    }

    pub fn index_of(&self, id: WireId) -> Option<usize> {
        self.wires.iter().position(|(wire_id, _)| *wire_id == id)
    }

    pub fn first(&self) -> &Wire {
        &self.wires[0].1
    }

    pub fn ids(&self) -> impl Iterator<Item = WireId> + '_ {
        self.wires.iter().map(|(id, _)| *id)
    }

    /// Every gap in the chain: its anchor, and the wires on either side.
    pub fn gaps(&self) -> Vec<(Vec3, [WireId; 2])> {
        self.wires
            .windows(2)
            .filter_map(|pair| {
                let [(before, wire), (after, _)] = pair else {
                    return None;
                };
                match wire.kind {
                    WireKind::BrokenAtEnd { gap_anchor } => Some((gap_anchor, [*before, *after])),
                    _ => None,
                }
            })
            .collect()
    }
}

/// Check that a broken wire's anchor sits on its broken side.
fn check_gap_anchor(id: WireId, wire: &Wire) -> Result<(), WireChainError> {
    let (broken_end, other_end) = match wire.kind {
        WireKind::Continuous => return Ok(()),
        WireKind::BrokenAtEnd { .. } => (wire.end, wire.start),
        WireKind::BrokenAtStart { .. } => (wire.start, wire.end),
    };
    let Some(anchor) = wire.kind.gap_anchor() else {
        return Ok(());
    };

    if !anchor.is_finite() || anchor.distance(broken_end) >= anchor.distance(other_end) {
        return Err(WireChainError::MisplacedGapAnchor(id));
    }
    Ok(())
}

/// Index of the wire the current moves on to after `wires[index]`.
fn successor_of(wires: &[(WireId, Wire)], index: usize) -> Result<Option<usize>, WireChainError> {
    let (id, wire) = &wires[index];

    let mut candidates = wires.iter().enumerate().filter(|(other, (_, next))| {
        if *other == index {
            return false;
        }
        match (wire.kind, next.kind) {
            (WireKind::BrokenAtEnd { gap_anchor }, WireKind::BrokenAtStart { gap_anchor: next_anchor }) => {
                points_meet(gap_anchor, next_anchor)
            }
            (WireKind::BrokenAtEnd { .. }, _) => false,
            (_, WireKind::BrokenAtStart { .. }) => false,
            _ => points_meet(wire.end, next.start),
        }
    });

    let Some((first, _)) = candidates.next() else {
        return Ok(None);
    };
    if let Some((second, _)) = candidates.next() {
        return Err(WireChainError::AmbiguousSuccessor {
            wire: *id,
            first: wires[first].0,
            second: wires[second].0,
        });
    }
    Ok(Some(first))
}

/// Order an unordered set of wires from the first wire to the last.
///
/// The result is deterministic for a given set of wires: the input order
/// only matters for which ids an error reports.
pub fn sort_wires(wires: Vec<(WireId, Wire)>) -> Result<WireChain, WireChainError> {
    if wires.is_empty() {
        return Err(WireChainError::Empty);
    }

    let mut seen = HashSet::new();
    for (id, wire) in &wires {
        if !seen.insert(*id) {
            return Err(WireChainError::DuplicateId(*id));
        }
        check_gap_anchor(*id, wire)?;
    }

    let count = wires.len();
    let mut successors = Vec::with_capacity(count);
    let mut predecessors = vec![0usize; count];
    for index in 0..count {
        let next = successor_of(&wires, index)?;
        match next {
            Some(next) => predecessors[next] += 1,
            None if wires[index].1.kind.is_broken_at_end() => {
                return Err(WireChainError::UnpairedBrokenEnd(wires[index].0));
            }
            None => {}
        }
        successors.push(next);
    }

    for (index, (id, wire)) in wires.iter().enumerate() {
        if predecessors[index] > 1 {
            return Err(WireChainError::Branch(*id));
        }
        if predecessors[index] == 0 && wire.kind.is_broken_at_start() {
            return Err(WireChainError::UnpairedBrokenStart(*id));
        }
    }

    let starts: Vec<usize> = (0..count).filter(|&i| predecessors[i] == 0).collect();
    if starts.len() != 1 {
        return Err(WireChainError::NoUniqueStart(starts.len()));
    }
    let ends = successors.iter().filter(|next| next.is_none()).count();
    if ends != 1 {
        return Err(WireChainError::NoUniqueEnd(ends));
    }

    // Every wire has at most one predecessor and one successor, so the
    // walk from the start visits each wire at most once.
    let mut order = Vec::with_capacity(count);
    let mut cursor = Some(starts[0]);
    while let Some(index) = cursor {
        if order.len() == count {
            break;
        }
        order.push(index);
        cursor = successors[index];
    }

    if order.len() != count {
        return Err(WireChainError::Disconnected {
            reached: order.len(),
            total: count,
        });
    }

    Ok(WireChain {
        wires: order.into_iter().map(|index| wires[index]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 0.0)
    }

    fn continuous(id: u32, from: f32, to: f32) -> (WireId, Wire) {
        (WireId(id), Wire::continuous(point(from), point(to)))
    }

    fn order(chain: &WireChain) -> Vec<u32> {
        chain.ids().map(|id| id.0).collect()
    }

    #[test]
    fn sorts_by_adjacency() {
        let chain = sort_wires(vec![
            continuous(2, 2.0, 3.0),
            continuous(1, 1.0, 2.0),
            continuous(3, 3.0, 4.0),
        ])
        .unwrap();

        assert_eq!(order(&chain), vec![1, 2, 3]);
        assert_eq!(chain.first().start, point(1.0));
    }

    #[test]
    fn broken_pair_links_across_gap() {
        let anchor = Vec3::new(2.5, 1.0, 0.0);
        let wires = vec![
            (
                WireId(20),
                Wire {
                    start: point(3.0),
                    end: point(4.0),
                    kind: WireKind::BrokenAtStart { gap_anchor: anchor },
                },
            ),
            continuous(5, 0.0, 1.0),
            (
                WireId(10),
                Wire {
                    start: point(1.0),
                    end: point(2.0),
                    kind: WireKind::BrokenAtEnd { gap_anchor: anchor },
                },
            ),
        ];

        let chain = sort_wires(wires).unwrap();
        assert_eq!(order(&chain), vec![5, 10, 20]);
        assert_eq!(chain.gaps(), vec![(anchor, [WireId(10), WireId(20)])]);
    }

    #[test]
    fn broken_start_does_not_join_by_position() {
        // Even though 1 ends where 2 starts, a broken start is only ever
        // entered across its gap.
        let wires = vec![
            continuous(1, 0.0, 1.0),
            (
                WireId(2),
                Wire {
                    start: point(1.0),
                    end: point(2.0),
                    kind: WireKind::BrokenAtStart {
                        gap_anchor: point(1.1),
                    },
                },
            ),
        ];

        assert_eq!(
            sort_wires(wires),
            Err(WireChainError::UnpairedBrokenStart(WireId(2)))
        );
    }

    #[test]
    fn reports_empty_and_duplicates() {
        assert_eq!(sort_wires(Vec::new()), Err(WireChainError::Empty));
        assert_eq!(
            sort_wires(vec![continuous(1, 0.0, 1.0), continuous(1, 1.0, 2.0)]),
            Err(WireChainError::DuplicateId(WireId(1)))
        );
    }

    #[test]
    fn reports_missing_link() {
        let result = sort_wires(vec![
            continuous(1, 0.0, 1.0),
            continuous(2, 1.0, 2.0),
            continuous(3, 5.0, 6.0),
        ]);
        assert_eq!(result, Err(WireChainError::NoUniqueStart(2)));
    }

    #[test]
    fn reports_branches() {
        let result = sort_wires(vec![
            continuous(1, 0.0, 1.0),
            continuous(2, 1.0, 2.0),
            (WireId(3), Wire::continuous(point(1.0), Vec3::new(1.0, 1.0, 0.0))),
        ]);
        assert!(matches!(result, Err(WireChainError::AmbiguousSuccessor { wire: WireId(1), .. })));

        let result = sort_wires(vec![
            (WireId(1), Wire::continuous(Vec3::new(0.0, 1.0, 0.0), point(1.0))),
            continuous(2, 0.0, 1.0),
            continuous(3, 1.0, 2.0),
        ]);
        assert_eq!(result, Err(WireChainError::Branch(WireId(3))));
    }

    #[test]
    fn reports_detached_loop() {
        let result = sort_wires(vec![
            continuous(1, 0.0, 1.0),
            continuous(2, 1.0, 2.0),
            continuous(3, 5.0, 6.0),
            continuous(4, 6.0, 5.0),
        ]);
        assert_eq!(
            result,
            Err(WireChainError::Disconnected {
                reached: 2,
                total: 4
            })
        );
    }

    #[test]
    fn reports_loop_with_no_start() {
        let result = sort_wires(vec![continuous(1, 0.0, 1.0), continuous(2, 1.0, 0.0)]);
        assert_eq!(result, Err(WireChainError::NoUniqueStart(0)));
    }

    #[test]
    fn reports_bad_anchors() {
        let wires = vec![(
            WireId(7),
            Wire {
                start: point(0.0),
                end: point(1.0),
                kind: WireKind::BrokenAtEnd {
                    gap_anchor: point(-0.5),
                },
            },
        )];
        assert_eq!(
            sort_wires(wires),
            Err(WireChainError::MisplacedGapAnchor(WireId(7)))
        );

        let wires = vec![(
            WireId(8),
            Wire {
                start: point(0.0),
                end: point(1.0),
                kind: WireKind::BrokenAtEnd {
                    gap_anchor: point(1.5),
                },
            },
        )];
        assert_eq!(
            sort_wires(wires),
            Err(WireChainError::UnpairedBrokenEnd(WireId(8)))
        );
    }

    #[test]
    fn registry_round_trip() {
        let mut registry = WireRegistry::new();
        let (id, wire) = continuous(1, 0.0, 1.0);
        registry.register(id, wire);
        registry.register(WireId(2), Wire::continuous(point(1.0), point(2.0)));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(id), Some(&wire));

        assert!(registry.deregister(WireId(2)));
        assert!(!registry.deregister(WireId(2)));
        assert_eq!(order(&registry.sort().unwrap()), vec![1]);
    }
}
