//! The current over small hand-built chains.

use bevy::prelude::*;
use wirebound::core::{LevelOutcome, LevelSession};
use wirebound::wires::{
    sort_wires, CurrentConfig, CurrentTraversal, TraversalPhase, Wire, WireChain, WireId, WireKind,
};

const DT: f32 = 1.0 / 64.0;

fn x(value: f32) -> Vec3 {
    Vec3::new(value, 0.0, 0.0)
}

/// 0 -> 1, then a gap anchored at 2.5 between 1 -> 2 and 3 -> 4.
fn gapped_chain() -> WireChain {
    let anchor = Vec3::new(2.5, 0.0, 0.0);
    sort_wires(vec![
        (
            WireId(3),
            Wire {
                start: x(3.0),
                end: x(4.0),
                kind: WireKind::BrokenAtStart { gap_anchor: anchor },
            },
        ),
        (WireId(1), Wire::continuous(x(0.0), x(1.0))),
        (
            WireId(2),
            Wire {
                start: x(1.0),
                end: x(2.0),
                kind: WireKind::BrokenAtEnd { gap_anchor: anchor },
            },
        ),
    ])
    .expect("well-formed chain")
}

/// Tick until the traversal finishes (or `max_ticks` pass), collecting
/// every outcome reported along the way.
fn run(traversal: &mut CurrentTraversal, player: Vec3, max_ticks: usize) -> Vec<LevelOutcome> {
    (0..max_ticks)
        .filter_map(|_| traversal.tick(DT, player))
        .collect()
}

#[test]
fn chain_sort_orders_by_adjacency() {
    let a = (WireId(10), Wire::continuous(x(1.0), x(2.0)));
    let b = (WireId(20), Wire::continuous(x(2.0), x(3.0)));
    let c = (WireId(30), Wire::continuous(x(3.0), x(4.0)));

    let chain = sort_wires(vec![b, a, c]).expect("well-formed chain");
    let order: Vec<WireId> = chain.ids().collect();
    assert_eq!(order, vec![WireId(10), WireId(20), WireId(30)]);
}

#[test]
fn gap_without_player_fizzles_once() {
    let mut traversal = CurrentTraversal::new(gapped_chain(), CurrentConfig::default()).unwrap();

    let outcomes = run(&mut traversal, Vec3::new(0.0, 0.0, 10.0), 1000);
    assert_eq!(outcomes, vec![LevelOutcome::Failure]);
    assert_eq!(traversal.phase(), TraversalPhase::Finished(LevelOutcome::Failure));
    // It stopped at the broken end and never crossed.
    assert_eq!(traversal.position(), x(2.0));
}

#[test]
fn gap_with_player_near_detours_through_the_player() {
    let mut traversal = CurrentTraversal::new(gapped_chain(), CurrentConfig::default()).unwrap();
    traversal.set_player_near(WireId(2), true);
    let player = Vec3::new(2.5, 1.0, 0.0);

    // Two wires at one unit per second.
    for _ in 0..128 {
        assert_eq!(traversal.tick(DT, player), None);
    }
    assert_eq!(
        traversal.phase(),
        TraversalPhase::TransitioningGap { progress: 0.0 }
    );

    // Halfway through the half-second crossing the current is at the player.
    for _ in 0..16 {
        assert_eq!(traversal.tick(DT, player), None);
    }
    assert_eq!(traversal.position(), player);

    for _ in 0..16 {
        assert_eq!(traversal.tick(DT, player), None);
    }
    assert_eq!(traversal.phase(), TraversalPhase::Advancing);
    assert_eq!(traversal.position(), x(3.0));
    assert_eq!(traversal.wire_index(), 2);

    assert_eq!(run(&mut traversal, player, 1000), vec![LevelOutcome::Success]);
}

/// Ticks spent crossing the gap.
fn gap_ticks(boost: bool) -> usize {
    let mut traversal = CurrentTraversal::new(gapped_chain(), CurrentConfig::default()).unwrap();
    traversal.set_player_near(WireId(2), true);
    traversal.set_boost(boost);

    let mut ticks = 0;
    for _ in 0..1000 {
        if matches!(traversal.phase(), TraversalPhase::TransitioningGap { .. }) {
            ticks += 1;
        }
        if traversal.tick(DT, x(2.5)).is_some() {
            break;
        }
    }
    ticks
}

#[test]
fn boost_does_not_shorten_the_gap() {
    // 0.5 s at 64 ticks per second.
    assert_eq!(gap_ticks(false), 32);
    assert_eq!(gap_ticks(true), 32);
}

#[test]
fn boost_speeds_up_the_wires() {
    let finish_tick = |boost: bool| {
        let chain = sort_wires(vec![(WireId(1), Wire::continuous(x(0.0), x(3.0)))]).unwrap();
        let mut traversal = CurrentTraversal::new(chain, CurrentConfig::default()).unwrap();
        traversal.set_boost(boost);
        (0..1000).position(|_| traversal.tick(DT, Vec3::ZERO).is_some())
    };

    let normal = finish_tick(false).expect("finishes");
    let boosted = finish_tick(true).expect("finishes");
    assert!(boosted < normal);
}

#[test]
fn end_of_chain_succeeds_exactly_once() {
    let chain = sort_wires(vec![
        (WireId(1), Wire::continuous(x(0.0), x(1.0))),
        (WireId(2), Wire::continuous(x(1.0), x(2.0))),
    ])
    .unwrap();
    let mut traversal = CurrentTraversal::new(chain, CurrentConfig::default()).unwrap();

    let mut outcomes = Vec::new();
    for tick in 0..500 {
        let finished_before = traversal.is_finished();
        if let Some(outcome) = traversal.tick(DT, Vec3::ZERO) {
            assert!(!finished_before);
            // Two unit wires at one unit per second.
            assert_eq!(tick, 127);
            outcomes.push(outcome);
        }
    }

    assert_eq!(outcomes, vec![LevelOutcome::Success]);
    assert!(traversal.is_finished());
}

#[test]
fn only_the_first_level_end_counts() {
    let mut session = LevelSession::default();
    let mut traversal = CurrentTraversal::new(gapped_chain(), CurrentConfig::default()).unwrap();

    // The player falls out of the level first.
    assert!(session.conclude(LevelOutcome::Failure));

    traversal.set_player_near(WireId(2), true);
    let outcomes = run(&mut traversal, x(2.5), 1000);
    assert_eq!(outcomes, vec![LevelOutcome::Success]);
    assert!(!session.conclude(outcomes[0]));
    assert_eq!(session.outcome(), Some(LevelOutcome::Failure));
}
