//! Interpolation helpers shared by the simulation cores.

use bevy::prelude::*;

/// Step from `from` toward `to` by at most `max_step`.
///
/// Returns `to` exactly once it is within reach, so callers can compare the
/// result against the target without an epsilon.
pub fn move_towards(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step || distance == 0.0 {
        to
    } else {
        from + delta / distance * max_step
    }
}

/// Interpolate along the two segments `start -> mid -> end`.
///
/// The first half of `t` covers `start -> mid`, the second half `mid -> end`.
/// `t` is clamped to [0, 1].
pub fn three_point_lerp(start: Vec3, mid: Vec3, end: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        start.lerp(mid, t * 2.0)
    } else {
        mid.lerp(end, (t - 0.5) * 2.0)
    }
}

/// Where `value` sits between `a` and `b`, clamped to [0, 1].
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
