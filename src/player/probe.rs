//! Proximity probes for ground and wall contact.
//!
//! The controller only needs one spatial query from its host: sweep a
//! sphere and report the first surface it touches. [`SurfaceProbe`] is that
//! seam; [`RapierProbe`] implements it for the game and tests stub it.

use bevy::prelude::*;
use bevy_rapier3d::parry::query::ShapeCastOptions;
use bevy_rapier3d::prelude::*;

/// How far above the feet the ground probe starts, so a body that has sunk
/// slightly into the floor still finds it.
pub const GROUND_PROBE_LIFT: f32 = 0.025;
/// How far the wall probe backs off against the move direction before casting.
pub const WALL_PROBE_BACKOFF: f32 = 0.025;
/// Sweep length of both probes.
pub const PROBE_DISTANCE: f32 = 0.05;
/// Minimum `dot(up, normal)` for a surface to count as ground.
pub const GROUND_MIN_UP_DOT: f32 = 0.25;
/// Maximum `|dot(up, normal)|` for a surface to count as a wall.
pub const WALL_MAX_UP_DOT: f32 = 0.25;

/// A surface touched by a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Surface normal, pointing away from the surface.
    pub normal: Vec3,
    /// Contact point on the surface.
    pub point: Vec3,
}

/// Sphere sweep provided by the host physics.
///
/// A sweep that starts inside geometry must report a miss rather than the
/// geometry it started in.
pub trait SurfaceProbe {
    fn probe_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<ProbeHit>;
}

/// Ground and wall checks for a body of a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContactProbe {
    radius: f32,
}

impl WallContactProbe {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Look for walkable ground just under the body.
    ///
    /// Walls and ceilings are rejected by the normal test.
    pub fn ground_check(&self, probe: &impl SurfaceProbe, position: Vec3) -> Option<ProbeHit> {
        let hit = probe.probe_shape(
            position + Vec3::Y * GROUND_PROBE_LIFT,
            self.radius,
            Vec3::NEG_Y,
            PROBE_DISTANCE,
        )?;
        (Vec3::Y.dot(hit.normal) >= GROUND_MIN_UP_DOT).then_some(hit)
    }

    /// Look for a near-vertical surface in `direction`.
    pub fn wall_check(
        &self,
        probe: &impl SurfaceProbe,
        position: Vec3,
        direction: Vec3,
    ) -> Option<ProbeHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let hit = probe.probe_shape(
            position - direction * WALL_PROBE_BACKOFF,
            self.radius,
            direction,
            PROBE_DISTANCE,
        )?;
        (Vec3::Y.dot(hit.normal).abs() <= WALL_MAX_UP_DOT).then_some(hit)
    }
}

/// [`SurfaceProbe`] backed by Rapier shape casts.
pub struct RapierProbe<'a> {
    context: &'a RapierContext,
    body: Entity,
}

impl<'a> RapierProbe<'a> {
    /// Probe on behalf of `body`, whose own collider is ignored.
    pub fn new(context: &'a RapierContext, body: Entity) -> Self {
        Self { context, body }
    }
}

impl SurfaceProbe for RapierProbe<'_> {
    fn probe_shape(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<ProbeHit> {
        let shape = Collider::ball(radius);
        let mut options = ShapeCastOptions::with_max_time_of_impact(max_distance);
        // Geometry the sphere starts inside of is not a hit.
        options.stop_at_penetration = false;
        let filter = QueryFilter::default()
            .exclude_collider(self.body)
            .exclude_sensors();

        let (_, hit) = self.context.cast_shape(
            origin,
            Quat::IDENTITY,
            direction,
            &shape,
            options,
            filter,
        )?;
        let details = hit.details?;

        Some(ProbeHit {
            normal: details.normal2,
            point: details.witness2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every sweep touches the same surface.
    struct Surface(Vec3);

    impl SurfaceProbe for Surface {
        fn probe_shape(&self, origin: Vec3, _: f32, direction: Vec3, _: f32) -> Option<ProbeHit> {
            Some(ProbeHit {
                normal: self.0,
                point: origin + direction * PROBE_DISTANCE,
            })
        }
    }

    fn steep_face() -> Surface {
        // About 79 degrees from horizontal.
        Surface(Vec3::new(0.98, 0.196, 0.0).normalize())
    }

    fn ramp() -> Surface {
        Surface(Vec3::new(1.0, 1.0, 0.0).normalize())
    }

    #[test]
    fn steep_face_is_a_wall_not_ground() {
        let probe = WallContactProbe::new(0.5);
        assert!(probe.ground_check(&steep_face(), Vec3::ZERO).is_none());
        assert!(probe
            .wall_check(&steep_face(), Vec3::ZERO, Vec3::NEG_X)
            .is_some());
    }

    #[test]
    fn ramp_is_ground_not_a_wall() {
        let probe = WallContactProbe::new(0.5);
        assert!(probe.ground_check(&ramp(), Vec3::ZERO).is_some());
        assert!(probe.wall_check(&ramp(), Vec3::ZERO, Vec3::NEG_X).is_none());
    }

    #[test]
    fn ceilings_are_neither() {
        let probe = WallContactProbe::new(0.5);
        let ceiling = Surface(Vec3::NEG_Y);
        assert!(probe.ground_check(&ceiling, Vec3::ZERO).is_none());
        assert!(probe.wall_check(&ceiling, Vec3::ZERO, Vec3::Y).is_none());
    }

    #[test]
    fn wall_check_needs_a_direction() {
        let probe = WallContactProbe::new(0.5);
        let wall = Surface(Vec3::X);
        assert!(probe.wall_check(&wall, Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(probe.wall_check(&wall, Vec3::ZERO, Vec3::NEG_X).is_some());
    }
}
