//! The collision query used by movement, weapons and enemy AI.

use std::f64::consts::FRAC_1_SQRT_2;

use glam::DVec3;

/// Planar directions checked by [`CollisionQuery::is_position_blocked`] and
/// [`CollisionQuery::is_move_blocked`].
pub const COLLISION_DIRECTIONS: [DVec3; 8] = [
    DVec3::new(1.0, 0.0, 0.0),
    DVec3::new(-1.0, 0.0, 0.0),
    DVec3::new(0.0, 0.0, 1.0),
    DVec3::new(0.0, 0.0, -1.0),
    DVec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    DVec3::new(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    DVec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
    DVec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
];

/// Ray queries against static level geometry.
///
/// Enemies and weapon effects are never part of the queried geometry; weapon
/// hits on enemy bodies are resolved separately by the simulation.
pub trait CollisionQuery {
    /// Distance to the nearest static hit along `direction` within `max_distance`.
    fn cast_ray(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<f64>;

    fn is_blocked(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> bool {
        self.cast_ray(origin, direction, max_distance).is_some()
    }

    /// True if geometry lies closer than `radius` in any of the 8 collision directions.
    fn is_position_blocked(&self, position: DVec3, radius: f64) -> bool {
        COLLISION_DIRECTIONS
            .iter()
            .any(|dir| self.cast_ray(position, *dir, radius).is_some_and(|d| d < radius))
    }

    /// Like [`is_position_blocked`](Self::is_position_blocked), but only the
    /// collision directions that point along `travel` count. Geometry behind a
    /// mover never stops it, so it can always back away from a face it
    /// overlaps or just left.
    fn is_move_blocked(&self, position: DVec3, travel: DVec3, radius: f64) -> bool {
        COLLISION_DIRECTIONS
            .iter()
            .filter(|dir| dir.dot(travel) > 0.0)
            .any(|dir| self.cast_ray(position, *dir, radius).is_some_and(|d| d < radius))
    }
}
