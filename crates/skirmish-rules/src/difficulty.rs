//! Spawn pacing and spawn point selection.

use std::f64::consts::TAU;

use rand::Rng;

use skirmish_core::constants::*;
use skirmish_core::types::Position;

/// Spawn interval for a score: 250 ms faster per 500 points, floored at 2000 ms.
pub fn spawn_interval_for_score(score: u32) -> u64 {
    let steps = (score / SCORE_PER_DIFFICULTY_STEP) as u64;
    BASE_SPAWN_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(SPAWN_INTERVAL_STEP_MS))
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// Fixed spawn points on a circle around the arena centre, at ground level.
pub fn spawn_points() -> [Position; SPAWN_POINT_COUNT] {
    std::array::from_fn(|i| {
        let angle = i as f64 * TAU / SPAWN_POINT_COUNT as f64;
        Position::new(
            angle.cos() * SPAWN_RING_RADIUS,
            0.0,
            angle.sin() * SPAWN_RING_RADIUS,
        )
    })
}

/// Uniform choice among `points`. `None` only when `points` is empty.
pub fn choose_point<R: Rng>(points: &[Position], rng: &mut R) -> Option<Position> {
    if points.is_empty() {
        return None;
    }
    Some(points[rng.gen_range(0..points.len())])
}

/// `point` shifted on x and z by up to `SPAWN_JITTER` each way.
pub fn jitter<R: Rng>(point: Position, rng: &mut R) -> Position {
    let dx = (rng.gen::<f64>() - 0.5) * 2.0 * SPAWN_JITTER;
    let dz = (rng.gen::<f64>() - 0.5) * 2.0 * SPAWN_JITTER;
    Position::new(point.x + dx, point.y, point.z + dz)
}

/// Points at least `SAFE_SPAWN_DISTANCE` from every enemy; all points when none are.
pub fn safe_points(points: &[Position], enemies: &[Position]) -> Vec<Position> {
    let safe: Vec<Position> = points
        .iter()
        .filter(|p| enemies.iter().all(|e| e.range_to(p) >= SAFE_SPAWN_DISTANCE))
        .copied()
        .collect();

    if safe.is_empty() {
        points.to_vec()
    } else {
        safe
    }
}

/// Uniform choice among the safe points (see [`safe_points`]).
pub fn safe_spawn_point<R: Rng>(
    points: &[Position],
    enemies: &[Position],
    rng: &mut R,
) -> Option<Position> {
    choose_point(&safe_points(points, enemies), rng)
}
