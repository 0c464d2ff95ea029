//! Axis-aligned boxes and the slab ray test.

use glam::DVec3;

/// Directions closer to parallel than this are treated as parallel to a slab.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box of the given full size centred on `center`.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// True if `point` lies inside or on the surface of the box.
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Distance along a unit `direction` from `origin` to the box surface.
    ///
    /// Returns `None` when the ray misses, the hit lies beyond `max_distance`,
    /// or the origin is inside the box (back faces do not collide).
    pub fn ray_distance(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<f64> {
        if self.contains(origin) {
            return None;
        }

        let mut t_enter = 0.0_f64;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];

            if d.abs() < PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}
