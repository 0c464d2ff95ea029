//! Box-brush level geometry and the default arena layout.

use glam::DVec3;

use skirmish_core::constants::ARENA_HALF_SIZE;

use crate::aabb::Aabb;
use crate::query::CollisionQuery;

/// What a brush represents in the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushKind {
    Building,
    Roof,
    Stair,
    Cover,
    Boundary,
}

/// A solid box in the level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub kind: BrushKind,
    pub bounds: Aabb,
}

/// Static level geometry made of axis-aligned box brushes.
#[derive(Debug, Clone, Default)]
pub struct ArenaGeometry {
    brushes: Vec<Brush>,
}

impl ArenaGeometry {
    /// Geometry with no brushes; nothing ever blocks.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_box(&mut self, kind: BrushKind, center: DVec3, size: DVec3) {
        self.brushes.push(Brush {
            kind,
            bounds: Aabb::from_center_size(center, size),
        });
    }

    /// Builder form of [`add_box`](Self::add_box).
    pub fn with_box(mut self, kind: BrushKind, center: DVec3, size: DVec3) -> Self {
        self.add_box(kind, center, size);
        self
    }

    pub fn brushes(&self) -> &[Brush] {
        &self.brushes
    }

    /// Adds a building: walls, an overhanging roof slab and exterior stairs
    /// running up the +x side. `center` is the centre of the wall block.
    fn add_building(&mut self, size: DVec3, center: DVec3) {
        self.add_box(BrushKind::Building, center, size);
        self.add_box(
            BrushKind::Roof,
            center + DVec3::new(0.0, size.y / 2.0, 0.0),
            DVec3::new(size.x + 0.5, 0.5, size.z + 0.5),
        );

        let stair_count = size.y.floor() as usize;
        let rise = size.y / stair_count.max(1) as f64;
        for i in 0..stair_count {
            let offset = DVec3::new(size.x / 2.0 + 0.25, i as f64 * rise, 0.0);
            self.add_box(BrushKind::Stair, center + offset, DVec3::new(2.0, 0.5, 0.5));
        }
    }
}

impl CollisionQuery for ArenaGeometry {
    fn cast_ray(&self, origin: DVec3, direction: DVec3, max_distance: f64) -> Option<f64> {
        let dir = direction.try_normalize()?;
        self.brushes
            .iter()
            .filter_map(|b| b.bounds.ray_distance(origin, dir, max_distance))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// The arena the game ships with: four buildings, five ground cover boxes and
/// boundary walls enclosing a 100 x 100 area.
pub fn default_arena() -> ArenaGeometry {
    let mut arena = ArenaGeometry::empty();

    let buildings = [
        (DVec3::new(10.0, 8.0, 10.0), DVec3::new(-15.0, 4.0, -15.0)),
        (DVec3::new(12.0, 6.0, 8.0), DVec3::new(15.0, 3.0, -10.0)),
        (DVec3::new(8.0, 10.0, 12.0), DVec3::new(-10.0, 5.0, 15.0)),
        (DVec3::new(15.0, 7.0, 15.0), DVec3::new(12.0, 3.5, 12.0)),
    ];
    for (size, center) in buildings {
        arena.add_building(size, center);
    }

    let cover = [(0.0, 0.0), (-5.0, -5.0), (5.0, 5.0), (-5.0, 5.0), (5.0, -5.0)];
    for (x, z) in cover {
        arena.add_box(BrushKind::Cover, DVec3::new(x, 1.0, z), DVec3::splat(2.0));
    }

    let h = ARENA_HALF_SIZE;
    let along_x = DVec3::new(2.0 * h, 15.0, 1.0);
    let along_z = DVec3::new(1.0, 15.0, 2.0 * h);
    arena.add_box(BrushKind::Boundary, DVec3::new(0.0, 7.5, -h), along_x);
    arena.add_box(BrushKind::Boundary, DVec3::new(0.0, 7.5, h), along_x);
    arena.add_box(BrushKind::Boundary, DVec3::new(-h, 7.5, 0.0), along_z);
    arena.add_box(BrushKind::Boundary, DVec3::new(h, 7.5, 0.0), along_z);

    arena
}
