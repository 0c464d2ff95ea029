//! Level geometry for SKIRMISH.
//!
//! Static box brushes, ray casts against them,
//! and the 8-direction movement collision check.

pub use skirmish_core as core;

pub mod aabb;
pub mod arena;
pub mod query;

// Re-export key types for convenience.
pub use aabb::Aabb;
pub use arena::{default_arena, ArenaGeometry, Brush, BrushKind};
pub use query::{CollisionQuery, COLLISION_DIRECTIONS};
