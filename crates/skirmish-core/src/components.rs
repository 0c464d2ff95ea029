//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Rules live in `skirmish-rules`, per-tick behavior in the simulation systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Identity of a spawned enemy. Ids are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
}

/// Opaque handle to a visual owned by the scene collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Behavior state of an enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub state: EnemyState,
    /// Patrol corners, visited cyclically.
    pub patrol_route: [Position; 4],
    pub waypoint_index: usize,
    /// Clock time of the last attack; `None` until the first one.
    pub last_attack_ms: Option<u64>,
    /// Heading on the ground plane (radians, same convention as player yaw).
    pub facing: f64,
}

/// Reload state of a single weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WeaponPhase {
    #[default]
    Ready,
    Reloading { until_ms: u64 },
}

/// Persisted ammunition and timing of one weapon kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponState {
    pub kind: WeaponKind,
    pub ammo_in_magazine: u32,
    pub ammo_reserve: u32,
    pub phase: WeaponPhase,
    pub last_shot_ms: Option<u64>,
}

/// Both weapons carried by the player and which one is in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub active: WeaponKind,
    pub rifle: WeaponState,
    pub sniper: WeaponState,
}

/// A grenade in flight. Position and velocity are separate components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Grenade {
    pub thrower_team: Option<Team>,
    /// Fuse deadline; the grenade detonates in the air when reached.
    pub fuse_deadline_ms: u64,
}
