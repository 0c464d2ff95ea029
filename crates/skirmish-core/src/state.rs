//! Game state snapshot: the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::components::VisualHandle;
use crate::enums::*;
use crate::events::{AudioCue, GameEvent, HudReport, VisualCommand};
use crate::types::{Aim, Position, SimTime, Velocity};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub spawn_interval_ms: u64,
    pub max_enemies: usize,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub grenades: Vec<GrenadeView>,
    /// Gameplay events raised during this tick.
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioCue>,
    pub visuals: Vec<VisualCommand>,
    pub hud: Vec<HudReport>,
}

/// Player status for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    /// Eye position.
    pub position: Position,
    pub velocity: Velocity,
    pub aim: Aim,
    pub team: Option<Team>,
    pub health: u32,
    pub max_health: u32,
    pub alive: bool,
    pub active_weapon: WeaponKind,
    pub ammo_in_magazine: u32,
    pub ammo_reserve: u32,
    pub reloading: bool,
    pub aiming: bool,
    /// Camera field of view in degrees (narrower while aiming).
    pub fov_deg: f64,
    /// Time left until respawn while dead.
    pub respawn_in_ms: Option<u64>,
}

/// A living enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub enemy_id: u32,
    /// Scene handle of the enemy body.
    pub handle: VisualHandle,
    /// Feet position.
    pub position: Position,
    pub state: EnemyState,
    pub health: u32,
    pub team: Option<Team>,
    pub facing: f64,
}

/// A grenade in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeView {
    pub handle: VisualHandle,
    pub position: Position,
}
