//! Events and presentation output emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::components::VisualHandle;
use crate::enums::*;
use crate::types::Position;

/// Gameplay events consumed in the same tick by the director and the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    EnemyKilled { enemy_id: u32, position: Position },
    PlayerDied,
    PlayerRespawned { position: Position },
}

/// Audio feedback cues for the sound collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    Shot { weapon: WeaponKind },
    /// Trigger pulled on an empty magazine.
    Empty { weapon: WeaponKind },
    ReloadStarted { weapon: WeaponKind },
    ReloadFinished { weapon: WeaponKind },
    /// A player shot or blast damaged an enemy.
    HitConfirmed,
    SwitchRejected { requested: WeaponKind },
    PlayerHurt,
}

/// Optional parameters of a visual effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectParams {
    /// End point for directional effects (tracers, enemy projectiles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Position>,
    /// Number shown by damage numbers and score popups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    /// Team tint for enemy bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
}

/// A visual effect to spawn in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    pub kind: EffectKind,
    pub position: Position,
    pub params: EffectParams,
}

/// Scene commands. Handles are allocated by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualCommand {
    Spawn {
        handle: VisualHandle,
        effect: VisualEffect,
    },
    Remove { handle: VisualHandle },
}

/// HUD values, reported only when they change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HudReport {
    Health { health: u32 },
    Ammo { current: u32, reserve: u32 },
    Score { score: u32 },
}
