//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Team identity. Combatants without a team accept damage from anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// The opposing team.
    pub fn opponent(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

/// Player weapon types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Fast-firing, low damage, mild hip spread.
    #[default]
    Rifle,
    /// Slow, high damage, bonus damage while aiming.
    Sniper,
}

/// Enemy behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walking the patrol square around the spawn position.
    #[default]
    Patrol,
    /// Walking straight toward the player.
    Chase,
    /// Standing and shooting at the player.
    Attack,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Team and weapon selection; nothing simulates.
    #[default]
    MainMenu,
    Active,
    Paused,
    /// The player died with respawning disabled.
    GameOver,
}

/// Kinds of visual effects requested from the scene collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    MuzzleFlash,
    /// Player bullet trail from the muzzle to the impact point.
    Tracer,
    HitMarker,
    DamageNumber,
    Explosion,
    /// Grenade body in flight.
    Grenade,
    SpawnEffect,
    /// Persistent body of a living enemy.
    EnemyBody,
    /// Cosmetic enemy bullet. Damage is applied by the attack, not by this.
    EnemyProjectile,
    /// Death fade of an enemy body; the collaborator removes the body after it.
    EnemyFade,
    ScorePopup,
}
