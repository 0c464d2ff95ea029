//! Player commands sent from the input collaborator to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    /// Planar move intent in world space. (0, 0) stops accelerating.
    Move { x: f64, z: f64 },
    /// Absolute look direction (radians).
    Look { yaw: f64, pitch: f64 },
    /// Jump; ignored while airborne.
    Jump,

    // --- Weapons ---
    Fire,
    Reload,
    SwitchWeapon { kind: WeaponKind },
    /// Enter or leave aiming mode.
    Aim { active: bool },
    ThrowGrenade,

    // --- Session ---
    /// Start a round with the chosen team and weapon (menu or game over only).
    StartRound {
        team: Option<Team>,
        weapon: WeaponKind,
    },
    /// Restart the round with the current selection.
    Restart,
    Pause,
    Resume,
    ReturnToMenu,
}
