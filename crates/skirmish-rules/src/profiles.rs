//! Per-weapon tuning profiles.

use skirmish_core::constants::*;
use skirmish_core::enums::WeaponKind;

/// Static configuration of a weapon kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub kind: WeaponKind,
    pub damage: u32,
    /// Minimum time between shots (ms).
    pub fire_period_ms: u64,
    pub range: f64,
    pub magazine: u32,
    /// Reserve ammunition carried at round start.
    pub reserve: u32,
    pub reload_ms: u64,
    /// Field of view while aiming (degrees).
    pub aim_fov_deg: f64,
    /// Per-component jitter scale when firing from the hip.
    pub hip_spread: f64,
}

/// Get the profile for a weapon kind.
pub fn weapon_spec(kind: WeaponKind) -> WeaponSpec {
    match kind {
        WeaponKind::Rifle => WeaponSpec {
            kind,
            damage: RIFLE_DAMAGE,
            fire_period_ms: RIFLE_FIRE_PERIOD_MS,
            range: RIFLE_RANGE,
            magazine: RIFLE_MAGAZINE,
            reserve: RIFLE_RESERVE,
            reload_ms: RIFLE_RELOAD_MS,
            aim_fov_deg: RIFLE_AIM_FOV_DEG,
            hip_spread: RIFLE_HIP_SPREAD,
        },
        WeaponKind::Sniper => WeaponSpec {
            kind,
            damage: SNIPER_DAMAGE,
            fire_period_ms: SNIPER_FIRE_PERIOD_MS,
            range: SNIPER_RANGE,
            magazine: SNIPER_MAGAZINE,
            reserve: SNIPER_RESERVE,
            reload_ms: SNIPER_RELOAD_MS,
            aim_fov_deg: SNIPER_AIM_FOV_DEG,
            hip_spread: SNIPER_HIP_SPREAD,
        },
    }
}
