//! Weapon state machine (Ready <-> Reloading), damage and spread rules.
//!
//! Everything here mutates plain [`WeaponState`]/[`Loadout`] data and reports
//! what happened; hit resolution and feedback are left to the simulation.

use glam::DVec3;
use rand::Rng;

use skirmish_core::components::{Loadout, WeaponPhase, WeaponState};
use skirmish_core::constants::*;
use skirmish_core::enums::WeaponKind;

use crate::profiles::weapon_spec;

/// Result of pulling the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// A round left the barrel. `reload_started` is set when the shot emptied
    /// the magazine and an automatic reload began.
    Fired { reload_started: bool },
    /// Magazine empty; nothing changed.
    Empty,
    Reloading,
    /// Fire period not yet elapsed since the last shot.
    CoolingDown,
}

/// A weapon of `kind` with a full magazine and full reserve.
pub fn full_weapon(kind: WeaponKind) -> WeaponState {
    let spec = weapon_spec(kind);
    WeaponState {
        kind,
        ammo_in_magazine: spec.magazine,
        ammo_reserve: spec.reserve,
        phase: WeaponPhase::Ready,
        last_shot_ms: None,
    }
}

/// Both weapons fully loaded with `active` in hand.
pub fn full_loadout(active: WeaponKind) -> Loadout {
    Loadout {
        active,
        rifle: full_weapon(WeaponKind::Rifle),
        sniper: full_weapon(WeaponKind::Sniper),
    }
}

pub fn weapon(loadout: &Loadout, kind: WeaponKind) -> &WeaponState {
    match kind {
        WeaponKind::Rifle => &loadout.rifle,
        WeaponKind::Sniper => &loadout.sniper,
    }
}

pub fn weapon_mut(loadout: &mut Loadout, kind: WeaponKind) -> &mut WeaponState {
    match kind {
        WeaponKind::Rifle => &mut loadout.rifle,
        WeaponKind::Sniper => &mut loadout.sniper,
    }
}

pub fn active_weapon(loadout: &Loadout) -> &WeaponState {
    weapon(loadout, loadout.active)
}

pub fn active_weapon_mut(loadout: &mut Loadout) -> &mut WeaponState {
    weapon_mut(loadout, loadout.active)
}

pub fn is_reloading(state: &WeaponState) -> bool {
    matches!(state.phase, WeaponPhase::Reloading { .. })
}

/// Consume a round if the weapon can fire at `now_ms`.
pub fn pull_trigger(state: &mut WeaponState, now_ms: u64) -> FireOutcome {
    if is_reloading(state) {
        return FireOutcome::Reloading;
    }

    let spec = weapon_spec(state.kind);
    if let Some(last) = state.last_shot_ms {
        if now_ms.saturating_sub(last) < spec.fire_period_ms {
            return FireOutcome::CoolingDown;
        }
    }

    if state.ammo_in_magazine == 0 {
        return FireOutcome::Empty;
    }

    state.ammo_in_magazine -= 1;
    state.last_shot_ms = Some(now_ms);

    let reload_started = state.ammo_in_magazine == 0 && start_reload(state, now_ms);
    FireOutcome::Fired { reload_started }
}

/// Begin a reload. Returns false (and changes nothing) when already
/// reloading, out of reserve, or the magazine is full.
pub fn start_reload(state: &mut WeaponState, now_ms: u64) -> bool {
    let spec = weapon_spec(state.kind);
    if is_reloading(state) || state.ammo_reserve == 0 || state.ammo_in_magazine >= spec.magazine {
        return false;
    }
    state.phase = WeaponPhase::Reloading {
        until_ms: now_ms + spec.reload_ms,
    };
    true
}

/// Finish a due reload. Returns the number of rounds moved into the magazine.
pub fn poll_reload(state: &mut WeaponState, now_ms: u64) -> Option<u32> {
    let WeaponPhase::Reloading { until_ms } = state.phase else {
        return None;
    };
    if now_ms < until_ms {
        return None;
    }

    let spec = weapon_spec(state.kind);
    let needed = spec.magazine.saturating_sub(state.ammo_in_magazine);
    let moved = needed.min(state.ammo_reserve);
    state.ammo_in_magazine += moved;
    state.ammo_reserve -= moved;
    state.phase = WeaponPhase::Ready;
    Some(moved)
}

/// Make `kind` the active weapon. Rejected while the active weapon reloads
/// or when `kind` is already in hand.
pub fn switch_weapon(loadout: &mut Loadout, kind: WeaponKind) -> bool {
    if loadout.active == kind || is_reloading(active_weapon(loadout)) {
        return false;
    }
    loadout.active = kind;
    true
}

/// Damage of one hit. Aimed sniper shots deal extra damage.
pub fn damage_for(kind: WeaponKind, aiming: bool) -> u32 {
    let base = weapon_spec(kind).damage;
    if kind == WeaponKind::Sniper && aiming {
        (base as f64 * SNIPER_AIMED_MULTIPLIER).round() as u32
    } else {
        base
    }
}

/// Reported camera field of view.
pub fn fov_for(kind: WeaponKind, aiming: bool) -> f64 {
    if aiming {
        weapon_spec(kind).aim_fov_deg
    } else {
        DEFAULT_FOV_DEG
    }
}

/// Jitter each component of `direction` by `(u - 0.5) * scale` and renormalize.
pub fn apply_spread<R: Rng>(direction: DVec3, scale: f64, rng: &mut R) -> DVec3 {
    let jitter = DVec3::new(
        (rng.gen::<f64>() - 0.5) * scale,
        (rng.gen::<f64>() - 0.5) * scale,
        (rng.gen::<f64>() - 0.5) * scale,
    );
    (direction + jitter).try_normalize().unwrap_or(direction)
}

/// Firing direction for a shot: spread only applies from the hip.
pub fn shot_direction<R: Rng>(kind: WeaponKind, aim: DVec3, aiming: bool, rng: &mut R) -> DVec3 {
    if aiming {
        aim
    } else {
        apply_spread(aim, weapon_spec(kind).hip_spread, rng)
    }
}

/// Initial grenade velocity for a throw along `aim`.
pub fn grenade_launch_velocity(aim: DVec3) -> DVec3 {
    let lifted = aim + DVec3::new(0.0, GRENADE_ARC_LIFT, 0.0);
    lifted.try_normalize().unwrap_or(DVec3::Y) * GRENADE_SPEED
}

/// Blast damage at `distance` from a detonation; zero at or beyond the radius.
pub fn blast_damage(distance: f64) -> u32 {
    if distance >= GRENADE_BLAST_RADIUS {
        return 0;
    }
    (GRENADE_MAX_DAMAGE * (1.0 - distance / GRENADE_BLAST_RADIUS)).floor() as u32
}
