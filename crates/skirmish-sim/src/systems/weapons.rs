//! Weapon system: trigger pulls, hit resolution, reloads, switching, aiming
//! and grenade throws. Called from command handling and once per tick for
//! reload polling.

use glam::DVec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Enemy, Grenade};
use skirmish_core::constants::*;
use skirmish_core::enums::{EffectKind, Team, WeaponKind};
use skirmish_core::events::{AudioCue, EffectParams};
use skirmish_core::types::{Position, Velocity};

use skirmish_geometry::{Aabb, CollisionQuery};
use skirmish_rules::combatant::{DamageOutcome, Vitals};
use skirmish_rules::profiles::weapon_spec;
use skirmish_rules::weapon::{
    active_weapon_mut, damage_for, grenade_launch_velocity, poll_reload, pull_trigger,
    shot_direction, start_reload, switch_weapon, weapon_mut, FireOutcome,
};

use crate::player::Player;
use crate::presentation::Outbox;
use crate::world_setup;

/// Distance in front of the eye where muzzle effects appear.
const MUZZLE_OFFSET: f64 = 0.5;

/// Hit box of an enemy standing at `feet`.
pub fn enemy_body(feet: &Position) -> Aabb {
    let [hx, hy, hz] = ENEMY_BODY_HALF_EXTENTS;
    let center = DVec3::from(feet.raised(ENEMY_BODY_CENTER_HEIGHT));
    let half = DVec3::new(hx, hy, hz);
    Aabb::new(center - half, center + half)
}

/// What a shot ray hit first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotHit {
    Nothing,
    Wall { distance: f64 },
    Enemy { entity: Entity, distance: f64 },
}

/// Nearest hit along a ray among static geometry and living enemy bodies.
pub fn resolve_shot(
    world: &World,
    geometry: &dyn CollisionQuery,
    origin: DVec3,
    direction: DVec3,
    range: f64,
) -> ShotHit {
    let mut hit = match geometry.cast_ray(origin, direction, range) {
        Some(distance) => ShotHit::Wall { distance },
        None => ShotHit::Nothing,
    };
    let mut nearest = match hit {
        ShotHit::Wall { distance } => distance,
        _ => range,
    };

    let mut query = world.query::<(&Enemy, &Position, &Vitals)>();
    for (entity, (_enemy, pos, vitals)) in query.iter() {
        if !vitals.is_alive() {
            continue;
        }
        if let Some(distance) = enemy_body(pos).ray_distance(origin, direction, nearest) {
            if distance < nearest || matches!(hit, ShotHit::Nothing) {
                nearest = distance;
                hit = ShotHit::Enemy { entity, distance };
            }
        }
    }

    hit
}

/// Pull the trigger of the active weapon.
pub fn fire(
    world: &mut World,
    player: &mut Player,
    geometry: &dyn CollisionQuery,
    rng: &mut ChaCha8Rng,
    now_ms: u64,
    out: &mut Outbox,
) {
    if !player.vitals.is_alive() {
        return;
    }

    let kind = player.loadout.active;
    let reload_started = match pull_trigger(active_weapon_mut(&mut player.loadout), now_ms) {
        FireOutcome::Fired { reload_started } => reload_started,
        FireOutcome::Empty => {
            out.audio(AudioCue::Empty { weapon: kind });
            return;
        }
        FireOutcome::Reloading | FireOutcome::CoolingDown => return,
    };
    out.audio(AudioCue::Shot { weapon: kind });

    let origin = DVec3::from(player.position);
    let direction = shot_direction(kind, player.aim.forward(), player.aiming, rng);
    let range = weapon_spec(kind).range;
    let hit = resolve_shot(world, geometry, origin, direction, range);

    let muzzle = Position::from(origin + direction * MUZZLE_OFFSET);
    out.spawn_visual(EffectKind::MuzzleFlash, muzzle, EffectParams::default());

    let travelled = match hit {
        ShotHit::Nothing => range,
        ShotHit::Wall { distance } | ShotHit::Enemy { distance, .. } => distance,
    };
    let impact = Position::from(origin + direction * travelled);
    out.spawn_visual(
        EffectKind::Tracer,
        muzzle,
        EffectParams {
            target: Some(impact),
            ..Default::default()
        },
    );

    if let ShotHit::Enemy { entity, .. } = hit {
        let damage = damage_for(kind, player.aiming);
        damage_enemy(world, entity, damage, player.team(), impact, out);
    }

    if reload_started {
        log::debug!("{kind:?} emptied, reloading");
        out.audio(AudioCue::ReloadStarted { weapon: kind });
    }
}

/// Apply player-caused damage to an enemy, with hit feedback. Friendly fire
/// and already dead enemies are ignored silently.
pub fn damage_enemy(
    world: &mut World,
    entity: Entity,
    damage: u32,
    source_team: Option<Team>,
    impact: Position,
    out: &mut Outbox,
) -> DamageOutcome {
    let Ok(mut vitals) = world.get::<&mut Vitals>(entity) else {
        return DamageOutcome::Ignored;
    };

    let outcome = vitals.apply_damage(damage, source_team);
    if outcome != DamageOutcome::Ignored {
        out.audio(AudioCue::HitConfirmed);
        out.spawn_visual(EffectKind::HitMarker, impact, EffectParams::default());
        out.spawn_visual(
            EffectKind::DamageNumber,
            impact,
            EffectParams {
                amount: Some(damage),
                ..Default::default()
            },
        );
    }
    outcome
}

/// Manual reload of the active weapon.
pub fn reload(player: &mut Player, now_ms: u64, out: &mut Outbox) {
    if !player.vitals.is_alive() {
        return;
    }
    let kind = player.loadout.active;
    if start_reload(active_weapon_mut(&mut player.loadout), now_ms) {
        log::debug!("{kind:?} reload started");
        out.audio(AudioCue::ReloadStarted { weapon: kind });
    }
}

/// Finish any reload that is due.
pub fn poll_reloads(player: &mut Player, now_ms: u64, out: &mut Outbox) {
    for kind in [WeaponKind::Rifle, WeaponKind::Sniper] {
        if let Some(moved) = poll_reload(weapon_mut(&mut player.loadout, kind), now_ms) {
            log::debug!("{kind:?} reloaded {moved} rounds");
            out.audio(AudioCue::ReloadFinished { weapon: kind });
        }
    }
}

/// Switch the weapon in hand. Switching cancels aiming.
pub fn switch(player: &mut Player, kind: WeaponKind, out: &mut Outbox) {
    if !player.vitals.is_alive() {
        return;
    }
    if switch_weapon(&mut player.loadout, kind) {
        log::debug!("switched to {kind:?}");
        player.aiming = false;
    } else {
        out.audio(AudioCue::SwitchRejected { requested: kind });
    }
}

pub fn set_aiming(player: &mut Player, active: bool) {
    if player.vitals.is_alive() {
        player.aiming = active;
    }
}

/// Throw a grenade from the eye along the aim.
pub fn throw_grenade(world: &mut World, player: &Player, now_ms: u64, out: &mut Outbox) {
    if !player.vitals.is_alive() {
        return;
    }

    let velocity = grenade_launch_velocity(player.aim.forward());
    let handle = out.spawn_visual(EffectKind::Grenade, player.position, EffectParams::default());
    world_setup::spawn_grenade(
        world,
        player.position,
        Velocity::from(velocity),
        Grenade {
            thrower_team: player.team(),
            fuse_deadline_ms: now_ms + GRENADE_FUSE_MS,
        },
        handle,
    );
}
