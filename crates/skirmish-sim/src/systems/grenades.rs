//! Grenade flight and detonation.

use glam::DVec3;
use hecs::{Entity, World};

use skirmish_core::components::{Enemy, Grenade, VisualHandle};
use skirmish_core::constants::*;
use skirmish_core::enums::{EffectKind, Team};
use skirmish_core::events::EffectParams;
use skirmish_core::types::{Position, Velocity};

use skirmish_geometry::CollisionQuery;
use skirmish_rules::combatant::Vitals;
use skirmish_rules::weapon::blast_damage;

use crate::presentation::Outbox;
use crate::systems::weapons::damage_enemy;

/// Integrate grenades under gravity and detonate those that touched the
/// ground, hit geometry ahead of them or ran out of fuse.
pub fn run(
    world: &mut World,
    geometry: &dyn CollisionQuery,
    now_ms: u64,
    dt_secs: f64,
    despawn_buffer: &mut Vec<Entity>,
    out: &mut Outbox,
) {
    despawn_buffer.clear();
    let mut blasts: Vec<(Position, Option<Team>)> = Vec::new();

    for (entity, (grenade, pos, vel, handle)) in
        world.query_mut::<(&Grenade, &mut Position, &mut Velocity, &VisualHandle)>()
    {
        vel.y -= GRENADE_GRAVITY * dt_secs;
        pos.x += vel.x * dt_secs;
        pos.y += vel.y * dt_secs;
        pos.z += vel.z * dt_secs;

        let detonate = pos.y <= GRENADE_GROUND_HEIGHT
            || geometry.is_move_blocked(DVec3::from(*pos), DVec3::from(*vel), GRENADE_RADIUS)
            || now_ms >= grenade.fuse_deadline_ms;
        if detonate {
            blasts.push((*pos, grenade.thrower_team));
            out.remove_visual(*handle);
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for (center, team) in blasts {
        detonate(world, center, team, out);
    }
}

/// Explosion at `center`: damage falls off linearly with distance to each
/// enemy's body centre.
pub fn detonate(world: &mut World, center: Position, team: Option<Team>, out: &mut Outbox) {
    out.spawn_visual(EffectKind::Explosion, center, EffectParams::default());

    let victims: Vec<(Entity, Position, u32)> = world
        .query::<(&Enemy, &Position, &Vitals)>()
        .iter()
        .filter(|(_, (_, _, vitals))| vitals.is_alive())
        .filter_map(|(entity, (_, pos, _))| {
            let body = pos.raised(ENEMY_BODY_CENTER_HEIGHT);
            let damage = blast_damage(center.range_to(&body));
            (damage > 0).then_some((entity, body, damage))
        })
        .collect();

    for (entity, body, damage) in victims {
        damage_enemy(world, entity, damage, team, body, out);
    }
}
