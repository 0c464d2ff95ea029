//! Entity spawn factories and round cleanup.
//!
//! Creates enemy and grenade entities with their component bundles.

use hecs::{Entity, World};

use skirmish_core::components::*;
use skirmish_core::constants::MAX_HEALTH;
use skirmish_core::enums::{EnemyState, Team};
use skirmish_core::types::{Position, Velocity};

use skirmish_rules::combatant::Vitals;
use skirmish_rules::fsm::patrol_route;

use crate::presentation::Outbox;

/// Spawn an enemy standing at `position`, patrolling the square around it.
pub fn spawn_enemy(
    world: &mut World,
    id: u32,
    position: Position,
    team: Option<Team>,
    handle: VisualHandle,
) -> Entity {
    let brain = EnemyBrain {
        state: EnemyState::Patrol,
        patrol_route: patrol_route(position),
        waypoint_index: 0,
        last_attack_ms: None,
        facing: 0.0,
    };

    world.spawn((
        Enemy { id },
        position,
        Vitals::new(MAX_HEALTH, team),
        brain,
        handle,
    ))
}

/// Spawn a grenade in flight.
pub fn spawn_grenade(
    world: &mut World,
    position: Position,
    velocity: Velocity,
    grenade: Grenade,
    handle: VisualHandle,
) -> Entity {
    world.spawn((grenade, position, velocity, handle))
}

/// Despawn every enemy and grenade, removing their visuals.
pub fn clear_round(world: &mut World, despawn_buffer: &mut Vec<Entity>, out: &mut Outbox) {
    despawn_buffer.clear();

    for (entity, (_enemy, handle)) in world.query_mut::<(&Enemy, &VisualHandle)>() {
        out.remove_visual(*handle);
        despawn_buffer.push(entity);
    }
    for (entity, (_grenade, handle)) in world.query_mut::<(&Grenade, &VisualHandle)>() {
        out.remove_visual(*handle);
        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
