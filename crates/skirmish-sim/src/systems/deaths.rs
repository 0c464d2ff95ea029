//! Death transitions of enemies: roster removal, kill event, fade visual.

use hecs::World;

use skirmish_core::components::{Enemy, VisualHandle};
use skirmish_core::enums::EffectKind;
use skirmish_core::events::{EffectParams, GameEvent};
use skirmish_core::types::Position;

use skirmish_rules::combatant::Vitals;

use crate::director::SpawnDirector;
use crate::presentation::Outbox;

/// Remove every dead enemy. Returns how many died.
pub fn run(world: &mut World, director: &mut SpawnDirector, out: &mut Outbox) -> usize {
    let dead: Vec<(hecs::Entity, u32, Position, VisualHandle)> = world
        .query_mut::<(&Enemy, &Position, &Vitals, &VisualHandle)>()
        .into_iter()
        .filter(|(_, (_, _, vitals, _))| !vitals.is_alive())
        .map(|(entity, (enemy, pos, _, handle))| (entity, enemy.id, *pos, *handle))
        .collect();

    for &(entity, enemy_id, position, handle) in &dead {
        director.remove(enemy_id);
        out.event(GameEvent::EnemyKilled { enemy_id, position });
        // The body fades under its own handle; the scene removes it afterwards.
        out.spawn_visual_with(handle, EffectKind::EnemyFade, position, EffectParams::default());
        let _ = world.despawn(entity);
        log::debug!("enemy {enemy_id} killed");
    }

    dead.len()
}
