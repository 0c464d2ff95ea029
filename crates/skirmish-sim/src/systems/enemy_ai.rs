//! Enemy AI system: runs the FSM for every living enemy and applies the
//! decisions. Moves are checked against the collision query first.

use glam::DVec3;
use hecs::World;

use skirmish_core::components::{Enemy, EnemyBrain};
use skirmish_core::constants::*;
use skirmish_core::enums::{EffectKind, Team};
use skirmish_core::events::{AudioCue, EffectParams, GameEvent};
use skirmish_core::types::Position;

use skirmish_geometry::CollisionQuery;
use skirmish_rules::combatant::{Combatant, DamageOutcome, Vitals};
use skirmish_rules::fsm::{evaluate, EnemyAction, EnemyContext};

use crate::player::Player;
use crate::presentation::Outbox;

pub fn run(
    world: &mut World,
    player: &mut Player,
    geometry: &dyn CollisionQuery,
    now_ms: u64,
    out: &mut Outbox,
) {
    let player_position = player.position;
    // Attacks are applied after the query so the player is not borrowed inside it.
    let mut attacks: Vec<(Position, Option<Team>)> = Vec::new();

    for (_entity, (enemy, pos, vitals, brain)) in
        world.query_mut::<(&Enemy, &mut Position, &Vitals, &mut EnemyBrain)>()
    {
        if !vitals.is_alive() {
            continue;
        }

        let decision = evaluate(&EnemyContext {
            brain: &*brain,
            position: *pos,
            player_position,
            now_ms,
        });

        if decision.state_changed {
            log::debug!(
                "enemy {} {:?} -> {:?}",
                enemy.id,
                brain.state,
                decision.new_state
            );
        }
        brain.state = decision.new_state;

        match decision.action {
            EnemyAction::Hold => {}
            EnemyAction::NextWaypoint { index } => brain.waypoint_index = index,
            EnemyAction::Move {
                to,
                direction,
                facing,
            } => {
                let center = DVec3::from(pos.raised(ENEMY_BODY_CENTER_HEIGHT));
                if !geometry.is_blocked(center, direction, ENEMY_WALL_LOOKAHEAD) {
                    *pos = to;
                    brain.facing = facing;
                }
            }
            EnemyAction::Attack => {
                brain.last_attack_ms = Some(now_ms);
                attacks.push((pos.raised(ENEMY_BODY_CENTER_HEIGHT), vitals.team()));
            }
        }
    }

    for (muzzle, team) in attacks {
        out.spawn_visual(
            EffectKind::EnemyProjectile,
            muzzle,
            EffectParams {
                target: Some(player_position),
                ..Default::default()
            },
        );

        match player.take_damage(ENEMY_ATTACK_DAMAGE, team) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Damaged { .. } => out.audio(AudioCue::PlayerHurt),
            DamageOutcome::Killed => {
                out.audio(AudioCue::PlayerHurt);
                out.event(GameEvent::PlayerDied);
            }
        }
    }
}
