//! Snapshot system: queries the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_core::components::*;
use skirmish_core::enums::GamePhase;
use skirmish_core::events::{AudioCue, GameEvent, HudReport, VisualCommand};
use skirmish_core::state::*;
use skirmish_core::types::{Position, SimTime};

use skirmish_rules::combatant::Vitals;
use skirmish_rules::weapon::{active_weapon, fov_for, is_reloading};

use crate::director::SpawnDirector;
use crate::player::Player;

/// Output collected during the tick.
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub audio_events: Vec<AudioCue>,
    pub visuals: Vec<VisualCommand>,
    pub hud: Vec<HudReport>,
}

/// Build a complete GameStateSnapshot from the current state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    player: &Player,
    director: &SpawnDirector,
    respawn_deadline: Option<u64>,
    output: TickOutput,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        score: director.score(),
        spawn_interval_ms: director.spawn_interval_ms(),
        max_enemies: director.max_enemies(),
        player: build_player(player, time, respawn_deadline),
        enemies: build_enemies(world),
        grenades: build_grenades(world),
        events: output.events,
        audio_events: output.audio_events,
        visuals: output.visuals,
        hud: output.hud,
    }
}

fn build_player(player: &Player, time: &SimTime, respawn_deadline: Option<u64>) -> PlayerView {
    let weapon = active_weapon(&player.loadout);
    PlayerView {
        position: player.position,
        velocity: player.velocity,
        aim: player.aim,
        team: player.team(),
        health: player.vitals.health(),
        max_health: player.vitals.max_health(),
        alive: player.vitals.is_alive(),
        active_weapon: weapon.kind,
        ammo_in_magazine: weapon.ammo_in_magazine,
        ammo_reserve: weapon.ammo_reserve,
        reloading: is_reloading(weapon),
        aiming: player.aiming,
        fov_deg: fov_for(weapon.kind, player.aiming),
        respawn_in_ms: respawn_deadline.map(|d| d.saturating_sub(time.now_ms)),
    }
}

/// Living enemies ordered by id.
fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Vitals, &EnemyBrain, &VisualHandle)>()
        .iter()
        .map(|(_, (enemy, pos, vitals, brain, handle))| EnemyView {
            enemy_id: enemy.id,
            handle: *handle,
            position: *pos,
            state: brain.state,
            health: vitals.health(),
            team: vitals.team(),
            facing: brain.facing,
        })
        .collect();
    enemies.sort_by_key(|e| e.enemy_id);
    enemies
}

fn build_grenades(world: &World) -> Vec<GrenadeView> {
    let mut grenades: Vec<GrenadeView> = world
        .query::<(&Grenade, &Position, &VisualHandle)>()
        .iter()
        .map(|(_, (_, pos, handle))| GrenadeView {
            handle: *handle,
            position: *pos,
        })
        .collect();
    grenades.sort_by_key(|g| g.handle);
    grenades
}
