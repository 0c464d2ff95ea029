//! Spawn & difficulty director.
//!
//! Keeps the roster of active enemies, spawns new ones on a timer, and
//! speeds the timer up as the score grows. Stored on the engine, not in the ECS.

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::*;
use skirmish_core::enums::{EffectKind, Team};
use skirmish_core::events::EffectParams;
use skirmish_core::types::Position;

use skirmish_rules::difficulty::{
    choose_point, jitter, safe_spawn_point, spawn_interval_for_score, spawn_points,
};

use crate::presentation::Outbox;
use crate::world_setup;

#[derive(Debug, Clone)]
pub struct SpawnDirector {
    /// Active enemies by id. Ordered so iteration is deterministic.
    roster: BTreeMap<u32, Entity>,
    spawn_points: [Position; SPAWN_POINT_COUNT],
    spawn_interval_ms: u64,
    score: u32,
    /// Next spawn time; `None` while stopped.
    deadline: Option<u64>,
    game_over: bool,
    max_enemies: usize,
    next_enemy_id: u32,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            roster: BTreeMap::new(),
            spawn_points: spawn_points(),
            spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            score: 0,
            deadline: None,
            game_over: false,
            max_enemies: MAX_ENEMIES,
            next_enemy_id: 0,
        }
    }
}

impl SpawnDirector {
    /// Round reset: score, pacing and roster back to their starting values.
    /// Enemy ids keep counting so they stay unique within the session.
    pub fn reset(&mut self) {
        self.roster.clear();
        self.spawn_interval_ms = BASE_SPAWN_INTERVAL_MS;
        self.score = 0;
        self.deadline = None;
        self.game_over = false;
    }

    /// Start (or restart) the spawn timer from `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.spawn_interval_ms);
    }

    /// Stop the spawn timer. Safe to call when already stopped.
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// True when the timer fired at `now_ms`; the next deadline is then
    /// scheduled one interval later.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = Some(now_ms + self.spawn_interval_ms);
                true
            }
            _ => false,
        }
    }

    /// Score a kill, recompute the interval and restart the timer from the kill.
    pub fn on_enemy_killed(&mut self, now_ms: u64) {
        self.score += SCORE_PER_KILL;
        self.spawn_interval_ms = spawn_interval_for_score(self.score);
        if !self.game_over {
            self.stop();
            self.start(now_ms);
        }
    }

    /// End the round: no more spawns.
    pub fn set_game_over(&mut self) {
        self.game_over = true;
        self.stop();
    }

    /// Spawn one enemy at a jittered random spawn point, unless the roster is
    /// full or the game is over. Returns the new enemy's id.
    pub fn try_spawn(
        &mut self,
        world: &mut World,
        rng: &mut ChaCha8Rng,
        team: Option<Team>,
        out: &mut Outbox,
    ) -> Option<u32> {
        if self.game_over || self.roster.len() >= self.max_enemies {
            return None;
        }

        let point = choose_point(&self.spawn_points, rng)?;
        let position = jitter(point, rng);

        let id = self.next_enemy_id;
        self.next_enemy_id += 1;

        let handle = out.spawn_visual(
            EffectKind::EnemyBody,
            position,
            EffectParams {
                team,
                ..Default::default()
            },
        );
        let entity = world_setup::spawn_enemy(world, id, position, team, handle);
        self.roster.insert(id, entity);
        out.spawn_visual(EffectKind::SpawnEffect, position, EffectParams::default());

        log::debug!(
            "enemy {id} spawned at ({:.1}, {:.1}), {} active",
            position.x,
            position.z,
            self.roster.len()
        );
        Some(id)
    }

    /// Add an already spawned enemy to the roster.
    pub fn register(&mut self, id: u32, entity: Entity) {
        self.roster.insert(id, entity);
        self.next_enemy_id = self.next_enemy_id.max(id + 1);
    }

    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        self.roster.remove(&id)
    }

    pub fn clear_roster(&mut self) {
        self.roster.clear();
    }

    /// A spawn point at least `SAFE_SPAWN_DISTANCE` from every active enemy,
    /// or any spawn point when none qualifies.
    pub fn safe_spawn_point(&self, world: &World, rng: &mut ChaCha8Rng) -> Position {
        let enemies: Vec<Position> = self
            .roster
            .values()
            .filter_map(|&entity| world.get::<&Position>(entity).ok().map(|p| *p))
            .collect();
        safe_spawn_point(&self.spawn_points, &enemies, rng).unwrap_or_default()
    }

    /// Next id `try_spawn` will hand out.
    pub fn next_enemy_id(&self) -> u32 {
        self.next_enemy_id
    }

    pub fn roster_len(&self) -> usize {
        self.roster.len()
    }

    pub fn entity(&self, id: u32) -> Option<Entity> {
        self.roster.get(&id).copied()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.roster.contains_key(&id)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn spawn_interval_ms(&self) -> u64 {
        self.spawn_interval_ms
    }

    pub fn max_enemies(&self) -> usize {
        self.max_enemies
    }

    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }
}
