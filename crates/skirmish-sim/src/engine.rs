//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the player, the spawn director
//! and the level geometry. It processes player commands, runs all systems and
//! produces `GameStateSnapshot`s. Completely headless, enabling deterministic
//! testing.

use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::SimConfig;
use skirmish_core::constants::{PLAYER_EYE_HEIGHT, SCORE_PER_KILL};
use skirmish_core::enums::{EffectKind, GamePhase, Team, WeaponKind};
use skirmish_core::events::{EffectParams, GameEvent};
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::{Aim, SimTime};

use skirmish_geometry::{default_arena, CollisionQuery};

use crate::director::SpawnDirector;
use crate::player::{start_position, Player};
use crate::presentation::{HudTracker, Outbox};
use crate::systems;
use crate::systems::snapshot::TickOutput;
use crate::world_setup;

/// Height above a kill position where the score popup appears.
const SCORE_POPUP_HEIGHT: f64 = 2.0;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    config: SimConfig,
    rng: ChaCha8Rng,
    geometry: Box<dyn CollisionQuery>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    out: Outbox,
    hud: HudTracker,

    player: Player,
    director: SpawnDirector,

    // --- Session ---
    selected_team: Option<Team>,
    selected_weapon: WeaponKind,
    respawn_deadline: Option<u64>,
}

impl SimulationEngine {
    /// Create an engine over the default arena.
    pub fn new(config: SimConfig) -> Self {
        Self::with_geometry(config, default_arena())
    }

    /// Create an engine over custom level geometry.
    pub fn with_geometry(config: SimConfig, geometry: impl CollisionQuery + 'static) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            geometry: Box::new(geometry),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            out: Outbox::default(),
            hud: HudTracker::default(),
            player: Player::new(None, WeaponKind::default()),
            director: SpawnDirector::default(),
            selected_team: None,
            selected_weapon: WeaponKind::default(),
            respawn_deadline: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one configured tick and return the snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.tick_with_delta(self.config.tick_ms)
    }

    /// Advance the simulation by `delta_ms` and return the resulting snapshot.
    pub fn tick_with_delta(&mut self, delta_ms: u64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(delta_ms);
            self.time.advance(delta_ms);
        }

        let hud = self
            .hud
            .collect(self.player.vitals.health(), self.player.ammo(), self.director.score());
        let output = TickOutput {
            events: std::mem::take(&mut self.out.events),
            audio_events: std::mem::take(&mut self.out.audio),
            visuals: std::mem::take(&mut self.out.visuals),
            hud,
        };
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.player,
            &self.director,
            self.respawn_deadline,
            output,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn director(&self) -> &SpawnDirector {
        &self.director
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn respawn_deadline(&self) -> Option<u64> {
        self.respawn_deadline
    }

    /// Team assigned to newly spawned enemies.
    pub fn enemy_team(&self) -> Option<Team> {
        self.player.team().map(Team::opponent)
    }

    /// Spawn an enemy at a fixed position and add it to the roster.
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        position: skirmish_core::types::Position,
        team: Option<Team>,
    ) -> u32 {
        let id = self.director.next_enemy_id();
        let handle = self.out.allocate_handle();
        let entity = world_setup::spawn_enemy(&mut self.world, id, position, team, handle);
        self.director.register(id, entity);
        id
    }

    /// Current vitals of a rostered enemy.
    #[cfg(test)]
    pub fn enemy_vitals(&self, id: u32) -> Option<skirmish_rules::combatant::Vitals> {
        let entity = self.director.entity(id)?;
        self.world
            .get::<&skirmish_rules::combatant::Vitals>(entity)
            .ok()
            .map(|v| *v)
    }

    /// Damage a rostered enemy directly, bypassing weapons.
    #[cfg(test)]
    pub fn damage_test_enemy(&mut self, id: u32, amount: u32) {
        if let Some(entity) = self.director.entity(id) {
            if let Ok(mut vitals) = self
                .world
                .get::<&mut skirmish_rules::combatant::Vitals>(entity)
            {
                vitals.apply_damage(amount, None);
            }
        }
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn director_mut(&mut self) -> &mut SpawnDirector {
        &mut self.director
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRound { team, weapon } => {
                if matches!(self.phase, GamePhase::MainMenu | GamePhase::GameOver) {
                    self.selected_team = team;
                    self.selected_weapon = weapon;
                    self.start_round();
                }
            }
            PlayerCommand::Restart => {
                if matches!(
                    self.phase,
                    GamePhase::Active | GamePhase::Paused | GamePhase::GameOver
                ) {
                    self.start_round();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                if self.phase != GamePhase::MainMenu {
                    self.director.stop();
                    self.director.clear_roster();
                    world_setup::clear_round(
                        &mut self.world,
                        &mut self.despawn_buffer,
                        &mut self.out,
                    );
                    self.respawn_deadline = None;
                    self.phase = GamePhase::MainMenu;
                    log::info!("returned to menu");
                }
            }
            action => {
                if self.phase == GamePhase::Active {
                    self.handle_action(action);
                }
            }
        }
    }

    /// Handle an in-round player action.
    fn handle_action(&mut self, action: PlayerCommand) {
        let now = self.time.now_ms;
        match action {
            PlayerCommand::Move { x, z } => {
                self.player.move_intent = (x, z);
            }
            PlayerCommand::Look { yaw, pitch } => {
                self.player.aim = Aim::new(yaw, pitch.clamp(-FRAC_PI_2, FRAC_PI_2));
            }
            PlayerCommand::Jump => systems::player_movement::jump(&mut self.player),
            PlayerCommand::Fire => {
                systems::weapons::fire(
                    &mut self.world,
                    &mut self.player,
                    self.geometry.as_ref(),
                    &mut self.rng,
                    now,
                    &mut self.out,
                );
            }
            PlayerCommand::Reload => {
                systems::weapons::reload(&mut self.player, now, &mut self.out);
            }
            PlayerCommand::SwitchWeapon { kind } => {
                systems::weapons::switch(&mut self.player, kind, &mut self.out);
            }
            PlayerCommand::Aim { active } => {
                systems::weapons::set_aiming(&mut self.player, active);
            }
            PlayerCommand::ThrowGrenade => {
                systems::weapons::throw_grenade(&mut self.world, &self.player, now, &mut self.out);
            }
            PlayerCommand::StartRound { .. }
            | PlayerCommand::Restart
            | PlayerCommand::Pause
            | PlayerCommand::Resume
            | PlayerCommand::ReturnToMenu => {}
        }
    }

    /// Reset everything for a fresh round with the current selection.
    fn start_round(&mut self) {
        world_setup::clear_round(&mut self.world, &mut self.despawn_buffer, &mut self.out);
        self.director.reset();
        self.time = SimTime::default();
        self.respawn_deadline = None;

        self.player.vitals.set_team(self.selected_team);
        self.player.loadout.active = self.selected_weapon;
        self.player.revive_at(start_position());
        self.player.aim = Aim::default();

        self.director.start(self.time.now_ms);
        self.phase = GamePhase::Active;
        log::info!(
            "round started: team {:?}, weapon {:?}",
            self.selected_team,
            self.selected_weapon
        );
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta_ms: u64) {
        let now = self.time.now_ms;
        let dt_secs = delta_ms as f64 / 1000.0;

        // 1. Reload completion
        systems::weapons::poll_reloads(&mut self.player, now, &mut self.out);
        // 2. Player movement
        systems::player_movement::run(&mut self.player, self.geometry.as_ref(), dt_secs);
        // 3. Grenade flight and detonation
        systems::grenades::run(
            &mut self.world,
            self.geometry.as_ref(),
            now,
            dt_secs,
            &mut self.despawn_buffer,
            &mut self.out,
        );
        // 4. Enemy AI
        systems::enemy_ai::run(
            &mut self.world,
            &mut self.player,
            self.geometry.as_ref(),
            now,
            &mut self.out,
        );
        // 5. Deaths (roster removal before any spawn check)
        systems::deaths::run(&mut self.world, &mut self.director, &mut self.out);
        // 6. Director and session consume this tick's events
        self.consume_events(now);
        // 7. Player respawn
        self.poll_respawn(now);
        // 8. Spawn timer
        if self.director.poll(now) {
            let team = self.enemy_team();
            self.director
                .try_spawn(&mut self.world, &mut self.rng, team, &mut self.out);
        }
    }

    fn consume_events(&mut self, now: u64) {
        let events = self.out.events.clone();
        for event in events {
            match event {
                GameEvent::EnemyKilled { position, .. } => {
                    self.director.on_enemy_killed(now);
                    self.out.spawn_visual(
                        EffectKind::ScorePopup,
                        position.raised(SCORE_POPUP_HEIGHT),
                        EffectParams {
                            amount: Some(SCORE_PER_KILL),
                            ..Default::default()
                        },
                    );
                }
                GameEvent::PlayerDied => self.on_player_died(now),
                GameEvent::PlayerRespawned { .. } => {}
            }
        }
    }

    fn on_player_died(&mut self, now: u64) {
        if self.config.respawn_on_death {
            self.respawn_deadline = Some(now + self.config.respawn_delay_ms);
            log::info!(
                "player died, respawning in {} ms",
                self.config.respawn_delay_ms
            );
        } else {
            self.phase = GamePhase::GameOver;
            self.director.set_game_over();
            log::info!("game over, final score {}", self.director.score());
        }
    }

    fn poll_respawn(&mut self, now: u64) {
        let Some(deadline) = self.respawn_deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        let position = self
            .director
            .safe_spawn_point(&self.world, &mut self.rng)
            .raised(PLAYER_EYE_HEIGHT);
        self.player.revive_at(position);
        self.respawn_deadline = None;
        self.out.event(GameEvent::PlayerRespawned { position });
        log::info!(
            "player respawned at ({:.1}, {:.1})",
            position.x,
            position.z
        );
    }
}
