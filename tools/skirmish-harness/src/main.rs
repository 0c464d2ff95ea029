//! skirmish-harness: headless runner for the skirmish simulation.
//!
//! Drives a scripted bot through the engine and prints a JSON summary.
//!
//! Usage:
//!   skirmish-harness run --seed 7 --ticks 3600 --team blue --weapon sniper
//!   RUST_LOG=debug skirmish-harness run --config sim.json

use std::path::PathBuf;
use std::process;

use serde::Serialize;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::{ConfigError, SimConfig};
use skirmish_core::constants::ENEMY_BODY_CENTER_HEIGHT;
use skirmish_core::enums::{EffectKind, GamePhase, Team, WeaponKind};
use skirmish_core::events::{AudioCue, GameEvent, VisualCommand};
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::Aim;
use skirmish_sim::SimulationEngine;

/// Default run length: one minute at 60 Hz.
const DEFAULT_TICKS: u64 = 3600;

/// Ticks between two grenade throws.
const GRENADE_PERIOD_TICKS: u64 = 300;

/// Grenades are only thrown at enemies closer than this.
const GRENADE_THROW_RANGE: f64 = 12.0;

#[derive(Debug, thiserror::Error)]
enum HarnessError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid value for {flag}: {value}")]
    BadValue { flag: &'static str, value: String },
    #[error("could not encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug)]
struct RunOptions {
    seed: Option<u64>,
    ticks: u64,
    config: Option<PathBuf>,
    team: Option<Team>,
    weapon: WeaponKind,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    final_phase: GamePhase,
    score: u32,
    kills: u32,
    deaths: u32,
    shots_fired: u32,
    grenades_thrown: u32,
    final_spawn_interval_ms: u64,
    enemies_alive: usize,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => {
            if let Err(e) = cmd_run(&args[2..]) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish-harness: headless skirmish runner\n\
         \n\
         Commands:\n\
         \n\
         run       Play one round with a scripted bot and print a JSON summary\n\
         \n\
           --seed <N>            RNG seed (overrides the config file)\n\
           --ticks <N>           Number of ticks to run (default: 3600)\n\
           --config <path>       SimConfig JSON file\n\
           --team <blue|red>     Player team (default: none, no friendly fire)\n\
           --weapon <rifle|sniper> Starting weapon (default: rifle)\n\
         \n\
         Examples:\n\
         \n\
           skirmish-harness run --seed 7 --ticks 7200 --team blue\n\
           RUST_LOG=debug skirmish-harness run --weapon sniper\n"
    );
}

fn parse_args(args: &[String]) -> Result<RunOptions, HarnessError> {
    let mut options = RunOptions {
        seed: None,
        ticks: DEFAULT_TICKS,
        config: None,
        team: None,
        weapon: WeaponKind::Rifle,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = |name: &'static str| {
            iter.next()
                .cloned()
                .ok_or_else(|| HarnessError::BadValue {
                    flag: name,
                    value: String::new(),
                })
        };
        match flag.as_str() {
            "--seed" => {
                let v = value("--seed")?;
                options.seed = Some(v.parse().map_err(|_| HarnessError::BadValue {
                    flag: "--seed",
                    value: v,
                })?);
            }
            "--ticks" => {
                let v = value("--ticks")?;
                options.ticks = v.parse().map_err(|_| HarnessError::BadValue {
                    flag: "--ticks",
                    value: v,
                })?;
            }
            "--config" => options.config = Some(PathBuf::from(value("--config")?)),
            "--team" => {
                let v = value("--team")?;
                options.team = Some(match v.as_str() {
                    "blue" => Team::Blue,
                    "red" => Team::Red,
                    _ => {
                        return Err(HarnessError::BadValue {
                            flag: "--team",
                            value: v,
                        })
                    }
                });
            }
            "--weapon" => {
                let v = value("--weapon")?;
                options.weapon = match v.as_str() {
                    "rifle" => WeaponKind::Rifle,
                    "sniper" => WeaponKind::Sniper,
                    _ => {
                        return Err(HarnessError::BadValue {
                            flag: "--weapon",
                            value: v,
                        })
                    }
                };
            }
            other => return Err(HarnessError::UnknownArg(other.to_string())),
        }
    }

    Ok(options)
}

fn load_config(options: &RunOptions) -> Result<SimConfig, HarnessError> {
    let mut config = match &options.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
            SimConfig::from_json(&text)?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    Ok(config)
}

// --- Run command ---

fn cmd_run(args: &[String]) -> Result<(), HarnessError> {
    let options = parse_args(args)?;
    let config = load_config(&options)?;
    let seed = config.seed;

    log::info!(
        "running {} ticks, seed {seed}, team {:?}, weapon {:?}",
        options.ticks,
        options.team,
        options.weapon
    );

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartRound {
        team: options.team,
        weapon: options.weapon,
    });

    let mut bot = Bot::default();
    let mut snapshot = engine.tick();
    let mut ticks = 1;

    while ticks < options.ticks && snapshot.phase == GamePhase::Active {
        engine.queue_commands(bot.decide(&snapshot, ticks));
        snapshot = engine.tick();
        bot.observe(&snapshot);
        ticks += 1;
    }

    let summary = RunSummary {
        seed,
        ticks,
        final_phase: snapshot.phase,
        score: snapshot.score,
        kills: bot.kills,
        deaths: bot.deaths,
        shots_fired: bot.shots_fired,
        grenades_thrown: bot.grenades_thrown,
        final_spawn_interval_ms: snapshot.spawn_interval_ms,
        enemies_alive: snapshot.enemies.len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Scripted player: turns toward the nearest enemy, aims and fires, reloads
/// when dry and lobs a grenade now and then.
#[derive(Debug, Default)]
struct Bot {
    kills: u32,
    deaths: u32,
    shots_fired: u32,
    grenades_thrown: u32,
    last_grenade_tick: u64,
}

impl Bot {
    fn decide(&mut self, snapshot: &GameStateSnapshot, tick: u64) -> Vec<PlayerCommand> {
        let player = &snapshot.player;
        if !player.alive {
            return Vec::new();
        }

        let nearest = snapshot
            .enemies
            .iter()
            .map(|e| {
                let body = e.position.raised(ENEMY_BODY_CENTER_HEIGHT);
                (player.position.range_to(&body), body)
            })
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let Some((distance, target)) = nearest else {
            return vec![PlayerCommand::Aim { active: false }];
        };

        let aim = Aim::looking_at(&player.position, &target);
        let mut commands = vec![
            PlayerCommand::Look {
                yaw: aim.yaw,
                pitch: aim.pitch,
            },
            PlayerCommand::Aim { active: true },
        ];

        if player.ammo_in_magazine == 0 && player.ammo_reserve == 0 {
            let other = match player.active_weapon {
                WeaponKind::Rifle => WeaponKind::Sniper,
                WeaponKind::Sniper => WeaponKind::Rifle,
            };
            commands.push(PlayerCommand::SwitchWeapon { kind: other });
        } else if !player.reloading {
            commands.push(PlayerCommand::Fire);
        }

        if distance < GRENADE_THROW_RANGE && tick - self.last_grenade_tick >= GRENADE_PERIOD_TICKS {
            self.last_grenade_tick = tick;
            commands.push(PlayerCommand::ThrowGrenade);
        }

        commands
    }

    fn observe(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::PlayerDied => self.deaths += 1,
                GameEvent::PlayerRespawned { .. } => {}
            }
        }
        for cue in &snapshot.audio_events {
            if matches!(cue, AudioCue::Shot { .. }) {
                self.shots_fired += 1;
            }
        }
        self.grenades_thrown += snapshot
            .visuals
            .iter()
            .filter(|v| match v {
                VisualCommand::Spawn { effect, .. } => effect.kind == EffectKind::Grenade,
                VisualCommand::Remove { .. } => false,
            })
            .count() as u32;
    }
}
