//! Tests for the simulation engine, the director and the gameplay systems.

use glam::DVec3;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::VisualHandle;
use skirmish_core::config::SimConfig;
use skirmish_core::enums::*;
use skirmish_core::events::{AudioCue, EffectParams, GameEvent, HudReport, VisualCommand};
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::Position;

use skirmish_geometry::{ArenaGeometry, BrushKind};

use crate::engine::SimulationEngine;
use crate::presentation::{dispatch, Presenter};

/// Engine over an arena with no geometry.
fn open_engine(config: SimConfig) -> SimulationEngine {
    SimulationEngine::with_geometry(config, ArenaGeometry::empty())
}

/// Open-arena engine with a started round (one tick already run, now = 16 ms).
fn started(team: Option<Team>, weapon: WeaponKind) -> SimulationEngine {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartRound { team, weapon });
    engine.tick();
    engine
}

fn has_visual(snap: &GameStateSnapshot, kind: EffectKind) -> bool {
    snap.visuals.iter().any(|v| {
        matches!(v, VisualCommand::Spawn { effect, .. } if effect.kind == kind)
    })
}

// ---- Determinism ----

fn scripted_run(seed: u64, ticks: usize) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });

    let mut out = Vec::with_capacity(ticks);
    for i in 0..ticks {
        engine.queue_command(PlayerCommand::Look {
            yaw: i as f64 * 0.01,
            pitch: 0.0,
        });
        engine.queue_command(PlayerCommand::Fire);
        if i % 120 == 0 {
            engine.queue_command(PlayerCommand::ThrowGrenade);
        }
        let snap = engine.tick();
        out.push(serde_json::to_string(&snap).unwrap());
    }
    out
}

#[test]
fn test_determinism_same_seed() {
    let a = scripted_run(12345, 600);
    let b = scripted_run(12345, 600);
    for (i, (sa, sb)) in a.iter().zip(&b).enumerate() {
        assert_eq!(sa, sb, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let a = scripted_run(111, 400);
    let b = scripted_run(222, 400);
    assert_ne!(a, b, "Different seeds should produce divergent output");
}

// ---- Session lifecycle ----

#[test]
fn test_nothing_runs_before_start_round() {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert_eq!(snap.time.now_ms, 0, "time does not advance in the menu");
    assert_eq!(snap.player.ammo_in_magazine, 30, "fire ignored outside a round");
    assert!(snap.audio_events.is_empty());
}

#[test]
fn test_start_round_gating() {
    let mut engine = started(Some(Team::Red), WeaponKind::Sniper);
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.player().team(), Some(Team::Red));
    assert_eq!(engine.player().loadout.active, WeaponKind::Sniper);
    assert_eq!(engine.enemy_team(), Some(Team::Blue));
    assert_eq!(engine.director().deadline(), Some(4000));

    // Ignored while a round is running.
    engine.queue_command(PlayerCommand::StartRound {
        team: None,
        weapon: WeaponKind::Rifle,
    });
    engine.tick();
    assert_eq!(engine.player().loadout.active, WeaponKind::Sniper);
    assert_eq!(engine.player().team(), Some(Team::Red));
}

#[test]
fn test_round_start_position() {
    let engine = started(None, WeaponKind::Rifle);
    assert_eq!(engine.player().position, Position::new(0.0, 1.7, 0.0));
    assert_eq!(engine.player().vitals.health(), 100);
    assert_eq!(engine.player().ammo(), (30, 90));
    assert_eq!(engine.enemy_team(), None);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.tick();
    let before = engine.time();
    let deadline = engine.director().deadline();

    engine.queue_command(PlayerCommand::Pause);
    for _ in 0..100 {
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
    }
    assert_eq!(engine.time(), before, "time should not advance while paused");
    assert_eq!(engine.director().deadline(), deadline);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.time().now_ms, before.now_ms + 16);
}

#[test]
fn test_return_to_menu_clears_round() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(30.0, 0.0, 30.0), Some(Team::Red));
    engine.tick();
    assert!(engine.director().contains(id));

    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::MainMenu);
    assert_eq!(engine.director().roster_len(), 0);
    assert!(!engine.director().is_running());
    assert!(snap.enemies.is_empty());
    assert!(
        snap.visuals
            .iter()
            .any(|v| matches!(v, VisualCommand::Remove { .. })),
        "enemy visuals should be removed"
    );
}

#[test]
fn test_restart_resets_score() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));
    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    engine.tick();
    assert!(!engine.director().contains(id));
    assert_eq!(engine.director().score(), 100);

    engine.queue_command(PlayerCommand::Restart);
    let snap = engine.tick();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.spawn_interval_ms, 4000);
    assert_eq!(snap.player.ammo_in_magazine, 5);
    assert!(!snap.player.aiming);
}

// ---- Director ----

#[test]
fn test_spawn_timer_fires_on_interval() {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });

    // Systems run at now = 0, 1000, 2000, 3000: no spawn yet.
    for _ in 0..4 {
        engine.tick_with_delta(1000);
    }
    assert_eq!(engine.director().roster_len(), 0);

    // now = 4000: first spawn, next deadline one interval later.
    let snap = engine.tick_with_delta(1000);
    assert_eq!(engine.director().roster_len(), 1);
    assert_eq!(engine.director().deadline(), Some(8000));
    assert_eq!(snap.enemies.len(), 1);
    assert!(has_visual(&snap, EffectKind::SpawnEffect));
    assert!(has_visual(&snap, EffectKind::EnemyBody));

    let enemy = &snap.enemies[0];
    assert_eq!(enemy.team, Some(Team::Red));
    let r = enemy.position.horizontal_range_to(&Position::default());
    assert!(r > 13.5 && r < 16.5, "spawned near the ring, got {r}");
}

#[test]
fn test_roster_never_exceeds_cap() {
    let mut engine = open_engine(SimConfig::default());
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });

    for _ in 0..60 {
        let snap = engine.tick_with_delta(1000);
        assert!(engine.director().roster_len() <= 10);
        assert!(snap.enemies.len() <= snap.max_enemies);
    }
    assert_eq!(engine.director().roster_len(), 10, "roster fills up to the cap");
}

#[test]
fn test_kill_restarts_timer_from_kill_time() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    let snap = engine.tick();

    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyKilled { enemy_id, .. } if *enemy_id == id)));
    assert!(!engine.director().contains(id));
    assert_eq!(snap.score, 100);
    // Kill processed at now = 16.
    assert_eq!(engine.director().deadline(), Some(16 + 4000));
    assert!(snap.enemies.is_empty());
    assert!(has_visual(&snap, EffectKind::EnemyFade));
    assert!(has_visual(&snap, EffectKind::ScorePopup));
    assert!(snap.hud.contains(&HudReport::Score { score: 100 }));
}

#[test]
fn test_interval_shrinks_with_score() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    for _ in 0..5 {
        engine.director_mut().on_enemy_killed(0);
    }
    assert_eq!(engine.director().score(), 500);
    assert_eq!(engine.director().spawn_interval_ms(), 3750);
    assert_eq!(engine.director().max_enemies(), 10);
}

#[test]
fn test_killed_enemy_frees_roster_slot() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    let target = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));
    for i in 0..9 {
        engine.spawn_test_enemy(Position::new(40.0, 0.0, -40.0 + i as f64 * 8.0), Some(Team::Red));
    }
    assert_eq!(engine.director().roster_len(), 10);

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    engine.tick();
    assert!(!engine.director().contains(target));
    assert_eq!(engine.director().roster_len(), 9);

    for _ in 0..10 {
        engine.tick_with_delta(1000);
        assert!(engine.director().roster_len() <= 10);
    }
    assert_eq!(engine.director().roster_len(), 10, "the freed slot is refilled");
}

#[test]
fn test_stop_is_idempotent() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.director_mut().stop();
    engine.director_mut().stop();
    assert!(!engine.director().is_running());
    for _ in 0..5 {
        engine.tick_with_delta(1000);
    }
    assert_eq!(engine.director().roster_len(), 0);
}

// ---- Weapons ----

#[test]
fn test_fire_hits_enemy_in_front() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    let snap = engine.tick();

    assert_eq!(engine.enemy_vitals(id).unwrap().health(), 75);
    assert_eq!(snap.player.ammo_in_magazine, 29);
    assert!(snap.audio_events.contains(&AudioCue::Shot {
        weapon: WeaponKind::Rifle
    }));
    assert!(snap.audio_events.contains(&AudioCue::HitConfirmed));
    for kind in [
        EffectKind::MuzzleFlash,
        EffectKind::Tracer,
        EffectKind::HitMarker,
        EffectKind::DamageNumber,
    ] {
        assert!(has_visual(&snap, kind), "missing {kind:?}");
    }
}

#[test]
fn test_sniper_unaimed_damage() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    // Close enough that hip spread cannot miss the body.
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -2.0), Some(Team::Red));

    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyKilled { enemy_id, .. } if *enemy_id == id)));
}

#[test]
fn test_friendly_fire_blocked() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Blue));

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    let snap = engine.tick();
    assert_eq!(engine.enemy_vitals(id).unwrap().health(), 100);
    assert!(!snap.audio_events.contains(&AudioCue::HitConfirmed));
    assert_eq!(snap.player.ammo_in_magazine, 29, "the shot is still spent");
}

#[test]
fn test_wall_blocks_shot() {
    let geometry = ArenaGeometry::empty().with_box(
        BrushKind::Cover,
        DVec3::new(0.0, 1.0, -3.0),
        DVec3::new(4.0, 4.0, 1.0),
    );
    let mut engine = SimulationEngine::with_geometry(SimConfig::default(), geometry);
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });
    engine.tick();
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -8.0), Some(Team::Red));

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    engine.tick();
    assert_eq!(engine.enemy_vitals(id).unwrap().health(), 100);
}

#[test]
fn test_auto_reload_after_last_round() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.queue_command(PlayerCommand::Look {
        yaw: 0.0,
        pitch: 1.2,
    });

    let mut reload_started = false;
    let mut reload_finished = false;
    for _ in 0..60 {
        engine.queue_command(PlayerCommand::Fire);
        let snap = engine.tick_with_delta(100);
        reload_started |= snap.audio_events.contains(&AudioCue::ReloadStarted {
            weapon: WeaponKind::Rifle,
        });
        if snap.audio_events.contains(&AudioCue::ReloadFinished {
            weapon: WeaponKind::Rifle,
        }) {
            reload_finished = true;
            assert_eq!((snap.player.ammo_in_magazine, snap.player.ammo_reserve), (30, 60));
            break;
        }
    }
    assert!(reload_started, "emptying the magazine starts a reload");
    assert!(reload_finished, "reload completes after its duration");
}

#[test]
fn test_switch_rejected_mid_reload() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.queue_command(PlayerCommand::Look {
        yaw: 0.0,
        pitch: 1.2,
    });
    engine.queue_command(PlayerCommand::Fire);
    engine.tick();
    engine.queue_command(PlayerCommand::Reload);
    let snap = engine.tick();
    assert!(snap.player.reloading);

    engine.queue_command(PlayerCommand::SwitchWeapon {
        kind: WeaponKind::Sniper,
    });
    let snap = engine.tick();
    assert_eq!(snap.player.active_weapon, WeaponKind::Rifle);
    assert!(snap.audio_events.contains(&AudioCue::SwitchRejected {
        requested: WeaponKind::Sniper
    }));
}

#[test]
fn test_switch_restores_ammo_and_cancels_aim() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.queue_commands([
        PlayerCommand::Look {
            yaw: 0.0,
            pitch: 1.2,
        },
        PlayerCommand::Fire,
        PlayerCommand::Aim { active: true },
    ]);
    let snap = engine.tick();
    assert!(snap.player.aiming);
    assert_eq!(snap.player.fov_deg, 45.0);

    engine.queue_command(PlayerCommand::SwitchWeapon {
        kind: WeaponKind::Sniper,
    });
    let snap = engine.tick();
    assert_eq!(snap.player.active_weapon, WeaponKind::Sniper);
    assert!(!snap.player.aiming, "switching cancels aiming");
    assert_eq!((snap.player.ammo_in_magazine, snap.player.ammo_reserve), (5, 20));

    engine.queue_command(PlayerCommand::SwitchWeapon {
        kind: WeaponKind::Rifle,
    });
    let snap = engine.tick();
    assert_eq!(snap.player.ammo_in_magazine, 29, "rifle ammo persisted");
}

#[test]
fn test_empty_gives_feedback() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    {
        let player = engine.player_mut();
        player.loadout.sniper.ammo_in_magazine = 0;
        player.loadout.sniper.ammo_reserve = 0;
    }
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert!(snap.audio_events.contains(&AudioCue::Empty {
        weapon: WeaponKind::Sniper
    }));
    assert!(!snap.player.reloading);
}

// ---- Grenades ----

#[test]
fn test_grenade_damages_nearby_enemy() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -2.0), Some(Team::Red));

    engine.queue_commands([
        PlayerCommand::Look {
            yaw: 0.0,
            pitch: -1.2,
        },
        PlayerCommand::ThrowGrenade,
    ]);
    let snap = engine.tick();
    assert_eq!(snap.grenades.len(), 1);
    assert!(has_visual(&snap, EffectKind::Grenade));

    let mut exploded = false;
    for _ in 0..60 {
        let snap = engine.tick();
        if has_visual(&snap, EffectKind::Explosion) {
            exploded = true;
            assert!(snap.grenades.is_empty());
            break;
        }
    }
    assert!(exploded, "grenade should land within a second");
    let health = engine.enemy_vitals(id).unwrap().health();
    assert!(health < 100 && health > 0, "blast damage applied, got {health}");
}

#[test]
fn test_grenade_kill_scores() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -2.0), Some(Team::Red));
    engine.damage_test_enemy(id, 90);

    engine.queue_commands([
        PlayerCommand::Look {
            yaw: 0.0,
            pitch: -1.2,
        },
        PlayerCommand::ThrowGrenade,
    ]);
    for _ in 0..60 {
        engine.tick();
    }
    assert!(!engine.director().contains(id));
    assert_eq!(engine.director().score(), 100);
}

// ---- Enemy AI ----

#[test]
fn test_enemy_attack_cooldown() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    // Systems at now = 16: first attack.
    let snap = engine.tick();
    assert_eq!(snap.player.health, 90);
    assert!(snap.audio_events.contains(&AudioCue::PlayerHurt));
    assert!(has_visual(&snap, EffectKind::EnemyProjectile));
    assert_eq!(snap.enemies[0].state, EnemyState::Attack);

    // now = 32: cooling down.
    let snap = engine.tick_with_delta(984);
    assert_eq!(snap.player.health, 90);

    // now = 1016: exactly one cooldown after the first attack.
    let snap = engine.tick();
    assert_eq!(snap.player.health, 80);
}

#[test]
fn test_same_team_enemy_does_not_hurt() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Blue));
    let snap = engine.tick();
    assert_eq!(snap.player.health, 100);
    assert!(has_visual(&snap, EffectKind::EnemyProjectile));
}

#[test]
fn test_enemy_chases_and_wall_stops_it() {
    let geometry = ArenaGeometry::empty().with_box(
        BrushKind::Cover,
        DVec3::new(0.0, 1.0, -13.5),
        DVec3::new(4.0, 2.0, 1.0),
    );
    let mut engine = SimulationEngine::with_geometry(SimConfig::default(), geometry);
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });
    engine.tick();
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -15.0), Some(Team::Red));

    let mut last = Position::default();
    for _ in 0..50 {
        let snap = engine.tick();
        let enemy = snap.enemies.iter().find(|e| e.enemy_id == id).unwrap();
        assert_eq!(enemy.state, EnemyState::Chase);
        last = enemy.position;
    }
    assert!(last.z > -15.0, "enemy should have advanced");
    assert!(last.z < -14.4, "wall check stops it short of the wall, got {}", last.z);
}

#[test]
fn test_far_enemy_patrols() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(30.0, 0.0, 0.0), Some(Team::Red));
    let snap = engine.tick();
    let enemy = snap.enemies.iter().find(|e| e.enemy_id == id).unwrap();
    assert_eq!(enemy.state, EnemyState::Patrol);
    assert!(enemy.position.x > 30.0 && enemy.position.z > 0.0, "heading to (+r, +r)");
}

// ---- Player death ----

#[test]
fn test_player_respawns_after_delay() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.player_mut().vitals.apply_damage(95, None);
    engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::PlayerDied));
    assert!(!snap.player.alive);
    assert_eq!(engine.respawn_deadline(), Some(16 + 10_000));

    // Commands are ignored while dead.
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert_eq!(snap.player.ammo_in_magazine, 30);

    let mut respawned = None;
    for _ in 0..15 {
        let snap = engine.tick_with_delta(1000);
        if let Some(GameEvent::PlayerRespawned { position }) = snap
            .events
            .iter()
            .find(|e| matches!(e, GameEvent::PlayerRespawned { .. }))
        {
            assert!(snap.time.now_ms > 10_016);
            assert_eq!(snap.player.health, 100);
            respawned = Some(*position);
            break;
        }
    }

    let position = respawned.expect("player should respawn");
    assert!((position.y - 1.7).abs() < 1e-9);
    let r = position.horizontal_range_to(&Position::default());
    assert!((r - 15.0).abs() < 1e-9, "respawn on a spawn point, got {r}");
    assert_eq!(engine.phase(), GamePhase::Active);
}

#[test]
fn test_game_over_without_respawn() {
    let mut engine = open_engine(SimConfig {
        respawn_on_death: false,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartRound {
        team: Some(Team::Blue),
        weapon: WeaponKind::Rifle,
    });
    engine.tick();
    engine.player_mut().vitals.apply_damage(95, None);
    engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(engine.director().game_over());
    assert!(!engine.director().is_running());

    let frozen = engine.time();
    engine.tick();
    assert_eq!(engine.time(), frozen);

    engine.queue_command(PlayerCommand::StartRound {
        team: None,
        weapon: WeaponKind::Sniper,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.player.alive);
    assert!(snap.enemies.is_empty());
    assert!(!engine.director().game_over());
}

// ---- Player movement ----

#[test]
fn test_player_accelerates_to_max_speed() {
    let mut engine = started(None, WeaponKind::Rifle);
    engine.queue_command(PlayerCommand::Move { x: 1.0, z: 0.0 });
    let snap = engine.tick();
    assert!((snap.player.velocity.x - 0.15).abs() < 1e-9);

    let snap = engine.tick();
    assert!((snap.player.velocity.x - 0.3).abs() < 1e-9);
    let snap = engine.tick();
    assert!((snap.player.velocity.x - 0.3).abs() < 1e-9, "clamped to max speed");
    assert!((snap.player.position.x - 0.75).abs() < 1e-9);

    engine.queue_command(PlayerCommand::Move { x: 0.0, z: 0.0 });
    let snap = engine.tick();
    assert!((snap.player.velocity.x - 0.24).abs() < 1e-9, "friction decays velocity");
}

#[test]
fn test_aiming_halves_speed() {
    let mut engine = started(None, WeaponKind::Rifle);
    engine.queue_commands([
        PlayerCommand::Aim { active: true },
        PlayerCommand::Move { x: 1.0, z: 1.0 },
    ]);
    for _ in 0..10 {
        let snap = engine.tick();
        assert!(snap.player.velocity.planar_speed() <= 0.15 + 1e-9);
    }
}

#[test]
fn test_blocked_move_is_rejected() {
    let geometry = ArenaGeometry::empty().with_box(
        BrushKind::Cover,
        DVec3::new(4.0, 1.0, 0.0),
        DVec3::splat(2.0),
    );
    let mut engine = SimulationEngine::with_geometry(SimConfig::default(), geometry);
    engine.queue_command(PlayerCommand::StartRound {
        team: None,
        weapon: WeaponKind::Rifle,
    });
    engine.tick();

    engine.queue_command(PlayerCommand::Move { x: 1.0, z: 0.0 });
    let mut stopped = false;
    for _ in 0..40 {
        let snap = engine.tick();
        assert!(snap.player.position.x <= 2.5, "player never closer than its radius");
        stopped |= snap.player.velocity.x == 0.0;
    }
    assert!(stopped, "velocity zeroed when the move is rejected");
    assert!(engine.player().position.x > 1.5);
}

#[test]
fn test_player_walks_out_of_start_cover() {
    // The default arena has a cover box around the round start position.
    for (x, z) in [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)] {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartRound {
            team: None,
            weapon: WeaponKind::Rifle,
        });
        engine.tick();

        engine.queue_command(PlayerCommand::Move { x, z });
        for _ in 0..300 {
            engine.tick();
        }

        let p = engine.player().position;
        let along = p.x * x + p.z * z;
        assert!(along > 45.0, "intent ({x}, {z}) stuck at ({:.2}, {:.2})", p.x, p.z);
        assert!(along < 49.5, "boundary wall stops the player");
        assert_eq!(p.y, 1.7);
    }
}

#[test]
fn test_player_walks_out_of_building() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartRound {
        team: None,
        weapon: WeaponKind::Rifle,
    });
    engine.tick();

    // Inside the building spanning x, z in 4.5..19.5.
    engine.player_mut().revive_at(Position::new(10.6, 1.7, 10.6));
    engine.queue_command(PlayerCommand::Move { x: -1.0, z: 0.0 });
    for _ in 0..60 {
        engine.tick();
    }

    let x = engine.player().position.x;
    assert!(x < 4.0, "player should have left the building, got x = {x}");
    assert!(x > -6.0, "next building's wall still blocks, got x = {x}");
}

#[test]
fn test_jump_arc_and_landing() {
    let mut engine = started(None, WeaponKind::Rifle);

    engine.queue_command(PlayerCommand::Jump);
    let snap = engine.tick();
    assert!((snap.player.velocity.y - 7.68).abs() < 1e-9);
    assert!(snap.player.position.y > 1.7);

    // No second jump while airborne.
    engine.queue_command(PlayerCommand::Jump);
    let snap = engine.tick();
    assert!((snap.player.velocity.y - 7.36).abs() < 1e-9);

    let mut apex = snap.player.position.y;
    let mut landed = false;
    for _ in 0..60 {
        let snap = engine.tick();
        apex = apex.max(snap.player.position.y);
        if engine.player().on_ground {
            landed = true;
            assert_eq!(snap.player.position.y, 1.7);
            assert_eq!(snap.player.velocity.y, 0.0);
            break;
        }
    }
    assert!(landed, "player lands within a second");
    assert!(apex > 3.0 && apex < 3.4, "apex near 1.6 above eye height, got {apex}");

    engine.queue_command(PlayerCommand::Jump);
    let snap = engine.tick();
    assert!((snap.player.velocity.y - 7.68).abs() < 1e-9, "can jump again after landing");
}

#[test]
fn test_jumping_player_shoots_over_enemy() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    let id = engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));

    engine.queue_command(PlayerCommand::Jump);
    for _ in 0..20 {
        engine.tick();
    }
    assert!(engine.player().position.y > 2.5);

    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    engine.tick();
    assert_eq!(engine.enemy_vitals(id).unwrap().health(), 100, "level shot passes above the body");
}

// ---- Presentation ----

#[test]
fn test_hud_reports_only_changes() {
    let mut engine = open_engine(SimConfig::default());
    let snap = engine.tick();
    assert_eq!(snap.hud.len(), 3, "first snapshot reports every value");

    let snap = engine.tick();
    assert!(snap.hud.is_empty());

    engine.queue_command(PlayerCommand::StartRound {
        team: None,
        weapon: WeaponKind::Rifle,
    });
    engine.tick();
    engine.queue_command(PlayerCommand::Look {
        yaw: 0.0,
        pitch: 1.2,
    });
    engine.queue_command(PlayerCommand::Fire);
    let snap = engine.tick();
    assert_eq!(
        snap.hud,
        vec![HudReport::Ammo {
            current: 29,
            reserve: 90
        }]
    );
}

#[derive(Default)]
struct RecordingPresenter {
    spawned: Vec<(VisualHandle, EffectKind)>,
    removed: Vec<VisualHandle>,
    health: Vec<u32>,
    ammo: Vec<(u32, u32)>,
    score: Vec<u32>,
}

impl Presenter for RecordingPresenter {
    fn spawn_visual_effect(
        &mut self,
        handle: VisualHandle,
        kind: EffectKind,
        _position: Position,
        _params: &EffectParams,
    ) {
        self.spawned.push((handle, kind));
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.removed.push(handle);
    }

    fn report_health(&mut self, health: u32) {
        self.health.push(health);
    }

    fn report_ammo(&mut self, current: u32, reserve: u32) {
        self.ammo.push((current, reserve));
    }

    fn report_score(&mut self, score: u32) {
        self.score.push(score);
    }
}

#[test]
fn test_dispatch_forwards_snapshot() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Sniper);
    let mut presenter = RecordingPresenter::default();
    engine.spawn_test_enemy(Position::new(0.0, 0.0, -5.0), Some(Team::Red));
    engine.queue_commands([PlayerCommand::Aim { active: true }, PlayerCommand::Fire]);
    let snap = engine.tick();

    dispatch(&snap, &mut presenter);
    let spawns = snap
        .visuals
        .iter()
        .filter(|v| matches!(v, VisualCommand::Spawn { .. }))
        .count();
    assert_eq!(presenter.spawned.len(), spawns);
    assert!(presenter
        .spawned
        .iter()
        .any(|(_, kind)| *kind == EffectKind::EnemyFade));
    assert_eq!(presenter.score, vec![100]);
    assert_eq!(presenter.ammo, vec![(4, 20)]);
    assert!(presenter.health.is_empty());
    assert!(presenter.removed.is_empty());
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = started(Some(Team::Blue), WeaponKind::Rifle);
    engine.spawn_test_enemy(Position::new(12.0, 0.0, 0.0), Some(Team::Red));
    let snap = engine.tick();
    let json = serde_json::to_string(&snap).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.enemies.len(), 1);
    assert_eq!(back.phase, GamePhase::Active);
}
