//! Simulation constants and tuning parameters.
//!
//! Distances are in arena units, y is up, the ground plane is x/z.
//! Per-tick speeds are applied once per simulation tick regardless of the
//! tick length, matching the frame-driven movement of the arena game.

/// Nominal tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Default tick length in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 16;

// --- Combatants ---

/// Maximum (and starting) health of the player and of every enemy.
pub const MAX_HEALTH: u32 = 100;

// --- Player ---

/// Camera/eye height of the player above the ground.
pub const PLAYER_EYE_HEIGHT: f64 = 1.7;

/// Collision radius used by the 8-direction movement collision check.
pub const PLAYER_RADIUS: f64 = 0.5;

/// Maximum planar speed (units per tick).
pub const PLAYER_MOVE_SPEED: f64 = 0.3;

/// Velocity gained per tick along the move intent.
pub const PLAYER_ACCELERATION: f64 = 0.15;

/// Planar velocity decay per tick with no move intent.
pub const PLAYER_FRICTION: f64 = 0.8;

/// Movement speed multiplier while aiming.
pub const AIM_SPEED_FACTOR: f64 = 0.5;

/// Upward velocity given by a jump (units per second).
pub const PLAYER_JUMP_VELOCITY: f64 = 8.0;

/// Gravity acting on the player (units per second squared).
pub const PLAYER_GRAVITY: f64 = 20.0;

/// Field of view when not aiming (degrees).
pub const DEFAULT_FOV_DEG: f64 = 75.0;

/// Delay between player death and respawn (ms).
pub const RESPAWN_DELAY_MS: u64 = 10_000;

// --- Enemies ---

/// Enemy movement per tick.
pub const ENEMY_MOVE_SPEED: f64 = 0.05;

/// Distance at or below which an enemy chases the player.
pub const ENEMY_DETECTION_RANGE: f64 = 20.0;

/// Distance at or below which an enemy attacks the player.
pub const ENEMY_ATTACK_RANGE: f64 = 10.0;

/// Minimum time between two enemy attacks (ms).
pub const ENEMY_ATTACK_COOLDOWN_MS: u64 = 1000;

/// Damage of a single enemy attack.
pub const ENEMY_ATTACK_DAMAGE: u32 = 10;

/// Half side of the square patrol route around the spawn position.
pub const PATROL_RADIUS: f64 = 5.0;

/// Distance under which a patrol waypoint counts as reached.
pub const WAYPOINT_REACHED_DISTANCE: f64 = 0.5;

/// Look-ahead of the wall ray cast along an enemy's travel direction.
pub const ENEMY_WALL_LOOKAHEAD: f64 = 0.5;

/// Height of the enemy body centre above its feet (rays are cast from here).
pub const ENEMY_BODY_CENTER_HEIGHT: f64 = 1.0;

/// Half extents of the enemy hit box (0.6 x 2 x 0.6).
pub const ENEMY_BODY_HALF_EXTENTS: [f64; 3] = [0.3, 1.0, 0.3];

// --- Director ---

/// Maximum simultaneously active enemies.
pub const MAX_ENEMIES: usize = 10;

/// Number of fixed spawn points.
pub const SPAWN_POINT_COUNT: usize = 8;

/// Radius of the spawn point circle around the origin.
pub const SPAWN_RING_RADIUS: f64 = 15.0;

/// Planar jitter applied to a spawn position (+/- on x and z).
pub const SPAWN_JITTER: f64 = 1.0;

/// Spawn interval at score 0 (ms).
pub const BASE_SPAWN_INTERVAL_MS: u64 = 4000;

/// Lower bound of the spawn interval (ms).
pub const MIN_SPAWN_INTERVAL_MS: u64 = 2000;

/// Interval reduction per difficulty step (ms).
pub const SPAWN_INTERVAL_STEP_MS: u64 = 250;

/// Score needed per difficulty step.
pub const SCORE_PER_DIFFICULTY_STEP: u32 = 500;

/// Score awarded per enemy kill.
pub const SCORE_PER_KILL: u32 = 100;

/// Minimum distance from every enemy for a spawn point to count as safe.
pub const SAFE_SPAWN_DISTANCE: f64 = 10.0;

// --- Weapons ---

/// Damage multiplier for aimed sniper shots.
pub const SNIPER_AIMED_MULTIPLIER: f64 = 1.5;

pub const RIFLE_DAMAGE: u32 = 25;
pub const RIFLE_FIRE_PERIOD_MS: u64 = 100;
pub const RIFLE_RANGE: f64 = 50.0;
pub const RIFLE_MAGAZINE: u32 = 30;
pub const RIFLE_RESERVE: u32 = 90;
pub const RIFLE_RELOAD_MS: u64 = 2000;
pub const RIFLE_AIM_FOV_DEG: f64 = 45.0;
pub const RIFLE_HIP_SPREAD: f64 = 0.05;

pub const SNIPER_DAMAGE: u32 = 100;
pub const SNIPER_FIRE_PERIOD_MS: u64 = 1000;
pub const SNIPER_RANGE: f64 = 100.0;
pub const SNIPER_MAGAZINE: u32 = 5;
pub const SNIPER_RESERVE: u32 = 20;
pub const SNIPER_RELOAD_MS: u64 = 3000;
pub const SNIPER_AIM_FOV_DEG: f64 = 30.0;
pub const SNIPER_HIP_SPREAD: f64 = 0.1;

// --- Grenades ---

/// Launch speed (units per second).
pub const GRENADE_SPEED: f64 = 15.0;

/// Upward bias added to the aim direction before normalizing.
pub const GRENADE_ARC_LIFT: f64 = 0.3;

/// Gravity acting on grenades (units per second squared).
pub const GRENADE_GRAVITY: f64 = 9.8;

/// Height at which a falling grenade detonates.
pub const GRENADE_GROUND_HEIGHT: f64 = 0.1;

/// Collision radius used for the grenade wall check.
pub const GRENADE_RADIUS: f64 = 0.1;

/// Blast radius of a detonation.
pub const GRENADE_BLAST_RADIUS: f64 = 10.0;

/// Damage at the centre of the blast, falling off linearly to 0 at the edge.
pub const GRENADE_MAX_DAMAGE: f64 = 100.0;

/// Fuse after which an airborne grenade detonates anyway (ms).
pub const GRENADE_FUSE_MS: u64 = 10_000;

// --- Arena ---

/// Half size of the square arena enclosed by the boundary walls.
pub const ARENA_HALF_SIZE: f64 = 50.0;
