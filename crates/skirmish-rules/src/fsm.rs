//! Enemy behavior finite state machine.
//!
//! Pure functions that pick an enemy's state and action from its distance to
//! the player. No ECS or geometry dependency: the simulation checks proposed
//! moves against the collision query before applying them.

use glam::DVec3;

use skirmish_core::components::EnemyBrain;
use skirmish_core::constants::*;
use skirmish_core::enums::EnemyState;
use skirmish_core::types::Position;

/// Input to the enemy FSM for a single entity.
pub struct EnemyContext<'a> {
    pub brain: &'a EnemyBrain,
    /// Feet position of the enemy.
    pub position: Position,
    /// Eye position of the player.
    pub player_position: Position,
    pub now_ms: u64,
}

/// What the enemy does this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyAction {
    /// Nothing (attack cooling down, or nowhere to go).
    Hold,
    /// Waypoint reached; patrol continues from `index` next tick.
    NextWaypoint { index: usize },
    /// Step to `to`, facing `facing`, if nothing blocks `direction`.
    Move {
        to: Position,
        direction: DVec3,
        facing: f64,
    },
    /// Shoot the player.
    Attack,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDecision {
    pub new_state: EnemyState,
    pub state_changed: bool,
    pub action: EnemyAction,
}

/// State for a given distance to the player. Boundaries are inclusive and
/// there is no hysteresis.
pub fn classify_state(distance: f64) -> EnemyState {
    if distance <= ENEMY_ATTACK_RANGE {
        EnemyState::Attack
    } else if distance <= ENEMY_DETECTION_RANGE {
        EnemyState::Chase
    } else {
        EnemyState::Patrol
    }
}

/// Square patrol route around `center`, visited in this order.
pub fn patrol_route(center: Position) -> [Position; 4] {
    let r = PATROL_RADIUS;
    [
        Position::new(center.x + r, center.y, center.z + r),
        Position::new(center.x + r, center.y, center.z - r),
        Position::new(center.x - r, center.y, center.z - r),
        Position::new(center.x - r, center.y, center.z + r),
    ]
}

/// Heading that looks along a planar direction (0 = -z, same as player yaw).
pub fn facing_for(direction: DVec3) -> f64 {
    (-direction.x).atan2(-direction.z)
}

/// True once the attack cooldown has elapsed (or no attack happened yet).
pub fn attack_ready(last_attack_ms: Option<u64>, now_ms: u64) -> bool {
    last_attack_ms.map_or(true, |t| now_ms.saturating_sub(t) >= ENEMY_ATTACK_COOLDOWN_MS)
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyDecision {
    let distance = ctx.position.range_to(&ctx.player_position);
    let new_state = classify_state(distance);

    let action = match new_state {
        EnemyState::Patrol => patrol(ctx),
        EnemyState::Chase => step_toward(ctx.position, ctx.player_position),
        EnemyState::Attack => {
            if attack_ready(ctx.brain.last_attack_ms, ctx.now_ms) {
                EnemyAction::Attack
            } else {
                EnemyAction::Hold
            }
        }
    };

    EnemyDecision {
        new_state,
        state_changed: new_state != ctx.brain.state,
        action,
    }
}

fn patrol(ctx: &EnemyContext) -> EnemyAction {
    let index = ctx.brain.waypoint_index % ctx.brain.patrol_route.len();
    let target = ctx.brain.patrol_route[index];

    if ctx.position.horizontal_range_to(&target) < WAYPOINT_REACHED_DISTANCE {
        return EnemyAction::NextWaypoint {
            index: (index + 1) % ctx.brain.patrol_route.len(),
        };
    }

    step_toward(ctx.position, target)
}

/// One step of `ENEMY_MOVE_SPEED` toward `target` on the ground plane.
fn step_toward(from: Position, target: Position) -> EnemyAction {
    let delta = DVec3::new(target.x - from.x, 0.0, target.z - from.z);
    let Some(direction) = delta.try_normalize() else {
        return EnemyAction::Hold;
    };

    let to = Position::from(DVec3::from(from) + direction * ENEMY_MOVE_SPEED);
    EnemyAction::Move {
        to,
        direction,
        facing: facing_for(direction),
    }
}
