//! Player movement: acceleration, friction, speed clamp, the collision check,
//! and jumping under gravity.

use glam::DVec3;

use skirmish_core::constants::*;
use skirmish_core::types::Position;

use skirmish_geometry::CollisionQuery;

use crate::player::Player;

/// Move the player one tick. A planar move blocked along its direction of
/// travel is rejected whole and zeroes planar velocity. Vertical motion
/// integrates over `dt_secs` and lands at eye height.
pub fn run(player: &mut Player, geometry: &dyn CollisionQuery, dt_secs: f64) {
    if !player.vitals.is_alive() {
        return;
    }

    move_planar(player, geometry);
    move_vertical(player, dt_secs);
}

/// Start a jump when standing on the ground.
pub fn jump(player: &mut Player) {
    if player.vitals.is_alive() && player.on_ground {
        player.velocity.y = PLAYER_JUMP_VELOCITY;
        player.on_ground = false;
    }
}

fn move_planar(player: &mut Player, geometry: &dyn CollisionQuery) {
    let max_speed = if player.aiming {
        PLAYER_MOVE_SPEED * AIM_SPEED_FACTOR
    } else {
        PLAYER_MOVE_SPEED
    };

    let (ix, iz) = player.move_intent;
    let mut velocity = DVec3::new(player.velocity.x, 0.0, player.velocity.z);
    match DVec3::new(ix, 0.0, iz).try_normalize() {
        Some(intent) => velocity += intent * PLAYER_ACCELERATION,
        None => velocity *= PLAYER_FRICTION,
    }
    velocity = velocity.clamp_length_max(max_speed);

    player.velocity.x = velocity.x;
    player.velocity.z = velocity.z;

    if velocity.length_squared() == 0.0 {
        return;
    }

    let candidate = DVec3::from(player.position) + velocity;
    if geometry.is_move_blocked(candidate, velocity, PLAYER_RADIUS) {
        player.velocity.x = 0.0;
        player.velocity.z = 0.0;
    } else {
        player.position = Position::from(candidate);
    }
}

fn move_vertical(player: &mut Player, dt_secs: f64) {
    if player.on_ground {
        return;
    }

    player.velocity.y -= PLAYER_GRAVITY * dt_secs;
    player.position.y += player.velocity.y * dt_secs;

    if player.position.y <= PLAYER_EYE_HEIGHT {
        player.position.y = PLAYER_EYE_HEIGHT;
        player.velocity.y = 0.0;
        player.on_ground = true;
    }
}
