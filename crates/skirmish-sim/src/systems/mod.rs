//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` and the engine-owned state
//! they need. They do not own state.

pub mod deaths;
pub mod enemy_ai;
pub mod grenades;
pub mod player_movement;
pub mod snapshot;
pub mod weapons;
