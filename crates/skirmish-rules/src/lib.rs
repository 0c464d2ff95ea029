//! Gameplay rules for SKIRMISH.
//!
//! Combatant damage, the enemy state machine, the weapon state machine
//! and the spawn difficulty curve. Pure functions over plain data.

pub mod combatant;
pub mod difficulty;
pub mod fsm;
pub mod profiles;
pub mod weapon;

pub use skirmish_core as core;

pub use combatant::{friendly_fire_allows, Combatant, DamageOutcome, Vitals};
