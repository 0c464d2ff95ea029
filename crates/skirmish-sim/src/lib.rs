//! Simulation engine for SKIRMISH.
//!
//! Owns the hecs ECS world, runs systems once per tick,
//! and produces GameStateSnapshots for the presentation layer.

pub mod director;
pub mod engine;
pub mod player;
pub mod presentation;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use presentation::{dispatch, Presenter};
pub use skirmish_core as core;
pub use skirmish_core::config::SimConfig;

#[cfg(test)]
mod tests;
