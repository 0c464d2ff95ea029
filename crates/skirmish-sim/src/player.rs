//! The player: a singleton stored on the engine, not an ECS entity.

use skirmish_core::components::Loadout;
use skirmish_core::constants::{MAX_HEALTH, PLAYER_EYE_HEIGHT};
use skirmish_core::enums::{Team, WeaponKind};
use skirmish_core::types::{Aim, Position, Velocity};

use skirmish_rules::combatant::{Combatant, Vitals};
use skirmish_rules::weapon::{active_weapon, full_loadout};

/// Where every round starts: the arena centre at eye height.
pub fn start_position() -> Position {
    Position::new(0.0, PLAYER_EYE_HEIGHT, 0.0)
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position.
    pub position: Position,
    pub velocity: Velocity,
    pub vitals: Vitals,
    pub loadout: Loadout,
    pub aim: Aim,
    /// Planar move intent (x, z) in world space.
    pub move_intent: (f64, f64),
    pub aiming: bool,
    /// Standing on the ground; a jump is only possible from here.
    pub on_ground: bool,
}

impl Player {
    pub fn new(team: Option<Team>, weapon: WeaponKind) -> Self {
        Self {
            position: start_position(),
            velocity: Velocity::default(),
            vitals: Vitals::new(MAX_HEALTH, team),
            loadout: full_loadout(weapon),
            aim: Aim::default(),
            move_intent: (0.0, 0.0),
            aiming: false,
            on_ground: true,
        }
    }

    /// Put the player back in play at `position` with full health and ammo.
    /// The active weapon is kept.
    pub fn revive_at(&mut self, position: Position) {
        self.position = position;
        self.velocity = Velocity::default();
        self.vitals.revive();
        self.loadout = full_loadout(self.loadout.active);
        self.move_intent = (0.0, 0.0);
        self.aiming = false;
        self.on_ground = true;
    }

    pub fn team(&self) -> Option<Team> {
        self.vitals.team()
    }

    /// Magazine and reserve of the weapon in hand.
    pub fn ammo(&self) -> (u32, u32) {
        let w = active_weapon(&self.loadout);
        (w.ammo_in_magazine, w.ammo_reserve)
    }
}

impl Combatant for Player {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }
}
