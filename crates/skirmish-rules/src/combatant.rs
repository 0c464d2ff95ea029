//! Health, death and the friendly-fire rule shared by the player and enemies.

use skirmish_core::enums::Team;

/// Result of applying damage to a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Friendly fire, or the target was already dead.
    Ignored,
    /// Health dropped by `amount` and stayed above zero.
    Damaged { amount: u32 },
    /// Health reached zero with this hit. Reported once per life.
    Killed,
}

/// True when damage from `source` may hurt `target`.
///
/// Damage applies across teams, or when either side has no team.
pub fn friendly_fire_allows(source: Option<Team>, target: Option<Team>) -> bool {
    match (source, target) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

/// Health and team of a combatant.
///
/// Fields are private: health only changes through damage, healing and revival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vitals {
    health: u32,
    max_health: u32,
    team: Option<Team>,
    dead: bool,
}

impl Vitals {
    /// Full-health vitals.
    pub fn new(max_health: u32, team: Option<Team>) -> Self {
        Self {
            health: max_health,
            max_health,
            team,
            dead: max_health == 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn team(&self) -> Option<Team> {
        self.team
    }

    pub fn set_team(&mut self, team: Option<Team>) {
        self.team = team;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn apply_damage(&mut self, amount: u32, source_team: Option<Team>) -> DamageOutcome {
        if self.dead || !friendly_fire_allows(source_team, self.team) {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged { amount }
        }
    }

    /// Restore up to `amount` health, clamped to the maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.dead {
            return 0;
        }
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    /// Full health and a cleared death latch (round reset and respawn).
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.dead = self.max_health == 0;
    }
}

/// Anything that owns [`Vitals`] and can be shot.
pub trait Combatant {
    fn vitals(&self) -> &Vitals;
    fn vitals_mut(&mut self) -> &mut Vitals;

    fn take_damage(&mut self, amount: u32, source_team: Option<Team>) -> DamageOutcome {
        self.vitals_mut().apply_damage(amount, source_team)
    }

    fn is_alive(&self) -> bool {
        self.vitals().is_alive()
    }
}

impl Combatant for Vitals {
    fn vitals(&self) -> &Vitals {
        self
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        self
    }
}
