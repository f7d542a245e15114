use crate::config::FighterProfile;

use super::types::{Facing, Side, Tick};

/// Per-fighter mutable state for one round.
///
/// Created at round start with full health and cleared timers; mutated only
/// through the combat resolver and the motion rules while the round is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub side: Side,
    pub health: u32,
    pub max_health: u32,
    pub position: i32,
    pub facing: Facing,
    /// No new attack may start before this tick.
    pub attack_ready_at: Tick,
    pub blocking: bool,
    /// Releasing a block starts a recovery during which it cannot be raised again.
    pub block_ready_at: Tick,
    pub invulnerable: bool,
    pub invulnerable_until: Tick,
    pub dash_ready_at: Tick,
    /// Walking progress below one unit, in thousandths of a unit.
    pub stride_carry: i32,
}

impl Combatant {
    /// Fresh fighter at full health, facing `facing`.
    pub fn new(side: Side, profile: &FighterProfile, position: i32, facing: Facing) -> Self {
        debug_assert!(profile.max_health > 0, "max_health must be positive");
        Self {
            side,
            health: profile.max_health,
            max_health: profile.max_health,
            position,
            facing,
            attack_ready_at: Tick::ZERO,
            blocking: false,
            block_ready_at: Tick::ZERO,
            invulnerable: false,
            invulnerable_until: Tick::ZERO,
            dash_ready_at: Tick::ZERO,
            stride_carry: 0,
        }
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Horizontal distance to another fighter.
    #[inline]
    pub fn distance_to(&self, other: &Combatant) -> u32 {
        self.position.abs_diff(other.position)
    }

    /// True when `other` stands on the side this fighter faces.
    pub fn faces(&self, other: &Combatant) -> bool {
        match self.facing {
            Facing::Right => other.position >= self.position,
            Facing::Left => other.position <= self.position,
        }
    }

    /// Subtracts `amount`, clamped at zero. Returns the damage actually applied.
    pub(crate) fn lose_health(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        debug_assert!(self.health <= self.max_health);
        dealt
    }

    /// Drops timed flags whose window has closed.
    pub(crate) fn expire_timers(&mut self, now: Tick) {
        if self.invulnerable && self.invulnerable_until.has_elapsed(now) {
            self.invulnerable = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(position: i32, facing: Facing) -> Combatant {
        Combatant::new(
            Side::Player,
            &FighterProfile::default_player(),
            position,
            facing,
        )
    }

    #[test]
    fn starts_at_full_health_with_clear_flags() {
        let c = fighter(300, Facing::Right);
        assert_eq!(c.health, c.max_health);
        assert!(!c.blocking);
        assert!(!c.invulnerable);
        assert_eq!(c.attack_ready_at, Tick::ZERO);
    }

    #[test]
    fn health_never_goes_below_zero() {
        let mut c = fighter(300, Facing::Right);
        assert_eq!(c.lose_health(30), 30);
        assert_eq!(c.lose_health(500), 70);
        assert_eq!(c.health, 0);
        assert_eq!(c.lose_health(5), 0);
    }

    #[test]
    fn facing_checks_target_side() {
        let left = fighter(100, Facing::Right);
        let right = fighter(200, Facing::Left);
        assert!(left.faces(&right));
        assert!(right.faces(&left));

        let turned = fighter(100, Facing::Left);
        assert!(!turned.faces(&right));
    }
}
