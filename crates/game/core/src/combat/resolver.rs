//! Attack and damage rules.
//!
//! The resolver is stateless: it borrows the round clock and arena and
//! mutates the two combatants handed to it. Every precondition failure is a
//! silent miss, never an error.

use crate::config::{ArenaConfig, FighterProfile};
use crate::state::{Combatant, Side, Tick};

/// Which attack button was used.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackKind {
    Normal,
    Special,
}

/// Result of a single attack attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub hit: bool,
    pub damage_dealt: u32,
    /// The attack was in range but the target's block absorbed it.
    pub blocked: bool,
}

impl AttackOutcome {
    pub const MISS: Self = Self {
        hit: false,
        damage_dealt: 0,
        blocked: false,
    };
}

/// Emitted whenever an attack lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitEvent {
    pub attacker: Side,
    pub target: Side,
    pub kind: AttackKind,
    pub damage: u32,
    pub target_health: u32,
    /// Signed displacement applied to the target.
    pub knockback: i32,
    pub at: Tick,
}

/// Subscriber for landed hits (effects, audio, logs).
///
/// The resolver never waits on observers.
pub trait HitObserver {
    fn on_hit(&mut self, hit: &HitEvent);
}

impl HitObserver for Vec<HitEvent> {
    fn on_hit(&mut self, hit: &HitEvent) {
        self.push(*hit);
    }
}

impl HitObserver for () {
    fn on_hit(&mut self, _hit: &HitEvent) {}
}

/// Combat rules evaluated against one instant of the round clock.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    arena: &'a ArenaConfig,
    now: Tick,
    round_active: bool,
}

impl<'a> CombatResolver<'a> {
    pub fn new(arena: &'a ArenaConfig, now: Tick, round_active: bool) -> Self {
        Self {
            arena,
            now,
            round_active,
        }
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Whether `actor` may start an attack right now.
    pub fn can_act(&self, actor: &Combatant) -> bool {
        self.round_active
            && !actor.is_defeated()
            && actor.attack_ready_at.has_elapsed(self.now)
            && !actor.blocking
    }

    /// Whether `target` is within `range` and on the side `actor` faces.
    pub fn in_reach(&self, actor: &Combatant, target: &Combatant, range: u32) -> bool {
        actor.distance_to(target) < range && actor.faces(target)
    }

    /// Starts an attack of `kind` from `actor` against `target`.
    ///
    /// The cooldown is reserved as soon as the attack starts, hit or miss.
    pub fn attempt_attack<O>(
        &self,
        actor: &mut Combatant,
        profile: &FighterProfile,
        target: &mut Combatant,
        kind: AttackKind,
        observer: &mut O,
    ) -> AttackOutcome
    where
        O: HitObserver + ?Sized,
    {
        if !self.can_act(actor) {
            return AttackOutcome::MISS;
        }

        let attack = profile.attack(kind);
        actor.attack_ready_at = self.now + attack.cooldown_ms;

        if !self.in_reach(actor, target, attack.range) {
            return AttackOutcome::MISS;
        }
        if target.blocking {
            return AttackOutcome {
                blocked: true,
                ..AttackOutcome::MISS
            };
        }
        if target.invulnerable || target.is_defeated() {
            return AttackOutcome::MISS;
        }

        let damage = target.lose_health(attack.damage);
        let knockback = self.push_away(actor, target, attack.knockback);

        observer.on_hit(&HitEvent {
            attacker: actor.side,
            target: target.side,
            kind,
            damage,
            target_health: target.health,
            knockback,
            at: self.now,
        });

        AttackOutcome {
            hit: true,
            damage_dealt: damage,
            blocked: false,
        }
    }

    /// Applies `amount` directly with the same block and invulnerability gates.
    ///
    /// Returns the damage actually applied; a defeated target takes nothing.
    pub fn take_damage(&self, target: &mut Combatant, amount: u32) -> u32 {
        if !self.round_active || target.is_defeated() || target.blocking || target.invulnerable {
            return 0;
        }
        target.lose_health(amount)
    }

    /// Moves `target` away from `actor`, clamped to the arena. Returns the signed shift.
    fn push_away(&self, actor: &Combatant, target: &mut Combatant, distance: u32) -> i32 {
        let direction = match target.position.cmp(&actor.position) {
            core::cmp::Ordering::Less => -1,
            core::cmp::Ordering::Greater => 1,
            core::cmp::Ordering::Equal => actor.facing.sign(),
        };
        let shift = i32::try_from(distance).unwrap_or(i32::MAX).saturating_mul(direction);
        let before = target.position;
        target.position = self.arena.clamp(before.saturating_add(shift));
        target.position - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttackProfile;
    use crate::state::Facing;

    fn profile() -> FighterProfile {
        FighterProfile {
            normal: AttackProfile::new(10, 100, 800, 40),
            special: AttackProfile::new(35, 420, 3000, 60),
            ..FighterProfile::default_player()
        }
    }

    fn pair(distance: i32) -> (Combatant, Combatant) {
        let p = profile();
        (
            Combatant::new(Side::Player, &p, 300, Facing::Right),
            Combatant::new(Side::Opponent, &p, 300 + distance, Facing::Left),
        )
    }

    #[test]
    fn landed_hit_deals_damage_and_reserves_cooldown() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(1000), true);
        let (mut actor, mut target) = pair(50);
        let mut hits = Vec::new();

        let outcome =
            resolver.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut hits);

        assert!(outcome.hit);
        assert_eq!(outcome.damage_dealt, 10);
        assert_eq!(target.health, 90);
        assert_eq!(actor.attack_ready_at, Tick(1800));
        assert_eq!(target.position, 390);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].knockback, 40);
    }

    #[test]
    fn miss_still_reserves_cooldown() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (mut actor, mut target) = pair(250);

        let outcome =
            resolver.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ());

        assert!(!outcome.hit);
        assert_eq!(actor.attack_ready_at, Tick(800));
        assert_eq!(target.health, target.max_health);
    }

    #[test]
    fn second_attack_inside_cooldown_is_rejected() {
        let arena = ArenaConfig::default();
        let (mut actor, mut target) = pair(50);

        let first = CombatResolver::new(&arena, Tick(0), true);
        assert!(first
            .attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ())
            .hit);

        // Pull the target back into range; the cooldown alone must stop the hit.
        target.position = 350;
        let second = CombatResolver::new(&arena, Tick(799), true);
        let outcome =
            second.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ());
        assert_eq!(outcome, AttackOutcome::MISS);
        assert_eq!(actor.attack_ready_at, Tick(800));
    }

    #[test]
    fn block_negates_all_damage() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (mut actor, mut target) = pair(50);
        target.blocking = true;

        let outcome =
            resolver.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Special, &mut ());
        assert!(!outcome.hit);
        assert!(outcome.blocked);
        assert_eq!(target.health, target.max_health);
        assert_eq!(resolver.take_damage(&mut target, 25), 0);
        assert_eq!(target.health, target.max_health);
    }

    #[test]
    fn invulnerable_target_takes_nothing() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (mut actor, mut target) = pair(50);
        target.invulnerable = true;

        let outcome =
            resolver.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ());
        assert!(!outcome.hit);
        assert!(!outcome.blocked);
        assert_eq!(target.health, target.max_health);
    }

    #[test]
    fn facing_away_misses() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (mut actor, mut target) = pair(50);
        actor.facing = Facing::Left;

        assert!(!resolver
            .attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ())
            .hit);
    }

    #[test]
    fn blocking_actor_cannot_attack() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (mut actor, mut target) = pair(50);
        actor.blocking = true;

        assert_eq!(
            resolver.attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ()),
            AttackOutcome::MISS
        );
        assert_eq!(actor.attack_ready_at, Tick::ZERO);
    }

    #[test]
    fn inactive_round_is_a_no_op() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), false);
        let (mut actor, mut target) = pair(50);

        assert!(!resolver
            .attempt_attack(&mut actor, &profile(), &mut target, AttackKind::Normal, &mut ())
            .hit);
        assert_eq!(resolver.take_damage(&mut target, 10), 0);
        assert_eq!(target.health, target.max_health);
    }

    #[test]
    fn take_damage_clamps_and_is_idempotent_at_zero() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let (_, mut target) = pair(50);

        assert_eq!(resolver.take_damage(&mut target, 250), 100);
        assert_eq!(target.health, 0);
        assert_eq!(resolver.take_damage(&mut target, 10), 0);
        assert_eq!(target.health, 0);
    }

    #[test]
    fn knockback_stops_at_arena_edge() {
        let arena = ArenaConfig::default();
        let resolver = CombatResolver::new(&arena, Tick(0), true);
        let p = profile();
        let mut actor = Combatant::new(Side::Player, &p, 960, Facing::Right);
        let mut target = Combatant::new(Side::Opponent, &p, 990, Facing::Left);

        let mut hits = Vec::new();
        resolver.attempt_attack(&mut actor, &p, &mut target, AttackKind::Normal, &mut hits);
        assert_eq!(target.position, 1000);
        assert_eq!(hits[0].knockback, 10);
    }
}
