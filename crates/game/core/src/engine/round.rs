//! One health-to-zero bout.

use crate::combat::{AttackKind, AttackOutcome, CombatResolver, HitObserver, apply_stance, walk};
use crate::config::{ArenaConfig, FighterProfile};
use crate::env::{ControlMode, OpponentProfile};
use crate::input::SideInput;
use crate::state::{Combatant, Facing, RoundRecord, RoundWinner, Side, Tick};

/// Lifecycle of a round. `Resolved` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RoundState {
    Starting,
    Active,
    Resolved,
}

/// Drives one round from full health to a winner.
///
/// Owns both combatants and the round clock. Every health mutation is
/// followed by the round-end check; once a winner exists all further calls
/// are silent no-ops.
#[derive(Clone, Debug)]
pub struct RoundController {
    round_index: u32,
    state: RoundState,
    clock: Tick,
    arena: ArenaConfig,
    player_profile: FighterProfile,
    opponent_profile: FighterProfile,
    player: Combatant,
    opponent: Combatant,
    /// Movement axis latched from the most recent input of each side.
    held_axis: [i32; 2],
    opponent_tracks_player: bool,
    last_striker: Option<Side>,
    record: Option<RoundRecord>,
}

impl RoundController {
    /// Places both fighters at their starting marks, facing each other.
    pub fn new(
        round_index: u32,
        arena: ArenaConfig,
        player: &FighterProfile,
        opponent: &OpponentProfile,
    ) -> Self {
        let player_facing = Facing::towards(arena.player_start, arena.opponent_start);
        let opponent_facing = Facing::towards(arena.opponent_start, arena.player_start);

        Self {
            round_index,
            state: RoundState::Starting,
            clock: Tick::ZERO,
            arena,
            player_profile: player.clone(),
            opponent_profile: opponent.fighter.clone(),
            player: Combatant::new(Side::Player, player, arena.player_start, player_facing),
            opponent: Combatant::new(
                Side::Opponent,
                &opponent.fighter,
                arena.opponent_start,
                opponent_facing,
            ),
            held_axis: [0; 2],
            opponent_tracks_player: opponent.control == ControlMode::Ai,
            last_striker: None,
            record: None,
        }
    }

    /// `Starting` → `Active`. Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state == RoundState::Starting {
            self.state = RoundState::Active;
        }
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == RoundState::Active
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.state == RoundState::Resolved
    }

    /// Milliseconds of fighting since the round started.
    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn profile(&self, side: Side) -> &FighterProfile {
        match side {
            Side::Player => &self.player_profile,
            Side::Opponent => &self.opponent_profile,
        }
    }

    /// Side that landed the most recent damaging blow.
    pub fn last_striker(&self) -> Option<Side> {
        self.last_striker
    }

    /// Finalized record, present once the round is resolved.
    pub fn record(&self) -> Option<RoundRecord> {
        self.record
    }

    pub fn winner(&self) -> RoundWinner {
        self.record.map_or(RoundWinner::None, |r| r.winner)
    }

    /// Lets `delta_ms` pass: fighters walk along their held axis and timed
    /// flags expire.
    pub fn advance(&mut self, delta_ms: u64) {
        if !self.is_active() {
            return;
        }

        let arena = self.arena;
        walk(&mut self.player, &self.player_profile, &arena, self.held_axis[0], delta_ms);
        walk(&mut self.opponent, &self.opponent_profile, &arena, self.held_axis[1], delta_ms);

        self.clock += delta_ms;
        self.player.expire_timers(self.clock);
        self.opponent.expire_timers(self.clock);

        if self.opponent_tracks_player {
            self.opponent.facing = Facing::towards(self.opponent.position, self.player.position);
        }
    }

    /// Applies one side's input at the current clock.
    ///
    /// Movement and guard are latched until the next input for that side;
    /// attack and dash fire once. A special press wins over a normal press.
    pub fn apply_input<O>(
        &mut self,
        side: Side,
        input: &SideInput,
        observer: &mut O,
    ) -> Option<AttackOutcome>
    where
        O: HitObserver + ?Sized,
    {
        if !self.is_active() {
            return None;
        }

        let now = self.clock;
        let arena = self.arena;
        let tracks = side == Side::Opponent && self.opponent_tracks_player;
        self.held_axis[Self::slot(side)] = input.axis();

        {
            let (me, foe, profile) = self.parts_mut(side);
            if tracks {
                me.facing = Facing::towards(me.position, foe.position);
            } else if input.axis() != 0 && !me.blocking {
                me.facing = if input.axis() < 0 {
                    Facing::Left
                } else {
                    Facing::Right
                };
            }
            apply_stance(me, profile, &arena, input, now);
        }

        let kind = if input.special_pressed() {
            AttackKind::Special
        } else if input.attack_pressed() {
            AttackKind::Normal
        } else {
            return None;
        };
        Some(self.attempt_attack(side, kind, observer))
    }

    /// Resolves an attack from `attacker` against the other side.
    pub fn attempt_attack<O>(&mut self, attacker: Side, kind: AttackKind, observer: &mut O) -> AttackOutcome
    where
        O: HitObserver + ?Sized,
    {
        if !self.is_active() {
            return AttackOutcome::MISS;
        }

        let arena = self.arena;
        let resolver = CombatResolver::new(&arena, self.clock, true);
        let (actor, target, profile) = self.parts_mut(attacker);
        let outcome = resolver.attempt_attack(actor, profile, target, kind, observer);

        if outcome.damage_dealt > 0 {
            self.last_striker = Some(attacker);
        }
        if outcome.hit {
            self.check_round_end();
        }
        outcome
    }

    /// Direct damage to `target`, credited to `source` for tie-breaking.
    pub fn take_damage(&mut self, target: Side, amount: u32, source: Option<Side>) -> u32 {
        if !self.is_active() {
            return 0;
        }

        let arena = self.arena;
        let resolver = CombatResolver::new(&arena, self.clock, true);
        let victim = match target {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        let dealt = resolver.take_damage(victim, amount);

        if dealt > 0 {
            if source.is_some() {
                self.last_striker = source;
            }
            self.check_round_end();
        }
        dealt
    }

    /// Settles the round if either side is down.
    ///
    /// A double knockout goes to whoever landed the final blow, or to the
    /// opponent when nobody is on record.
    fn check_round_end(&mut self) {
        let winner = match (self.player.is_defeated(), self.opponent.is_defeated()) {
            (false, false) => return,
            (false, true) => Side::Player,
            (true, false) => Side::Opponent,
            (true, true) => self.last_striker.unwrap_or(Side::Opponent),
        };

        self.state = RoundState::Resolved;
        self.held_axis = [0; 2];
        self.record = Some(RoundRecord {
            round_index: self.round_index,
            winner: winner.into(),
        });
    }

    fn slot(side: Side) -> usize {
        match side {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    fn parts_mut(&mut self, actor: Side) -> (&mut Combatant, &mut Combatant, &FighterProfile) {
        match actor {
            Side::Player => (&mut self.player, &mut self.opponent, &self.player_profile),
            Side::Opponent => (&mut self.opponent, &mut self.player, &self.opponent_profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::HitEvent;
    use crate::input::InputButtons;

    fn round() -> RoundController {
        let mut round = RoundController::new(
            1,
            ArenaConfig::default(),
            &FighterProfile::default_player(),
            &OpponentProfile::tier("Moreno", 100, 200, 10),
        );
        round.start();
        round
    }

    fn close_in(round: &mut RoundController) {
        round.player.position = 450;
        round.opponent.position = 500;
    }

    #[test]
    fn starts_fresh_and_active() {
        let round = round();
        assert!(round.is_active());
        assert_eq!(round.player().health, 100);
        assert_eq!(round.opponent().health, 100);
        assert_eq!(round.player().facing, Facing::Right);
        assert_eq!(round.opponent().facing, Facing::Left);
        assert_eq!(round.winner(), RoundWinner::None);
    }

    #[test]
    fn opponent_hit_in_range_keeps_round_active() {
        let mut round = round();
        close_in(&mut round);
        let mut hits: Vec<HitEvent> = Vec::new();

        let outcome = round.attempt_attack(Side::Opponent, AttackKind::Normal, &mut hits);

        assert!(outcome.hit);
        assert_eq!(round.player().health, 90);
        assert_eq!(round.opponent().attack_ready_at, Tick(1200));
        assert!(round.is_active());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn knockout_resolves_and_freezes_the_round() {
        let mut round = round();
        close_in(&mut round);

        assert_eq!(round.take_damage(Side::Opponent, 100, Some(Side::Player)), 100);
        assert!(round.is_resolved());
        assert_eq!(round.winner(), RoundWinner::Player);

        assert_eq!(
            round.attempt_attack(Side::Opponent, AttackKind::Normal, &mut ()),
            AttackOutcome::MISS
        );
        assert_eq!(round.take_damage(Side::Player, 10, None), 0);
        round.start();
        assert!(round.is_resolved());
    }

    #[test]
    fn double_knockout_goes_to_last_striker() {
        let mut round = round();
        round.player.health = 0;
        round.opponent.health = 0;
        round.last_striker = Some(Side::Player);
        round.check_round_end();
        assert_eq!(round.winner(), RoundWinner::Player);

        let mut round = self::round();
        round.player.health = 0;
        round.opponent.health = 0;
        round.check_round_end();
        assert_eq!(round.winner(), RoundWinner::Opponent);
    }

    #[test]
    fn held_axis_moves_fighter_until_released() {
        let mut round = round();

        round.apply_input(Side::Player, &SideInput::moving(1), &mut ());
        round.advance(250);
        assert_eq!(round.player().position, 400);

        round.advance(250);
        assert_eq!(round.player().position, 500);

        round.apply_input(Side::Player, &SideInput::IDLE, &mut ());
        round.advance(250);
        assert_eq!(round.player().position, 500);
    }

    #[test]
    fn moving_left_turns_a_human_fighter() {
        let mut round = round();
        round.apply_input(Side::Player, &SideInput::moving(-1), &mut ());
        assert_eq!(round.player().facing, Facing::Left);
    }

    #[test]
    fn special_press_wins_over_normal() {
        let mut round = round();
        close_in(&mut round);

        let input = SideInput::pressing(InputButtons::ATTACK | InputButtons::SPECIAL);
        let outcome = round.apply_input(Side::Player, &input, &mut ());

        assert_eq!(outcome.map(|o| o.damage_dealt), Some(35));
        assert_eq!(round.player().attack_ready_at, Tick(3000));
    }

    #[test]
    fn clock_expires_dash_invulnerability() {
        let mut round = round();
        round.apply_input(Side::Player, &SideInput::pressing(InputButtons::DASH), &mut ());
        assert!(round.player().invulnerable);

        round.apply_input(Side::Player, &SideInput::IDLE, &mut ());
        round.advance(1000);
        assert!(!round.player().invulnerable);
    }
}
