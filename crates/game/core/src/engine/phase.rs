//! Best-of-N sequence of rounds against one opponent.

use crate::config::{ArenaConfig, FighterProfile, MatchConfig};
use crate::env::OpponentProfile;
use crate::state::{PhaseRecord, PhaseVerdict, RoundRecord, RoundWinner, RoundWins, Side};

use super::round::RoundController;

/// What happened when a resolved round was handed to the phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseStep {
    /// The current round is still being fought, or the phase is already decided.
    Continue,
    /// The round was counted and the next one has started.
    NextRound(RoundRecord),
    /// The round was counted and settled the phase.
    Decided(RoundRecord, PhaseRecord),
}

/// Runs rounds one at a time until either side reaches the win threshold.
#[derive(Clone, Debug)]
pub struct PhaseController {
    phase_index: u32,
    total_phases: u32,
    threshold: u8,
    wins: RoundWins,
    verdict: PhaseVerdict,
    arena: ArenaConfig,
    player: FighterProfile,
    opponent: OpponentProfile,
    round: RoundController,
    history: Vec<RoundRecord>,
}

impl PhaseController {
    /// Fresh phase at round 1.
    pub fn new(phase_index: u32, config: &MatchConfig, opponent: OpponentProfile) -> Self {
        Self::resume(phase_index, config, opponent, RoundWins::default())
    }

    /// Phase that already counts `wins`; the next round is `wins.total() + 1`.
    ///
    /// The caller guarantees neither counter has reached the threshold.
    pub fn resume(
        phase_index: u32,
        config: &MatchConfig,
        opponent: OpponentProfile,
        wins: RoundWins,
    ) -> Self {
        let threshold = config.win_threshold();
        debug_assert!(wins.player < threshold && wins.opponent < threshold);

        let round = Self::fresh_round(wins.total() + 1, config.arena, &config.player, &opponent);
        Self {
            phase_index,
            total_phases: config.total_phases,
            threshold,
            wins,
            verdict: PhaseVerdict::Ongoing,
            arena: config.arena,
            player: config.player.clone(),
            opponent,
            round,
            history: Vec::new(),
        }
    }

    pub fn phase_index(&self) -> u32 {
        self.phase_index
    }

    pub fn round_wins(&self) -> RoundWins {
        self.wins
    }

    pub fn verdict(&self) -> PhaseVerdict {
        self.verdict
    }

    pub fn is_decided(&self) -> bool {
        self.verdict != PhaseVerdict::Ongoing
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn opponent(&self) -> &OpponentProfile {
        &self.opponent
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn round_mut(&mut self) -> &mut RoundController {
        &mut self.round
    }

    /// Rounds finalized since this controller was built.
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn record(&self) -> PhaseRecord {
        PhaseRecord {
            phase_index: self.phase_index,
            total_phases: self.total_phases,
            round_wins: self.wins,
            verdict: self.verdict,
        }
    }

    /// Counts the current round if it has resolved.
    ///
    /// Exactly one counter moves per round. When neither side has reached the
    /// threshold, the next round starts immediately.
    pub fn on_round_resolved(&mut self) -> PhaseStep {
        if self.is_decided() {
            return PhaseStep::Continue;
        }
        let Some(record) = self.round.record() else {
            return PhaseStep::Continue;
        };

        let side = match record.winner {
            RoundWinner::Player => Side::Player,
            RoundWinner::Opponent => Side::Opponent,
            RoundWinner::None => {
                debug_assert!(false, "resolved round without a winner");
                return PhaseStep::Continue;
            }
        };
        self.wins.credit(side);
        self.history.push(record);

        if self.wins.player >= self.threshold {
            self.verdict = PhaseVerdict::PlayerWonPhase;
        } else if self.wins.opponent >= self.threshold {
            self.verdict = PhaseVerdict::OpponentWonPhase;
        }

        if self.is_decided() {
            return PhaseStep::Decided(record, self.record());
        }

        self.round = Self::fresh_round(self.wins.total() + 1, self.arena, &self.player, &self.opponent);
        PhaseStep::NextRound(record)
    }

    fn fresh_round(
        index: u32,
        arena: ArenaConfig,
        player: &FighterProfile,
        opponent: &OpponentProfile,
    ) -> RoundController {
        let mut round = RoundController::new(index, arena, player, opponent);
        round.start();
        round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase() -> PhaseController {
        PhaseController::new(
            1,
            &MatchConfig::default(),
            OpponentProfile::tier("Moreno", 100, 200, 8),
        )
    }

    fn knock_out(phase: &mut PhaseController, loser: Side) -> PhaseStep {
        phase
            .round_mut()
            .take_damage(loser, u32::MAX, Some(loser.other()));
        phase.on_round_resolved()
    }

    #[test]
    fn unresolved_round_is_not_counted() {
        let mut phase = phase();
        assert_eq!(phase.on_round_resolved(), PhaseStep::Continue);
        assert_eq!(phase.round_wins(), RoundWins::default());
    }

    #[test]
    fn lost_round_starts_the_next_one() {
        let mut phase = phase();

        let step = knock_out(&mut phase, Side::Player);

        assert!(matches!(step, PhaseStep::NextRound(r) if r.winner == RoundWinner::Opponent));
        assert_eq!(phase.round_wins(), RoundWins::new(0, 1));
        assert_eq!(phase.round().round_index(), 2);
        assert!(phase.round().is_active());
        assert_eq!(phase.round().player().health, 100);
    }

    #[test]
    fn two_wins_decide_the_phase() {
        let mut phase = phase();

        knock_out(&mut phase, Side::Opponent);
        knock_out(&mut phase, Side::Player);
        let step = knock_out(&mut phase, Side::Opponent);

        match step {
            PhaseStep::Decided(round, record) => {
                assert_eq!(round.round_index, 3);
                assert_eq!(record.verdict, PhaseVerdict::PlayerWonPhase);
                assert_eq!(record.round_wins, RoundWins::new(2, 1));
            }
            other => panic!("expected decided phase, got {other:?}"),
        }
        assert_eq!(phase.history().len(), 3);

        // The decided phase no longer counts anything.
        assert_eq!(phase.on_round_resolved(), PhaseStep::Continue);
        assert_eq!(phase.round_wins().total(), 3);
    }

    #[test]
    fn resumes_mid_phase() {
        let phase = PhaseController::resume(
            2,
            &MatchConfig::default(),
            OpponentProfile::tier("Cidão", 120, 180, 10),
            RoundWins::new(1, 0),
        );
        assert_eq!(phase.round_wins(), RoundWins::new(1, 0));
        assert_eq!(phase.round().round_index(), 2);
        assert_eq!(phase.verdict(), PhaseVerdict::Ongoing);
    }
}
