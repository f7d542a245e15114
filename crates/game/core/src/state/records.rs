use super::types::Side;

/// Outcome of one round. `None` only while the round is still being fought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RoundWinner {
    Player,
    Opponent,
    None,
}

impl From<Side> for RoundWinner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => RoundWinner::Player,
            Side::Opponent => RoundWinner::Opponent,
        }
    }
}

/// Finalized result of a round. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundRecord {
    pub round_index: u32,
    pub winner: RoundWinner,
}

/// Rounds taken by each side within the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundWins {
    pub player: u8,
    pub opponent: u8,
}

impl RoundWins {
    pub const fn new(player: u8, opponent: u8) -> Self {
        Self { player, opponent }
    }

    /// Number of rounds finalized so far in the phase.
    #[inline]
    pub fn total(&self) -> u32 {
        u32::from(self.player) + u32::from(self.opponent)
    }

    pub(crate) fn credit(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Opponent => self.opponent += 1,
        }
    }
}

/// Phase state as seen from outside the phase controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PhaseVerdict {
    Ongoing,
    PlayerWonPhase,
    OpponentWonPhase,
}

/// Bookkeeping for one phase against one opponent tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseRecord {
    pub phase_index: u32,
    pub total_phases: u32,
    pub round_wins: RoundWins,
    pub verdict: PhaseVerdict,
}
