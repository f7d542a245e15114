/// Match-level outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MatchStatus {
    InProgress,
    PlayerVictory,
    PlayerDefeat,
    Aborted,
}

impl MatchStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, MatchStatus::InProgress)
    }
}

/// Match-wide counters. Only the orchestrator mutates this.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub current_phase: u32,
    pub total_phases: u32,
    /// Phases the player has cleared on the way to `current_phase`, the
    /// final one included after a victory. Going back a phase un-clears it.
    pub phase_wins_by_player: u32,
    pub status: MatchStatus,
    pub abort_reason: Option<String>,
}

impl MatchState {
    pub fn new(current_phase: u32, total_phases: u32) -> Self {
        debug_assert!(current_phase >= 1 && current_phase <= total_phases);
        Self {
            current_phase,
            total_phases,
            // Phases below the resume point were cleared by the player.
            phase_wins_by_player: current_phase - 1,
            status: MatchStatus::InProgress,
            abort_reason: None,
        }
    }

    #[inline]
    pub fn is_final_phase(&self) -> bool {
        self.current_phase >= self.total_phases
    }
}
