use super::combatant::Combatant;
use super::match_state::MatchStatus;
use super::records::RoundWins;
use super::types::Tick;

/// Where the orchestrator is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// A round is being fought (or about to start) inside the current phase.
    PhaseActive,
    /// Inert until the sequencer reports the pending transition as complete.
    AwaitingTransition,
    /// The defeat choices are on screen.
    AwaitingChoice,
    /// Terminal: nothing else will happen.
    Finished,
}

/// Read-only view published to the host after every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    /// Increments on every published change.
    pub revision: u64,
    pub player_health: u32,
    pub player_max_health: u32,
    pub opponent_health: u32,
    pub opponent_max_health: u32,
    pub opponent_name: Option<String>,
    pub current_round: u32,
    pub phase_round_wins: RoundWins,
    pub current_phase: u32,
    pub total_phases: u32,
    pub match_status: MatchStatus,
    pub stage: Stage,
    pub paused: bool,
    pub abort_reason: Option<String>,
    /// Live fighters of the current round, player first.
    pub fighters: Option<[Combatant; 2]>,
    /// Time elapsed in the current round.
    pub round_clock: Tick,
}

impl MatchSnapshot {
    /// True while a round is being fought and input would be accepted.
    pub fn accepts_input(&self) -> bool {
        self.stage == Stage::PhaseActive && !self.paused && !self.match_status.is_terminal()
    }
}
