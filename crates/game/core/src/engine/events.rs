//! Outbound events and transition hand-off types.

use crate::combat::HitEvent;
use crate::state::{MatchStatus, PhaseRecord, RoundRecord, RoundWins};

/// What a between-phase presentation is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TransitionKind {
    AdvancePhase,
    RetryPhase,
    RegressPhase,
    Victory,
    Defeat,
}

/// A presentation the host must play before the match continues.
///
/// The orchestrator is inert until
/// [`complete_transition`](super::MatchOrchestrator::complete_transition) is
/// called with this `ticket`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRequest {
    pub ticket: u64,
    pub kind: TransitionKind,
    pub from_phase: u32,
    /// Phase that will be active once the transition completes.
    pub target_phase: u32,
    pub message: String,
}

/// Answer to the defeat screen.
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
pub enum PhaseChoice {
    /// Fight the same opponent again from round 1.
    Retry,
    /// Return to the previous phase's opponent.
    GoBack,
    /// Leave the match.
    Menu,
}

/// Everything the orchestrator reports to its host, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchEvent {
    RoundStarted {
        phase: u32,
        round: u32,
        opponent: String,
    },
    Hit(HitEvent),
    RoundResolved {
        phase: u32,
        record: RoundRecord,
        wins: RoundWins,
    },
    PhaseDecided(PhaseRecord),
    TransitionRequested(TransitionRequest),
    /// The sequencer reported a failure; the transition counts as complete anyway.
    TransitionFailed {
        ticket: u64,
        reason: String,
    },
    DefeatChoicesOffered {
        phase: u32,
        can_go_back: bool,
    },
    StatusChanged {
        status: MatchStatus,
        reason: Option<String>,
    },
}

impl MatchEvent {
    /// Short label used for log lines and topic routing.
    pub fn name(&self) -> &'static str {
        match self {
            MatchEvent::RoundStarted { .. } => "round_started",
            MatchEvent::Hit(_) => "hit",
            MatchEvent::RoundResolved { .. } => "round_resolved",
            MatchEvent::PhaseDecided(_) => "phase_decided",
            MatchEvent::TransitionRequested(_) => "transition_requested",
            MatchEvent::TransitionFailed { .. } => "transition_failed",
            MatchEvent::DefeatChoicesOffered { .. } => "defeat_choices_offered",
            MatchEvent::StatusChanged { .. } => "status_changed",
        }
    }
}
