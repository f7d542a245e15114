//! Errors surfaced by the match controllers.

use crate::error::{ErrorSeverity, FightError};
use crate::state::{MatchStatus, Stage};

/// Rejected configuration or resume parameters. Nothing was constructed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("rounds per phase must be odd and non-zero (got {rounds})")]
    InvalidRoundCount { rounds: u8 },

    #[error("a match needs at least one phase")]
    NoPhases,

    #[error("fighter '{name}' is invalid: {reason}")]
    InvalidFighter { name: String, reason: String },

    #[error("arena is invalid: {reason}")]
    InvalidArena { reason: String },

    #[error("no opponent configured for phase {phase}")]
    MissingOpponent { phase: u32 },

    #[error("bootstrap phase {phase} is outside 1..={total_phases}")]
    BootstrapPhaseOutOfRange { phase: u32, total_phases: u32 },

    #[error(
        "bootstrap phase is already decided ({player_wins}-{enemy_wins}, threshold {threshold})"
    )]
    BootstrapPhaseAlreadyDecided {
        player_wins: u8,
        enemy_wins: u8,
        threshold: u8,
    },

    #[error("bootstrap round {current_round} does not follow the recorded wins (expected {expected})")]
    BootstrapRoundMismatch { current_round: u32, expected: u32 },
}

impl FightError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingOpponent { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoundCount { .. } => "SETUP_INVALID_ROUND_COUNT",
            Self::NoPhases => "SETUP_NO_PHASES",
            Self::InvalidFighter { .. } => "SETUP_INVALID_FIGHTER",
            Self::InvalidArena { .. } => "SETUP_INVALID_ARENA",
            Self::MissingOpponent { .. } => "SETUP_MISSING_OPPONENT",
            Self::BootstrapPhaseOutOfRange { .. } => "SETUP_BOOTSTRAP_PHASE_OUT_OF_RANGE",
            Self::BootstrapPhaseAlreadyDecided { .. } => "SETUP_BOOTSTRAP_PHASE_DECIDED",
            Self::BootstrapRoundMismatch { .. } => "SETUP_BOOTSTRAP_ROUND_MISMATCH",
        }
    }
}

/// A host call that is not valid in the orchestrator's current stage.
///
/// The orchestrator state is left untouched when one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsageError {
    #[error("no round is being fought (stage: {stage})")]
    RoundNotActive { stage: Stage },

    #[error("the match is paused")]
    Paused,

    #[error("no defeat choice is pending (stage: {stage})")]
    NoChoicePending { stage: Stage },

    #[error("transition ticket {ticket} is not pending")]
    UnknownTransition { ticket: u64 },

    #[error("the match is over ({status})")]
    MatchFinished { status: MatchStatus },
}

impl FightError for UsageError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RoundNotActive { .. } | Self::Paused => ErrorSeverity::Recoverable,
            Self::NoChoicePending { .. } | Self::MatchFinished { .. } => ErrorSeverity::Validation,
            Self::UnknownTransition { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RoundNotActive { .. } => "USAGE_ROUND_NOT_ACTIVE",
            Self::Paused => "USAGE_PAUSED",
            Self::NoChoicePending { .. } => "USAGE_NO_CHOICE_PENDING",
            Self::UnknownTransition { .. } => "USAGE_UNKNOWN_TRANSITION",
            Self::MatchFinished { .. } => "USAGE_MATCH_FINISHED",
        }
    }
}
