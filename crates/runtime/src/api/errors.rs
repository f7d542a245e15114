//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, match setup, rejected commands
//! and input providers so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;

use fight_core::{ErrorSeverity, FightError, SetupError, UsageError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} input provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("{kind} input provider failed: {reason}")]
    Provider { kind: ProviderKind, reason: String },

    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an opponent roster before building")]
    MissingRoster,

    #[error("failed to set up match")]
    Setup(#[from] SetupError),

    #[error("command rejected: {0}")]
    Rejected(#[from] UsageError),
}

impl RuntimeError {
    /// Severity of the underlying failure.
    ///
    /// Core errors keep their own classification; plumbing failures are fatal
    /// because the worker is gone.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Setup(e) => e.severity(),
            RuntimeError::Rejected(e) => e.severity(),
            RuntimeError::ProviderNotSet { .. } | RuntimeError::MissingRoster => {
                ErrorSeverity::Validation
            }
            RuntimeError::Provider { .. } => ErrorSeverity::Recoverable,
            RuntimeError::CommandChannelClosed
            | RuntimeError::ReplyChannelClosed(_)
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Fatal,
        }
    }
}

/// Failure reported by a [`TransitionSequencer`](super::TransitionSequencer).
///
/// The match treats a failed presentation as finished; the reason only ends
/// up in the `TransitionFailed` event and the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct SequencerError {
    pub reason: String,
}

impl SequencerError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Player,
    Opponent,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Player => "player",
            ProviderKind::Opponent => "opponent",
        };
        write!(f, "{}", label)
    }
}
