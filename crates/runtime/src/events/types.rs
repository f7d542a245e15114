//! Event payloads published by the match worker.

use serde::{Deserialize, Serialize};

use fight_core::{MatchSnapshot, TransitionKind};

/// Host-facing state updates that are not part of the match's own event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateEvent {
    /// The match changed; carries the view after the command that changed it.
    Updated(Box<MatchSnapshot>),

    /// A transition presentation finished and was reported back to the match.
    TransitionPlayed {
        ticket: u64,
        kind: TransitionKind,
        /// `None` on success, the failure or timeout reason otherwise.
        failure: Option<String>,
    },
}
