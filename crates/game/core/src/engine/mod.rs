//! Match controllers.
//!
//! [`MatchOrchestrator`] is the only entry point hosts drive. It owns the
//! [`MatchState`](crate::state::MatchState) and one transient
//! [`PhaseController`], which in turn owns one [`RoundController`] at a time.
//! Presentation requests leave through [`MatchEvent::TransitionRequested`] and
//! come back through [`MatchOrchestrator::complete_transition`].

mod errors;
mod events;
mod orchestrator;
mod phase;
mod round;

pub use errors::{SetupError, UsageError};
pub use events::{MatchEvent, PhaseChoice, TransitionKind, TransitionRequest};
pub use orchestrator::{MatchOrchestrator, validate_config};
pub use phase::{PhaseController, PhaseStep};
pub use round::{RoundController, RoundState};
