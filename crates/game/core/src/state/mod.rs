//! Match state representation.
//!
//! Combatants, round/phase records and match counters. Hosts read these
//! through [`MatchSnapshot`]; only the engine controllers mutate them.
mod bootstrap;
mod combatant;
mod match_state;
mod records;
mod snapshot;
pub mod types;

#[cfg(feature = "serde")]
pub use bootstrap::BootstrapCodecError;
pub use bootstrap::SessionBootstrap;
pub use combatant::Combatant;
pub use match_state::{MatchState, MatchStatus};
pub use records::{PhaseRecord, PhaseVerdict, RoundRecord, RoundWinner, RoundWins};
pub use snapshot::{MatchSnapshot, Stage};
pub use types::{Facing, Side, Tick};
