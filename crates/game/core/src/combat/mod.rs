//! Combat rules.
//!
//! - `resolver`: attack and damage application between two combatants
//! - `motion`: walking, guard and dash
//! - `ai`: distance-driven input synthesis for computer-controlled fighters
//!
//! Everything here is deterministic given the round clock and, for the AI,
//! an explicit [`crate::env::RngState`].

mod ai;
mod motion;
mod resolver;

pub use ai::OpponentAi;
pub use motion::{apply_stance, try_dash, update_block, walk};
pub use resolver::{AttackKind, AttackOutcome, CombatResolver, HitEvent, HitObserver};
