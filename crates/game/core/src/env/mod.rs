//! Read-only match environment.
//!
//! Opponent records are looked up by phase index through [`RosterOracle`];
//! the opponent's chance-gated decisions go through an injected
//! [`SpecialPolicy`] fed by a seeded [`RngState`].
mod rng;
mod roster;

pub use rng::{ChancePolicy, NeverSpecial, ProfileChance, RngState, SpecialPolicy};
pub use roster::{AiProfile, ControlMode, OpponentProfile, RosterOracle, StaticRoster};
