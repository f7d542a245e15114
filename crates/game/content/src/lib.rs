//! Data-driven match content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Match configuration (data-driven via TOML)
//! - Opponent roster, one entry per phase (data-driven via RON)
//!
//! A default set of both files is compiled in, so a match can start without a
//! data directory. Content is consumed by the runtime and never appears in
//! match state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, MatchContent, OpponentEntry, RosterLoader};
