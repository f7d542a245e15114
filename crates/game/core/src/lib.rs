//! Deterministic match logic for a one-on-one arcade fighter.
//!
//! `fight-core` defines the canonical rules (combat, rounds, phases, match
//! progression) and exposes pure APIs reused by the runtime and by tests.
//! All match-level mutation flows through [`engine::MatchOrchestrator`];
//! nothing here sleeps, spawns, or reads a wall clock.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod input;
pub mod state;

pub use combat::{AttackKind, AttackOutcome, CombatResolver, HitEvent, HitObserver, OpponentAi};
pub use config::{ArenaConfig, AttackProfile, DashProfile, FighterProfile, MatchConfig};
pub use engine::{
    MatchEvent, MatchOrchestrator, PhaseChoice, PhaseController, PhaseStep, RoundController,
    RoundState, SetupError, TransitionKind, TransitionRequest, UsageError,
};
pub use env::{
    AiProfile, ChancePolicy, ControlMode, NeverSpecial, OpponentProfile, ProfileChance, RngState,
    RosterOracle, SpecialPolicy, StaticRoster,
};
pub use error::{ErrorSeverity, FightError};
pub use input::{InputButtons, InputSnapshot, SideInput};
pub use state::{
    Combatant, Facing, MatchSnapshot, MatchState, MatchStatus, PhaseRecord, PhaseVerdict,
    RoundRecord, RoundWinner, RoundWins, SessionBootstrap, Side, Stage, Tick,
};
