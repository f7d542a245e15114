//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod errors;
pub mod handle;
pub mod providers;
pub mod sequencer;

pub use errors::{ProviderKind, Result, RuntimeError, SequencerError};
pub use handle::RuntimeHandle;
pub use providers::{IdleInputProvider, InputProvider, ScriptedInputProvider};
pub use sequencer::{BannerSequencer, ImmediateSequencer, TransitionSequencer};
