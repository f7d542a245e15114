//! Async host for the deterministic match core.
//!
//! This crate wires together the input provider abstraction, transition
//! sequencing, and the match worker into a cohesive runtime API. Consumers
//! embed [`Runtime`] to step frames, subscribe to events, and answer the
//! defeat screen through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    BannerSequencer, IdleInputProvider, ImmediateSequencer, InputProvider, ProviderKind, Result,
    RuntimeError, RuntimeHandle, ScriptedInputProvider, SequencerError, TransitionSequencer,
};
pub use events::{Event, EventBus, StateEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
