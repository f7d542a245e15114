//! High-level runtime orchestrator.
//!
//! The runtime owns the match worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive a match.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use fight_core::{
    InputSnapshot, MatchConfig, MatchOrchestrator, MatchSnapshot, ProfileChance, RosterOracle,
    SessionBootstrap, SpecialPolicy,
};

use crate::api::{
    IdleInputProvider, ImmediateSequencer, InputProvider, ProviderKind, Result, RuntimeError,
    RuntimeHandle, TransitionSequencer,
};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, MatchWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Upper bound on a single transition presentation. A sequencer that
    /// takes longer is reported as failed and the match moves on.
    pub transition_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            transition_timeout: Duration::from_secs(10),
        }
    }
}

/// Main runtime that hosts one match
///
/// Runtime owns the worker and the input providers.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,

    player_provider: Option<Box<dyn InputProvider>>,
    opponent_provider: Option<Box<dyn InputProvider>>,

    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to match events on one topic
    pub async fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic).await
    }

    /// Run one frame: gather input from the providers, queue it, then
    /// advance the clock by `delta_ms`.
    ///
    /// Input is only gathered while a round is being fought; otherwise the
    /// frame just ticks. Requires a player provider.
    pub async fn step(&mut self, delta_ms: u64) -> Result<MatchSnapshot> {
        let player_provider =
            self.player_provider
                .as_ref()
                .ok_or(RuntimeError::ProviderNotSet {
                    kind: ProviderKind::Player,
                })?;

        let snapshot = self.handle.snapshot().await?;
        if snapshot.accepts_input() {
            let player = player_provider.provide_input(&snapshot).await?;
            // The match ignores this half while the opponent is AI-driven.
            let opponent = match &self.opponent_provider {
                Some(provider) => provider.provide_input(&snapshot).await?,
                None => IdleInputProvider.provide_input(&snapshot).await?,
            };
            self.handle
                .submit_input(InputSnapshot { player, opponent })
                .await?;
        }

        self.handle.tick(delta_ms).await
    }

    /// Set the player input provider
    pub fn set_player_provider(&mut self, provider: impl InputProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the opponent input provider (used only for human-controlled opponents)
    pub fn set_opponent_provider(&mut self, provider: impl InputProvider + 'static) {
        self.opponent_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    match_config: MatchConfig,
    roster: Option<Box<dyn RosterOracle>>,
    sequencer: Option<Arc<dyn TransitionSequencer>>,
    special_policy: Option<Box<dyn SpecialPolicy>>,
    bootstrap: SessionBootstrap,
    player_provider: Option<Box<dyn InputProvider>>,
    opponent_provider: Option<Box<dyn InputProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            match_config: MatchConfig::default(),
            roster: None,
            sequencer: None,
            special_policy: None,
            bootstrap: SessionBootstrap::FRESH,
            player_provider: None,
            opponent_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Match rules (rounds per phase, phases, player profile, seed)
    pub fn match_config(mut self, match_config: MatchConfig) -> Self {
        self.match_config = match_config;
        self
    }

    /// Set required opponent roster
    pub fn roster(mut self, roster: impl RosterOracle + 'static) -> Self {
        self.roster = Some(Box::new(roster));
        self
    }

    /// Set the transition sequencer (default: [`ImmediateSequencer`])
    pub fn sequencer(mut self, sequencer: impl TransitionSequencer + 'static) -> Self {
        self.sequencer = Some(Arc::new(sequencer));
        self
    }

    /// Override the opponent special-attack policy.
    ///
    /// Defaults to [`ProfileChance`], which rolls against each opponent's
    /// own `special_chance_percent`.
    pub fn special_policy(mut self, policy: impl SpecialPolicy + 'static) -> Self {
        self.special_policy = Some(Box::new(policy));
        self
    }

    /// Resume a match mid-phase instead of starting fresh
    pub fn bootstrap(mut self, bootstrap: SessionBootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Set player input provider (required for [`Runtime::step`])
    pub fn player_provider(mut self, provider: impl InputProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Set opponent input provider (optional)
    pub fn opponent_provider(mut self, provider: impl InputProvider + 'static) -> Self {
        self.opponent_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;

        let policy = self
            .special_policy
            .unwrap_or_else(|| Box::new(ProfileChance));

        let orchestrator =
            MatchOrchestrator::from_bootstrap(self.match_config, roster, policy, self.bootstrap)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sequencer = self
            .sequencer
            .unwrap_or_else(|| Arc::new(ImmediateSequencer));

        let worker = MatchWorker::new(
            orchestrator,
            command_rx,
            event_bus,
            sequencer,
            self.config.transition_timeout,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            opponent_provider: self.opponent_provider,
            worker_handle,
        })
    }
}
