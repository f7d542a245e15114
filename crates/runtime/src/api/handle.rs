//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the match or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use fight_core::{InputSnapshot, MatchSnapshot, PhaseChoice};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Queue one frame of input; it is resolved on the next [`tick`](Self::tick).
    ///
    /// Rejected (with no effect) outside an active round or while paused.
    pub async fn submit_input(&self, input: InputSnapshot) -> Result<()> {
        self.request(|reply| Command::SubmitInput { input, reply })
            .await?
    }

    /// Advance the match clock by `delta_ms` and return the resulting view.
    pub async fn tick(&self, delta_ms: u64) -> Result<MatchSnapshot> {
        self.request(|reply| Command::Tick { delta_ms, reply }).await
    }

    /// Answer the defeat screen.
    pub async fn choose(&self, choice: PhaseChoice) -> Result<()> {
        self.request(|reply| Command::Choose { choice, reply })
            .await?
    }

    /// End the match from any state.
    pub async fn abort(&self, reason: impl Into<String>) -> Result<MatchSnapshot> {
        let reason = reason.into();
        self.request(|reply| Command::Abort { reason, reply }).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| Command::Pause { reply }).await?
    }

    pub async fn resume(&self) -> Result<()> {
        self.request(|reply| Command::Resume { reply }).await?
    }

    /// Query the current match view (read-only snapshot)
    pub async fn snapshot(&self) -> Result<MatchSnapshot> {
        self.request(|reply| Command::QuerySnapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Match` - Rounds, phases, transitions and status changes
    /// - `Topic::Combat` - Hits
    /// - `Topic::State` - Snapshots and transition reports
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use fight_runtime::Topic;
    ///
    /// let mut hits = handle.subscribe(Topic::Combat).await;
    /// while let Ok(event) = hits.recv().await {
    ///     // Flash the health bar
    /// }
    /// ```
    pub async fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic).await
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub async fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
