//! Match worker that owns the authoritative [`fight_core::MatchOrchestrator`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), forwards
//! them to the orchestrator, publishes whatever it reports to the EventBus,
//! and plays requested transitions through the configured sequencer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use fight_core::{
    InputSnapshot, MatchEvent, MatchOrchestrator, MatchSnapshot, PhaseChoice, TransitionKind,
    TransitionRequest,
};

use crate::api::{Result, TransitionSequencer};
use crate::events::{Event, EventBus, StateEvent};

/// Commands that can be sent to the match worker
pub enum Command {
    /// Queue one frame of input for the next tick.
    SubmitInput {
        input: InputSnapshot,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Advance the match clock. Replies with the resulting snapshot.
    Tick {
        delta_ms: u64,
        reply: oneshot::Sender<MatchSnapshot>,
    },
    /// Answer the defeat screen.
    Choose {
        choice: PhaseChoice,
        reply: oneshot::Sender<Result<()>>,
    },
    /// End the match. Always succeeds; the first reason sticks.
    Abort {
        reason: String,
        reply: oneshot::Sender<MatchSnapshot>,
    },
    Pause { reply: oneshot::Sender<Result<()>> },
    Resume { reply: oneshot::Sender<Result<()>> },
    /// Query the current match view (read-only).
    QuerySnapshot { reply: oneshot::Sender<MatchSnapshot> },
}

/// Result of one sequencer run, fed back into the worker loop.
struct Played {
    ticket: u64,
    kind: TransitionKind,
    outcome: std::result::Result<(), String>,
}

/// Background task that processes match commands.
///
/// The orchestrator is only ever touched from this task. Sequencer runs are
/// spawned so that a long banner never blocks input or snapshot queries;
/// they report back through an internal channel.
pub struct MatchWorker {
    orchestrator: MatchOrchestrator,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    sequencer: Arc<dyn TransitionSequencer>,
    transition_timeout: Duration,
    played_tx: mpsc::UnboundedSender<Played>,
    played_rx: mpsc::UnboundedReceiver<Played>,
    /// Ticket and task of the presentation currently playing.
    in_flight: Option<(u64, JoinHandle<()>)>,
    published_revision: Option<u64>,
}

impl MatchWorker {
    /// Creates a new match worker.
    pub fn new(
        orchestrator: MatchOrchestrator,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        sequencer: Arc<dyn TransitionSequencer>,
        transition_timeout: Duration,
    ) -> Self {
        info!(
            target: "runtime::worker",
            phase = orchestrator.state().current_phase,
            total_phases = orchestrator.state().total_phases,
            status = %orchestrator.state().status,
            "MatchWorker initialized"
        );

        let (played_tx, played_rx) = mpsc::unbounded_channel();
        Self {
            orchestrator,
            command_rx,
            event_bus,
            sequencer,
            transition_timeout,
            played_tx,
            played_rx,
            in_flight: None,
            published_revision: None,
        }
    }

    /// Main worker loop. Ends when every command sender has been dropped.
    pub async fn run(mut self) {
        // Construction may already have produced events (round 1 start, or
        // an abort for a missing opponent).
        self.flush();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(played) = self.played_rx.recv() => {
                    self.handle_played(played);
                }
            }
            self.flush();
        }

        if let Some((_, task)) = self.in_flight.take() {
            task.abort();
        }
        debug!(target: "runtime::worker", "MatchWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitInput { input, reply } => {
                let result = self.orchestrator.submit_input(input).map_err(Into::into);
                Self::log_rejection("submit_input", &result);
                if reply.send(result).is_err() {
                    debug!("SubmitInput reply channel closed (caller dropped)");
                }
            }
            Command::Tick { delta_ms, reply } => {
                self.orchestrator.tick(delta_ms);
                if reply.send(self.orchestrator.snapshot()).is_err() {
                    debug!("Tick reply channel closed (caller dropped)");
                }
            }
            Command::Choose { choice, reply } => {
                let result = self
                    .orchestrator
                    .request_phase_choice(choice)
                    .map_err(Into::into);
                Self::log_rejection("choose", &result);
                if result.is_ok() {
                    info!(target: "runtime::worker", %choice, "Defeat choice accepted");
                }
                if reply.send(result).is_err() {
                    debug!("Choose reply channel closed (caller dropped)");
                }
            }
            Command::Abort { reason, reply } => {
                self.orchestrator.abort(reason);
                if reply.send(self.orchestrator.snapshot()).is_err() {
                    debug!("Abort reply channel closed (caller dropped)");
                }
            }
            Command::Pause { reply } => {
                let result = self.orchestrator.pause().map_err(Into::into);
                Self::log_rejection("pause", &result);
                if reply.send(result).is_err() {
                    debug!("Pause reply channel closed (caller dropped)");
                }
            }
            Command::Resume { reply } => {
                let result = self.orchestrator.resume().map_err(Into::into);
                Self::log_rejection("resume", &result);
                if reply.send(result).is_err() {
                    debug!("Resume reply channel closed (caller dropped)");
                }
            }
            Command::QuerySnapshot { reply } => {
                if reply.send(self.orchestrator.snapshot()).is_err() {
                    debug!("QuerySnapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn log_rejection(command: &'static str, result: &Result<()>) {
        if let Err(error) = result {
            debug!(target: "runtime::worker", command, %error, "Command rejected");
        }
    }

    /// Reports a finished presentation to the match.
    fn handle_played(&mut self, played: Played) {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|(ticket, _)| *ticket == played.ticket)
        {
            self.in_flight = None;
        }

        if let Err(reason) = &played.outcome {
            warn!(
                target: "runtime::worker",
                ticket = played.ticket,
                kind = %played.kind,
                reason = %reason,
                "Transition presentation failed; continuing"
            );
        }

        let failure = played.outcome.as_ref().err().cloned();
        match self
            .orchestrator
            .complete_transition(played.ticket, played.outcome)
        {
            Ok(()) => {
                self.event_bus.publish(Event::State(StateEvent::TransitionPlayed {
                    ticket: played.ticket,
                    kind: played.kind,
                    failure,
                }));
            }
            // A defeat choice or an abort can overtake the presentation.
            Err(error) => {
                debug!(
                    target: "runtime::worker",
                    ticket = played.ticket,
                    %error,
                    "Ignoring stale transition completion"
                );
            }
        }
    }

    /// Publishes everything the orchestrator reported since the last flush.
    fn flush(&mut self) {
        for event in self.orchestrator.drain_events() {
            self.log_event(&event);
            if let MatchEvent::TransitionRequested(request) = &event {
                self.spawn_transition(request.clone());
            }
            self.event_bus.publish(Event::from(event));
        }

        let revision = self.orchestrator.revision();
        if self.published_revision != Some(revision) {
            self.published_revision = Some(revision);
            let snapshot = self.orchestrator.snapshot();
            self.event_bus
                .publish(Event::State(StateEvent::Updated(Box::new(snapshot))));
        }
    }

    fn log_event(&self, event: &MatchEvent) {
        match event {
            MatchEvent::Hit(hit) => trace!(
                target: "runtime::worker",
                attacker = %hit.attacker,
                kind = %hit.kind,
                damage = hit.damage,
                target_health = hit.target_health,
                "Hit"
            ),
            MatchEvent::StatusChanged { status, reason } if reason.is_some() => warn!(
                target: "runtime::worker",
                %status,
                reason = reason.as_deref().unwrap_or_default(),
                "Match ended"
            ),
            MatchEvent::StatusChanged { status, .. } => {
                info!(target: "runtime::worker", %status, "Match status changed")
            }
            MatchEvent::RoundStarted {
                phase,
                round,
                opponent,
            } => info!(target: "runtime::worker", phase, round, %opponent, "Round started"),
            MatchEvent::RoundResolved { phase, record, wins } => info!(
                target: "runtime::worker",
                phase,
                round = record.round_index,
                winner = %record.winner,
                player_wins = wins.player,
                opponent_wins = wins.opponent,
                "Round resolved"
            ),
            other => info!(target: "runtime::worker", event = other.name(), "Match event"),
        }
    }

    /// Plays `request` on a separate task, bounded by the transition timeout.
    fn spawn_transition(&mut self, request: TransitionRequest) {
        if let Some((_, previous)) = self.in_flight.take() {
            previous.abort();
        }
        let ticket = request.ticket;

        let sequencer = Arc::clone(&self.sequencer);
        let played_tx = self.played_tx.clone();
        let timeout = self.transition_timeout;

        let task = tokio::spawn(async move {
            let outcome = match tokio::time::timeout(timeout, sequencer.play(&request)).await {
                Ok(Ok(())) => Ok(()),
                Ok(Err(error)) => Err(error.to_string()),
                Err(_) => Err(format!(
                    "presentation timed out after {}ms",
                    timeout.as_millis()
                )),
            };
            let played = Played {
                ticket: request.ticket,
                kind: request.kind,
                outcome,
            };
            if played_tx.send(played).is_err() {
                trace!(target: "runtime::sequencer", "Worker gone before transition finished");
            }
        });
        self.in_flight = Some((ticket, task));
    }
}
