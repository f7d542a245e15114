//! Top-level match driver.

use std::collections::VecDeque;

use crate::combat::{HitEvent, OpponentAi};
use crate::config::MatchConfig;
use crate::env::{ControlMode, RngState, RosterOracle, SpecialPolicy};
use crate::input::InputSnapshot;
use crate::state::{
    MatchSnapshot, MatchState, MatchStatus, PhaseRecord, PhaseVerdict, RoundWins, SessionBootstrap,
    Side, Stage, Tick,
};

use super::errors::{SetupError, UsageError};
use super::events::{MatchEvent, PhaseChoice, TransitionKind, TransitionRequest};
use super::phase::{PhaseController, PhaseStep};
use super::round::RoundController;

/// Owns the match: phase and round indices, cumulative counters, and the
/// single pending transition.
///
/// The orchestrator never waits. Time passes only through [`tick`], and a
/// requested transition keeps it inert until [`complete_transition`] is
/// called with the request's ticket.
///
/// [`tick`]: MatchOrchestrator::tick
/// [`complete_transition`]: MatchOrchestrator::complete_transition
pub struct MatchOrchestrator {
    config: MatchConfig,
    roster: Box<dyn RosterOracle>,
    policy: Box<dyn SpecialPolicy>,
    rng: RngState,
    state: MatchState,
    stage: Stage,
    phase: Option<PhaseController>,
    pending: Option<TransitionRequest>,
    next_ticket: u64,
    queued: VecDeque<InputSnapshot>,
    paused: bool,
    revision: u64,
    outbox: Vec<MatchEvent>,
}

impl MatchOrchestrator {
    /// Starts a new match at phase 1, round 1.
    pub fn new(
        config: MatchConfig,
        roster: Box<dyn RosterOracle>,
        policy: Box<dyn SpecialPolicy>,
    ) -> Result<Self, SetupError> {
        Self::from_bootstrap(config, roster, policy, SessionBootstrap::FRESH)
    }

    /// Rebuilds a match from the four numbers a host keeps across reloads.
    ///
    /// A missing opponent for the bootstrap phase is not a setup error: the
    /// orchestrator is returned already `Aborted` with the reason attached.
    pub fn from_bootstrap(
        config: MatchConfig,
        roster: Box<dyn RosterOracle>,
        policy: Box<dyn SpecialPolicy>,
        bootstrap: SessionBootstrap,
    ) -> Result<Self, SetupError> {
        validate_config(&config)?;
        bootstrap.validate(&config)?;

        let mut orchestrator = Self {
            rng: RngState::new(config.seed),
            state: MatchState::new(bootstrap.current_phase, config.total_phases),
            config,
            roster,
            policy,
            stage: Stage::PhaseActive,
            phase: None,
            pending: None,
            next_ticket: 1,
            queued: VecDeque::new(),
            paused: false,
            revision: 0,
            outbox: Vec::new(),
        };
        orchestrator.enter_phase(
            bootstrap.current_phase,
            RoundWins::new(bootstrap.player_wins, bootstrap.enemy_wins),
        );
        Ok(orchestrator)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Option<&PhaseController> {
        self.phase.as_ref()
    }

    pub fn round(&self) -> Option<&RoundController> {
        self.phase.as_ref().map(PhaseController::round)
    }

    pub fn pending_transition(&self) -> Option<&TransitionRequest> {
        self.pending.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Takes every event produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Queues one frame of input. It is resolved on the next [`tick`](Self::tick).
    pub fn submit_input(&mut self, input: InputSnapshot) -> Result<(), UsageError> {
        self.ensure_running()?;
        if self.paused {
            return Err(UsageError::Paused);
        }
        if self.stage != Stage::PhaseActive {
            return Err(UsageError::RoundNotActive { stage: self.stage });
        }
        self.queued.push_back(input);
        Ok(())
    }

    /// Lets `delta_ms` of match time pass.
    ///
    /// Queued inputs are resolved in submission order, then the AI acts,
    /// then round and phase outcomes are evaluated. Outside an active phase,
    /// or while paused, this does nothing.
    pub fn tick(&mut self, delta_ms: u64) {
        if self.state.status.is_terminal() || self.paused || self.stage != Stage::PhaseActive {
            return;
        }
        let Some(phase) = self.phase.as_mut() else {
            return;
        };

        let control = phase.opponent().control;
        let ai_profile = phase.opponent().ai;
        let mut hits: Vec<HitEvent> = Vec::new();

        let round = phase.round_mut();
        let before = (round.clock(), round.player().clone(), round.opponent().clone());
        round.advance(delta_ms);

        for input in self.queued.drain(..) {
            round.apply_input(Side::Player, &input.player, &mut hits);
            if control == ControlMode::Human {
                round.apply_input(Side::Opponent, &input.opponent, &mut hits);
            }
        }

        if control == ControlMode::Ai && round.is_active() {
            let decision = OpponentAi::new(&ai_profile).decide(
                round.opponent(),
                round.player(),
                round.clock(),
                self.policy.as_ref(),
                &mut self.rng,
            );
            round.apply_input(Side::Opponent, &decision, &mut hits);
        }

        // Walking, guarding and the clock change the view without any event.
        let changed = before != (round.clock(), round.player().clone(), round.opponent().clone());

        let step = phase.on_round_resolved();
        let phase_index = phase.phase_index();
        let wins = phase.round_wins();
        let next_round = phase.round().round_index();
        let opponent = phase.opponent().fighter.name.clone();

        for hit in hits {
            self.emit(MatchEvent::Hit(hit));
        }

        match step {
            PhaseStep::Continue => {}
            PhaseStep::NextRound(record) => {
                self.emit(MatchEvent::RoundResolved {
                    phase: phase_index,
                    record,
                    wins,
                });
                self.emit(MatchEvent::RoundStarted {
                    phase: phase_index,
                    round: next_round,
                    opponent,
                });
            }
            PhaseStep::Decided(record, phase_record) => {
                self.emit(MatchEvent::RoundResolved {
                    phase: phase_index,
                    record,
                    wins,
                });
                self.on_phase_decided(phase_record);
            }
        }
        if changed {
            self.touch();
        }
    }

    /// Answers the defeat screen.
    ///
    /// Accepted while the choices are shown, and also while the defeat
    /// presentation is still playing (the choice completes it).
    pub fn request_phase_choice(&mut self, choice: PhaseChoice) -> Result<(), UsageError> {
        self.ensure_running()?;

        let defeat_showing = self.config.continue_on_defeat
            && self.stage == Stage::AwaitingTransition
            && self
                .pending
                .as_ref()
                .is_some_and(|p| p.kind == TransitionKind::Defeat);
        if self.stage != Stage::AwaitingChoice && !defeat_showing {
            return Err(UsageError::NoChoicePending { stage: self.stage });
        }
        self.pending = None;

        let current = self.state.current_phase;
        match choice {
            PhaseChoice::Retry => self.request_transition(TransitionKind::RetryPhase, current),
            PhaseChoice::GoBack if current > 1 => {
                self.request_transition(TransitionKind::RegressPhase, current - 1)
            }
            PhaseChoice::GoBack => self.abort_with("cannot go back from the first phase".to_owned()),
            PhaseChoice::Menu => self.abort_with("player returned to the menu".to_owned()),
        }
        Ok(())
    }

    /// Reports that the presentation for `ticket` has finished.
    ///
    /// A failed presentation is recorded and then treated exactly like a
    /// successful one.
    pub fn complete_transition(
        &mut self,
        ticket: u64,
        outcome: Result<(), String>,
    ) -> Result<(), UsageError> {
        let request = match self.pending.take() {
            Some(request) if request.ticket == ticket => request,
            other => {
                self.pending = other;
                return Err(UsageError::UnknownTransition { ticket });
            }
        };

        if let Err(reason) = outcome {
            self.emit(MatchEvent::TransitionFailed { ticket, reason });
        }

        match request.kind {
            TransitionKind::AdvancePhase | TransitionKind::RetryPhase => {
                self.enter_phase(request.target_phase, RoundWins::default());
            }
            TransitionKind::RegressPhase => {
                // Only phases below the one being replayed count as cleared.
                self.state.phase_wins_by_player = request.target_phase - 1;
                self.enter_phase(request.target_phase, RoundWins::default());
            }
            TransitionKind::Victory => {
                self.stage = Stage::Finished;
                self.touch();
            }
            TransitionKind::Defeat if self.config.continue_on_defeat => {
                self.stage = Stage::AwaitingChoice;
                let phase = self.state.current_phase;
                self.emit(MatchEvent::DefeatChoicesOffered {
                    phase,
                    can_go_back: phase > 1,
                });
            }
            TransitionKind::Defeat => {
                self.stage = Stage::Finished;
                self.set_status(MatchStatus::PlayerDefeat, None);
            }
        }
        Ok(())
    }

    /// Ends the match from any state. The first abort reason sticks.
    pub fn abort(&mut self, reason: impl Into<String>) {
        if self.state.status == MatchStatus::Aborted {
            return;
        }
        self.abort_with(reason.into());
    }

    pub fn pause(&mut self) -> Result<(), UsageError> {
        self.ensure_running()?;
        if !self.paused {
            self.paused = true;
            self.touch();
        }
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), UsageError> {
        self.ensure_running()?;
        if self.paused {
            self.paused = false;
            self.touch();
        }
        Ok(())
    }

    /// Read-only view of everything a display needs.
    pub fn snapshot(&self) -> MatchSnapshot {
        let round = self.round();
        let player_max = self.config.player.max_health;

        MatchSnapshot {
            revision: self.revision,
            player_health: round.map_or(player_max, |r| r.player().health),
            player_max_health: round.map_or(player_max, |r| r.player().max_health),
            opponent_health: round.map_or(0, |r| r.opponent().health),
            opponent_max_health: round.map_or(0, |r| r.opponent().max_health),
            opponent_name: self.phase.as_ref().map(|p| p.opponent().fighter.name.clone()),
            current_round: round.map_or(0, RoundController::round_index),
            phase_round_wins: self
                .phase
                .as_ref()
                .map_or_else(RoundWins::default, PhaseController::round_wins),
            current_phase: self.state.current_phase,
            total_phases: self.state.total_phases,
            match_status: self.state.status,
            stage: self.stage,
            paused: self.paused,
            abort_reason: self.state.abort_reason.clone(),
            fighters: round.map(|r| [r.player().clone(), r.opponent().clone()]),
            round_clock: round.map_or(Tick::ZERO, RoundController::clock),
        }
    }

    fn ensure_running(&self) -> Result<(), UsageError> {
        if self.state.status.is_terminal() {
            return Err(UsageError::MatchFinished {
                status: self.state.status,
            });
        }
        Ok(())
    }

    /// Builds the phase controller for `phase_index` and starts its first round.
    fn enter_phase(&mut self, phase_index: u32, wins: RoundWins) {
        self.state.current_phase = phase_index;
        self.queued.clear();
        self.pending = None;

        let Some(opponent) = self.roster.opponent(phase_index).cloned() else {
            self.phase = None;
            self.abort_with(SetupError::MissingOpponent { phase: phase_index }.to_string());
            return;
        };
        if opponent.fighter.max_health == 0 {
            let error = SetupError::InvalidFighter {
                name: opponent.fighter.name.clone(),
                reason: "max_health must be positive".to_owned(),
            };
            self.phase = None;
            self.abort_with(error.to_string());
            return;
        }

        let controller = PhaseController::resume(phase_index, &self.config, opponent, wins);
        let event = MatchEvent::RoundStarted {
            phase: phase_index,
            round: controller.round().round_index(),
            opponent: controller.opponent().fighter.name.clone(),
        };
        self.phase = Some(controller);
        self.stage = Stage::PhaseActive;
        self.emit(event);
    }

    fn on_phase_decided(&mut self, record: PhaseRecord) {
        self.queued.clear();
        self.emit(MatchEvent::PhaseDecided(record));

        let current = self.state.current_phase;
        match record.verdict {
            PhaseVerdict::PlayerWonPhase => {
                self.state.phase_wins_by_player += 1;
                if self.state.is_final_phase() {
                    self.set_status(MatchStatus::PlayerVictory, None);
                    self.request_transition(TransitionKind::Victory, current);
                } else {
                    self.request_transition(TransitionKind::AdvancePhase, current + 1);
                }
            }
            PhaseVerdict::OpponentWonPhase => {
                self.request_transition(TransitionKind::Defeat, current);
            }
            PhaseVerdict::Ongoing => {}
        }
    }

    fn request_transition(&mut self, kind: TransitionKind, target_phase: u32) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let from_phase = self.state.current_phase;
        let message = match kind {
            TransitionKind::AdvancePhase => match self.roster.opponent(target_phase) {
                Some(next) => format!("Phase {target_phase}: {}", next.fighter.name),
                None => format!("Phase {target_phase}"),
            },
            TransitionKind::RetryPhase => format!("Retrying phase {target_phase}"),
            TransitionKind::RegressPhase => format!("Back to phase {target_phase}"),
            TransitionKind::Victory => "Champion!".to_owned(),
            TransitionKind::Defeat => format!("Defeated in phase {from_phase}"),
        };

        let request = TransitionRequest {
            ticket,
            kind,
            from_phase,
            target_phase,
            message,
        };
        self.pending = Some(request.clone());
        self.stage = Stage::AwaitingTransition;
        self.emit(MatchEvent::TransitionRequested(request));
    }

    fn abort_with(&mut self, reason: String) {
        self.pending = None;
        self.queued.clear();
        self.stage = Stage::Finished;
        self.set_status(MatchStatus::Aborted, Some(reason));
    }

    fn set_status(&mut self, status: MatchStatus, reason: Option<String>) {
        self.state.status = status;
        if status == MatchStatus::Aborted {
            self.state.abort_reason = reason.clone();
        }
        self.emit(MatchEvent::StatusChanged { status, reason });
    }

    fn emit(&mut self, event: MatchEvent) {
        self.outbox.push(event);
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl std::fmt::Debug for MatchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchOrchestrator")
            .field("state", &self.state)
            .field("stage", &self.stage)
            .field("paused", &self.paused)
            .field("pending", &self.pending)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

/// Rejects configurations that could never produce a phase verdict.
pub fn validate_config(config: &MatchConfig) -> Result<(), SetupError> {
    let rounds = config.rounds_per_phase;
    if rounds == 0 || rounds % 2 == 0 {
        return Err(SetupError::InvalidRoundCount { rounds });
    }
    if config.total_phases == 0 {
        return Err(SetupError::NoPhases);
    }
    if config.player.max_health == 0 {
        return Err(SetupError::InvalidFighter {
            name: config.player.name.clone(),
            reason: "max_health must be positive".to_owned(),
        });
    }

    let arena = config.arena;
    if arena.width <= 0 {
        return Err(SetupError::InvalidArena {
            reason: format!("width must be positive (got {})", arena.width),
        });
    }
    for (side, start) in [("player", arena.player_start), ("opponent", arena.opponent_start)] {
        if start != arena.clamp(start) {
            return Err(SetupError::InvalidArena {
                reason: format!("{side} start {start} is outside 0..={}", arena.width),
            });
        }
    }
    Ok(())
}
