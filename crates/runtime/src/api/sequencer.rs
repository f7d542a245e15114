//! Presentation of between-phase transitions.
//!
//! The match never waits on its own. When it requests a transition the
//! worker hands the request to a [`TransitionSequencer`] and reports back
//! once `play` returns.
use std::time::Duration;

use async_trait::async_trait;
use fight_core::{TransitionKind, TransitionRequest};

use super::errors::SequencerError;

/// Plays the banner, fade or cut-scene for one transition request.
#[async_trait]
pub trait TransitionSequencer: Send + Sync {
    /// Resolves when the presentation is over.
    ///
    /// An `Err` is logged and reported on the event bus, but the match
    /// continues exactly as if the presentation had finished.
    async fn play(&self, request: &TransitionRequest) -> Result<(), SequencerError>;
}

/// Completes every request at once. Useful for tests and headless replays.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateSequencer;

#[async_trait]
impl TransitionSequencer for ImmediateSequencer {
    async fn play(&self, _request: &TransitionRequest) -> Result<(), SequencerError> {
        Ok(())
    }
}

/// Shows the request message for a fixed time.
///
/// Phase changes (advance, retry, go back) and match outcomes (victory,
/// defeat) get separate durations.
#[derive(Clone, Copy, Debug)]
pub struct BannerSequencer {
    phase_banner: Duration,
    outcome_banner: Duration,
}

impl BannerSequencer {
    pub const DEFAULT_PHASE_BANNER: Duration = Duration::from_millis(2000);
    pub const DEFAULT_OUTCOME_BANNER: Duration = Duration::from_millis(3000);

    pub fn new(phase_banner: Duration, outcome_banner: Duration) -> Self {
        Self {
            phase_banner,
            outcome_banner,
        }
    }

    /// How long the banner for `kind` stays up.
    pub fn duration_for(&self, kind: TransitionKind) -> Duration {
        match kind {
            TransitionKind::AdvancePhase
            | TransitionKind::RetryPhase
            | TransitionKind::RegressPhase => self.phase_banner,
            TransitionKind::Victory | TransitionKind::Defeat => self.outcome_banner,
        }
    }
}

impl Default for BannerSequencer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PHASE_BANNER, Self::DEFAULT_OUTCOME_BANNER)
    }
}

#[async_trait]
impl TransitionSequencer for BannerSequencer {
    async fn play(&self, request: &TransitionRequest) -> Result<(), SequencerError> {
        let duration = self.duration_for(request.kind);
        tracing::info!(
            target: "runtime::sequencer",
            ticket = request.ticket,
            kind = %request.kind,
            duration_ms = duration.as_millis() as u64,
            "{}",
            request.message
        );
        tokio::time::sleep(duration).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_banners_use_their_own_duration() {
        let banner = BannerSequencer::new(Duration::from_millis(10), Duration::from_millis(30));
        assert_eq!(
            banner.duration_for(TransitionKind::RetryPhase),
            Duration::from_millis(10)
        );
        assert_eq!(
            banner.duration_for(TransitionKind::Defeat),
            Duration::from_millis(30)
        );
    }

    #[tokio::test]
    async fn banner_waits_for_its_duration() {
        let banner = BannerSequencer::new(Duration::from_millis(20), Duration::from_millis(20));
        let request = TransitionRequest {
            ticket: 1,
            kind: TransitionKind::AdvancePhase,
            from_phase: 1,
            target_phase: 2,
            message: "Phase 2".to_owned(),
        };

        let started = tokio::time::Instant::now();
        banner.play(&request).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
