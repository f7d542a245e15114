//! Resume parameters carried across a host-level scene reload.

use crate::config::MatchConfig;
use crate::engine::SetupError;

/// The four numbers a host keeps to rebuild a match mid-phase.
///
/// `current_round` is the round about to be fought; the wins are the rounds
/// already decided in `current_phase`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionBootstrap {
    pub current_round: u32,
    pub player_wins: u8,
    pub enemy_wins: u8,
    pub current_phase: u32,
}

impl SessionBootstrap {
    /// Start of a brand-new match.
    pub const FRESH: Self = Self {
        current_round: 1,
        player_wins: 0,
        enemy_wins: 0,
        current_phase: 1,
    };

    /// Checks the parameters against the match configuration.
    pub fn validate(&self, config: &MatchConfig) -> Result<(), SetupError> {
        if self.current_phase == 0 || self.current_phase > config.total_phases {
            return Err(SetupError::BootstrapPhaseOutOfRange {
                phase: self.current_phase,
                total_phases: config.total_phases,
            });
        }

        let threshold = config.win_threshold();
        if self.player_wins >= threshold || self.enemy_wins >= threshold {
            return Err(SetupError::BootstrapPhaseAlreadyDecided {
                player_wins: self.player_wins,
                enemy_wins: self.enemy_wins,
                threshold,
            });
        }

        let expected_round = u32::from(self.player_wins) + u32::from(self.enemy_wins) + 1;
        if self.current_round != expected_round {
            return Err(SetupError::BootstrapRoundMismatch {
                current_round: self.current_round,
                expected: expected_round,
            });
        }

        Ok(())
    }
}

impl Default for SessionBootstrap {
    fn default() -> Self {
        Self::FRESH
    }
}

/// Failure while encoding or decoding a bootstrap blob.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("session bootstrap codec failed: {0}")]
pub struct BootstrapCodecError(String);

#[cfg(feature = "serde")]
impl SessionBootstrap {
    pub fn encode(&self) -> Result<Vec<u8>, BootstrapCodecError> {
        bincode::serialize(self).map_err(|e| BootstrapCodecError(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, BootstrapCodecError> {
        bincode::deserialize(bytes).map_err(|e| BootstrapCodecError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bootstrap_is_valid() {
        assert!(SessionBootstrap::FRESH.validate(&MatchConfig::default()).is_ok());
    }

    #[test]
    fn rejects_round_that_does_not_follow_wins() {
        let bootstrap = SessionBootstrap {
            current_round: 3,
            player_wins: 1,
            enemy_wins: 0,
            current_phase: 1,
        };
        assert!(matches!(
            bootstrap.validate(&MatchConfig::default()),
            Err(SetupError::BootstrapRoundMismatch { expected: 2, .. })
        ));
    }

    #[test]
    fn rejects_already_decided_phase() {
        let bootstrap = SessionBootstrap {
            current_round: 3,
            player_wins: 2,
            enemy_wins: 0,
            current_phase: 1,
        };
        assert!(matches!(
            bootstrap.validate(&MatchConfig::default()),
            Err(SetupError::BootstrapPhaseAlreadyDecided { .. })
        ));
    }

    #[test]
    fn rejects_phase_outside_match() {
        let bootstrap = SessionBootstrap {
            current_phase: 4,
            ..SessionBootstrap::FRESH
        };
        assert!(matches!(
            bootstrap.validate(&MatchConfig::default()),
            Err(SetupError::BootstrapPhaseOutOfRange { phase: 4, .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn survives_a_reload_blob() {
        let bootstrap = SessionBootstrap {
            current_round: 2,
            player_wins: 1,
            enemy_wins: 0,
            current_phase: 2,
        };
        let bytes = bootstrap.encode().unwrap();
        assert_eq!(SessionBootstrap::decode(&bytes).unwrap(), bootstrap);
    }
}
