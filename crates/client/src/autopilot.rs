//! Bot that plays the player side.
//!
//! Runs the same distance rules as the opponent AI, pointed the other way,
//! so a headless run plays out a believable match.
use async_trait::async_trait;
use tokio::sync::Mutex;

use fight_core::{AiProfile, MatchSnapshot, OpponentAi, RngState, SideInput, SpecialPolicy};
use fight_runtime::{InputProvider, Result};

pub struct AutopilotProvider {
    profile: AiProfile,
    policy: Box<dyn SpecialPolicy>,
    rng: Mutex<RngState>,
}

impl AutopilotProvider {
    pub fn new(profile: AiProfile, policy: impl SpecialPolicy + 'static, seed: u64) -> Self {
        Self {
            profile,
            policy: Box::new(policy),
            rng: Mutex::new(RngState::new(seed)),
        }
    }
}

#[async_trait]
impl InputProvider for AutopilotProvider {
    async fn provide_input(&self, snapshot: &MatchSnapshot) -> Result<SideInput> {
        let Some([player, opponent]) = &snapshot.fighters else {
            return Ok(SideInput::IDLE);
        };

        let mut rng = self.rng.lock().await;
        Ok(OpponentAi::new(&self.profile).decide(
            player,
            opponent,
            snapshot.round_clock,
            self.policy.as_ref(),
            &mut rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::{MatchConfig, MatchOrchestrator, NeverSpecial, StaticRoster};

    fn opening_snapshot() -> MatchSnapshot {
        MatchOrchestrator::new(
            MatchConfig::default(),
            Box::new(StaticRoster::classic()),
            Box::new(NeverSpecial),
        )
        .unwrap()
        .snapshot()
    }

    #[tokio::test]
    async fn walks_towards_the_opponent() {
        let autopilot = AutopilotProvider::new(AiProfile::default(), NeverSpecial, 1);
        let input = autopilot.provide_input(&opening_snapshot()).await.unwrap();
        assert_eq!(input.movement_axis, 1);
        assert!(!input.attack_pressed());
    }

    #[tokio::test]
    async fn idles_without_a_round() {
        let mut snapshot = opening_snapshot();
        snapshot.fighters = None;

        let autopilot = AutopilotProvider::new(AiProfile::default(), NeverSpecial, 1);
        let input = autopilot.provide_input(&snapshot).await.unwrap();
        assert_eq!(input, SideInput::IDLE);
    }

    #[tokio::test]
    async fn swings_once_in_range() {
        let mut snapshot = opening_snapshot();
        if let Some([player, _]) = snapshot.fighters.as_mut() {
            player.position = 650;
        }

        let autopilot = AutopilotProvider::new(AiProfile::default(), NeverSpecial, 1);
        let input = autopilot.provide_input(&snapshot).await.unwrap();
        assert!(input.attack_pressed());
    }
}
