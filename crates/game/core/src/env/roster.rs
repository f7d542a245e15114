//! Per-phase opponent configuration.

use crate::config::{AttackProfile, DashProfile, FighterProfile};

/// Distance rules the opponent AI follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiProfile {
    /// Beyond this distance the opponent idles.
    pub sight_range: u32,
    /// Within this distance the opponent stops and attacks.
    pub attack_range: u32,
    /// Chance (0-100) that an in-range attack is a special.
    pub special_chance_percent: u8,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            sight_range: 1000,
            attack_range: 80,
            special_chance_percent: 15,
        }
    }
}

/// Whether the opponent side is driven by the AI or by a second input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlMode {
    #[default]
    Ai,
    Human,
}

/// Immutable stat record for the opponent of one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentProfile {
    pub fighter: FighterProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: AiProfile,
    #[cfg_attr(feature = "serde", serde(default))]
    pub control: ControlMode,
}

impl OpponentProfile {
    pub fn new(fighter: FighterProfile) -> Self {
        Self {
            fighter,
            ai: AiProfile::default(),
            control: ControlMode::Ai,
        }
    }

    pub fn with_ai(mut self, ai: AiProfile) -> Self {
        self.ai = ai;
        self
    }

    pub fn with_control(mut self, control: ControlMode) -> Self {
        self.control = control;
        self
    }

    /// Builds a standard opponent from the three numbers that vary per tier.
    pub fn tier(name: &str, max_health: u32, speed: u32, attack_damage: u32) -> Self {
        Self::new(FighterProfile {
            name: name.to_owned(),
            max_health,
            speed,
            normal: AttackProfile::new(attack_damage, 100, 1200, 40),
            special: AttackProfile::new(attack_damage * 2, 160, 3000, 60),
            block_cooldown_ms: FighterProfile::DEFAULT_BLOCK_COOLDOWN_MS,
            dash: DashProfile::default(),
        })
    }
}

/// Read-only lookup of the opponent for a phase index (1-based).
pub trait RosterOracle: Send + Sync {
    fn opponent(&self, phase: u32) -> Option<&OpponentProfile>;

    /// Number of opponents this roster can serve.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed roster: phase `n` maps to entry `n - 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StaticRoster {
    opponents: Vec<OpponentProfile>,
}

impl StaticRoster {
    pub fn new(opponents: Vec<OpponentProfile>) -> Self {
        Self { opponents }
    }

    /// Moreno, Cidão and Hugo.
    pub fn classic() -> Self {
        Self::new(vec![
            OpponentProfile::tier("Moreno", 100, 200, 8),
            OpponentProfile::tier("Cidão", 120, 180, 10),
            OpponentProfile::tier("Hugo", 150, 160, 12),
        ])
    }

    pub fn opponents(&self) -> &[OpponentProfile] {
        &self.opponents
    }
}

impl RosterOracle for StaticRoster {
    fn opponent(&self, phase: u32) -> Option<&OpponentProfile> {
        let index = usize::try_from(phase.checked_sub(1)?).ok()?;
        self.opponents.get(index)
    }

    fn len(&self) -> usize {
        self.opponents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_indices_are_one_based() {
        let roster = StaticRoster::classic();
        assert!(roster.opponent(0).is_none());
        assert_eq!(roster.opponent(1).map(|o| o.fighter.name.as_str()), Some("Moreno"));
        assert_eq!(roster.opponent(3).map(|o| o.fighter.max_health), Some(150));
        assert!(roster.opponent(4).is_none());
    }
}
