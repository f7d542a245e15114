//! Opponent roster loader.
//!
//! The RON file is a list of entries, phase 1 first. Each entry names the
//! three numbers that vary per tier; attack profiles, AI distances and the
//! control mode may be overridden.

use std::path::Path;

use fight_core::{AiProfile, AttackProfile, ControlMode, OpponentProfile, StaticRoster};

use crate::loaders::{LoadResult, read_file};

/// One roster entry as written in `roster.ron`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct OpponentEntry {
    pub name: String,
    pub max_health: u32,
    pub speed: u32,
    pub attack_damage: u32,
    #[serde(default)]
    pub normal: Option<AttackProfile>,
    #[serde(default)]
    pub special: Option<AttackProfile>,
    #[serde(default)]
    pub ai: AiProfile,
    #[serde(default)]
    pub control: ControlMode,
}

impl OpponentEntry {
    fn resolve(self) -> OpponentProfile {
        let mut profile = OpponentProfile::tier(&self.name, self.max_health, self.speed, self.attack_damage)
            .with_ai(self.ai)
            .with_control(self.control);
        if let Some(normal) = self.normal {
            profile.fighter.normal = normal;
        }
        if let Some(special) = self.special {
            profile.fighter.special = special;
        }
        profile
    }
}

/// Loader for the opponent roster from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load the roster from a RON file.
    pub fn load(path: &Path) -> LoadResult<StaticRoster> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse the roster from RON text.
    ///
    /// An empty roster is accepted; the match will abort when it looks up
    /// phase 1. Entries with no health are rejected.
    pub fn parse(content: &str) -> LoadResult<StaticRoster> {
        let entries: Vec<OpponentEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut opponents = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            if entry.max_health == 0 {
                anyhow::bail!(
                    "Roster entry {} ('{}') must have positive max_health",
                    index + 1,
                    entry.name
                );
            }
            if entry.ai.special_chance_percent > 100 {
                anyhow::bail!(
                    "Roster entry {} ('{}') has special_chance_percent above 100",
                    index + 1,
                    entry.name
                );
            }
            opponents.push(entry.resolve());
        }

        Ok(StaticRoster::new(opponents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::RosterOracle;

    #[test]
    fn parses_minimal_entries_in_phase_order() {
        let roster = RosterLoader::parse(
            r#"[
                (name: "Moreno", max_health: 100, speed: 200, attack_damage: 8),
                (name: "Cidão", max_health: 120, speed: 180, attack_damage: 10),
            ]"#,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        let second = roster.opponent(2).unwrap();
        assert_eq!(second.fighter.name, "Cidão");
        assert_eq!(second.fighter.normal.damage, 10);
        assert_eq!(second.fighter.special.damage, 20);
        assert_eq!(second.control, ControlMode::Ai);
        assert!(roster.opponent(3).is_none());
    }

    #[test]
    fn applies_overrides() {
        let roster = RosterLoader::parse(
            r#"[(
                name: "Rival",
                max_health: 100,
                speed: 400,
                attack_damage: 10,
                normal: Some((damage: 12, range: 110, cooldown_ms: 700, knockback: 30)),
                ai: (sight_range: 600, attack_range: 90, special_chance_percent: 40),
                control: Human,
            )]"#,
        )
        .unwrap();

        let rival = roster.opponent(1).unwrap();
        assert_eq!(rival.fighter.normal, AttackProfile::new(12, 110, 700, 30));
        assert_eq!(rival.ai.attack_range, 90);
        assert_eq!(rival.control, ControlMode::Human);
    }

    #[test]
    fn rejects_zero_health() {
        let err = RosterLoader::parse(
            r#"[(name: "Ghost", max_health: 0, speed: 100, attack_damage: 5)]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }
}
