//! Content factory for building match content from data files.

use std::path::{Path, PathBuf};

use fight_core::{MatchConfig, StaticRoster};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

const BUNDLED_MATCH: &str = include_str!("../../data/match.toml");
const BUNDLED_ROSTER: &str = include_str!("../../data/roster.ron");

/// Everything needed to start a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchContent {
    pub config: MatchConfig,
    pub roster: StaticRoster,
}

/// Content factory that loads match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── match.toml
/// └── roster.ron
/// ```
///
/// A missing `match.toml` falls back to the bundled one; the roster is
/// required.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Content compiled into the binary.
    pub fn bundled() -> LoadResult<MatchContent> {
        Ok(MatchContent {
            config: ConfigLoader::parse(BUNDLED_MATCH)?,
            roster: RosterLoader::parse(BUNDLED_ROSTER)?,
        })
    }

    /// Load match configuration from `match.toml`.
    pub fn load_config(&self) -> LoadResult<MatchConfig> {
        let path = self.data_dir.join("match.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::parse(BUNDLED_MATCH)
        }
    }

    /// Load the opponent roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<StaticRoster> {
        RosterLoader::load(&self.data_dir.join("roster.ron"))
    }

    /// Load configuration and roster, checking that every phase has an opponent.
    pub fn load(&self) -> LoadResult<MatchContent> {
        let content = MatchContent {
            config: self.load_config()?,
            roster: self.load_roster()?,
        };
        let phases = content.config.total_phases as usize;
        let available = content.roster.opponents().len();
        if available < phases {
            anyhow::bail!(
                "Roster in {} has {} opponents but the match has {} phases",
                self.data_dir.display(),
                available,
                phases
            );
        }
        Ok(content)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fight_core::RosterOracle;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_covers_every_phase() {
        let content = ContentFactory::bundled().unwrap();
        assert_eq!(content.config.total_phases, 3);
        assert_eq!(content.roster.len(), 3);
        assert_eq!(content.roster, StaticRoster::classic());
    }

    #[test]
    fn loads_directory_with_bundled_config_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("roster.ron"),
            r#"[
                (name: "A", max_health: 50, speed: 100, attack_damage: 5),
                (name: "B", max_health: 60, speed: 100, attack_damage: 5),
                (name: "C", max_health: 70, speed: 100, attack_damage: 5),
            ]"#,
        )
        .unwrap();

        let content = ContentFactory::new(dir.path()).load().unwrap();
        assert_eq!(content.config, MatchConfig::default());
        assert_eq!(content.roster.opponent(3).unwrap().fighter.max_health, 70);
    }

    #[test]
    fn short_roster_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("match.toml"), "total_phases = 2\n").unwrap();
        std::fs::write(
            dir.path().join("roster.ron"),
            r#"[(name: "Solo", max_health: 50, speed: 100, attack_damage: 5)]"#,
        )
        .unwrap();

        let err = ContentFactory::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("1 opponents"));
    }

    #[test]
    fn missing_roster_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentFactory::new(dir.path()).load_roster().is_err());
    }
}
