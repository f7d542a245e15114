//! Match configuration loader.

use std::path::Path;

use fight_core::{MatchConfig, engine::validate_config};

use crate::loaders::{LoadResult, read_file};

/// Loader for match configuration from TOML files.
///
/// Missing keys fall back to [`MatchConfig::default`]. The result is
/// validated, so an even round count is rejected here rather than at match
/// start.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<MatchConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<MatchConfig> {
        let config: MatchConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse match config TOML: {}", e))?;

        validate_config(&config)
            .map_err(|e| anyhow::anyhow!("Invalid match config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_the_default_match() {
        assert_eq!(ConfigLoader::parse("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn overrides_only_what_is_given() {
        let config = ConfigLoader::parse(
            r#"
            rounds_per_phase = 5
            continue_on_defeat = false

            [arena]
            width = 1200
            player_start = 400
            opponent_start = 800
            "#,
        )
        .unwrap();

        assert_eq!(config.rounds_per_phase, 5);
        assert_eq!(config.win_threshold(), 3);
        assert!(!config.continue_on_defeat);
        assert_eq!(config.arena.width, 1200);
        assert_eq!(config.total_phases, MatchConfig::DEFAULT_TOTAL_PHASES);
    }

    #[test]
    fn rejects_fighter_placed_outside_the_arena() {
        let err = ConfigLoader::parse(
            r#"
            [arena]
            width = 800
            player_start = 300
            opponent_start = 900
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("opponent start 900"));
    }

    #[test]
    fn rejects_even_round_count() {
        let err = ConfigLoader::parse("rounds_per_phase = 2").unwrap_err();
        assert!(err.to_string().contains("odd"));
    }
}
