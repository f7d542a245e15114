//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use fight_core::PhaseChoice;

/// Where the match seed comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedSetting {
    /// Keep the seed from `match.toml`.
    FromContent,
    Fixed(u64),
    /// Draw a fresh seed for this run.
    Random,
}

impl SeedSetting {
    /// Resolves the seed, using `content_seed` when nothing overrides it.
    pub fn resolve(self, content_seed: u64) -> u64 {
        match self {
            SeedSetting::FromContent => content_seed,
            SeedSetting::Fixed(seed) => seed,
            SeedSetting::Random => rand::random(),
        }
    }
}

/// Headless client configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Directory holding `match.toml` and `roster.ron`. Bundled data when unset.
    pub content_dir: Option<PathBuf>,
    /// Simulated time per frame.
    pub frame_ms: u64,
    /// Frames before the client gives up and aborts the match.
    pub max_frames: u64,
    /// Answer given whenever the defeat screen comes up.
    pub defeat_choice: PhaseChoice,
    pub seed: SeedSetting,
    /// How long phase banners stay up; outcome banners get half as long again.
    pub banner_ms: u64,
    /// Sleep between frames so the match plays at wall-clock speed.
    pub realtime: bool,
    /// Also write logs to `<dir>/fight.log`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            frame_ms: 16,
            max_frames: 20_000,
            defeat_choice: PhaseChoice::Retry,
            seed: SeedSetting::FromContent,
            banner_ms: 2000,
            realtime: true,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `FIGHT_CONTENT_DIR` - Data directory (default: bundled content)
    /// - `FIGHT_FRAME_MS` - Milliseconds per frame (default: 16, minimum 1)
    /// - `FIGHT_MAX_FRAMES` - Frame limit (default: 20000)
    /// - `FIGHT_DEFEAT_CHOICE` - `retry`, `go_back` or `menu` (default: retry)
    /// - `FIGHT_SEED` - A number, or `random` (default: the content seed)
    /// - `FIGHT_BANNER_MS` - Phase banner duration (default: 2000)
    /// - `FIGHT_REALTIME` - `false` to run frames back to back (default: true)
    /// - `FIGHT_LOG_DIR` - Enables the file log
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("FIGHT_CONTENT_DIR").filter(|v| !v.is_empty()) {
            config.content_dir = Some(PathBuf::from(dir));
        }
        if let Some(frame_ms) = parse::<u64>(&lookup, "FIGHT_FRAME_MS") {
            config.frame_ms = frame_ms.max(1);
        }
        if let Some(max_frames) = parse::<u64>(&lookup, "FIGHT_MAX_FRAMES") {
            config.max_frames = max_frames;
        }
        if let Some(choice) = parse::<PhaseChoice>(&lookup, "FIGHT_DEFEAT_CHOICE") {
            config.defeat_choice = choice;
        }
        if let Some(seed) = lookup("FIGHT_SEED") {
            config.seed = if seed.eq_ignore_ascii_case("random") {
                SeedSetting::Random
            } else {
                seed.parse()
                    .map(SeedSetting::Fixed)
                    .unwrap_or(SeedSetting::FromContent)
            };
        }
        if let Some(banner_ms) = parse::<u64>(&lookup, "FIGHT_BANNER_MS") {
            config.banner_ms = banner_ms;
        }
        if let Some(realtime) = parse::<bool>(&lookup, "FIGHT_REALTIME") {
            config.realtime = realtime;
        }
        if let Some(dir) = lookup("FIGHT_LOG_DIR").filter(|v| !v.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        config
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn phase_banner(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }

    pub fn outcome_banner(&self) -> Duration {
        Duration::from_millis(self.banner_ms.saturating_mul(3) / 2)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> CliConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.frame_ms, 16);
        assert_eq!(config.defeat_choice, PhaseChoice::Retry);
        assert_eq!(config.seed, SeedSetting::FromContent);
        assert!(config.content_dir.is_none());
        assert!(config.realtime);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("FIGHT_CONTENT_DIR", "/srv/fight"),
            ("FIGHT_FRAME_MS", "0"),
            ("FIGHT_MAX_FRAMES", "500"),
            ("FIGHT_DEFEAT_CHOICE", "Go_Back"),
            ("FIGHT_SEED", "42"),
            ("FIGHT_REALTIME", "false"),
            ("FIGHT_LOG_DIR", "/tmp/fight-logs"),
        ]);

        assert_eq!(config.content_dir, Some(PathBuf::from("/srv/fight")));
        assert_eq!(config.frame_ms, 1);
        assert_eq!(config.max_frames, 500);
        assert_eq!(config.defeat_choice, PhaseChoice::GoBack);
        assert_eq!(config.seed, SeedSetting::Fixed(42));
        assert!(!config.realtime);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/fight-logs")));
    }

    #[test]
    fn random_seed_and_bad_values() {
        let config = config_from(&[
            ("FIGHT_SEED", "RANDOM"),
            ("FIGHT_DEFEAT_CHOICE", "surrender"),
            ("FIGHT_MAX_FRAMES", "lots"),
        ]);
        assert_eq!(config.seed, SeedSetting::Random);
        assert_eq!(config.defeat_choice, PhaseChoice::Retry);
        assert_eq!(config.max_frames, 20_000);
        assert_eq!(SeedSetting::Fixed(7).resolve(1), 7);
        assert_eq!(SeedSetting::FromContent.resolve(1), 1);
    }
}
