//! Headless client for the match runtime.
//!
//! # Architecture
//!
//! ```text
//! fight (binary)
//!   ├─→ fight-content (match.toml + roster.ron, or the bundled set)
//!   ├─→ fight-runtime (match worker, event bus, banner sequencer)
//!   └─→ AutopilotProvider (drives the player side)
//! ```
//!
//! The binary is only the composition root; everything it wires together
//! lives here so tests can run a whole match without a terminal.
pub mod autopilot;
pub mod config;
pub mod driver;
pub mod logging;

pub use autopilot::AutopilotProvider;
pub use config::{CliConfig, SeedSetting};
pub use driver::{log_events, play_match};

use anyhow::Context;
use fight_content::{ContentFactory, MatchContent};

/// Loads content from `config.content_dir`, or the bundled set, and applies
/// the seed override.
pub fn load_content(config: &CliConfig) -> anyhow::Result<MatchContent> {
    let mut content = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir)
            .load()
            .with_context(|| format!("loading content from {}", dir.display()))?,
        None => ContentFactory::bundled().context("loading bundled content")?,
    };
    content.config.seed = config.seed.resolve(content.config.seed);
    Ok(content)
}
