//! Fight client binary.
//!
//! Plays one match headlessly: the player side is driven by the autopilot,
//! banners are shown as log lines, and the outcome is logged at the end.
//!
//! # Examples
//!
//! ```bash
//! # Bundled roster at wall-clock speed
//! cargo run -p fight-client
//!
//! # Custom content, as fast as possible, giving up after a lost phase
//! FIGHT_CONTENT_DIR=./data FIGHT_REALTIME=false FIGHT_DEFEAT_CHOICE=menu \
//!     cargo run -p fight-client
//! ```

use anyhow::Result;
use fight_client::{AutopilotProvider, CliConfig, load_content, log_events, logging, play_match};
use fight_core::{AiProfile, ChancePolicy, MatchStatus};
use fight_runtime::{BannerSequencer, ImmediateSequencer, Runtime};

/// Special-attack chance for the autopilot.
const AUTOPILOT_SPECIAL_PERCENT: u8 = 20;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = CliConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting fight client");

    // 3. Load content
    let content = load_content(&config)?;
    tracing::info!(
        phases = content.config.total_phases,
        rounds_per_phase = content.config.rounds_per_phase,
        seed = content.config.seed,
        "Content loaded"
    );

    // 4. Build runtime
    let autopilot = AutopilotProvider::new(
        AiProfile::default(),
        ChancePolicy {
            percent: AUTOPILOT_SPECIAL_PERCENT,
        },
        content.config.seed.rotate_left(17),
    );
    let builder = Runtime::builder()
        .match_config(content.config)
        .roster(content.roster)
        .player_provider(autopilot);
    let builder = if config.realtime {
        builder.sequencer(BannerSequencer::new(
            config.phase_banner(),
            config.outcome_banner(),
        ))
    } else {
        builder.sequencer(ImmediateSequencer)
    };
    let mut runtime = builder.build().await?;
    tracing::info!("Runtime built successfully");

    let event_log = tokio::spawn(log_events(runtime.handle()));

    // 5. Play
    let outcome = play_match(&mut runtime, &config).await?;

    runtime.shutdown().await?;
    event_log.await.ok();

    match outcome.match_status {
        MatchStatus::PlayerVictory => tracing::info!("Player is the champion"),
        MatchStatus::PlayerDefeat => tracing::info!(phase = outcome.current_phase, "Player defeated"),
        MatchStatus::Aborted => tracing::info!(
            reason = outcome.abort_reason.as_deref().unwrap_or("unknown"),
            "Match aborted"
        ),
        MatchStatus::InProgress => tracing::warn!("Match ended without an outcome"),
    }

    tracing::info!("Client shutdown complete");
    Ok(())
}
