//! Frame loop that plays one match to the end.
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use fight_core::{MatchSnapshot, Stage};
use fight_runtime::{Runtime, RuntimeError, RuntimeHandle, Topic};

use crate::config::CliConfig;

/// Steps `runtime` until the match is finished or the frame limit is hit.
///
/// The defeat screen is answered with `config.defeat_choice`. Hitting the
/// frame limit aborts the match. Returns the last snapshot.
pub async fn play_match(runtime: &mut Runtime, config: &CliConfig) -> anyhow::Result<MatchSnapshot> {
    let handle = runtime.handle();
    let mut ticker = tokio::time::interval(config.frame());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = Instant::now();
    let mut snapshot = handle.snapshot().await?;
    let mut frames = 0;

    while snapshot.stage != Stage::Finished && frames < config.max_frames {
        match snapshot.stage {
            Stage::AwaitingChoice => answer_defeat(&handle, config).await?,
            Stage::AwaitingTransition => {
                // The banner plays on its own task; frames do not count.
                if config.realtime {
                    ticker.tick().await;
                } else {
                    tokio::task::yield_now().await;
                }
                snapshot = handle.snapshot().await?;
                continue;
            }
            Stage::PhaseActive | Stage::Finished => {}
        }
        if config.realtime {
            ticker.tick().await;
        }
        snapshot = runtime.step(config.frame_ms).await?;
        frames += 1;
    }

    if snapshot.stage != Stage::Finished {
        warn!(frames, "Frame limit reached; aborting match");
        snapshot = handle.abort("frame limit reached").await?;
    }

    info!(
        frames,
        elapsed_ms = started.elapsed().as_millis() as u64,
        status = %snapshot.match_status,
        phase = snapshot.current_phase,
        "Match over"
    );
    Ok(snapshot)
}

async fn answer_defeat(handle: &RuntimeHandle, config: &CliConfig) -> anyhow::Result<()> {
    match handle.choose(config.defeat_choice).await {
        Ok(()) => {
            info!(choice = %config.defeat_choice, "Answered defeat screen");
            Ok(())
        }
        Err(RuntimeError::Rejected(error)) => {
            debug!(%error, "Defeat choice no longer pending");
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}

/// Mirrors match and combat events into the log until the runtime shuts down.
pub async fn log_events(handle: RuntimeHandle) {
    let mut receivers = handle.subscribe_multiple(&[Topic::Match, Topic::Combat]).await;
    let (Some(mut flow), Some(mut combat)) = (
        receivers.remove(&Topic::Match),
        receivers.remove(&Topic::Combat),
    ) else {
        return;
    };
    drop(handle);

    loop {
        let event = tokio::select! {
            event = flow.recv() => event,
            event = combat.recv() => event,
        };
        match event {
            Ok(event) => match event.to_json() {
                Ok(json) => debug!(target: "fight::events", "{json}"),
                Err(error) => warn!(%error, "Failed to encode event"),
            },
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Event log fell behind");
            }
            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
        }
    }
}
