//! Asynchronous abstraction for sourcing fighter input.
//!
//! Runtime users plug in [`InputProvider`] implementations so a match can run
//! with a gamepad bridge, scripted fixtures, or an autopilot.
use async_trait::async_trait;
use fight_core::{MatchSnapshot, SideInput};

use super::errors::Result;

/// Trait for providing one frame of input based on the current match view.
///
/// Different implementations can handle:
/// - Device input decoded by the host
/// - Scripted/replayed frames
/// - Bots driving the player side
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Provide this frame's input for one side.
    ///
    /// `snapshot` is the view published after the previous frame.
    async fn provide_input(&self, snapshot: &MatchSnapshot) -> Result<SideInput>;
}

/// Provider that never presses anything.
/// Useful for testing or as a fallback for an AI-controlled opponent.
pub struct IdleInputProvider;

#[async_trait]
impl InputProvider for IdleInputProvider {
    async fn provide_input(&self, _snapshot: &MatchSnapshot) -> Result<SideInput> {
        Ok(SideInput::IDLE)
    }
}

/// Plays back a fixed list of frames, then idles.
pub struct ScriptedInputProvider {
    frames: std::sync::Mutex<std::collections::VecDeque<SideInput>>,
}

impl ScriptedInputProvider {
    pub fn new(frames: impl IntoIterator<Item = SideInput>) -> Self {
        Self {
            frames: std::sync::Mutex::new(frames.into_iter().collect()),
        }
    }
}

#[async_trait]
impl InputProvider for ScriptedInputProvider {
    async fn provide_input(&self, _snapshot: &MatchSnapshot) -> Result<SideInput> {
        let next = match self.frames.lock() {
            Ok(mut frames) => frames.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        Ok(next.unwrap_or(SideInput::IDLE))
    }
}
