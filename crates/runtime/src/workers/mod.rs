//! Worker tasks that back the runtime orchestration.
//!
//! A single match worker owns the orchestrator; transition presentations run
//! on short-lived tasks it spawns.

mod match_worker;

pub use match_worker::{Command, MatchWorker};
