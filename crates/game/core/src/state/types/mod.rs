pub mod common;

pub use common::{Facing, Side, Tick};
