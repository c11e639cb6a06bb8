//! Character stats.
//!
//! Base stats are the source of truth; current stats are derived from them
//! plus the static modifiers of every attached effect. Per-turn modifiers
//! never show up here directly: the effect manager folds them into base stats
//! on each tick.
mod block;
mod calculator;

pub use block::{PartialStats, StatBlock, StatKind};
pub use calculator::StatCalculator;
