//! Read-only collaborators handed to commands and the turn pipeline.

use crate::config::GameConfig;
use crate::effect::EffectManager;
use crate::stats::StatCalculator;

/// Borrowed view of the engine's services.
///
/// Cheap to copy; commands receive it by reference and must not hold on to
/// it past a single resolution.
#[derive(Clone, Copy, Debug)]
pub struct GameEnv<'a> {
    effects: &'a EffectManager,
    stats: &'a StatCalculator,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(effects: &'a EffectManager, stats: &'a StatCalculator, config: &'a GameConfig) -> Self {
        Self {
            effects,
            stats,
            config,
        }
    }

    pub fn effects(&self) -> &'a EffectManager {
        self.effects
    }

    pub fn stats(&self) -> &'a StatCalculator {
        self.stats
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}
