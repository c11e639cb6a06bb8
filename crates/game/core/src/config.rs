use crate::stats::StatBlock;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of resolved actions retained in `GameState::action_history`.
    /// Oldest records are dropped first.
    pub history_limit: usize,

    /// Base stats given to characters whose content omits them.
    pub default_stats: StatBlock,
}

impl GameConfig {
    // ===== fixed fixture constants =====
    pub const LEFT_HAND_ID: &'static str = "left_hand";
    pub const RIGHT_HAND_ID: &'static str = "right_hand";
    /// Finger slots installed on every hand container, in display order.
    pub const FINGER_SLOTS: [&'static str; 5] = ["thumb", "index", "middle", "ring", "pinky"];
    /// General storage of a hand holds exactly one item.
    pub const HAND_MAX_ITEMS: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HISTORY_LIMIT: usize = 256;

    pub fn new() -> Self {
        Self {
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            default_stats: StatBlock::new(10, 10, 10, 0, 10, 10),
        }
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
