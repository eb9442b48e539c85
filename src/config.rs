// src/config.rs
// Runtime settings for the feed tracker

use serde::Deserialize;

/// Chips in one big blind, as the feed denominates stacks and pots.
pub const DEFAULT_BIG_BLIND_CHIPS: u64 = 2;

/// Minimum raise assumed when a payload omits the field.
pub const DEFAULT_MINIMUM_RAISE: u64 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedConfig {
    /// Tracked player's user id. When absent it is picked up from the
    /// session's authentication line.
    pub hero_user_id: Option<u64>,
    pub big_blind_chips: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        FeedConfig {
            hero_user_id: None,
            big_blind_chips: DEFAULT_BIG_BLIND_CHIPS,
        }
    }
}
