use serde::{Deserialize, Serialize};

pub use chipmult_core::{CardModifierRules, GameConfig, HandRule, JokerDef, RankRule};

/// Top-level knobs from `game.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            hand_size: default_hand_size(),
        }
    }
}

fn default_hand_size() -> usize {
    chipmult_core::HAND_SIZE
}
