use crate::{HandKind, Rank};
use serde::{Deserialize, Serialize};

pub const BASE_DECK_SIZE: usize = 52;
pub const HAND_SIZE: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRule {
    pub kind: HandKind,
    pub base_chips: i64,
    pub base_mult: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRule {
    pub rank: Rank,
    pub chips: i64,
}

/// Values used by enhancement and edition effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardModifierRules {
    pub bonus_chips: i64,
    pub mult_add: f64,
    pub glass_mult: f64,
    pub foil_chips: i64,
    pub holographic_mult: f64,
    pub polychrome_mult: f64,
}

impl Default for CardModifierRules {
    fn default() -> Self {
        Self {
            bonus_chips: 30,
            mult_add: 4.0,
            glass_mult: 2.0,
            foil_chips: 50,
            holographic_mult: 10.0,
            polychrome_mult: 1.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    #[serde(default)]
    pub hands: Vec<HandRule>,
    #[serde(default)]
    pub ranks: Vec<RankRule>,
    #[serde(default)]
    pub card_modifiers: CardModifierRules,
}

fn default_hand_size() -> usize {
    HAND_SIZE
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: HAND_SIZE,
            hands: Vec::new(),
            ranks: Vec::new(),
            card_modifiers: CardModifierRules::default(),
        }
    }
}
