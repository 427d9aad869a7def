use crate::schema::{CardModifierRules, GameConfig, GameSettings, HandRule, JokerDef, RankRule};
use anyhow::{bail, Context};
use chipmult_core::PLAYABLE_HAND_SIZE;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const HANDS_FILE: &str = "hands.json";
const RANKS_FILE: &str = "ranks.json";
const CARD_MODIFIERS_FILE: &str = "card_modifiers.json";
const GAME_FILE: &str = "game.json";
const JOKERS_FILE: &str = "jokers.json";

pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let hands: Vec<HandRule> = load_json(dir.join(HANDS_FILE))?;
    let ranks: Vec<RankRule> = load_json(dir.join(RANKS_FILE))?;
    let card_modifiers: CardModifierRules = load_optional_json(dir.join(CARD_MODIFIERS_FILE))?;
    let settings: GameSettings = load_optional_json(dir.join(GAME_FILE))?;

    let mut seen = HashSet::new();
    for rule in &hands {
        if !seen.insert(rule.kind) {
            bail!("{HANDS_FILE}: duplicate entry for {:?}", rule.kind);
        }
    }
    let mut seen = HashSet::new();
    for rule in &ranks {
        if !seen.insert(rule.rank) {
            bail!("{RANKS_FILE}: duplicate entry for {:?}", rule.rank);
        }
    }
    if settings.hand_size < PLAYABLE_HAND_SIZE {
        bail!(
            "{GAME_FILE}: hand_size {} is smaller than a full play of {PLAYABLE_HAND_SIZE}",
            settings.hand_size
        );
    }

    Ok(GameConfig {
        hand_size: settings.hand_size,
        hands,
        ranks,
        card_modifiers,
    })
}

/// Joker definitions, in file order. A missing file means no jokers.
pub fn load_jokers(dir: &Path) -> anyhow::Result<Vec<JokerDef>> {
    let jokers: Vec<JokerDef> = load_optional_json(dir.join(JOKERS_FILE))?;
    let mut seen = HashSet::new();
    for joker in &jokers {
        if !seen.insert(joker.id.as_str()) {
            bail!("{JOKERS_FILE}: duplicate joker id {}", joker.id);
        }
    }
    Ok(jokers)
}

pub fn find_joker<'a>(jokers: &'a [JokerDef], id: &str) -> Option<&'a JokerDef> {
    jokers.iter().find(|joker| joker.id.eq_ignore_ascii_case(id))
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

fn load_optional_json<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    load_json(path)
}
