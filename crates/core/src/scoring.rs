use crate::{
    classify, Ability, AbilityContext, Card, CardModifierRules, Edition, Enhancement, GameConfig,
    HandKind, HandStats, Rank, RuleEffect, Score, ScoreTraceStep, PLAYABLE_HAND_SIZE,
};
use log::{debug, trace};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("invalid selection of {count} cards (expected 1 to {})", PLAYABLE_HAND_SIZE)]
    InvalidSelection { count: usize },
    #[error("hand statistics requested for zero cards")]
    EmptyHand,
}

#[derive(Debug, Clone)]
pub struct ScoreTables {
    hand_rules: HashMap<HandKind, (i64, f64)>,
    rank_chips: HashMap<Rank, i64>,
    modifiers: CardModifierRules,
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl ScoreTables {
    pub fn from_config(config: &GameConfig) -> Self {
        let hand_rules = config
            .hands
            .iter()
            .map(|rule| (rule.kind, (rule.base_chips, rule.base_mult)))
            .collect();
        let rank_chips = config
            .ranks
            .iter()
            .map(|rule| (rule.rank, rule.chips))
            .collect();
        Self {
            hand_rules,
            rank_chips,
            modifiers: config.card_modifiers.clone(),
        }
    }

    pub fn hand_base(&self, kind: HandKind) -> (i64, f64) {
        self.hand_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_hand_base(kind))
    }

    pub fn rank_chips(&self, rank: Rank) -> i64 {
        self.rank_chips
            .get(&rank)
            .copied()
            .unwrap_or_else(|| rank.base_chips())
    }

    pub fn enhancement_effect(&self, enhancement: Enhancement) -> RuleEffect {
        match enhancement {
            Enhancement::Bonus => RuleEffect::AddChips(self.modifiers.bonus_chips),
            Enhancement::Mult => RuleEffect::AddMult(self.modifiers.mult_add),
            Enhancement::Glass => RuleEffect::MultiplyMult(self.modifiers.glass_mult),
        }
    }

    pub fn edition_effect(&self, edition: Edition) -> RuleEffect {
        match edition {
            Edition::Foil => RuleEffect::AddChips(self.modifiers.foil_chips),
            Edition::Holographic => RuleEffect::AddMult(self.modifiers.holographic_mult),
            Edition::Polychrome => RuleEffect::MultiplyMult(self.modifiers.polychrome_mult),
        }
    }
}

/// Built-in base chips and mult per hand. Royal Flush shares the Straight
/// Flush tier.
pub fn default_hand_base(kind: HandKind) -> (i64, f64) {
    match kind {
        HandKind::HighCard => (5, 1.0),
        HandKind::Pair => (10, 2.0),
        HandKind::TwoPair => (20, 2.0),
        HandKind::Trips => (30, 2.0),
        HandKind::Straight => (30, 4.0),
        HandKind::Flush => (35, 4.0),
        HandKind::FullHouse => (40, 4.0),
        HandKind::Quads => (60, 7.0),
        HandKind::StraightFlush | HandKind::RoyalFlush => (100, 8.0),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub hand: HandKind,
    pub base: Score,
    pub total: Score,
    pub score: i64,
    pub trace: Vec<ScoreTraceStep>,
}

/// Drives one scoring event: classify, seed from the hand table, score each
/// card in selection order, then run abilities in registration order.
pub struct Scorer {
    tables: ScoreTables,
    abilities: Vec<Box<dyn Ability>>,
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("tables", &self.tables)
            .field("abilities", &self.ability_ids())
            .finish()
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoreTables::default())
    }
}

impl Scorer {
    pub fn new(tables: ScoreTables) -> Self {
        Self {
            tables,
            abilities: Vec::new(),
        }
    }

    pub fn register<A: Ability + 'static>(&mut self, ability: A) {
        self.abilities.push(Box::new(ability));
    }

    pub fn ability_ids(&self) -> Vec<&str> {
        self.abilities.iter().map(|ability| ability.id()).collect()
    }

    pub fn play(&self, cards: &[Card]) -> Result<ScoreBreakdown, ScoreError> {
        if cards.is_empty() || cards.len() > PLAYABLE_HAND_SIZE {
            return Err(ScoreError::InvalidSelection { count: cards.len() });
        }
        let stats = HandStats::from_cards(cards)?;
        let hand = classify(&stats);
        let (base_chips, base_mult) = self.tables.hand_base(hand);
        let base = Score::new(base_chips, base_mult);
        debug!("classified {} cards as {}", cards.len(), hand.id());

        let mut pass = ScorePass {
            score: base,
            trace: Vec::new(),
        };
        for (idx, card) in cards.iter().enumerate() {
            let chips = self.tables.rank_chips(card.rank);
            pass.apply(format!("card#{idx} {card}"), RuleEffect::AddChips(chips));
            if let Some(enhancement) = card.enhancement {
                let effect = self.tables.enhancement_effect(enhancement);
                pass.apply(format!("card#{idx} {enhancement:?}"), effect);
            }
            if let Some(edition) = card.edition {
                let effect = self.tables.edition_effect(edition);
                pass.apply(format!("card#{idx} {edition:?}"), effect);
            }
        }

        let ctx = AbilityContext {
            hand,
            cards,
            stats: &stats,
        };
        for ability in &self.abilities {
            pass.run_ability(ability.as_ref(), &ctx);
        }

        let score = pass.score.total();
        debug!(
            "{} scored {} ({} chips x {} mult)",
            hand.id(),
            score,
            pass.score.chips,
            pass.score.mult
        );
        Ok(ScoreBreakdown {
            hand,
            base,
            total: pass.score,
            score,
            trace: pass.trace,
        })
    }
}

/// Accumulator state private to a single `Scorer::play` call.
struct ScorePass {
    score: Score,
    trace: Vec<ScoreTraceStep>,
}

impl ScorePass {
    fn apply(&mut self, source: String, effect: RuleEffect) {
        let before = self.score;
        self.score.apply(&effect);
        self.record(source, Some(effect), before);
    }

    fn run_ability(&mut self, ability: &dyn Ability, ctx: &AbilityContext<'_>) {
        let before = self.score;
        ability.apply(ctx, &mut self.score);
        if self.score != before {
            self.record(ability.id().to_string(), None, before);
        }
    }

    fn record(&mut self, source: String, effect: Option<RuleEffect>, before: Score) {
        trace!("{source}: {before:?} -> {:?}", self.score);
        self.trace.push(ScoreTraceStep {
            source,
            effect,
            before,
            after: self.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandRule, RankRule};

    #[test]
    fn default_table_matches_hand_tiers() {
        let tables = ScoreTables::default();
        let expected = [
            (HandKind::HighCard, (5, 1.0)),
            (HandKind::Pair, (10, 2.0)),
            (HandKind::TwoPair, (20, 2.0)),
            (HandKind::Trips, (30, 2.0)),
            (HandKind::Straight, (30, 4.0)),
            (HandKind::Flush, (35, 4.0)),
            (HandKind::FullHouse, (40, 4.0)),
            (HandKind::Quads, (60, 7.0)),
            (HandKind::StraightFlush, (100, 8.0)),
            (HandKind::RoyalFlush, (100, 8.0)),
        ];
        for (kind, base) in expected {
            assert_eq!(tables.hand_base(kind), base, "{kind:?}");
        }
    }

    #[test]
    fn config_overrides_fall_back_per_entry() {
        let config = GameConfig {
            hands: vec![HandRule {
                kind: HandKind::Pair,
                base_chips: 15,
                base_mult: 3.0,
            }],
            ranks: vec![RankRule {
                rank: Rank::Ace,
                chips: 20,
            }],
            ..GameConfig::default()
        };
        let tables = ScoreTables::from_config(&config);
        assert_eq!(tables.hand_base(HandKind::Pair), (15, 3.0));
        assert_eq!(tables.hand_base(HandKind::Flush), (35, 4.0));
        assert_eq!(tables.rank_chips(Rank::Ace), 20);
        assert_eq!(tables.rank_chips(Rank::King), 10);
    }

    #[test]
    fn play_rejects_bad_selection_sizes() {
        let scorer = Scorer::default();
        assert_eq!(
            scorer.play(&[]).unwrap_err(),
            ScoreError::InvalidSelection { count: 0 }
        );
        let six: Vec<Card> = ["2S", "3S", "4S", "5S", "6S", "7S"]
            .iter()
            .map(|s| s.parse().expect("card"))
            .collect();
        assert_eq!(
            scorer.play(&six).unwrap_err(),
            ScoreError::InvalidSelection { count: 6 }
        );
    }

    #[test]
    fn trace_follows_selection_then_modifiers() {
        let cards = vec![
            "KS".parse::<Card>().expect("card").with_enhancement(Enhancement::Bonus),
            "KH".parse::<Card>().expect("card").with_edition(Edition::Polychrome),
        ];
        let breakdown = Scorer::default().play(&cards).expect("score");
        let sources: Vec<&str> = breakdown
            .trace
            .iter()
            .map(|step| step.source.as_str())
            .collect();
        assert_eq!(
            sources,
            vec!["card#0 KS", "card#0 Bonus", "card#1 KH", "card#1 Polychrome"]
        );
        // (10 + 10 + 30 + 10) chips, 2 * 1.5 mult
        assert_eq!(breakdown.total, Score::new(60, 3.0));
        assert_eq!(breakdown.score, 180);
    }
}
