use crate::{Card, HandKind, HandStats, Rank, RuleEffect, Score, Suit};
use serde::{Deserialize, Serialize};

/// Read-only view of the hand being scored, handed to every ability.
#[derive(Debug, Clone, Copy)]
pub struct AbilityContext<'a> {
    pub hand: HandKind,
    pub cards: &'a [Card],
    pub stats: &'a HandStats,
}

/// A passive effect that runs after all played cards have scored.
///
/// Abilities run in registration order and may change the score in any way;
/// they see the classified hand but cannot change the selection.
pub trait Ability: Send + Sync {
    fn id(&self) -> &str;

    fn apply(&self, ctx: &AbilityContext<'_>, score: &mut Score);
}

/// Wraps a closure as an [`Ability`].
pub struct FnAbility<F> {
    id: String,
    f: F,
}

impl<F> FnAbility<F>
where
    F: Fn(&AbilityContext<'_>, &mut Score) + Send + Sync,
{
    pub fn new(id: impl Into<String>, f: F) -> Self {
        Self { id: id.into(), f }
    }
}

impl<F> Ability for FnAbility<F>
where
    F: Fn(&AbilityContext<'_>, &mut Score) + Send + Sync,
{
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, ctx: &AbilityContext<'_>, score: &mut Score) {
        (self.f)(ctx, score)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    Always,
    HandKind(HandKind),
    ContainsHand(HandKind),
    ContainsRank(Rank),
    ContainsSuit(Suit),
    MaxCards(usize),
}

impl Condition {
    pub fn matches(&self, ctx: &AbilityContext<'_>) -> bool {
        match *self {
            Condition::Always => true,
            Condition::HandKind(kind) => ctx.hand == kind,
            Condition::ContainsHand(kind) => ctx.stats.contains(kind),
            Condition::ContainsRank(rank) => ctx.stats.rank_counts.contains_key(&rank),
            Condition::ContainsSuit(suit) => ctx.stats.suit_counts.contains_key(&suit),
            Condition::MaxCards(max) => ctx.cards.len() <= max,
        }
    }
}

/// Data-driven joker: applies its effects in order when every condition holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JokerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    pub effects: Vec<RuleEffect>,
}

impl JokerDef {
    pub fn matches(&self, ctx: &AbilityContext<'_>) -> bool {
        self.conditions.iter().all(|cond| cond.matches(ctx))
    }
}

impl Ability for JokerDef {
    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&self, ctx: &AbilityContext<'_>, score: &mut Score) {
        if !self.matches(ctx) {
            return;
        }
        for effect in &self.effects {
            score.apply(effect);
        }
    }
}
