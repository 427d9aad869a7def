use crate::{Card, Rank, ScoreError, Suit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PLAYABLE_HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandKind {
    HighCard,
    Pair,
    TwoPair,
    Trips,
    Straight,
    Flush,
    FullHouse,
    Quads,
    StraightFlush,
    RoyalFlush,
}

impl HandKind {
    pub const ALL: [HandKind; 10] = [
        HandKind::HighCard,
        HandKind::Pair,
        HandKind::TwoPair,
        HandKind::Trips,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::Quads,
        HandKind::StraightFlush,
        HandKind::RoyalFlush,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::HighCard => "high_card",
            HandKind::Pair => "pair",
            HandKind::TwoPair => "two_pair",
            HandKind::Trips => "trips",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::Quads => "quads",
            HandKind::StraightFlush => "straight_flush",
            HandKind::RoyalFlush => "royal_flush",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::HighCard => "High Card",
            HandKind::Pair => "Pair",
            HandKind::TwoPair => "Two Pair",
            HandKind::Trips => "Three of a Kind",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::Quads => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
            HandKind::RoyalFlush => "Royal Flush",
        }
    }
}

/// Rank and suit frequencies of one played selection.
///
/// Built fresh for every scoring event and never mutated afterwards; every
/// classifier predicate reads it through a shared reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandStats {
    pub rank_counts: HashMap<Rank, usize>,
    pub suit_counts: HashMap<Suit, usize>,
}

impl HandStats {
    pub fn from_cards(cards: &[Card]) -> Result<Self, ScoreError> {
        if cards.is_empty() {
            return Err(ScoreError::EmptyHand);
        }
        let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
        let mut suit_counts: HashMap<Suit, usize> = HashMap::new();
        for card in cards {
            *rank_counts.entry(card.rank).or_insert(0) += 1;
            *suit_counts.entry(card.suit).or_insert(0) += 1;
        }
        Ok(Self {
            rank_counts,
            suit_counts,
        })
    }

    pub fn card_count(&self) -> usize {
        self.rank_counts.values().sum()
    }

    /// Number of distinct ranks appearing exactly `count` times.
    pub fn ranks_with_count(&self, count: usize) -> usize {
        self.rank_counts.values().filter(|&&c| c == count).count()
    }

    pub fn max_rank_count(&self) -> usize {
        self.rank_counts.values().copied().max().unwrap_or(0)
    }

    pub fn is_flush(&self) -> bool {
        self.suit_counts
            .values()
            .any(|&count| count >= PLAYABLE_HAND_SIZE)
    }

    pub fn is_straight(&self) -> bool {
        let mut values: Vec<u8> = self.rank_counts.keys().map(|rank| rank.value()).collect();
        if values.len() != PLAYABLE_HAND_SIZE {
            return false;
        }
        values.sort_unstable();
        if values == [2, 3, 4, 5, 14] {
            return true;
        }
        values[4] - values[0] == 4
    }

    pub fn is_royal(&self) -> bool {
        let mut values: Vec<u8> = self.rank_counts.keys().map(|rank| rank.value()).collect();
        values.sort_unstable();
        values == [10, 11, 12, 13, 14]
    }

    /// Whether the selection holds at least the shape of `kind`, e.g. a full
    /// house contains both a pair and three of a kind.
    pub fn contains(&self, kind: HandKind) -> bool {
        let pairs_or_better = self.rank_counts.values().filter(|&&c| c >= 2).count();
        match kind {
            HandKind::HighCard => self.card_count() > 0,
            HandKind::Pair => pairs_or_better >= 1,
            HandKind::TwoPair => pairs_or_better >= 2,
            HandKind::Trips => self.max_rank_count() >= 3,
            HandKind::Straight => self.is_straight(),
            HandKind::Flush => self.is_flush(),
            HandKind::FullHouse => self.ranks_with_count(3) >= 1 && self.ranks_with_count(2) >= 1,
            HandKind::Quads => self.max_rank_count() >= 4,
            HandKind::StraightFlush => self.is_straight() && self.is_flush(),
            HandKind::RoyalFlush => self.is_straight() && self.is_flush() && self.is_royal(),
        }
    }
}

/// Classify a selection, first match wins from Royal Flush down to High Card.
pub fn classify(stats: &HandStats) -> HandKind {
    let straight = stats.is_straight();
    let flush = stats.is_flush();

    if straight && flush {
        return if stats.is_royal() {
            HandKind::RoyalFlush
        } else {
            HandKind::StraightFlush
        };
    }
    if stats.ranks_with_count(4) >= 1 {
        return HandKind::Quads;
    }
    if stats.ranks_with_count(3) >= 1 && stats.ranks_with_count(2) >= 1 {
        return HandKind::FullHouse;
    }
    if flush {
        return HandKind::Flush;
    }
    if straight {
        return HandKind::Straight;
    }
    if stats.ranks_with_count(3) >= 1 {
        return HandKind::Trips;
    }
    if stats.ranks_with_count(2) >= 2 {
        return HandKind::TwoPair;
    }
    if stats.ranks_with_count(2) >= 1 {
        return HandKind::Pair;
    }
    HandKind::HighCard
}

pub fn evaluate_hand(cards: &[Card]) -> Result<HandKind, ScoreError> {
    let stats = HandStats::from_cards(cards)?;
    Ok(classify(&stats))
}
