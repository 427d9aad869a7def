use crate::{Card, Rank, RngState, Suit, BASE_DECK_SIZE};

#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(BASE_DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::standard(suit, rank));
            }
        }
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    /// Cards still available to draw.
    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    /// Every card the deck owns, drawable or discarded.
    pub fn full_size(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.draw.len());
        let start = self.draw.len() - take;
        let mut cards = self.draw.split_off(start);
        cards.reverse();
        cards
    }

    /// Remove the first drawable copy of `card`, returning whether one was found.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.draw.iter().position(|c| c == card) {
            Some(idx) => {
                self.draw.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_holds_every_card_once() {
        let deck = Deck::standard52();
        assert_eq!(deck.len(), BASE_DECK_SIZE);
        let unique: HashSet<Card> = deck.draw.iter().copied().collect();
        assert_eq!(unique.len(), BASE_DECK_SIZE);
    }

    #[test]
    fn draw_takes_from_top_and_stops_when_empty() {
        let mut deck = Deck::standard52();
        let top = *deck.draw.last().expect("top card");
        let drawn = deck.draw_cards(8);
        assert_eq!(drawn.len(), 8);
        assert_eq!(drawn[0], top);
        assert_eq!(deck.len(), 44);
        let rest = deck.draw_cards(100);
        assert_eq!(rest.len(), 44);
        assert!(deck.is_empty());
    }

    #[test]
    fn same_seed_shuffles_identically() {
        let mut a = Deck::standard52();
        let mut b = Deck::standard52();
        let mut rng = RngState::from_seed(7);
        assert_eq!(rng.seed(), 7);
        a.shuffle(&mut rng);
        b.shuffle(&mut RngState::from_seed(7));
        assert_eq!(a.draw, b.draw);
        assert_ne!(a.draw, Deck::standard52().draw);
    }

    #[test]
    fn remove_and_discard_keep_full_size() {
        let mut deck = Deck::standard52();
        let card = Card::standard(Suit::Hearts, Rank::Queen);
        assert!(deck.remove(&card));
        assert!(!deck.remove(&card));
        deck.discard(vec![card]);
        assert_eq!(deck.len(), 51);
        assert_eq!(deck.full_size(), 52);
    }
}
