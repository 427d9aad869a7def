use crate::{Card, ScoreBreakdown, ScoreError, Scorer, HAND_SIZE, PLAYABLE_HAND_SIZE};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("hand is full ({capacity} cards)")]
    HandFull { capacity: usize },
    #[error("card index {index} out of range for {len} held cards")]
    InvalidIndex { index: usize, len: usize },
    #[error("card index {0} selected twice")]
    DuplicateIndex(usize),
    #[error("too many cards selected: {0}")]
    TooManySelected(usize),
    #[error("no cards selected")]
    NothingSelected,
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Cards currently held by the player plus the pending selection.
///
/// Selection is stored as indices into `cards`, so the cards themselves stay
/// in the hand until a play has been scored.
#[derive(Debug, Clone)]
pub struct HeldHand {
    cards: Vec<Card>,
    selected: Vec<usize>,
    capacity: usize,
}

impl Default for HeldHand {
    fn default() -> Self {
        Self::new(HAND_SIZE)
    }
}

impl HeldHand {
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: Vec::with_capacity(capacity),
            selected: Vec::new(),
            capacity,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.cards.len())
    }

    pub fn add(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() >= self.capacity {
            return Err(HandError::HandFull {
                capacity: self.capacity,
            });
        }
        self.cards.push(card);
        Ok(())
    }

    /// Add every card or none of them.
    pub fn add_all(&mut self, cards: Vec<Card>) -> Result<(), HandError> {
        if cards.len() > self.free_slots() {
            return Err(HandError::HandFull {
                capacity: self.capacity,
            });
        }
        self.cards.extend(cards);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Card, HandError> {
        if index >= self.cards.len() {
            return Err(HandError::InvalidIndex {
                index,
                len: self.cards.len(),
            });
        }
        self.selected.clear();
        Ok(self.cards.remove(index))
    }

    /// Replace the current selection.
    pub fn select(&mut self, indices: &[usize]) -> Result<(), HandError> {
        if indices.len() > PLAYABLE_HAND_SIZE {
            return Err(HandError::TooManySelected(indices.len()));
        }
        let mut picked: Vec<usize> = Vec::with_capacity(indices.len());
        for &index in indices {
            if index >= self.cards.len() {
                return Err(HandError::InvalidIndex {
                    index,
                    len: self.cards.len(),
                });
            }
            if picked.contains(&index) {
                return Err(HandError::DuplicateIndex(index));
            }
            picked.push(index);
        }
        self.selected = picked;
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected.clear();
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    pub fn selected_cards(&self) -> Vec<Card> {
        self.selected.iter().map(|&idx| self.cards[idx]).collect()
    }

    /// Score the selection and, only once scoring succeeds, remove the
    /// played cards from the hand.
    pub fn play_selected(
        &mut self,
        scorer: &Scorer,
    ) -> Result<(ScoreBreakdown, Vec<Card>), HandError> {
        if self.selected.is_empty() {
            return Err(HandError::NothingSelected);
        }
        let played = self.selected_cards();
        let breakdown = scorer.play(&played)?;

        let mut indices = std::mem::take(&mut self.selected);
        indices.sort_unstable_by(|a, b| b.cmp(a));
        for idx in indices {
            self.cards.remove(idx);
        }
        Ok((breakdown, played))
    }
}
