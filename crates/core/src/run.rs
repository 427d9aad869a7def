use crate::{
    Ability, Deck, Event, EventBus, GameConfig, HandError, HandKind, HeldHand, RngState,
    ScoreBreakdown, ScoreTables, Scorer,
};
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("deck has no cards left to deal")]
    DeckEmpty,
    #[error(transparent)]
    Hand(#[from] HandError),
}

/// A single-player session: one deck, one held hand, one running score.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub scorer: Scorer,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: HeldHand,
    pub score: i64,
    pub hands_played: u32,
    pub last_hand: Option<HandKind>,
}

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let scorer = Scorer::new(ScoreTables::from_config(&config));
        let mut rng = RngState::from_seed(seed);
        let mut deck = Deck::standard52();
        deck.shuffle(&mut rng);
        let hand = HeldHand::new(config.hand_size);
        Self {
            config,
            scorer,
            rng,
            deck,
            hand,
            score: 0,
            hands_played: 0,
            last_hand: None,
        }
    }

    pub fn register_ability<A: Ability + 'static>(&mut self, ability: A) {
        self.scorer.register(ability);
    }

    /// Fill the hand up to its capacity from the top of the deck.
    pub fn deal(&mut self, events: &mut EventBus) -> Result<usize, RunError> {
        let needed = self.hand.free_slots();
        if needed == 0 {
            return Ok(0);
        }
        if self.deck.is_empty() {
            events.push(Event::DeckExhausted);
            return Err(RunError::DeckEmpty);
        }
        let drawn = self.deck.draw_cards(needed);
        let count = drawn.len();
        self.hand.add_all(drawn)?;
        debug!("dealt {count} cards, {} left in deck", self.deck.len());
        events.push(Event::HandDealt { count });
        Ok(count)
    }

    /// Select `indices` from the held hand and play them.
    pub fn play(
        &mut self,
        indices: &[usize],
        events: &mut EventBus,
    ) -> Result<ScoreBreakdown, RunError> {
        self.hand.select(indices)?;
        let (breakdown, played) = match self.hand.play_selected(&self.scorer) {
            Ok(result) => result,
            Err(err) => {
                self.hand.deselect();
                return Err(err.into());
            }
        };
        self.deck.discard(played);
        self.score += breakdown.score;
        self.hands_played += 1;
        self.last_hand = Some(breakdown.hand);
        info!(
            "played {} for {} (run total {})",
            breakdown.hand.display_name(),
            breakdown.score,
            self.score
        );
        events.push(Event::HandScored {
            hand: breakdown.hand,
            chips: breakdown.total.chips,
            mult: breakdown.total.mult,
            total: breakdown.score,
        });
        Ok(breakdown)
    }

    /// Start over with a fresh shuffled deck, keeping config and abilities.
    pub fn reset(&mut self) {
        self.deck = Deck::standard52();
        self.deck.shuffle(&mut self.rng);
        self.hand = HeldHand::new(self.config.hand_size);
        self.score = 0;
        self.hands_played = 0;
        self.last_hand = None;
    }
}
