use crate::{
    evaluate_hand, score_hand, Card, Deck, Event, EventBus, HandCard, HandKind, RandomSource,
    RoundRules, RoundState, RoundStatus, ScoreBreakdown, PLAY_HAND_SIZE,
};
use log::debug;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("round not in play: {0:?}")]
    RoundNotActive(RoundStatus),
    #[error("invalid card index {0}")]
    InvalidCardIndex(usize),
    #[error("selection already holds {0} cards")]
    SelectionFull(usize),
    #[error("no cards selected")]
    NothingSelected,
    #[error("no plays left")]
    NoPlaysLeft,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("invalid card count: expected {expected}, got {actual}")]
    InvalidCardCount { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub played: Vec<Card>,
    pub breakdown: ScoreBreakdown,
    pub status: RoundStatus,
}

/// Every command validates before touching state, so a rejected command
/// leaves the round exactly as it was.
#[derive(Debug, Clone)]
pub struct RoundEngine {
    rules: RoundRules,
    deck: Deck,
    hand: Vec<HandCard>,
    state: RoundState,
    status: RoundStatus,
    target: i64,
}

impl RoundEngine {
    pub fn new(rules: RoundRules) -> Self {
        let state = RoundState::new(rules.plays, rules.discards);
        Self {
            rules,
            deck: Deck::default(),
            hand: Vec::new(),
            state,
            status: RoundStatus::Initialized,
            target: 0,
        }
    }

    pub fn start_round(&mut self, target: i64, rng: &mut dyn RandomSource, events: &mut EventBus) {
        let mut deck = Deck::standard52();
        deck.shuffle(rng);
        self.deck = deck;
        self.state = RoundState::new(self.rules.plays, self.rules.discards);
        self.target = target;
        self.hand.clear();
        self.status = RoundStatus::Playing;
        self.draw_to_hand(events);
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.rules.clone());
    }

    /// Flips the selection of the card at `index` and returns its new state.
    pub fn toggle_select(&mut self, index: usize) -> Result<bool, RoundError> {
        self.require_active()?;
        let selected = self.selected_count();
        let slot = self
            .hand
            .get_mut(index)
            .ok_or(RoundError::InvalidCardIndex(index))?;
        if !slot.selected && selected >= PLAY_HAND_SIZE {
            return Err(RoundError::SelectionFull(selected));
        }
        slot.selected = !slot.selected;
        Ok(slot.selected)
    }

    /// Discards the selection and refills the hand. Returns how many cards left the hand.
    pub fn discard(&mut self, events: &mut EventBus) -> Result<usize, RoundError> {
        self.require_active()?;
        if self.state.discards_left == 0 {
            return Err(RoundError::NoDiscardsLeft);
        }
        if self.selected_count() == 0 {
            return Err(RoundError::NothingSelected);
        }
        let discarded = self.take_selected();
        self.state.discards_left -= 1;
        events.push(Event::CardsDiscarded {
            count: discarded.len(),
            discards_left: self.state.discards_left,
        });
        self.draw_to_hand(events);
        Ok(discarded.len())
    }

    pub fn play(&mut self, events: &mut EventBus) -> Result<PlayOutcome, RoundError> {
        self.require_active()?;
        if self.state.plays_left == 0 {
            return Err(RoundError::NoPlaysLeft);
        }
        let played = self.selected_cards();
        if played.is_empty() {
            return Err(RoundError::NothingSelected);
        }
        if self.rules.require_full_play && played.len() != PLAY_HAND_SIZE {
            return Err(RoundError::InvalidCardCount {
                expected: PLAY_HAND_SIZE,
                actual: played.len(),
            });
        }

        let breakdown = score_hand(&played);
        let points = breakdown.points();
        self.state.score = self.state.score.saturating_add(points);
        self.state.plays_left -= 1;
        debug!(
            "played {} for {} (round score {})",
            breakdown.hand.name(),
            points,
            self.state.score
        );
        events.push(Event::HandScored {
            hand: breakdown.hand,
            chips: breakdown.total.chips,
            mult: breakdown.total.mult,
            total: points,
            score: self.state.score,
        });

        if self.state.score >= self.target {
            // The round is over; the winning cards stay where they are.
            self.status = RoundStatus::Won;
        } else {
            self.take_selected();
            self.draw_to_hand(events);
            if self.deck.is_empty() && self.hand.len() < self.rules.hand_size {
                self.status = RoundStatus::Exhausted;
            } else if self.state.plays_left == 0 {
                self.status = RoundStatus::Exhausted;
            }
        }

        Ok(PlayOutcome {
            played,
            breakdown,
            status: self.status,
        })
    }

    pub fn selected_hand(&self) -> Option<HandKind> {
        let cards = self.selected_cards();
        (cards.len() == PLAY_HAND_SIZE).then(|| evaluate_hand(&cards))
    }

    pub fn selected_cards(&self) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|slot| slot.selected)
            .map(|slot| slot.card)
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.hand.iter().filter(|slot| slot.selected).count()
    }

    pub fn hand(&self) -> &[HandCard] {
        &self.hand
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    fn require_active(&self) -> Result<(), RoundError> {
        if self.status == RoundStatus::Playing {
            Ok(())
        } else {
            Err(RoundError::RoundNotActive(self.status))
        }
    }

    fn take_selected(&mut self) -> Vec<Card> {
        let mut taken = Vec::new();
        self.hand.retain(|slot| {
            if slot.selected {
                taken.push(slot.card);
                false
            } else {
                true
            }
        });
        taken
    }

    fn draw_to_hand(&mut self, events: &mut EventBus) {
        let needed = self.rules.hand_size.saturating_sub(self.hand.len());
        if needed == 0 {
            return;
        }
        let drawn = self.deck.draw_cards(needed);
        if drawn.is_empty() {
            return;
        }
        let count = drawn.len();
        self.hand.extend(drawn.into_iter().map(HandCard::new));
        debug!("drew {count} cards, {} left in deck", self.deck.len());
        events.push(Event::HandDealt {
            count,
            deck_left: self.deck.len(),
        });
    }
}
