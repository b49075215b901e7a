use crate::{evaluate_hand, Card, HandKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Score {
    pub chips: i64,
    pub mult: i64,
}

impl Score {
    pub fn total(&self) -> i64 {
        self.chips.saturating_mul(self.mult)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub hand: HandKind,
    pub base: Score,
    pub card_chips: i64,
    pub total: Score,
}

impl ScoreBreakdown {
    pub fn points(&self) -> i64 {
        self.total.total()
    }
}

/// Classifies `cards` and scores them as `(base chips + card chips) * mult`.
pub fn score_hand(cards: &[Card]) -> ScoreBreakdown {
    let hand = evaluate_hand(cards);
    let (chips, mult) = hand.base();
    let base = Score { chips, mult };
    let card_chips: i64 = cards.iter().map(Card::chip_value).sum();
    let total = Score {
        chips: base.chips + card_chips,
        mult: base.mult,
    };
    ScoreBreakdown {
        hand,
        base,
        card_chips,
        total,
    }
}
