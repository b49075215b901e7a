use crate::{Card, Rank};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const PLAY_HAND_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    pub fn name(self) -> &'static str {
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

    pub fn base(self) -> (i64, i64) {
        match self {
            HandKind::HighCard => (5, 1),
            HandKind::Pair => (10, 2),
            HandKind::TwoPair => (20, 2),
            HandKind::Trips => (30, 3),
            HandKind::Straight => (30, 4),
            HandKind::Flush => (35, 4),
            HandKind::FullHouse => (40, 4),
            HandKind::Quads => (60, 7),
            HandKind::StraightFlush | HandKind::RoyalFlush => (100, 8),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandAnalysis {
    pub flush: bool,
    pub straight: bool,
    pub royal: bool,
    /// Size of each same-rank group, largest first.
    pub counts: Vec<usize>,
}

/// Analyzes exactly [`PLAY_HAND_SIZE`] cards. Any other count yields the empty
/// analysis, which classifies as high card.
pub fn analyze(cards: &[Card]) -> HandAnalysis {
    if cards.len() != PLAY_HAND_SIZE {
        return HandAnalysis::default();
    }

    let mut rank_counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    let mut counts: Vec<usize> = rank_counts.values().copied().collect();
    counts.sort_by(|a, b| b.cmp(a));

    let flush = cards.iter().all(|card| card.suit == cards[0].suit);
    let straight = is_straight(cards);
    let royal = flush && is_royal(cards);

    HandAnalysis {
        flush,
        straight,
        royal,
        counts,
    }
}

pub fn identify(info: &HandAnalysis) -> HandKind {
    let has = |n: usize| info.counts.contains(&n);
    if info.royal {
        return HandKind::RoyalFlush;
    }
    if info.straight && info.flush {
        return HandKind::StraightFlush;
    }
    if has(4) {
        return HandKind::Quads;
    }
    if has(3) && has(2) {
        return HandKind::FullHouse;
    }
    if info.flush {
        return HandKind::Flush;
    }
    if info.straight {
        return HandKind::Straight;
    }
    if has(3) {
        return HandKind::Trips;
    }
    if info.counts.iter().filter(|&&c| c == 2).count() == 2 {
        return HandKind::TwoPair;
    }
    if has(2) {
        return HandKind::Pair;
    }
    HandKind::HighCard
}

pub fn evaluate_hand(cards: &[Card]) -> HandKind {
    identify(&analyze(cards))
}

fn sorted_values(cards: &[Card]) -> Vec<u8> {
    let mut values: Vec<u8> = cards.iter().map(|card| card.rank.value()).collect();
    values.sort_unstable();
    values
}

fn is_straight(cards: &[Card]) -> bool {
    let mut values = sorted_values(cards);
    values.dedup();
    if values.len() != PLAY_HAND_SIZE {
        return false;
    }
    if values == [2, 3, 4, 5, 14] {
        return true;
    }
    values.windows(2).all(|w| w[1] == w[0] + 1)
}

fn is_royal(cards: &[Card]) -> bool {
    sorted_values(cards) == [10, 11, 12, 13, 14]
}
