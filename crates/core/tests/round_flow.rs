use blindrun_core::{
    Card, EventBus, HandKind, RandomSource, Rank, RoundEngine, RoundError, RoundRules,
    RoundStatus, Suit, DECK_SIZE,
};
use std::collections::HashSet;

/// Leaves the deck in build order, so the first draws are A♣ K♣ Q♣ J♣ 10♣ 9♣ 8♣ 7♣.
#[derive(Debug)]
struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle_cards(&mut self, _cards: &mut [Card]) {}
}

fn started(rules: RoundRules, target: i64) -> (RoundEngine, EventBus) {
    let mut events = EventBus::default();
    let mut round = RoundEngine::new(rules);
    round.start_round(target, &mut NoShuffle, &mut events);
    (round, events)
}

fn select(round: &mut RoundEngine, indices: &[usize]) {
    for &idx in indices {
        assert_eq!(round.toggle_select(idx), Ok(true));
    }
}

fn clubs(rank: Rank) -> Card {
    Card::new(Suit::Clubs, rank)
}

#[test]
fn start_round_deals_a_full_hand_from_a_fresh_deck() {
    let (round, _) = started(RoundRules::default(), 300);
    assert_eq!(round.status(), RoundStatus::Playing);
    assert_eq!(round.hand().len(), 8);
    assert_eq!(round.deck_remaining(), DECK_SIZE - 8);
    assert_eq!(round.state().plays_left, 3);
    assert_eq!(round.state().discards_left, 7);
    assert_eq!(round.state().score, 0);
    assert_eq!(round.hand()[0].card, clubs(Rank::Ace));
    assert!(round.hand().iter().all(|slot| !slot.selected));

    let mut all: HashSet<Card> = round.deck().cards().iter().copied().collect();
    all.extend(round.hand().iter().map(|slot| slot.card));
    assert_eq!(all.len(), DECK_SIZE);
}

#[test]
fn commands_wait_for_round_start() {
    let mut events = EventBus::default();
    let mut round = RoundEngine::new(RoundRules::default());
    assert_eq!(
        round.toggle_select(0),
        Err(RoundError::RoundNotActive(RoundStatus::Initialized))
    );
    assert!(matches!(
        round.play(&mut events),
        Err(RoundError::RoundNotActive(RoundStatus::Initialized))
    ));
}

#[test]
fn selection_caps_at_five() {
    let (mut round, _) = started(RoundRules::default(), 300);
    select(&mut round, &[0, 1, 2, 3, 4]);
    assert_eq!(round.toggle_select(5), Err(RoundError::SelectionFull(5)));
    assert_eq!(round.selected_count(), 5);
    assert_eq!(round.toggle_select(2), Ok(false));
    assert_eq!(round.toggle_select(5), Ok(true));
    assert_eq!(round.toggle_select(8), Err(RoundError::InvalidCardIndex(8)));
}

#[test]
fn selected_hand_needs_exactly_five_cards() {
    let (mut round, _) = started(RoundRules::default(), 300);
    select(&mut round, &[0, 1, 2, 3]);
    assert_eq!(round.selected_hand(), None);
    select(&mut round, &[4]);
    assert_eq!(round.selected_hand(), Some(HandKind::RoyalFlush));
}

#[test]
fn discard_replaces_selected_cards() {
    let (mut round, mut events) = started(RoundRules::default(), 300);
    events.drain().for_each(drop);
    select(&mut round, &[0, 1]);
    assert_eq!(round.discard(&mut events), Ok(2));
    assert_eq!(round.state().discards_left, 6);
    assert_eq!(round.hand().len(), 8);
    assert_eq!(round.deck_remaining(), DECK_SIZE - 10);
    assert_eq!(round.hand()[0].card, clubs(Rank::Queen));
    assert_eq!(round.hand()[7].card, clubs(Rank::Five));
    assert_eq!(round.selected_count(), 0);
    assert_eq!(round.state().score, 0);
    assert_eq!(round.status(), RoundStatus::Playing);
    assert_eq!(events.drain().count(), 2);
}

#[test]
fn discard_without_budget_changes_nothing() {
    let rules = RoundRules {
        discards: 0,
        ..RoundRules::default()
    };
    let (mut round, mut events) = started(rules, 300);
    select(&mut round, &[0, 1]);
    let hand_before = round.hand().to_vec();
    let state_before = round.state();
    assert_eq!(round.discard(&mut events), Err(RoundError::NoDiscardsLeft));
    assert_eq!(round.hand(), hand_before.as_slice());
    assert_eq!(round.state(), state_before);
    assert_eq!(round.deck_remaining(), DECK_SIZE - 8);
}

#[test]
fn discard_and_play_need_a_selection() {
    let (mut round, mut events) = started(RoundRules::default(), 300);
    assert_eq!(round.discard(&mut events), Err(RoundError::NothingSelected));
    assert!(matches!(
        round.play(&mut events),
        Err(RoundError::NothingSelected)
    ));
    assert_eq!(round.state().discards_left, 7);
    assert_eq!(round.state().plays_left, 3);
}

#[test]
fn partial_plays_are_rejected_by_default() {
    let (mut round, mut events) = started(RoundRules::default(), 300);
    select(&mut round, &[0, 1, 2]);
    assert!(matches!(
        round.play(&mut events),
        Err(RoundError::InvalidCardCount {
            expected: 5,
            actual: 3
        })
    ));
    assert_eq!(round.state().plays_left, 3);
}

#[test]
fn partial_plays_score_as_high_card_when_allowed() {
    let rules = RoundRules {
        require_full_play: false,
        ..RoundRules::default()
    };
    let (mut round, mut events) = started(rules, 300);
    select(&mut round, &[0, 1, 2]);
    let outcome = round.play(&mut events).expect("play");
    assert_eq!(outcome.breakdown.hand, HandKind::HighCard);
    assert_eq!(outcome.breakdown.points(), 36);
    assert_eq!(round.state().score, 36);
    assert_eq!(round.hand().len(), 8);
    assert_eq!(round.deck_remaining(), DECK_SIZE - 11);
}

#[test]
fn reaching_the_target_ends_the_round_in_place() {
    let (mut round, mut events) = started(RoundRules::default(), 300);
    select(&mut round, &[0, 1, 2, 3, 4]);
    let outcome = round.play(&mut events).expect("play");
    assert_eq!(outcome.breakdown.hand, HandKind::RoyalFlush);
    assert_eq!(outcome.status, RoundStatus::Won);
    assert_eq!(round.state().score, 1208);
    assert_eq!(round.state().plays_left, 2);
    // Winning cards stay in the hand and the deck is untouched.
    assert_eq!(round.hand().len(), 8);
    assert_eq!(round.selected_count(), 5);
    assert_eq!(round.deck_remaining(), DECK_SIZE - 8);
    assert_eq!(
        round.toggle_select(6),
        Err(RoundError::RoundNotActive(RoundStatus::Won))
    );
}

#[test]
fn running_out_of_plays_exhausts_the_round() {
    let (mut round, mut events) = started(RoundRules::default(), 1_000_000);
    for remaining in [2u8, 1] {
        select(&mut round, &[0, 1, 2, 3, 4]);
        let outcome = round.play(&mut events).expect("play");
        assert_eq!(outcome.status, RoundStatus::Playing);
        assert_eq!(round.state().plays_left, remaining);
        assert_eq!(round.hand().len(), 8);
    }
    select(&mut round, &[0, 1, 2, 3, 4]);
    let outcome = round.play(&mut events).expect("play");
    assert_eq!(outcome.status, RoundStatus::Exhausted);
    assert_eq!(round.state().plays_left, 0);
    assert!(matches!(
        round.play(&mut events),
        Err(RoundError::RoundNotActive(RoundStatus::Exhausted))
    ));
}

#[test]
fn second_play_continues_from_refilled_hand() {
    let (mut round, mut events) = started(RoundRules::default(), 1_000_000);
    select(&mut round, &[0, 1, 2, 3, 4]);
    round.play(&mut events).expect("play");
    assert_eq!(round.hand()[0].card, clubs(Rank::Nine));
    select(&mut round, &[0, 1, 2, 3, 4]);
    let outcome = round.play(&mut events).expect("play");
    // 9♣ 8♣ 7♣ 6♣ 5♣: (100 + 35) * 8
    assert_eq!(outcome.breakdown.hand, HandKind::StraightFlush);
    assert_eq!(round.state().score, 1208 + 1080);
}

#[test]
fn empty_deck_with_short_hand_exhausts_the_round() {
    let rules = RoundRules {
        plays: 20,
        ..RoundRules::default()
    };
    let (mut round, mut events) = started(rules, 1_000_000);
    for _ in 0..8 {
        select(&mut round, &[0, 1, 2, 3, 4]);
        let outcome = round.play(&mut events).expect("play");
        assert_eq!(outcome.status, RoundStatus::Playing);
    }
    assert_eq!(round.deck_remaining(), 4);
    select(&mut round, &[0, 1, 2, 3, 4]);
    let outcome = round.play(&mut events).expect("play");
    assert_eq!(outcome.status, RoundStatus::Exhausted);
    assert_eq!(round.hand().len(), 7);
    assert_eq!(round.deck_remaining(), 0);
    assert_eq!(round.state().plays_left, 11);
}

#[test]
fn discards_never_end_the_round() {
    let rules = RoundRules {
        discards: 20,
        ..RoundRules::default()
    };
    let (mut round, mut events) = started(rules, 300);
    for _ in 0..9 {
        select(&mut round, &[0, 1, 2, 3, 4]);
        round.discard(&mut events).expect("discard");
    }
    assert_eq!(round.deck_remaining(), 0);
    assert_eq!(round.hand().len(), 7);
    assert_eq!(round.state().discards_left, 11);
    assert_eq!(round.status(), RoundStatus::Playing);
}
