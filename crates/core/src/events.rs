use crate::{BlindKind, HandKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    BlindStarted {
        blind: BlindKind,
        target: i64,
        plays: u8,
        discards: u8,
    },
    HandDealt { count: usize, deck_left: usize },
    CardsDiscarded { count: usize, discards_left: u8 },
    HandScored {
        hand: HandKind,
        chips: i64,
        mult: i64,
        total: i64,
        score: i64,
    },
    BlindCleared { blind: BlindKind, score: i64, target: i64 },
    BlindFailed { blind: BlindKind, score: i64, target: i64 },
    BlindUnlocked { blind: BlindKind },
    ReturnedToBlindSelect,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
