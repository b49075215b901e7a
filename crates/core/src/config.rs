use crate::{BlindKind, DECK_SIZE, PLAY_HAND_SIZE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRules {
    pub hand_size: usize,
    pub plays: u8,
    pub discards: u8,
    /// Reject plays that are not exactly five cards.
    #[serde(default = "default_true")]
    pub require_full_play: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            hand_size: 8,
            plays: 3,
            discards: 7,
            require_full_play: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindRule {
    pub kind: BlindKind,
    pub display_name: String,
    pub requirement: i64,
}

impl BlindRule {
    pub fn new(kind: BlindKind, display_name: impl Into<String>, requirement: i64) -> Self {
        Self {
            kind,
            display_name: display_name.into(),
            requirement,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no blinds configured")]
    NoBlinds,
    #[error("blind {0:?} configured more than once")]
    DuplicateBlind(BlindKind),
    #[error("blind {found:?} listed where {expected:?} belongs")]
    BlindOutOfOrder { expected: BlindKind, found: BlindKind },
    #[error("blind {0:?} missing from the tier list")]
    MissingBlind(BlindKind),
    #[error("blind {0:?} requirement must be positive")]
    NonPositiveRequirement(BlindKind),
    #[error("blind {0:?} requirement must exceed the previous tier")]
    RequirementNotAscending(BlindKind),
    #[error("hand size {0} cannot hold a full play")]
    HandSizeTooSmall(usize),
    #[error("hand size {0} exceeds the deck")]
    HandSizeTooLarge(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default)]
    pub round: RoundRules,
    pub blinds: Vec<BlindRule>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round: RoundRules::default(),
            blinds: vec![
                BlindRule::new(BlindKind::Small, "Small Blind", 300),
                BlindRule::new(BlindKind::Big, "Big Blind", 800),
                BlindRule::new(BlindKind::Boss, "Boss Blind", 2000),
            ],
        }
    }
}

impl GameConfig {
    pub fn blind_rule(&self, kind: BlindKind) -> Option<&BlindRule> {
        self.blinds.iter().find(|rule| rule.kind == kind)
    }

    pub fn blind_index(&self, kind: BlindKind) -> Option<usize> {
        self.blinds.iter().position(|rule| rule.kind == kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let round = &self.round;
        if round.hand_size > DECK_SIZE {
            return Err(ConfigError::HandSizeTooLarge(round.hand_size));
        }
        if round.hand_size < PLAY_HAND_SIZE {
            return Err(ConfigError::HandSizeTooSmall(round.hand_size));
        }
        if self.blinds.is_empty() {
            return Err(ConfigError::NoBlinds);
        }
        let mut previous: Option<i64> = None;
        for (idx, rule) in self.blinds.iter().enumerate() {
            if self.blinds[..idx].iter().any(|other| other.kind == rule.kind) {
                return Err(ConfigError::DuplicateBlind(rule.kind));
            }
            let Some(&expected) = BlindKind::ALL.get(idx) else {
                return Err(ConfigError::DuplicateBlind(rule.kind));
            };
            if rule.kind != expected {
                return Err(ConfigError::BlindOutOfOrder {
                    expected,
                    found: rule.kind,
                });
            }
            if rule.requirement <= 0 {
                return Err(ConfigError::NonPositiveRequirement(rule.kind));
            }
            if previous.is_some_and(|prev| rule.requirement <= prev) {
                return Err(ConfigError::RequirementNotAscending(rule.kind));
            }
            previous = Some(rule.requirement);
        }
        if let Some(&missing) = BlindKind::ALL.get(self.blinds.len()) {
            return Err(ConfigError::MissingBlind(missing));
        }
        Ok(())
    }
}
