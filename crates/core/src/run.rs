use crate::{
    BlindKind, BlindRule, ConfigError, GameConfig, HandCard, HandKind, Phase, RandomSource,
    RngState, RoundEngine, RoundError, RoundResult, RoundStatus,
};
use serde::Serialize;
use thiserror::Error;

mod blind;
mod play;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("blind {0:?} is not configured")]
    UnknownBlind(BlindKind),
    #[error("blind {0:?} is locked")]
    BlindLocked(BlindKind),
    #[error(transparent)]
    Round(#[from] RoundError),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// One game session: blind progression plus the round being played.
#[derive(Debug)]
pub struct RunState {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    round: RoundEngine,
    phase: Phase,
    unlocked: usize,
    current: Option<usize>,
    last_result: Option<RoundResult>,
}

impl RunState {
    pub fn new(config: GameConfig, rng: Box<dyn RandomSource>) -> Result<Self, RunError> {
        config.validate()?;
        let round = RoundEngine::new(config.round.clone());
        Ok(Self {
            config,
            rng,
            round,
            phase: Phase::SelectingBlind,
            unlocked: 1,
            current: None,
            last_result: None,
        })
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, RunError> {
        Self::new(config, Box::new(RngState::from_seed(seed)))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn blinds(&self) -> &[BlindRule] {
        &self.config.blinds
    }

    pub fn unlocked_blinds(&self) -> &[BlindRule] {
        &self.config.blinds[..self.unlocked]
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked
    }

    pub fn is_unlocked(&self, kind: BlindKind) -> bool {
        self.config
            .blind_index(kind)
            .is_some_and(|idx| idx < self.unlocked)
    }

    pub fn current_blind(&self) -> Option<&BlindRule> {
        self.current.and_then(|idx| self.config.blinds.get(idx))
    }

    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    pub fn round(&self) -> &RoundEngine {
        &self.round
    }

    pub fn round_status(&self) -> RoundStatus {
        self.round.status()
    }

    pub fn hand(&self) -> &[HandCard] {
        self.round.hand()
    }

    pub fn deck_remaining(&self) -> usize {
        self.round.deck_remaining()
    }

    pub fn plays_left(&self) -> u8 {
        self.round.state().plays_left
    }

    pub fn discards_left(&self) -> u8 {
        self.round.state().discards_left
    }

    pub fn score(&self) -> i64 {
        self.round.state().score
    }

    pub fn selected_hand(&self) -> Option<HandKind> {
        self.round.selected_hand()
    }

    pub fn snapshot(&self) -> RunSnapshot {
        let blinds = self
            .config
            .blinds
            .iter()
            .enumerate()
            .map(|(idx, rule)| BlindView {
                kind: rule.kind,
                name: rule.display_name.clone(),
                requirement: rule.requirement,
                unlocked: idx < self.unlocked,
            })
            .collect();
        let hand = self
            .hand()
            .iter()
            .map(|slot| CardView {
                label: slot.card.to_string(),
                selected: slot.selected,
            })
            .collect();
        RunSnapshot {
            phase: self.phase,
            blinds,
            current_blind: self.current_blind().map(|rule| rule.kind),
            target: self.current_blind().map(|rule| rule.requirement),
            hand,
            deck_remaining: self.deck_remaining(),
            plays_left: self.plays_left(),
            discards_left: self.discards_left(),
            score: self.score(),
            selected_hand: self.selected_hand(),
            round_status: self.round_status(),
            last_result: self.last_result,
        }
    }

    fn require_phase(&self, phase: Phase) -> Result<(), RunError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(RunError::InvalidPhase(self.phase))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlindView {
    pub kind: BlindKind,
    pub name: String,
    pub requirement: i64,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSnapshot {
    pub phase: Phase,
    pub blinds: Vec<BlindView>,
    pub current_blind: Option<BlindKind>,
    pub target: Option<i64>,
    pub hand: Vec<CardView>,
    pub deck_remaining: usize,
    pub plays_left: u8,
    pub discards_left: u8,
    pub score: i64,
    pub selected_hand: Option<HandKind>,
    pub round_status: RoundStatus,
    pub last_result: Option<RoundResult>,
}
