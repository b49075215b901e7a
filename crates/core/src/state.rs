use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    SelectingBlind,
    Playing,
    RoundResult,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlindKind {
    Small,
    Big,
    Boss,
}

impl BlindKind {
    pub const ALL: [BlindKind; 3] = [BlindKind::Small, BlindKind::Big, BlindKind::Boss];

    pub fn id(self) -> &'static str {
        match self {
            BlindKind::Small => "small",
            BlindKind::Big => "big",
            BlindKind::Boss => "boss",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Initialized,
    Playing,
    Won,
    Exhausted,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        matches!(self, RoundStatus::Won | RoundStatus::Exhausted)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub plays_left: u8,
    pub discards_left: u8,
    pub score: i64,
}

impl RoundState {
    pub fn new(plays: u8, discards: u8) -> Self {
        Self {
            plays_left: plays,
            discards_left: discards,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlindOutcome {
    Cleared,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub blind: BlindKind,
    pub outcome: BlindOutcome,
    pub score: i64,
    pub target: i64,
}
