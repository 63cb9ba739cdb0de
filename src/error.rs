//! Error types for the battle engine.
//!
//! Every rejection is recoverable: the match state is left untouched and
//! the `Display` text is the message shown to the player.

use thiserror::Error;

use crate::board::LaneId;

/// What an attack was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// The attacking side has no unit in its front lane.
    Attacker,
    /// The defending side has no unit in its front lane.
    Defender,
    /// The attacker has no attack at the requested index.
    Attack(usize),
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetKind::Attacker => write!(f, "You have no active unit in your front lane."),
            TargetKind::Defender => write!(f, "There is no unit in the opposing front lane to attack."),
            TargetKind::Attack(index) => write!(f, "Your front unit has no attack #{}.", index + 1),
        }
    }
}

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("You cannot place a {stage} card here yet!")]
    IllegalPlacement { card: String, stage: String, lane: LaneId },

    #[error("It is not your turn.")]
    NotYourTurn,

    #[error("Not enough energy: {required} required, {available} attached.")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("{0}")]
    NoTarget(TargetKind),

    #[error("Energy has already been attached this turn.")]
    EnergyAlreadyPlaced,

    #[error("There is no unit in {0} to attach energy to.")]
    EmptyLane(LaneId),

    #[error("No card at hand position {0}.")]
    InvalidHandIndex(usize),

    #[error("There is no lane {0}.")]
    InvalidLane(usize),

    #[error("The battle is over.")]
    GameOver,

    #[error("Invalid deck: {0}")]
    InvalidDeck(String),

    #[error("No saved deck named {0:?}")]
    DeckNotFound(String),

    #[error("Card {0:?} is not in the catalog")]
    UnknownCard(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("Replay encoding error: {0}")]
    Replay(#[from] bincode::Error),
}

impl BattleError {
    /// True for rejections of a player intent, as opposed to setup failures.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            BattleError::InvalidDeck(_)
                | BattleError::DeckNotFound(_)
                | BattleError::UnknownCard(_)
                | BattleError::Catalog(_)
                | BattleError::Replay(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BattleError>;
