//! Match state and the read-only snapshot handed to the UI.
//!
//! ## SideState
//!
//! Everything one side owns: board, hand, draw pile, the once-per-turn
//! energy flag and the number of units it has lost.
//!
//! ## MatchState
//!
//! Both sides plus the shared turn counter, the active side, the intent
//! history, the per-side draw RNG streams and the result once the match is
//! over. Hands, decks and history use `im` persistent vectors so that
//! snapshots are cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::intent::{Intent, IntentRecord};
use super::rng::GameRng;
use super::side::{Side, SideMap};
use crate::board::Board;
use crate::cards::CardRef;
use crate::rules::GameResult;

/// Where the turn state machine is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    OpponentTurn,
    GameOver,
}

/// One side's board, hand and draw pile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SideState {
    pub board: Board,
    pub hand: Vector<CardRef>,
    pub deck: Vector<CardRef>,
    /// Set once energy has been attached during this side's current turn.
    pub energy_attached: bool,
    /// Units this side has had defeated.
    pub units_lost: u32,
}

impl SideState {
    /// Deal the opening hand from an already shuffled deck; the rest stays
    /// in the draw pile.
    #[must_use]
    pub fn deal(shuffled: Vec<CardRef>, hand_size: usize) -> Self {
        let mut deck: Vector<CardRef> = shuffled.into_iter().collect();
        let hand = deck.slice(..hand_size.min(deck.len()));
        Self {
            hand,
            deck,
            ..Self::default()
        }
    }

    /// Move one uniformly random card from the deck to the end of the hand.
    ///
    /// Returns `None` (and changes nothing) when the deck is empty.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<CardRef> {
        let index = rng.index(self.deck.len())?;
        let card = self.deck.remove(index);
        self.hand.push_back(card.clone());
        Some(card)
    }

    /// Hand card at `index`, if any.
    #[must_use]
    pub fn hand_card(&self, index: usize) -> Option<&CardRef> {
        self.hand.get(index)
    }

    /// Remove and return the hand card at `index`.
    pub fn take_from_hand(&mut self, index: usize) -> Option<CardRef> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }
}

/// Complete state of one match.
#[derive(Clone, Debug)]
pub struct MatchState {
    pub sides: SideMap<SideState>,

    /// Shared turn counter, starting at 1. Increments when control returns
    /// to the player.
    pub turn_number: u32,

    /// Side whose turn it is.
    pub active_side: Side,

    /// Set once the configured victory condition is met.
    pub result: Option<GameResult>,

    /// Accepted intents, oldest first.
    pub history: Vector<IntentRecord>,

    rng: SideMap<GameRng>,
}

impl MatchState {
    /// Create a match with empty sides. Each side draws from its own RNG
    /// stream derived from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let base = GameRng::new(seed);
        Self {
            sides: SideMap::default(),
            turn_number: 1,
            active_side: Side::Player,
            result: None,
            history: Vector::new(),
            rng: SideMap::new(|side| match side {
                Side::Player => base.for_context("player-deck"),
                Side::Opponent => base.for_context("opponent-deck"),
            }),
        }
    }

    /// Shuffle `cards` with `side`'s stream and deal its opening hand.
    pub fn deal(&mut self, side: Side, mut cards: Vec<CardRef>, hand_size: usize) {
        self.rng[side].shuffle(&mut cards);
        self.sides[side] = SideState::deal(cards, hand_size);
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    /// Draw a random card for `side`. No-op on an empty deck.
    pub fn draw_card(&mut self, side: Side) -> Option<CardRef> {
        let rng = &mut self.rng[side];
        self.sides[side].draw(rng)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.result.is_some(), self.active_side) {
            (true, _) => Phase::GameOver,
            (false, Side::Player) => Phase::PlayerTurn,
            (false, Side::Opponent) => Phase::OpponentTurn,
        }
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Append an accepted intent to the history.
    pub fn record(&mut self, side: Side, intent: Intent) {
        let sequence = self.history.len() as u32;
        self.history.push_back(IntentRecord {
            side,
            intent,
            turn: self.turn_number,
            sequence,
        });
    }

    /// Read-only view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            turn_number: self.turn_number,
            active_side: self.active_side,
            phase: self.phase(),
            result: self.result.clone(),
            player: SideView::of(self.side(Side::Player)),
            opponent: SideView::of(self.side(Side::Opponent)),
        }
    }
}

/// Read-only view of one side.
///
/// The opponent's hand is included; the UI renders it face-down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideView {
    pub board: Board,
    pub hand: Vector<CardRef>,
    pub deck_size: usize,
    pub energy_attached: bool,
    pub units_lost: u32,
}

impl SideView {
    fn of(side: &SideState) -> Self {
        Self {
            board: side.board.clone(),
            hand: side.hand.clone(),
            deck_size: side.deck.len(),
            energy_attached: side.energy_attached,
            units_lost: side.units_lost,
        }
    }
}

/// Everything the UI needs to re-render after an intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub turn_number: u32,
    pub active_side: Side,
    pub phase: Phase,
    pub result: Option<GameResult>,
    pub player: SideView,
    pub opponent: SideView,
}

impl MatchSnapshot {
    #[must_use]
    pub fn side(&self, side: Side) -> &SideView {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}
