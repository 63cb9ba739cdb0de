//! Match setup.
//!
//! ```
//! use std::sync::Arc;
//! use pocket_battle::battle::BattleBuilder;
//! use pocket_battle::cards::{CardDefinition, DeckList};
//! use pocket_battle::core::Phase;
//!
//! let card = Arc::new(CardDefinition::new("A1-001", "Bulbasaur").with_hit_points(70));
//! let deck = DeckList::new("Grass", vec![card; 20]);
//!
//! let controller = BattleBuilder::new(deck).build(42).unwrap();
//! let snapshot = controller.snapshot();
//!
//! assert_eq!(snapshot.phase, Phase::PlayerTurn);
//! assert_eq!(snapshot.turn_number, 1);
//! assert_eq!(snapshot.player.hand.len(), 5);
//! assert_eq!(snapshot.player.deck_size, 15);
//! ```

use tracing::info;

use super::controller::{SessionId, TurnController};
use crate::ai::{OpponentPolicy, ScriptedOpponent};
use crate::board::LaneId;
use crate::cards::{DeckList, DeckRepository};
use crate::core::{BattleConfig, MatchState, Side};
use crate::error::{BattleError, Result};
use crate::rules::{place_unit, BattleRules};

/// Builds a `TurnController` from the player's deck.
pub struct BattleBuilder {
    deck: DeckList,
    opponent_deck: Option<DeckList>,
    config: BattleConfig,
    policy: Box<dyn OpponentPolicy<BattleRules>>,
    session: Option<SessionId>,
}

impl BattleBuilder {
    /// Start a match with `deck`. The opponent plays a copy of the same
    /// deck unless `opponent_deck` is set.
    #[must_use]
    pub fn new(deck: DeckList) -> Self {
        Self {
            deck,
            opponent_deck: None,
            config: BattleConfig::default(),
            policy: Box::new(ScriptedOpponent),
            session: None,
        }
    }

    /// Start a match with a saved deck.
    pub fn from_repository(repository: &impl DeckRepository, name: &str) -> Result<Self> {
        Ok(Self::new(repository.find_deck(name)?))
    }

    #[must_use]
    pub fn opponent_deck(mut self, deck: DeckList) -> Self {
        self.opponent_deck = Some(deck);
        self
    }

    #[must_use]
    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: impl OpponentPolicy<BattleRules> + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn session(mut self, session: SessionId) -> Self {
        self.session = Some(session);
        self
    }

    /// Shuffle and deal both decks, seed the opponent's opening board and
    /// hand the match to a controller. All randomness derives from `seed`.
    pub fn build(self, seed: u64) -> Result<TurnController> {
        let opponent_deck = self.opponent_deck.unwrap_or_else(|| self.deck.clone());

        for deck in [&self.deck, &opponent_deck] {
            if deck.cards.is_empty() {
                return Err(BattleError::InvalidDeck(format!("deck {:?} has no cards", deck.name)));
            }
            if self.config.strict_decks {
                self.config.deck_rules.validate(deck)?;
            }
        }

        let hand_size = self.config.opening_hand_size;
        let mut state = MatchState::new(seed);
        state.deal(Side::Player, self.deck.cards.clone(), hand_size);
        state.deal(Side::Opponent, opponent_deck.cards.clone(), hand_size);
        seed_opening_board(&mut state, self.config.opponent_opening_units);

        let session = self.session.unwrap_or_else(SessionId::random);
        info!(
            %session,
            seed,
            deck = %self.deck.name,
            opponent_deck = %opponent_deck.name,
            "match started"
        );

        Ok(TurnController::new(
            BattleRules::new(self.config),
            state,
            self.policy,
            session,
            seed,
        ))
    }
}

/// Move up to `units` Basic cards from the opponent's hand onto its board,
/// front lane first. They count as placed on turn 1.
fn seed_opening_board(state: &mut MatchState, units: usize) {
    let side = state.side_mut(Side::Opponent);
    for lane in LaneId::all().take(units) {
        let Some(index) = side.hand.iter().position(|card| card.is_basic()) else {
            break;
        };
        if let Some(card) = side.take_from_hand(index) {
            place_unit(&mut side.board, lane, card, 1);
        }
    }
}
