//! Battle bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::battle::{BattleBuilder, IntentOutcome, TurnController};
use crate::cards::{CardCatalog, CardId, DeckList};
use crate::core::{BattleConfig, MatchSnapshot, Pacing};
use crate::error::BattleError;

fn to_py_err(err: BattleError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn snapshot_json(snapshot: &MatchSnapshot) -> PyResult<String> {
    serde_json::to_string(snapshot).map_err(|e| to_py_err(e.into()))
}

/// Python wrapper for one match.
#[pyclass(name = "Battle")]
pub struct PyBattle {
    controller: TurnController,
}

impl PyBattle {
    fn respond(outcome: Result<IntentOutcome, BattleError>) -> PyResult<String> {
        snapshot_json(&outcome.map_err(to_py_err)?.snapshot)
    }
}

#[pymethods]
impl PyBattle {
    /// Start a match.
    ///
    /// # Arguments
    /// - catalog_json: card catalog, a JSON object keyed by card id
    /// - deck: card ids of the player's deck (the opponent plays a copy)
    /// - seed: RNG seed for deterministic matches
    /// - deferred: pace the opponent's turn in steps (see `run_opponent_turn`)
    #[new]
    #[pyo3(signature = (catalog_json, deck, seed = 42, deferred = false))]
    fn new(catalog_json: &str, deck: Vec<String>, seed: u64, deferred: bool) -> PyResult<Self> {
        let catalog = CardCatalog::from_json(catalog_json).map_err(to_py_err)?;
        let ids: Vec<CardId> = deck.into_iter().map(CardId::new).collect();
        let cards = catalog.resolve(&ids).map_err(to_py_err)?;

        let pacing = if deferred { Pacing::presentation() } else { Pacing::Immediate };
        let controller = BattleBuilder::new(DeckList::new("deck", cards))
            .config(BattleConfig::default().with_pacing(pacing))
            .build(seed)
            .map_err(to_py_err)?;
        Ok(Self { controller })
    }

    fn place_card(&mut self, hand_index: usize, lane: usize) -> PyResult<String> {
        Self::respond(self.controller.place_card(hand_index, lane))
    }

    fn attach_energy(&mut self, lane: usize) -> PyResult<String> {
        Self::respond(self.controller.attach_energy(lane))
    }

    fn attack(&mut self, attack_index: usize) -> PyResult<String> {
        Self::respond(self.controller.attack(attack_index))
    }

    fn end_turn(&mut self) -> PyResult<String> {
        Self::respond(self.controller.end_turn())
    }

    /// Run the rest of a deferred opponent turn and return the snapshot.
    fn run_opponent_turn(&mut self) -> PyResult<String> {
        self.controller.finish_opponent_turn();
        self.snapshot()
    }

    /// Current snapshot as JSON.
    fn snapshot(&self) -> PyResult<String> {
        snapshot_json(&self.controller.snapshot())
    }

    /// Number of intents the player could issue right now.
    fn legal_intent_count(&self) -> usize {
        self.controller.legal_intents().len()
    }

    /// Seed and player intents, bincode-encoded.
    fn replay_bytes(&self) -> PyResult<Vec<u8>> {
        self.controller.replay().to_bytes().map_err(to_py_err)
    }

    #[getter]
    fn turn_number(&self) -> u32 {
        self.controller.state().turn_number
    }

    fn __repr__(&self) -> String {
        format!(
            "Battle(turn={}, phase={:?}, session={})",
            self.controller.state().turn_number,
            self.controller.phase(),
            self.controller.session()
        )
    }
}
