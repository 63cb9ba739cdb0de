//! Python bindings for the battle engine.
//!
//! # Quick Start
//!
//! ```python
//! import pocket_battle as pb
//!
//! battle = pb.Battle(catalog_json, ["A1-001"] * 20, seed=42)
//!
//! # Every intent returns the new snapshot as JSON, or raises ValueError
//! # with the message to show the player.
//! snapshot = battle.place_card(0, 0)
//! snapshot = battle.end_turn()
//! ```

use pyo3::prelude::*;

mod py_battle;

pub use py_battle::*;

/// pocket_battle: turn-based battle rules for a pocket card game.
#[pymodule]
fn pocket_battle(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBattle>()?;
    Ok(())
}
