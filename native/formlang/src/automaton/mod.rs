//! Finite automata over labelled states.
//!
//! This module provides:
//! - NFA simulation by subset tracking (membership test)
//! - The determinism test
//! - Subset construction (NFA to DFA conversion) with canonical state names
//! - Derivation of an equivalent right-linear grammar

mod nfa;
mod state;
mod subset_construction;

pub use nfa::{Automaton, AutomatonBuilder, TransitionTable};
pub(crate) use state::{StateId, StateSet};
pub use subset_construction::{subset_construction, subset_name};
