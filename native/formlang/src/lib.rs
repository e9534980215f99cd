//! Finite automata and right-linear grammars.
//!
//! An [`Automaton`] is a possibly nondeterministic finite automaton with
//! string-labelled states and `char` symbols. It can test membership, check
//! determinism, build an equivalent DFA by subset construction and derive a
//! right-linear [`Grammar`]. A grammar can be classified in the Chomsky
//! hierarchy, generate random sentences and derive an automaton.
//!
//! ```
//! use formlang::{Grammar, Production};
//!
//! let grammar = Grammar::new(
//!     ["S", "A"],
//!     ['a', 'b'],
//!     [
//!         ("S", vec![Production::continuing('a', "A")]),
//!         ("A", vec![Production::continuing('b', "A"), Production::terminating('a')]),
//!     ],
//!     "S",
//! )
//! .unwrap();
//!
//! let automaton = grammar.to_automaton();
//! assert!(automaton.accepts("abba"));
//! assert!(!automaton.accepts("ab"));
//! assert!(automaton.to_dfa().is_deterministic());
//! ```

pub mod automaton;
pub mod conversion;
pub mod error;
pub mod grammar;
#[cfg(feature = "python")]
mod python_bindings;

pub use automaton::{Automaton, AutomatonBuilder, TransitionTable, subset_name};
pub use error::{Error, Result};
pub use grammar::chomsky::{self, ChomskyType};
pub use grammar::{GenerationConfig, Grammar, Production};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn formlang(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::register(m)
}
