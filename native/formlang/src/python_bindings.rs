//! PyO3 bindings for automata and grammars.
//!
//! Construction errors surface as `ValueError`.

use crate::automaton::{Automaton, AutomatonBuilder};
use crate::error::Error;
use crate::grammar::{Grammar, Production};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};

impl From<Error> for PyErr {
    fn from(err: Error) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// A finite automaton over string states and single-character symbols.
#[pyclass(name = "Automaton", module = "formlang", frozen)]
pub struct PyAutomaton {
    inner: Automaton,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    #[pyo3(signature = (states, alphabet, transitions, start, accepting))]
    fn new(
        states: HashSet<String>,
        alphabet: HashSet<char>,
        transitions: HashMap<String, HashMap<char, HashSet<String>>>,
        start: String,
        accepting: HashSet<String>,
    ) -> PyResult<Self> {
        let mut builder = AutomatonBuilder::new();
        for state in states {
            builder.add_state(state);
        }
        for symbol in alphabet {
            builder.add_symbol(symbol);
        }
        for (source, row) in transitions {
            for (symbol, destinations) in row {
                for destination in destinations {
                    builder.add_transition(source.clone(), symbol, destination);
                }
            }
        }
        builder.set_start_state(start);
        for state in accepting {
            builder.add_final_state(state);
        }

        Ok(Self {
            inner: builder.build()?,
        })
    }

    fn accepts(&self, input: &str) -> bool {
        self.inner.accepts(input)
    }

    fn is_deterministic(&self) -> bool {
        self.inner.is_deterministic()
    }

    /// Subset construction; states of the result are named like `{A,B}`.
    fn to_dfa(&self) -> Self {
        Self {
            inner: self.inner.to_dfa(),
        }
    }

    fn to_grammar(&self) -> PyGrammar {
        PyGrammar {
            inner: self.inner.to_grammar(),
        }
    }

    #[getter]
    fn start_state(&self) -> String {
        self.inner.start_state().to_string()
    }

    #[getter]
    fn accepting_states(&self) -> Vec<String> {
        let mut states: Vec<String> = self.inner.accepting_states().map(str::to_string).collect();
        states.sort_unstable();
        states
    }

    /// Sorted `(source, symbol, destination)` triples.
    fn transitions(&self) -> Vec<(String, char, String)> {
        let mut edges: Vec<(String, char, String)> = self
            .inner
            .transitions()
            .map(|(src, sym, dst)| (src.to_string(), sym, dst.to_string()))
            .collect();
        edges.sort_unstable();
        edges
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, start={:?})",
            self.inner.num_states(),
            self.inner.start_state()
        )
    }
}

/// A right-linear grammar. Productions map a non-terminal to a list of
/// `(terminal, next)` pairs where `next` is `None` for terminating ones.
#[pyclass(name = "Grammar", module = "formlang", frozen)]
pub struct PyGrammar {
    inner: Grammar,
}

#[pymethods]
impl PyGrammar {
    #[new]
    #[pyo3(signature = (non_terminals, terminals, productions, start))]
    fn new(
        non_terminals: HashSet<String>,
        terminals: HashSet<char>,
        productions: HashMap<String, Vec<(char, Option<String>)>>,
        start: String,
    ) -> PyResult<Self> {
        let productions = productions.into_iter().map(|(lhs, rhs)| {
            let rhs: Vec<Production> = rhs
                .into_iter()
                .map(|(terminal, next)| match next {
                    Some(next) => Production::continuing(terminal, next),
                    None => Production::terminating(terminal),
                })
                .collect();
            (lhs, rhs)
        });

        Ok(Self {
            inner: Grammar::new(non_terminals, terminals, productions, start)?,
        })
    }

    /// Chomsky class as text, e.g. `Type 3 (regular)`.
    fn classify(&self) -> String {
        self.inner.classify().to_string()
    }

    fn chomsky_level(&self) -> u8 {
        self.inner.classify().level()
    }

    /// Random sentence, or `None` when this attempt failed. Pass a seed for
    /// reproducible output.
    #[pyo3(signature = (seed=None))]
    fn generate_sentence(&self, seed: Option<u64>) -> Option<String> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.inner.generate_sentence(&mut rng)
    }

    fn to_automaton(&self) -> PyAutomaton {
        PyAutomaton {
            inner: self.inner.to_automaton(),
        }
    }

    #[getter]
    fn start_symbol(&self) -> String {
        self.inner.start_symbol().to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

/// Register the classes on the extension module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAutomaton>()?;
    m.add_class::<PyGrammar>()?;
    Ok(())
}
