//! Conversions between right-linear grammars and finite automata.

use crate::automaton::Automaton;
use crate::grammar::{Grammar, Production};
use indexmap::IndexSet;
use std::collections::{BTreeMap, BTreeSet};

const FINAL_STATE: &str = "X";

/// Name for the synthetic accepting state: `X`, primed until it collides
/// with no non-terminal.
fn fresh_final_state(non_terminals: &BTreeSet<String>) -> String {
    let mut name = FINAL_STATE.to_string();
    while non_terminals.contains(&name) {
        name.push('\'');
    }
    name
}

/// Build the automaton of a right-linear grammar.
///
/// `A -> a B` becomes `A --a--> B` and `A -> a` becomes an edge into a single
/// fresh accepting state. The non-terminals are the remaining states and the
/// start symbol is the start state.
pub fn grammar_to_automaton(grammar: &Grammar) -> Automaton {
    let final_state = fresh_final_state(grammar.non_terminals());

    let mut states: IndexSet<String> = grammar.non_terminals().iter().cloned().collect();
    states.insert(final_state.clone());

    let mut transitions = Vec::new();
    for (lhs, rhs) in grammar.productions() {
        for production in rhs {
            let target = production.next().unwrap_or(&final_state);
            transitions.push((lhs.clone(), production.terminal(), target.to_string()));
        }
    }

    Automaton::assemble(
        states,
        grammar.terminals().clone(),
        transitions,
        grammar.start_symbol().to_string(),
        [final_state],
    )
}

/// Build a right-linear grammar from an automaton.
///
/// Every transition `q --a--> p` yields `q -> a p`, plus `q -> a` when `p` is
/// accepting. Productions follow the sorted transition order. The empty word
/// has no production of this shape, so an accepting start state contributes
/// nothing for it.
pub fn automaton_to_grammar(automaton: &Automaton) -> Grammar {
    let mut edges: Vec<_> = automaton.transitions().collect();
    edges.sort_unstable();

    let mut productions: BTreeMap<String, Vec<Production>> = BTreeMap::new();
    for (from, symbol, to) in edges {
        let rhs = productions.entry(from.to_string()).or_default();
        rhs.push(Production::continuing(symbol, to));
        if automaton.is_accepting(to) {
            rhs.push(Production::terminating(symbol));
        }
    }

    Grammar::assemble(
        automaton.states().map(str::to_string).collect(),
        automaton.alphabet().clone(),
        productions,
        automaton.start_state().to_string(),
    )
}
