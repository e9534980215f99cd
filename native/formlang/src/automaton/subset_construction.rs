//! Subset construction algorithm for converting an NFA to a DFA.

use crate::automaton::nfa::Automaton;
use crate::automaton::StateSet;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use std::collections::VecDeque;

/// Canonical DFA state name for a set of NFA state labels: the labels sorted
/// and comma-joined inside braces, e.g. `{A,B}`.
pub fn subset_name<'a, I>(labels: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sorted: Vec<&str> = labels.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    format!("{{{}}}", sorted.join(","))
}

/// Name for a newly discovered subset. Labels carrying `,` or braces can make
/// two subsets spell the same name; the later one is primed until it is free.
fn fresh_name(nfa: &Automaton, states: &StateSet, taken: &IndexSet<String>) -> String {
    let mut name = subset_name(nfa.labels(states));
    while taken.contains(&name) {
        name.push('\'');
    }
    name
}

/// Convert an NFA to a DFA using the powerset construction algorithm.
///
/// Only subsets reachable from `{q0}` are materialized. A subset with no
/// successors on some symbol gets no transition for it, so the result may be
/// partial. A DFA state accepts iff its subset holds an accepting NFA state.
pub fn subset_construction(nfa: &Automaton) -> Automaton {
    // Each DFA state corresponds to a set of NFA states
    let mut state_mapping: IndexMap<StateSet, String> = IndexMap::new();
    let mut names: IndexSet<String> = IndexSet::new();
    let mut transitions: Vec<(String, char, String)> = Vec::new();
    let mut final_states: Vec<String> = Vec::new();
    let mut worklist: VecDeque<(StateSet, String)> = VecDeque::new();

    let initial_set = StateSet::singleton(nfa.start_id(), nfa.num_states());
    let initial_name = fresh_name(nfa, &initial_set, &names);
    names.insert(initial_name.clone());
    state_mapping.insert(initial_set.clone(), initial_name.clone());
    worklist.push_back((initial_set, initial_name.clone()));

    while let Some((current_set, current_name)) = worklist.pop_front() {
        if current_set.intersects(nfa.final_set()) {
            final_states.push(current_name.clone());
        }

        for &symbol in nfa.alphabet() {
            let next_set = nfa.move_on_symbol(&current_set, symbol);

            if next_set.is_empty() {
                continue;
            }

            let next_name = if let Some(existing) = state_mapping.get(&next_set) {
                existing.clone()
            } else {
                let name = fresh_name(nfa, &next_set, &names);
                names.insert(name.clone());
                state_mapping.insert(next_set.clone(), name.clone());
                worklist.push_back((next_set, name.clone()));
                name
            };

            transitions.push((current_name.clone(), symbol, next_name));
        }
    }

    debug!(
        "subset construction: {} NFA states -> {} DFA states ({} accepting)",
        nfa.num_states(),
        state_mapping.len(),
        final_states.len()
    );

    Automaton::assemble(
        names,
        nfa.alphabet().clone(),
        transitions,
        initial_name,
        final_states,
    )
}
