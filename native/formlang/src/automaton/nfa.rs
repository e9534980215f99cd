//! Nondeterministic finite automaton over labelled states.

use crate::automaton::{StateId, StateSet};
use crate::automaton::subset_construction::subset_construction;
use crate::conversion::automaton_to_grammar;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use indexmap::IndexSet;
use log::trace;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Nested transition table: source -> symbol -> destinations.
pub type TransitionTable = BTreeMap<String, BTreeMap<char, BTreeSet<String>>>;

/// A finite automaton (Q, Σ, δ, q0, F).
///
/// The transition relation is nondeterministic; a DFA is the special case in
/// which every (state, symbol) pair has at most one successor. Values are
/// immutable once built.
#[derive(Debug, Clone)]
pub struct Automaton {
    /// State labels; the index of a label is its `StateId`.
    states: IndexSet<String>,
    alphabet: BTreeSet<char>,
    /// Transitions: (source, symbol) -> set of destination states
    transitions: HashMap<(StateId, char), StateSet>,
    start_state: StateId,
    final_states: StateSet,
}

/// Collects states, symbols and transitions, then validates them into an
/// [`Automaton`].
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: IndexSet<String>,
    alphabet: BTreeSet<char>,
    transitions: Vec<(String, char, String)>,
    start_state: Option<String>,
    final_states: Vec<String>,
}

impl AutomatonBuilder {
    /// An empty builder: no states, no symbols, no start state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. Declaring a label twice keeps one state.
    pub fn add_state(&mut self, state: impl Into<String>) {
        self.states.insert(state.into());
    }

    /// Add a symbol to the alphabet.
    pub fn add_symbol(&mut self, symbol: char) {
        self.alphabet.insert(symbol);
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(
        &mut self,
        source: impl Into<String>,
        symbol: char,
        destination: impl Into<String>,
    ) {
        self.transitions.push((source.into(), symbol, destination.into()));
    }

    /// Set the start state, replacing any previous one.
    pub fn set_start_state(&mut self, state: impl Into<String>) {
        self.start_state = Some(state.into());
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: impl Into<String>) {
        self.final_states.push(state.into());
    }

    /// Validate every reference against the declared states and alphabet.
    pub fn build(self) -> Result<Automaton> {
        let start = self.start_state.ok_or(Error::MissingStartState)?;
        check_state(&self.states, &start, "start")?;
        for state in &self.final_states {
            check_state(&self.states, state, "accepting")?;
        }
        for (source, symbol, destination) in &self.transitions {
            check_state(&self.states, source, "source")?;
            if !self.alphabet.contains(symbol) {
                return Err(Error::UnknownSymbol { symbol: *symbol });
            }
            check_state(&self.states, destination, "target")?;
        }

        Ok(Automaton::assemble(
            self.states,
            self.alphabet,
            self.transitions,
            start,
            self.final_states,
        ))
    }
}

fn check_state(states: &IndexSet<String>, state: &str, role: &'static str) -> Result<()> {
    if states.contains(state) {
        Ok(())
    } else {
        Err(Error::UnknownState {
            state: state.to_string(),
            role,
        })
    }
}

fn intern(states: &mut IndexSet<String>, label: String) -> StateId {
    states.insert_full(label).0 as StateId
}

impl Automaton {
    /// Build an automaton from declared states, alphabet and a nested
    /// transition table, taking ownership of the table.
    pub fn new<Q, S, A, F>(
        states: S,
        alphabet: A,
        transitions: TransitionTable,
        start: Q,
        accepting: F,
    ) -> Result<Self>
    where
        Q: Into<String>,
        S: IntoIterator<Item = Q>,
        A: IntoIterator<Item = char>,
        F: IntoIterator<Item = Q>,
    {
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
        builder.build()
    }

    /// Assemble from parts that are already known to be consistent. Labels
    /// missing from `states` are interned on the fly.
    pub(crate) fn assemble<T, F>(
        mut states: IndexSet<String>,
        alphabet: BTreeSet<char>,
        transitions: T,
        start: String,
        finals: F,
    ) -> Self
    where
        T: IntoIterator<Item = (String, char, String)>,
        F: IntoIterator<Item = String>,
    {
        let start_state = intern(&mut states, start);

        let mut final_states = StateSet::with_capacity(states.len());
        for state in finals {
            final_states.insert(intern(&mut states, state));
        }

        let mut transition_map: HashMap<(StateId, char), StateSet> = HashMap::new();
        for (source, symbol, destination) in transitions {
            let src = intern(&mut states, source);
            let dst = intern(&mut states, destination);
            let capacity = states.len();
            transition_map
                .entry((src, symbol))
                .or_insert_with(|| StateSet::with_capacity(capacity))
                .insert(dst);
        }

        Self {
            states,
            alphabet,
            transitions: transition_map,
            start_state,
            final_states,
        }
    }

    /// Decide whether the automaton accepts `input`.
    ///
    /// Simulates the NFA by tracking the set of live states, so no prior
    /// conversion to a DFA is needed. A symbol outside the alphabet, or a
    /// step that leaves no live state, rejects immediately.
    pub fn accepts(&self, input: &str) -> bool {
        let mut current = StateSet::singleton(self.start_state, self.states.len());

        for symbol in input.chars() {
            if !self.alphabet.contains(&symbol) {
                trace!("rejecting {input:?}: '{symbol}' is not in the alphabet");
                return false;
            }

            let next = self.move_on_symbol(&current, symbol);
            if next.is_empty() {
                trace!(
                    "rejecting {input:?}: no move on '{symbol}' from {:?}",
                    self.labels(&current)
                );
                return false;
            }
            current = next;
        }

        current.intersects(&self.final_states)
    }

    /// True iff no (state, symbol) pair has more than one successor.
    /// Missing pairs are allowed.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|destinations| destinations.len() <= 1)
    }

    /// Equivalent DFA whose states are named subsets of this automaton's
    /// states. See [`subset_construction`].
    pub fn to_dfa(&self) -> Automaton {
        subset_construction(self)
    }

    /// Right-linear grammar generating the language of this automaton.
    pub fn to_grammar(&self) -> Grammar {
        automaton_to_grammar(self)
    }

    /// State labels in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(String::as_str)
    }

    /// Number of states, |Q|.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// The input alphabet.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Label of the start state.
    pub fn start_state(&self) -> &str {
        self.label(self.start_state)
    }

    /// Labels of the accepting states, in declaration order.
    pub fn accepting_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.final_states.iter().map(|id| self.label(id))
    }

    /// Whether `state` is an accepting state. Unknown labels are not.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.states
            .get_index_of(state)
            .is_some_and(|id| self.final_states.contains(id as StateId))
    }

    /// Successors of `state` on `symbol`, empty if there is no such move.
    pub fn successors(&self, state: &str, symbol: char) -> BTreeSet<&str> {
        let Some(id) = self.states.get_index_of(state) else {
            return BTreeSet::new();
        };
        self.transitions
            .get(&(id as StateId, symbol))
            .map(|destinations| destinations.iter().map(|dst| self.label(dst)).collect())
            .unwrap_or_default()
    }

    /// Get all transitions as an iterator, in no particular order.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, char, &str)> + '_ {
        self.transitions.iter().flat_map(move |(&(src, sym), dests)| {
            dests
                .iter()
                .map(move |dst| (self.label(src), sym, self.label(dst)))
        })
    }

    /// Copy the transition relation out as a nested table.
    pub fn to_transition_table(&self) -> TransitionTable {
        let mut table = TransitionTable::new();
        for (src, sym, dst) in self.transitions() {
            table
                .entry(src.to_string())
                .or_default()
                .entry(sym)
                .or_default()
                .insert(dst.to_string());
        }
        table
    }

    pub(crate) fn start_id(&self) -> StateId {
        self.start_state
    }

    pub(crate) fn final_set(&self) -> &StateSet {
        &self.final_states
    }

    pub(crate) fn label(&self, id: StateId) -> &str {
        &self.states[id as usize]
    }

    pub(crate) fn labels(&self, states: &StateSet) -> Vec<&str> {
        states.iter().map(|id| self.label(id)).collect()
    }

    /// Union of the successors of every state in `states` on `symbol`.
    pub(crate) fn move_on_symbol(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = StateSet::with_capacity(self.states.len());

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        reached
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut edges: Vec<_> = self.transitions().collect();
        edges.sort_unstable();
        for (src, sym, dst) in edges {
            writeln!(f, "  {src} --{sym}--> {dst}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// q0 -a-> {q0, q1}, q1 -a-> q2, q1 -b-> q1, q2 -a-> q3, q3 -a-> q1; F = {q2}
    fn branching_nfa() -> Automaton {
        let mut builder = AutomatonBuilder::new();
        for state in ["q0", "q1", "q2", "q3"] {
            builder.add_state(state);
        }
        builder.add_symbol('a');
        builder.add_symbol('b');
        builder.add_transition("q0", 'a', "q0");
        builder.add_transition("q0", 'a', "q1");
        builder.add_transition("q1", 'a', "q2");
        builder.add_transition("q1", 'b', "q1");
        builder.add_transition("q2", 'a', "q3");
        builder.add_transition("q3", 'a', "q1");
        builder.set_start_state("q0");
        builder.add_final_state("q2");
        builder.build().unwrap()
    }

    #[test]
    fn test_accepts_nondeterministic_branch() {
        let nfa = branching_nfa();

        assert!(nfa.accepts("aa"));
        assert!(nfa.accepts("aaa"));
        assert!(nfa.accepts("aba"));
        assert!(nfa.accepts("abba"));
        assert!(!nfa.accepts("a"));
        assert!(!nfa.accepts("b"));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts("bb"));
    }

    #[test]
    fn test_empty_input_depends_on_start_state() {
        assert!(!branching_nfa().accepts(""));

        let mut builder = AutomatonBuilder::new();
        builder.add_state("s");
        builder.add_symbol('x');
        builder.set_start_state("s");
        builder.add_final_state("s");
        let accepting_start = builder.build().unwrap();

        assert!(accepting_start.accepts(""));
        assert!(!accepting_start.accepts("x"));
    }

    #[test]
    fn test_out_of_alphabet_symbol_rejected() {
        let nfa = branching_nfa();
        assert!(!nfa.accepts("c"));
        assert!(!nfa.accepts("aac"));
        assert!(!nfa.accepts("é"));
    }

    #[test]
    fn test_is_deterministic() {
        assert!(!branching_nfa().is_deterministic());

        let table = TransitionTable::from([
            (
                "p".to_string(),
                BTreeMap::from([('0', BTreeSet::from(["q".to_string()]))]),
            ),
            (
                "q".to_string(),
                BTreeMap::from([('1', BTreeSet::from(["p".to_string()]))]),
            ),
        ]);
        let dfa = Automaton::new(["p", "q"], ['0', '1'], table, "p", ["q"]).unwrap();

        // partial but deterministic
        assert!(dfa.is_deterministic());
        assert!(dfa.accepts("0"));
        assert!(dfa.accepts("010"));
        assert!(!dfa.accepts("01"));
        assert!(!dfa.accepts("1"));
    }

    #[test]
    fn test_accessors() {
        let nfa = branching_nfa();

        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.start_state(), "q0");
        assert_eq!(nfa.accepting_states().collect::<Vec<_>>(), vec!["q2"]);
        assert!(nfa.is_accepting("q2"));
        assert!(!nfa.is_accepting("q0"));
        assert!(!nfa.is_accepting("nope"));
        assert_eq!(nfa.successors("q0", 'a'), BTreeSet::from(["q0", "q1"]));
        assert!(nfa.successors("q0", 'b').is_empty());
        assert!(nfa.successors("nope", 'a').is_empty());
        assert_eq!(nfa.transitions().count(), 6);
    }

    #[test]
    fn test_live_states_are_reported_by_label() {
        let nfa = branching_nfa();
        let start = StateSet::singleton(nfa.start_id(), nfa.num_states());

        let after_a = nfa.move_on_symbol(&start, 'a');
        assert_eq!(nfa.labels(&after_a), vec!["q0", "q1"]);
        assert_eq!(nfa.labels(&nfa.move_on_symbol(&after_a, 'b')), vec!["q1"]);
        assert!(nfa.labels(&nfa.move_on_symbol(&start, 'b')).is_empty());
        assert_eq!(nfa.labels(nfa.final_set()), vec!["q2"]);
    }

    #[test]
    fn test_transition_table_round_trip() {
        let nfa = branching_nfa();
        let table = nfa.to_transition_table();
        assert_eq!(table["q0"][&'a'].len(), 2);

        let rebuilt = Automaton::new(
            nfa.states().map(str::to_string).collect::<Vec<_>>(),
            nfa.alphabet().iter().copied(),
            table,
            nfa.start_state().to_string(),
            vec!["q2".to_string()],
        )
        .unwrap();
        assert_eq!(rebuilt.to_string(), nfa.to_string());
    }

    #[test]
    fn test_display_is_sorted() {
        let rendered = branching_nfa().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "  q0 --a--> q0",
                "  q0 --a--> q1",
                "  q1 --a--> q2",
                "  q1 --b--> q1",
                "  q2 --a--> q3",
                "  q3 --a--> q1",
            ]
        );
    }

    #[test]
    fn test_build_rejects_undeclared_references() {
        let mut builder = AutomatonBuilder::new();
        builder.add_state("a");
        builder.add_symbol('0');
        builder.add_transition("a", '0', "b");
        builder.set_start_state("a");
        assert_eq!(
            builder.build().unwrap_err(),
            Error::UnknownState {
                state: "b".to_string(),
                role: "target",
            }
        );

        let mut builder = AutomatonBuilder::new();
        builder.add_state("a");
        builder.add_transition("a", '1', "a");
        builder.set_start_state("a");
        assert_eq!(
            builder.build().unwrap_err(),
            Error::UnknownSymbol { symbol: '1' }
        );

        let mut builder = AutomatonBuilder::new();
        builder.add_state("a");
        builder.set_start_state("z");
        assert!(matches!(
            builder.build(),
            Err(Error::UnknownState { role: "start", .. })
        ));

        let mut builder = AutomatonBuilder::new();
        builder.add_state("a");
        builder.set_start_state("a");
        builder.add_final_state("f");
        assert!(matches!(
            builder.build(),
            Err(Error::UnknownState { role: "accepting", .. })
        ));

        assert_eq!(
            AutomatonBuilder::new().build().unwrap_err(),
            Error::MissingStartState
        );
    }
}
