//! Right-linear grammars G = (Vn, Vt, P, S).

pub mod chomsky;
mod generate;

use crate::automaton::Automaton;
use crate::conversion::grammar_to_automaton;
use crate::error::{Error, Result};
use chomsky::{ChomskyType, GrammarSymbol, Rule};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub use generate::GenerationConfig;

/// A right-linear production body: one terminal, optionally followed by a
/// non-terminal. `A -> a B` continues the derivation at `B`, `A -> a` ends it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
    terminal: char,
    next: Option<String>,
}

impl Production {
    /// `A -> a`: emit `terminal` and end the derivation.
    pub fn terminating(terminal: char) -> Self {
        Self {
            terminal,
            next: None,
        }
    }

    /// `A -> a B`: emit `terminal` and continue at `next`.
    pub fn continuing(terminal: char, next: impl Into<String>) -> Self {
        Self {
            terminal,
            next: Some(next.into()),
        }
    }

    /// The terminal this production emits.
    pub fn terminal(&self) -> char {
        self.terminal
    }

    /// The non-terminal the derivation continues at, if any.
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Whether this production ends the derivation.
    pub fn is_terminating(&self) -> bool {
        self.next.is_none()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.next {
            Some(next) => write!(f, "{} {}", self.terminal, next),
            None => write!(f, "{}", self.terminal),
        }
    }
}

/// A right-linear grammar.
///
/// Every declared non-terminal has a (possibly empty) production list, kept
/// in the order the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    non_terminals: BTreeSet<String>,
    terminals: BTreeSet<char>,
    productions: BTreeMap<String, Vec<Production>>,
    start_symbol: String,
}

impl Grammar {
    /// Build a grammar, checking that every production mentions only
    /// declared symbols and that the start symbol is a non-terminal.
    pub fn new<N, T, P, L, S>(
        non_terminals: N,
        terminals: T,
        productions: P,
        start: S,
    ) -> Result<Self>
    where
        N: IntoIterator,
        N::Item: Into<String>,
        T: IntoIterator<Item = char>,
        P: IntoIterator<Item = (L, Vec<Production>)>,
        L: Into<String>,
        S: Into<String>,
    {
        let non_terminals: BTreeSet<String> = non_terminals.into_iter().map(Into::into).collect();
        let terminals: BTreeSet<char> = terminals.into_iter().collect();
        let start_symbol = start.into();

        if !non_terminals.contains(&start_symbol) {
            return Err(Error::UnknownNonTerminal {
                symbol: start_symbol,
                role: "start symbol",
            });
        }

        let mut table: BTreeMap<String, Vec<Production>> = BTreeMap::new();
        for (lhs, rhs) in productions {
            let lhs = lhs.into();
            if !non_terminals.contains(&lhs) {
                return Err(Error::UnknownNonTerminal {
                    symbol: lhs,
                    role: "left-hand side",
                });
            }
            for production in &rhs {
                if !terminals.contains(&production.terminal) {
                    return Err(Error::UnknownTerminal {
                        terminal: production.terminal,
                    });
                }
                if let Some(next) = &production.next {
                    if !non_terminals.contains(next) {
                        return Err(Error::UnknownNonTerminal {
                            symbol: next.clone(),
                            role: "production target",
                        });
                    }
                }
            }
            table.entry(lhs).or_default().extend(rhs);
        }

        Ok(Self::assemble(non_terminals, terminals, table, start_symbol))
    }

    /// Assemble from parts that are already known to be consistent.
    pub(crate) fn assemble(
        non_terminals: BTreeSet<String>,
        terminals: BTreeSet<char>,
        mut productions: BTreeMap<String, Vec<Production>>,
        start_symbol: String,
    ) -> Self {
        for symbol in &non_terminals {
            productions.entry(symbol.clone()).or_default();
        }
        Self {
            non_terminals,
            terminals,
            productions,
            start_symbol,
        }
    }

    /// The non-terminal alphabet Vn.
    pub fn non_terminals(&self) -> &BTreeSet<String> {
        &self.non_terminals
    }

    /// The terminal alphabet Vt.
    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    /// Production lists keyed by left-hand side. Every non-terminal has an
    /// entry, possibly empty.
    pub fn productions(&self) -> &BTreeMap<String, Vec<Production>> {
        &self.productions
    }

    /// Productions of `symbol`, empty for unknown symbols.
    pub fn productions_of(&self, symbol: &str) -> &[Production] {
        self.productions.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The start symbol S.
    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// The productions as general rewriting rules.
    pub fn rules(&self) -> Vec<Rule> {
        self.productions
            .iter()
            .flat_map(|(lhs, rhs)| {
                rhs.iter().map(move |production| {
                    let mut body = vec![GrammarSymbol::Terminal(production.terminal)];
                    if let Some(next) = &production.next {
                        body.push(GrammarSymbol::NonTerminal(next.clone()));
                    }
                    Rule::new(vec![GrammarSymbol::NonTerminal(lhs.clone())], body)
                })
            })
            .collect()
    }

    /// Most restrictive Chomsky class this grammar belongs to.
    pub fn classify(&self) -> ChomskyType {
        chomsky::classify(&self.rules(), &self.start_symbol)
    }

    /// Automaton accepting the language generated by this grammar.
    pub fn to_automaton(&self) -> Automaton {
        grammar_to_automaton(self)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (lhs, rhs) in &self.productions {
            for production in rhs {
                writeln!(f, "  {lhs} -> {production}")?;
            }
        }
        Ok(())
    }
}
