//! Error types for automaton and grammar construction.

use thiserror::Error;

/// Errors raised while constructing an [`Automaton`](crate::Automaton) or a
/// [`Grammar`](crate::Grammar) from caller data.
///
/// Queries on a constructed value never fail; every error here describes a
/// reference to something that was not declared.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A transition endpoint, the start state or an accepting state is not
    /// among the declared states.
    #[error("{role} state `{state}` is not a declared state")]
    UnknownState { state: String, role: &'static str },

    /// A transition is labelled with a symbol outside the alphabet.
    #[error("transition symbol '{symbol}' is not in the alphabet")]
    UnknownSymbol { symbol: char },

    /// A production refers to a non-terminal that was not declared.
    #[error("{role} `{symbol}` is not a declared non-terminal")]
    UnknownNonTerminal { symbol: String, role: &'static str },

    /// A production emits a terminal that was not declared.
    #[error("terminal '{terminal}' is not a declared terminal")]
    UnknownTerminal { terminal: char },

    /// An automaton builder was finished without a start state.
    #[error("automaton has no start state")]
    MissingStartState,
}

/// A specialized `Result` type for construction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = Error::UnknownState {
            state: "q9".to_string(),
            role: "target",
        };
        assert_eq!(err.to_string(), "target state `q9` is not a declared state");

        let err = Error::UnknownNonTerminal {
            symbol: "C".to_string(),
            role: "start symbol",
        };
        assert_eq!(err.to_string(), "start symbol `C` is not a declared non-terminal");
    }
}
