//! Chomsky-hierarchy classification over general rewriting rules.

use std::fmt;

/// A symbol on either side of a rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrammarSymbol {
    NonTerminal(String),
    Terminal(char),
}

/// A rewriting rule `lhs -> rhs`. Either side may hold any symbols; an empty
/// `rhs` is an ε-rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: Vec<GrammarSymbol>,
    pub rhs: Vec<GrammarSymbol>,
}

impl Rule {
    /// A rule rewriting `lhs` into `rhs`.
    pub fn new(lhs: Vec<GrammarSymbol>, rhs: Vec<GrammarSymbol>) -> Self {
        Self { lhs, rhs }
    }
}

/// The four Chomsky classes, ordered from least to most restrictive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChomskyType {
    Unrestricted,
    ContextSensitive,
    ContextFree,
    Regular,
}

impl ChomskyType {
    /// The conventional type number, 0 through 3.
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ChomskyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChomskyType::Unrestricted => "unrestricted",
            ChomskyType::ContextSensitive => "context-sensitive",
            ChomskyType::ContextFree => "context-free",
            ChomskyType::Regular => "regular",
        };
        write!(f, "Type {} ({name})", self.level())
    }
}

/// Classify a rule set, reporting the most restrictive class it satisfies.
pub fn classify(rules: &[Rule], start: &str) -> ChomskyType {
    let context_free = rules.iter().all(is_context_free);

    if context_free && rules.iter().all(is_right_linear) {
        ChomskyType::Regular
    } else if context_free {
        ChomskyType::ContextFree
    } else if rules.iter().all(|rule| is_noncontracting(rule, start)) {
        ChomskyType::ContextSensitive
    } else {
        ChomskyType::Unrestricted
    }
}

fn is_context_free(rule: &Rule) -> bool {
    matches!(rule.lhs.as_slice(), [GrammarSymbol::NonTerminal(_)])
}

fn is_right_linear(rule: &Rule) -> bool {
    matches!(
        rule.rhs.as_slice(),
        [GrammarSymbol::Terminal(_)] | [GrammarSymbol::Terminal(_), GrammarSymbol::NonTerminal(_)]
    )
}

// ε only on the start symbol
fn is_noncontracting(rule: &Rule, start: &str) -> bool {
    if rule.rhs.is_empty() {
        return matches!(rule.lhs.as_slice(), [GrammarSymbol::NonTerminal(s)] if s == start);
    }
    rule.rhs.len() >= rule.lhs.len()
}
