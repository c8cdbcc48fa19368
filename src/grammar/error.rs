use std::{error::Error, fmt};

use super::left_recursion::LeftRecursion;

/// Reasons a set of rule lines cannot be turned into a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// Line `line` (1-based) is not of the form `identifier -> body`.
    MalformedRule { line: usize, reason: &'static str },
    EmptyGrammar,
}

impl Error for GrammarError {}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::MalformedRule { line, reason } => {
                write!(f, "Line {}: malformed rule: {}", line, reason)
            }
            GrammarError::EmptyGrammar => write!(f, "Grammar contains no rules"),
        }
    }
}

/// Diagnostics which do not stop the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `symbol` is never defined by a rule but reads like a non-terminal, i.e.
    /// it starts with an ASCII uppercase letter. It is treated as a terminal.
    /// Uppercase token names such as `ID` or `NUM` trigger this as well; the
    /// warning is advisory and never changes the analysis.
    UndefinedSymbol { symbol: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::UndefinedSymbol { symbol } => write!(
                f,
                "Symbol '{}' is used but not defined, treating it as a terminal",
                symbol
            ),
        }
    }
}

/// Everything that can stop a grammar from reaching the FIRST/FOLLOW stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    Grammar(GrammarError),
    LeftRecursion(LeftRecursion),
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AnalysisError::Grammar(e) => Some(e),
            AnalysisError::LeftRecursion(_) => None,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::Grammar(e) => write!(f, "{}", e),
            AnalysisError::LeftRecursion(r) => {
                write!(f, "Grammar invalid for top-down parsing: {}", r)
            }
        }
    }
}

impl From<GrammarError> for AnalysisError {
    fn from(e: GrammarError) -> Self {
        AnalysisError::Grammar(e)
    }
}

impl From<LeftRecursion> for AnalysisError {
    fn from(r: LeftRecursion) -> Self {
        AnalysisError::LeftRecursion(r)
    }
}
