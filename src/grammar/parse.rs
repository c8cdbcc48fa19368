use std::collections::HashMap;

use log::{info, warn};

use super::{
    error::{GrammarError, Warning},
    grammar::Symbol,
    Grammar, EPSILON,
};

/// Accumulates rules until the whole input has been read.
///
/// Nothing is classified while rules are being added: a symbol only becomes a
/// terminal in [`build`](GrammarBuilder::build), once it is known that no rule
/// defines it.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    lefts: Vec<String>,
    alternatives: Vec<Vec<Vec<String>>>,
    positions: HashMap<String, usize>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the alternatives of one rule. Rules for an already seen left side
    /// append to its alternatives.
    pub fn add_rule(&mut self, left: &str, alternatives: Vec<Vec<String>>) {
        let pos = match self.positions.get(left) {
            Some(&pos) => pos,
            None => {
                self.lefts.push(left.to_string());
                self.alternatives.push(Vec::new());
                self.positions.insert(left.to_string(), self.lefts.len() - 1);
                self.lefts.len() - 1
            }
        };
        self.alternatives[pos].extend(alternatives);
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.lefts.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        let mut g = Grammar::new();
        let lefts: Vec<usize> = self.lefts.iter().map(|l| g.add_non_terminal(l)).collect();
        g.start_symbol = lefts[0];

        for (left, alternatives) in lefts.into_iter().zip(self.alternatives) {
            let mut productions = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                let production: Vec<usize> = alternative
                    .into_iter()
                    .map(|s| match g.get_symbol_index(&s) {
                        Some(idx) => idx,
                        None => {
                            if looks_like_non_terminal(&s) {
                                let w = Warning::UndefinedSymbol { symbol: s.clone() };
                                warn!("{}", w);
                                g.warnings.push(w);
                            }
                            g.add_terminal(s)
                        }
                    })
                    .collect();
                productions.push(production);
            }
            if let Symbol::NonTerminal(nt) = &mut g.symbols[left] {
                nt.productions = productions;
            }
        }

        info!(
            "Grammar has {} productions, {} non-terminals, {} terminals",
            g.non_terminal_iter().map(|nt| nt.productions.len()).sum::<usize>(),
            g.non_terminal_iter().count(),
            g.terminal_iter().count(),
        );
        Ok(g)
    }
}

fn looks_like_non_terminal(symbol: &str) -> bool {
    symbol.chars().next().map_or(false, |c| c.is_ascii_uppercase())
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Split one `left -> alt1 | alt2` line into its left side and alternatives.
fn parse_rule(line_no: usize, line: &str) -> Result<(&str, Vec<Vec<String>>), GrammarError> {
    let malformed = |reason| GrammarError::MalformedRule {
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = line.split("->").collect();
    if parts.len() < 2 {
        return Err(malformed("missing \"->\""));
    } else if parts.len() > 2 {
        return Err(malformed("too many \"->\""));
    }

    let left = parts[0].trim();
    if left.is_empty() {
        return Err(malformed("empty left side"));
    } else if !is_identifier(left) {
        return Err(malformed("left side is not an identifier"));
    } else if left == EPSILON {
        return Err(malformed("ε cannot have productions"));
    }

    let rights = parts[1].trim();
    if rights.is_empty() {
        return Err(malformed("empty right side"));
    }

    let alternatives = rights
        .split('|')
        .map(|right| right.split_whitespace().map(|s| s.to_string()).collect())
        .collect();
    Ok((left, alternatives))
}

impl Grammar {
    /// Parse a grammar given as newline separated rules. Blank lines are
    /// skipped.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        Self::from_lines(grammar.lines())
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self, GrammarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GrammarBuilder::new();
        for (i, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let (left, alternatives) = parse_rule(i + 1, line)?;
            builder.add_rule(left, alternatives);
        }
        builder.build()
    }
}
