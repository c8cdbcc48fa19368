use std::collections::HashMap;

use super::{error::Warning, END_MARK, EPSILON, EPSILON_INDEX};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    pub productions: Vec<Vec<usize>>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Epsilon,
    EndMark,
    NonTerminal(NonTerminal),
    Terminal(String),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Epsilon => EPSILON,
            Symbol::EndMark => END_MARK,
            Symbol::NonTerminal(e) => e.name.as_str(),
            Symbol::Terminal(e) => e.as_str(),
        }
    }
}

/// A frozen context-free grammar.
///
/// Symbols are interned into a single table. Index 0 is always the epsilon
/// marker and index 1 the end-of-input marker; the non-terminals follow in
/// declaration order, then the terminals in order of discovery. A grammar is
/// only ever produced by [`GrammarBuilder`](super::parse::GrammarBuilder), so
/// the terminal/non-terminal split cannot change once it exists.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(super) symbols: Vec<Symbol>,
    pub(super) symbol_table: HashMap<String, usize>,
    pub(super) start_symbol: usize,
    pub(super) warnings: Vec<Warning>,
}

impl Grammar {
    pub(super) fn new() -> Self {
        let mut symbol_table = HashMap::new();
        // `$` is not interned: a grammar may use it as an ordinary token.
        symbol_table.insert(EPSILON.to_string(), EPSILON_INDEX);
        Self {
            symbols: vec![Symbol::Epsilon, Symbol::EndMark],
            symbol_table,
            start_symbol: 0,
            warnings: Vec::new(),
        }
    }

    pub(super) fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.symbols.len();
        self.symbols
            .push(Symbol::NonTerminal(NonTerminal::new(idx, name.to_string())));
        self.symbol_table.insert(name.to_string(), idx);
        idx
    }

    pub(super) fn add_terminal(&mut self, name: String) -> usize {
        let idx = self.symbols.len();
        self.symbols.push(Symbol::Terminal(name.clone()));
        self.symbol_table.insert(name, idx);
        idx
    }

    pub fn symbols_len(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbol(&self, index: usize) -> &Symbol {
        &self.symbols[index]
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                Symbol::Terminal(name) => Some((i, name.as_str())),
                _ => None,
            })
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(|s| s.non_terminal())
    }

    pub fn non_terminal(&self, index: usize) -> Option<&NonTerminal> {
        self.symbols.get(index).and_then(|s| s.non_terminal())
    }

    pub fn get_symbol_index(&self, name: &str) -> Option<usize> {
        self.symbol_table.get(name).cloned()
    }

    pub fn get_symbol_name(&self, index: usize) -> &str {
        self.symbols[index].name()
    }

    pub fn start_symbol(&self) -> usize {
        self.start_symbol
    }

    /// Non-fatal diagnostics collected while the grammar was built.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        production
            .iter()
            .map(|idx| self.get_symbol_name(*idx))
            .collect()
    }
}
