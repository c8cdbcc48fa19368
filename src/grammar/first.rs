use std::collections::HashSet;

use log::{debug, trace};

use super::{grammar::Symbol, Grammar, EPSILON_INDEX};

/// The FIRST set of every symbol of a grammar, indexed by symbol index.
///
/// For a grammar
/// ```text
///   E -> T X
///   X -> + T X | ε
///   T -> int | ( E )
/// ```
/// FIRST(E) = FIRST(T) = {int, (} and FIRST(X) = {+, ε}. Terminals map to
/// themselves and the epsilon marker maps to {ε}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: Vec<HashSet<usize>>,
}

impl FirstSets {
    /// Solve the FIRST sets of `grammar`. The grammar must not be left
    /// recursive.
    pub fn new(grammar: &Grammar) -> Self {
        debug!("Computing first sets");
        let mut firsts = Self::initial(grammar);
        for i in 1.. {
            trace!("First set pass {}", i);
            if !firsts.pass(grammar) {
                break;
            }
        }
        firsts
    }

    pub(crate) fn initial(grammar: &Grammar) -> Self {
        let sets = (0..grammar.symbols_len())
            .map(|i| match grammar.symbol(i) {
                Symbol::NonTerminal(_) => HashSet::new(),
                _ => std::iter::once(i).collect(),
            })
            .collect();
        Self { sets }
    }

    /// Run one pass over every production, returning whether any set grew.
    pub(crate) fn pass(&mut self, grammar: &Grammar) -> bool {
        let mut changed = false;
        for nt in grammar.non_terminal_iter() {
            for production in &nt.productions {
                let first = self.of_sequence(production);
                let into = &mut self.sets[nt.index];
                for idx in first {
                    changed |= into.insert(idx);
                }
            }
        }
        changed
    }

    pub fn get(&self, index: usize) -> &HashSet<usize> {
        &self.sets[index]
    }

    pub fn is_nullable(&self, index: usize) -> bool {
        self.sets[index].contains(&EPSILON_INDEX)
    }

    /// FIRST of a string of symbols. An empty string, or one in which every
    /// symbol may vanish, contains epsilon.
    pub fn of_sequence(&self, symbols: &[usize]) -> HashSet<usize> {
        let mut first = HashSet::new();
        for &idx in symbols {
            let set = &self.sets[idx];
            first.extend(set.iter().filter(|&&s| s != EPSILON_INDEX));
            if !set.contains(&EPSILON_INDEX) {
                return first;
            }
        }
        first.insert(EPSILON_INDEX);
        first
    }

    /// Number of entries across all sets.
    pub fn total_len(&self) -> usize {
        self.sets.iter().map(|s| s.len()).sum()
    }
}

impl Grammar {
    pub fn first_sets(&self) -> FirstSets {
        FirstSets::new(self)
    }
}
