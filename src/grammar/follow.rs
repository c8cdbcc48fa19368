use std::collections::HashSet;

use log::{debug, trace};

use super::{first::FirstSets, Grammar, END_MARK_INDEX, EPSILON_INDEX};

/// The FOLLOW set of every non-terminal, indexed by symbol index. Entries for
/// anything that is not a non-terminal stay empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    sets: Vec<HashSet<usize>>,
}

impl FollowSets {
    pub fn new(grammar: &Grammar, firsts: &FirstSets) -> Self {
        debug!("Computing follow sets");
        let mut follows = Self::initial(grammar);
        for i in 1.. {
            trace!("Follow set pass {}", i);
            if !follows.pass(grammar, firsts) {
                break;
            }
        }
        follows
    }

    pub(crate) fn initial(grammar: &Grammar) -> Self {
        let mut sets = vec![HashSet::new(); grammar.symbols_len()];
        sets[grammar.start_symbol()].insert(END_MARK_INDEX);
        Self { sets }
    }

    pub(crate) fn pass(&mut self, grammar: &Grammar, firsts: &FirstSets) -> bool {
        let mut changed = false;
        for left in grammar.non_terminal_iter() {
            for production in &left.productions {
                for (i, &sym) in production.iter().enumerate() {
                    if !grammar.symbol(sym).is_non_terminal() {
                        continue;
                    }
                    // Whatever may start the remainder follows `sym`; if the
                    // remainder can vanish, so does whatever follows `left`.
                    let mut follow = firsts.of_sequence(&production[i + 1..]);
                    if follow.remove(&EPSILON_INDEX) {
                        follow.extend(self.sets[left.index].iter().cloned());
                    }
                    let into = &mut self.sets[sym];
                    for idx in follow {
                        changed |= into.insert(idx);
                    }
                }
            }
        }
        changed
    }

    pub fn get(&self, index: usize) -> &HashSet<usize> {
        &self.sets[index]
    }

    /// Number of entries across all sets.
    pub fn total_len(&self) -> usize {
        self.sets.iter().map(|s| s.len()).sum()
    }
}

impl Grammar {
    pub fn follow_sets(&self, firsts: &FirstSets) -> FollowSets {
        FollowSets::new(self, firsts)
    }
}
