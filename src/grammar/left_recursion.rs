use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use log::debug;

use super::Grammar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRecursionKind {
    Direct,
    Indirect,
}

/// A non-terminal whose derivations can start with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftRecursion {
    pub kind: LeftRecursionKind,
    pub non_terminal: String,
    /// The productions leading from `non_terminal` back to itself, each given
    /// as its left side and right side. Holds a single production for direct
    /// recursion; the first entry always belongs to `non_terminal`.
    pub chain: Vec<(String, Vec<String>)>,
}

impl LeftRecursion {
    /// The production of `non_terminal` witnessing the recursion.
    pub fn production(&self) -> &[String] {
        &self.chain[0].1
    }
}

impl fmt::Display for LeftRecursion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rules = self
            .chain
            .iter()
            .map(|(left, right)| format!("{} -> {}", left, right.join(" ")))
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            LeftRecursionKind::Direct => {
                write!(f, "Direct left recursion found in rule: {}", rules)
            }
            LeftRecursionKind::Indirect => write!(
                f,
                "Indirect left recursion detected involving {}: {}",
                self.non_terminal, rules
            ),
        }
    }
}

impl Grammar {
    /// Look for left recursion, checking non-terminals in declaration order and
    /// stopping at the first one found.
    ///
    /// Only the first symbol of each production is followed, so recursion
    /// hidden behind a nullable prefix (`A -> B A` with `B -> ε`) is not
    /// reported.
    pub fn find_left_recursion(&self) -> Option<LeftRecursion> {
        debug!("Checking for left recursion");
        for nt in self.non_terminal_iter() {
            for (p, production) in nt.productions.iter().enumerate() {
                if production.first() == Some(&nt.index) {
                    return Some(self.left_recursion(
                        LeftRecursionKind::Direct,
                        nt.index,
                        &[(nt.index, p)],
                    ));
                }
            }

            if let Some(chain) = self.find_indirect_left_recursion(nt.index) {
                return Some(self.left_recursion(LeftRecursionKind::Indirect, nt.index, &chain));
            }
        }
        None
    }

    /// Depth-first search from `root` along the first symbol of every
    /// production. Each root gets its own visited set, and a non-terminal is
    /// expanded at most once per search. Returns the `(non-terminal,
    /// production)` pairs leading back to `root`.
    fn find_indirect_left_recursion(&self, root: usize) -> Option<Vec<(usize, usize)>> {
        let mut visited: HashSet<usize> = HashSet::new();
        let mut reached_by: HashMap<usize, (usize, usize)> = HashMap::new();
        let mut stack = vec![root];
        visited.insert(root);

        while let Some(current) = stack.pop() {
            let nt = match self.non_terminal(current) {
                Some(nt) => nt,
                None => continue,
            };
            for (p, production) in nt.productions.iter().enumerate() {
                let first = match production.first() {
                    Some(&first) => first,
                    None => continue,
                };
                if first == root && current != root {
                    let mut chain = vec![(current, p)];
                    let mut node = current;
                    while let Some(&(parent, via)) = reached_by.get(&node) {
                        chain.push((parent, via));
                        node = parent;
                    }
                    chain.reverse();
                    return Some(chain);
                }
                if self.symbol(first).is_non_terminal() && visited.insert(first) {
                    reached_by.insert(first, (current, p));
                    stack.push(first);
                }
            }
        }
        None
    }

    fn left_recursion(
        &self,
        kind: LeftRecursionKind,
        root: usize,
        chain: &[(usize, usize)],
    ) -> LeftRecursion {
        let chain = chain
            .iter()
            .filter_map(|&(left, p)| {
                let nt = self.non_terminal(left)?;
                let right = self
                    .production_to_vec_str(&nt.productions[p])
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect();
                Some((nt.name.clone(), right))
            })
            .collect();
        LeftRecursion {
            kind,
            non_terminal: self.get_symbol_name(root).to_string(),
            chain,
        }
    }
}
