extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{
    analyze, Analysis, AnalysisError, FirstSets, FollowSets, Grammar, GrammarError,
    LeftRecursion, LeftRecursionKind, Warning,
};

#[wasm_bindgen]
pub fn first_follow_to_json(grammar: &str) -> String {
    let result = analyze(grammar)
        .map_err(|e| e.to_string())
        .and_then(|(g, analysis)| {
            g.to_first_follow_output_vec(&analysis)
                .to_json()
                .map_err(|e| e.to_string())
        });
    match result {
        Ok(json) => json,
        Err(e) => serde_json::json!({ "error": e }).to_string(),
    }
}

#[cfg(test)]
mod test_util {
    use std::collections::{BTreeSet, HashSet};

    use crate::Grammar;

    pub fn names<'a>(g: &'a Grammar, set: &HashSet<usize>) -> BTreeSet<&'a str> {
        set.iter().map(|&idx| g.get_symbol_name(idx)).collect()
    }

    pub fn set<'a>(items: &[&'a str]) -> BTreeSet<&'a str> {
        items.iter().cloned().collect()
    }

    pub fn index(g: &Grammar, name: &str) -> usize {
        g.get_symbol_index(name).unwrap()
    }
}



#[cfg(test)]
mod first_follow_tests {
    use crate::test_util::{index, names, set};
    use crate::{analyze, Grammar};

    const EXPR: &str = "E -> T X\nX -> + T X | ε\nT -> int | ( E )";

    #[test]
    fn expression_first_sets() {
        let (g, analysis) = analyze(EXPR).unwrap();
        let first = |n| names(&g, analysis.first.get(index(&g, n)));

        assert_eq!(first("T"), set(&["int", "("]));
        assert_eq!(first("X"), set(&["+", "ε"]));
        assert_eq!(first("E"), set(&["int", "("]));
    }

    #[test]
    fn expression_follow_sets() {
        let (g, analysis) = analyze(EXPR).unwrap();
        let follow = |n| names(&g, analysis.follow.get(index(&g, n)));

        assert_eq!(follow("E"), set(&["$", ")"]));
        assert_eq!(follow("X"), set(&["$", ")"]));
        assert_eq!(follow("T"), set(&["+", "$", ")"]));
    }

    #[test]
    fn terminal_first_is_itself() {
        let (g, analysis) = analyze(EXPR).unwrap();
        for (idx, name) in g.terminal_iter() {
            assert_eq!(names(&g, analysis.first.get(idx)), set(&[name]));
        }
    }

    #[test]
    fn nullable_non_terminals() {
        let g = Grammar::parse("S -> A B\nA -> a | ε\nB -> b |\nC -> A c").unwrap();
        let first = g.first_sets();

        assert!(first.is_nullable(index(&g, "A")));
        assert!(first.is_nullable(index(&g, "B")));
        assert!(first.is_nullable(index(&g, "S")));
        assert!(!first.is_nullable(index(&g, "C")));
        assert_eq!(names(&g, first.get(index(&g, "S"))), set(&["a", "b", "ε"]));
        assert_eq!(names(&g, first.get(index(&g, "C"))), set(&["a", "c"]));
    }

    #[test]
    fn first_of_sequence() {
        let g = Grammar::parse("S -> A b\nA -> a | ε").unwrap();
        let first = g.first_sets();

        assert_eq!(names(&g, &first.of_sequence(&[])), set(&["ε"]));
        let a = index(&g, "A");
        let b = index(&g, "b");
        assert_eq!(names(&g, &first.of_sequence(&[a])), set(&["a", "ε"]));
        assert_eq!(names(&g, &first.of_sequence(&[a, b])), set(&["a", "b"]));
    }

    #[test]
    fn start_follow_contains_end_mark() {
        let (g, analysis) = analyze("S -> a S b | c").unwrap();
        let s = g.start_symbol();
        assert_eq!(names(&g, analysis.follow.get(s)), set(&["$", "b"]));
    }

    #[test]
    fn follow_through_nullable_remainder() {
        let (g, analysis) = analyze("S -> A B c\nA -> a\nB -> b | ε").unwrap();
        let follow = |n| names(&g, analysis.follow.get(index(&g, n)));

        assert_eq!(follow("A"), set(&["b", "c"]));
        assert_eq!(follow("B"), set(&["c"]));
        assert_eq!(follow("S"), set(&["$"]));
    }

    #[test]
    fn follow_inherits_from_left_side() {
        let (g, analysis) = analyze("S -> a A\nA -> b B\nB -> c | ε").unwrap();
        let follow = |n| names(&g, analysis.follow.get(index(&g, n)));

        assert_eq!(follow("A"), set(&["$"]));
        assert_eq!(follow("B"), set(&["$"]));
    }

    #[test]
    fn undefined_symbol_is_a_terminal() {
        let (g, analysis) = analyze("S -> A b").unwrap();
        let a = index(&g, "A");

        assert_eq!(names(&g, analysis.first.get(a)), set(&["A"]));
        assert_eq!(
            names(&g, analysis.first.get(g.start_symbol())),
            set(&["A"])
        );
    }

    #[test]
    fn solving_is_idempotent() {
        let (g, analysis) = analyze(EXPR).unwrap();

        let mut first = analysis.first.clone();
        assert!(!first.pass(&g));
        assert_eq!(first, analysis.first);

        let mut follow = analysis.follow.clone();
        assert!(!follow.pass(&g, &analysis.first));
        assert_eq!(follow, analysis.follow);
    }

    #[test]
    fn sets_only_grow() {
        let g = Grammar::parse(EXPR).unwrap();

        let mut first = crate::FirstSets::initial(&g);
        loop {
            let before = first.clone();
            let changed = first.pass(&g);
            for idx in 0..g.symbols_len() {
                assert!(first.get(idx).is_superset(before.get(idx)));
            }
            assert!(first.total_len() >= before.total_len());
            if !changed {
                assert_eq!(first, before);
                break;
            }
        }

        let mut follow = crate::FollowSets::initial(&g);
        loop {
            let before = follow.clone();
            let changed = follow.pass(&g, &first);
            for idx in 0..g.symbols_len() {
                assert!(follow.get(idx).is_superset(before.get(idx)));
            }
            if !changed {
                assert_eq!(follow, before);
                break;
            }
        }
        assert_eq!(follow, g.follow_sets(&first));
    }
}
