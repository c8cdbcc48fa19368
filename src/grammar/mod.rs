pub mod analysis;
pub mod error;
pub mod first;
pub mod follow;
pub mod grammar;
pub mod left_recursion;
pub mod parse;
pub mod pretty_print;
pub use analysis::{analyze, Analysis};
pub use error::{AnalysisError, GrammarError, Warning};
pub use first::FirstSets;
pub use follow::FollowSets;
pub use grammar::Grammar;
pub use left_recursion::{LeftRecursion, LeftRecursionKind};

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";

/// Symbol index of the epsilon marker in every grammar.
pub const EPSILON_INDEX: usize = 0;
/// Symbol index of the end-of-input marker in every grammar.
pub const END_MARK_INDEX: usize = 1;
