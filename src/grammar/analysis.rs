use super::{
    error::AnalysisError, first::FirstSets, follow::FollowSets, left_recursion::LeftRecursion,
    Grammar,
};

/// The FIRST and FOLLOW sets of a grammar that passed the left recursion check.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub first: FirstSets,
    pub follow: FollowSets,
}

impl Grammar {
    /// Compute FIRST and FOLLOW sets, refusing left recursive grammars before
    /// either solver runs.
    pub fn analyze(&self) -> Result<Analysis, LeftRecursion> {
        if let Some(recursion) = self.find_left_recursion() {
            return Err(recursion);
        }
        let first = self.first_sets();
        let follow = self.follow_sets(&first);
        Ok(Analysis { first, follow })
    }
}

/// Parse `grammar` and analyze it in one go.
pub fn analyze(grammar: &str) -> Result<(Grammar, Analysis), AnalysisError> {
    let g = Grammar::parse(grammar)?;
    let analysis = g.analyze()?;
    Ok((g, analysis))
}
