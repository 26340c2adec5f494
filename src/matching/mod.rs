//! Matching: pairwise user↔target compatibility and the candidate-ranking
//! engine. Everything here is pure and synchronous; enrichment happens in
//! the suggestion orchestrator before these functions run.

pub mod compatibility;
pub mod domain;
pub mod engine;
pub mod skills;

#[cfg(test)]
mod tests;

pub use compatibility::calculate_compatibility;
pub use domain::{
    CompatibilityDetails, CompatibilityScore, CompatibilityTarget, CompatibilityUser,
    CompatibilityWeights, MatchCandidate, MatchDetails, MatchLabel, MatchResult, RankWeights,
    RankingInput, COMPATIBILITY_WEIGHTS, RANK_WEIGHTS, RANK_WEIGHTS_WITH_CREDIBILITY,
};
pub use engine::{extract_keywords, rank_candidates, score_candidate};
