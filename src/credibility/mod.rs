//! Credibility scoring: five evidence pillars, a weighted composite engine
//! with a data-volume confidence discount, a TTL cache, and the service that
//! assembles inputs from the record store.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod pillars;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::{CacheEntry, CacheError, CredibilityCache, MemoryCredibilityCache, PillarScores};
pub use domain::{
    ActivityObservation, ConsistencyBreakdown, ConsistencyInput, CredibilityBreakdown,
    CredibilityInput, CredibilityLabel, CredibilitySummary, ExecutionProofBreakdown,
    ExecutionProofInput, PillarBreakdowns, PillarWeights, ProjectParticipation,
    ReliabilityBreakdown, ReliabilityInput, SkillEvidenceBreakdown, SkillEvidenceInput,
    SocialValidationBreakdown, SocialValidationInput, VerifiedSkill, PILLAR_WEIGHTS,
};
pub use engine::{compute_credibility, compute_credibility_at, compute_summary};
pub use service::CredibilityService;
