//! Credibility scoring and teammate matching for collaborative project
//! platforms.
//!
//! The crate is organized around three layers:
//!
//! - [`store`]: the record vocabulary (profiles, projects, memberships,
//!   endorsements, invites, verifications, activity) and the async traits
//!   that supply it.
//! - [`credibility`]: the five-pillar credibility engine, its confidence
//!   model, the TTL cache, and the assembly service that turns raw records
//!   into scored breakdowns.
//! - [`matching`] and [`suggestions`]: pure compatibility and ranking math,
//!   plus the orchestrator that assembles an eligible candidate pool,
//!   enriches it concurrently, and returns ranked teammate suggestions.
//!
//! All scoring is deterministic for a fixed clock; services take their
//! dependencies as `Arc`-wrapped trait objects so storage and repository
//! metadata backends stay pluggable.

pub mod config;
pub mod credibility;
pub mod error;
pub mod matching;
pub mod store;
pub mod suggestions;
pub mod telemetry;

pub use credibility::{
    compute_credibility, compute_credibility_at, CredibilityBreakdown, CredibilityInput,
    CredibilityLabel, CredibilityService, CredibilitySummary, MemoryCredibilityCache,
};
pub use error::ServiceError;
pub use matching::{calculate_compatibility, rank_candidates, MatchLabel, MatchResult};
pub use store::{MemoryRecordStore, RecordStore, RepoMetadataProvider};
pub use suggestions::{SuggestedTeammate, SuggestionService};
