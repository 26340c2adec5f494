//! Teammate suggestion orchestration: candidate pool assembly, concurrent
//! enrichment with per-candidate failure containment, ranking, and the
//! result cap.

pub mod service;

pub use service::{SuggestedTeammate, SuggestionService};
