use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::credibility::CredibilitySummary;
use crate::store::{ProjectId, UserId};

/// Weights for the candidate-ranking components. Each set must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    pub skill_overlap: f32,
    pub language: f32,
    pub repo_relevance: f32,
    pub complementary: f32,
    pub credibility: f32,
}

impl RankWeights {
    pub fn sum(&self) -> f32 {
        self.skill_overlap + self.language + self.repo_relevance + self.complementary
            + self.credibility
    }
}

/// Used when no credibility summary is attached to a candidate.
pub const RANK_WEIGHTS: RankWeights = RankWeights {
    skill_overlap: 0.45,
    language: 0.20,
    repo_relevance: 0.15,
    complementary: 0.20,
    credibility: 0.0,
};

/// Used when the candidate carries a credibility summary as a fifth
/// ranking dimension.
pub const RANK_WEIGHTS_WITH_CREDIBILITY: RankWeights = RankWeights {
    skill_overlap: 0.35,
    language: 0.15,
    repo_relevance: 0.10,
    complementary: 0.15,
    credibility: 0.25,
};

/// Weights for pairwise user↔target compatibility. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompatibilityWeights {
    pub skill_overlap: f32,
    pub complementary: f32,
    pub availability: f32,
    pub timezone: f32,
}

impl CompatibilityWeights {
    pub fn sum(&self) -> f32 {
        self.skill_overlap + self.complementary + self.availability + self.timezone
    }
}

pub const COMPATIBILITY_WEIGHTS: CompatibilityWeights = CompatibilityWeights {
    skill_overlap: 0.55,
    complementary: 0.20,
    availability: 0.15,
    timezone: 0.10,
};

/// Quality tier shared by pairwise and ranked match scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLabel {
    Excellent,
    Good,
    Fair,
    Low,
}

impl MatchLabel {
    pub const fn from_score(score: u8) -> Self {
        match score {
            75..=u8::MAX => MatchLabel::Excellent,
            50..=74 => MatchLabel::Good,
            25..=49 => MatchLabel::Fair,
            _ => MatchLabel::Low,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchLabel::Excellent => "Excellent",
            MatchLabel::Good => "Good",
            MatchLabel::Fair => "Fair",
            MatchLabel::Low => "Low",
        }
    }
}

/// One user being ranked against a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub id: UserId,
    pub skills: Vec<String>,
    pub github_handle: Option<String>,
    pub languages: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub repo_names: Vec<String>,
    pub credibility: Option<CredibilitySummary>,
}

impl MatchCandidate {
    /// Candidate with nothing but an id; every component scores at its
    /// empty-data value.
    pub fn bare(id: UserId) -> Self {
        Self {
            id,
            skills: Vec::new(),
            github_handle: None,
            languages: BTreeMap::new(),
            topics: Vec::new(),
            repo_names: Vec::new(),
            credibility: None,
        }
    }
}

/// Target description the candidates are ranked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingInput {
    pub target_id: ProjectId,
    pub required_skills: Vec<String>,
    pub description: String,
    /// Keywords extracted from the target's title/description.
    pub keywords: Vec<String>,
}

/// Per-component sub-scores backing a match result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub skill_overlap_score: u8,
    pub language_score: u8,
    pub repo_relevance_score: u8,
    pub complementary_score: u8,
    pub credibility_score: Option<u8>,
    pub missing_skills: Vec<String>,
}

/// Ranked output for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub user_id: UserId,
    /// Final weighted 0-100 score.
    pub score: u8,
    pub matched_skills: Vec<String>,
    /// 0-1 confidence in the match, from data availability.
    pub confidence: f32,
    pub label: MatchLabel,
    pub details: MatchDetails,
    pub credibility: Option<CredibilitySummary>,
}

/// One side of a pairwise compatibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityUser {
    pub id: UserId,
    pub skills: Vec<String>,
    pub availability: Option<String>,
    pub timezone: Option<String>,
}

/// The target profile a user is checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityTarget {
    pub id: ProjectId,
    pub required_skills: Vec<String>,
    pub availability_required: Option<String>,
    pub timezone_preferred: Option<String>,
}

/// Component percentages behind a compatibility score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityDetails {
    pub skill_overlap: u8,
    pub complementary: u8,
    pub availability: u8,
    pub timezone: u8,
    pub missing_skills: Vec<String>,
}

/// Pairwise user↔target compatibility result. Created per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityScore {
    pub target_id: ProjectId,
    pub score: u8,
    pub label: MatchLabel,
    pub details: CompatibilityDetails,
}
