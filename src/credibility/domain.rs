use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Endorsement, ProficiencyLevel, ProjectId, ProjectRole, UserId, VerificationType};

/// Weights applied to the five pillar scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarWeights {
    pub skill_evidence: f32,
    pub execution_proof: f32,
    pub social_validation: f32,
    pub reliability: f32,
    pub consistency: f32,
}

impl PillarWeights {
    pub fn sum(&self) -> f32 {
        self.skill_evidence
            + self.execution_proof
            + self.social_validation
            + self.reliability
            + self.consistency
    }
}

pub const PILLAR_WEIGHTS: PillarWeights = PillarWeights {
    skill_evidence: 0.25,
    execution_proof: 0.30,
    social_validation: 0.15,
    reliability: 0.20,
    consistency: 0.10,
};

/// A skill claim with the evidence backing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedSkill {
    pub skill: String,
    pub verification: VerificationType,
    pub proficiency: ProficiencyLevel,
}

/// Snapshot consumed by the Skill Evidence pillar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillEvidenceInput {
    pub declared_skills: Vec<String>,
    pub verified_skills: Vec<VerifiedSkill>,
    pub languages: std::collections::BTreeMap<String, u64>,
    pub topics: Vec<String>,
}

impl SkillEvidenceInput {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One project participation as seen by the Execution Proof pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectParticipation {
    pub project_id: ProjectId,
    pub role: ProjectRole,
    pub required_skill_count: u32,
    pub team_size: u32,
}

/// Snapshot consumed by the Execution Proof pillar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionProofInput {
    pub completed_projects: Vec<ProjectParticipation>,
    pub active_projects: Vec<ProjectParticipation>,
    pub all_projects: Vec<ProjectParticipation>,
    pub has_portfolio: bool,
}

impl ExecutionProofInput {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Snapshot consumed by the Social Validation pillar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialValidationInput {
    pub endorsements: Vec<Endorsement>,
    pub unique_collaborators: BTreeSet<UserId>,
    /// Collaborators who shared at least two projects with the user.
    pub repeat_collaborators: u32,
}

impl SocialValidationInput {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Snapshot consumed by the Reliability pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityInput {
    pub projects_joined: u32,
    pub projects_completed: u32,
    pub projects_abandoned: u32,
    pub invites_received: u32,
    pub invites_accepted: u32,
    pub invites_rejected: u32,
    pub invites_ignored: u32,
    pub last_active_at: Option<DateTime<Utc>>,
    pub account_created_at: DateTime<Utc>,
}

impl ReliabilityInput {
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            projects_joined: 0,
            projects_completed: 0,
            projects_abandoned: 0,
            invites_received: 0,
            invites_accepted: 0,
            invites_rejected: 0,
            invites_ignored: 0,
            last_active_at: None,
            account_created_at: now,
        }
    }
}

/// Single activity observation for the Consistency pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityObservation {
    pub at: DateTime<Utc>,
    pub action: String,
}

/// Snapshot consumed by the Consistency pillar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyInput {
    pub activity_log: Vec<ActivityObservation>,
    pub account_age_days: u32,
    pub skill_changes: u32,
}

impl ConsistencyInput {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Full input snapshot for one user's credibility computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityInput {
    pub user_id: UserId,
    pub skill_evidence: SkillEvidenceInput,
    pub execution_proof: ExecutionProofInput,
    pub social_validation: SocialValidationInput,
    pub reliability: ReliabilityInput,
    pub consistency: ConsistencyInput,
}

impl CredibilityInput {
    /// Baseline input for a user with no recorded data. Scoring this must
    /// always succeed and yield the minimum-confidence breakdown.
    pub fn empty(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            skill_evidence: SkillEvidenceInput::empty(),
            execution_proof: ExecutionProofInput::empty(),
            social_validation: SocialValidationInput::empty(),
            reliability: ReliabilityInput::empty(now),
            consistency: ConsistencyInput::empty(),
        }
    }
}

/// Skill Evidence pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEvidenceBreakdown {
    pub score: u8,
    pub declared_count: u32,
    pub verified_count: u32,
    pub repo_signal_count: u32,
    pub verification_bonus: u8,
    pub confidence_decay: u8,
    pub signals: Vec<String>,
}

/// Execution Proof pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionProofBreakdown {
    pub score: u8,
    pub completed_count: u32,
    pub leader_count: u32,
    pub avg_complexity: u8,
    pub role_bonus: u8,
    pub portfolio_bonus: u8,
    pub signals: Vec<String>,
}

/// Social Validation pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialValidationBreakdown {
    pub score: u8,
    pub endorsement_count: u32,
    pub unique_endorsers: u32,
    pub repeat_collaborator_count: u32,
    pub endorser_quality_bonus: u8,
    pub diminishing_returns: bool,
    pub signals: Vec<String>,
}

/// Reliability pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityBreakdown {
    pub score: u8,
    pub completion_rate: u8,
    pub invite_response_rate: u8,
    pub dropout_penalty: u8,
    pub recency_bonus: u8,
    pub inactivity_penalty: u8,
    pub signals: Vec<String>,
}

/// Consistency pillar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyBreakdown {
    pub score: u8,
    pub active_months: u32,
    pub total_months: u32,
    pub activity_ratio: f32,
    pub steadiness_bonus: u8,
    pub burst_penalty: u8,
    pub signals: Vec<String>,
}

/// All five pillar breakdowns side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarBreakdowns {
    pub skill_evidence: SkillEvidenceBreakdown,
    pub execution_proof: ExecutionProofBreakdown,
    pub social_validation: SocialValidationBreakdown,
    pub reliability: ReliabilityBreakdown,
    pub consistency: ConsistencyBreakdown,
}

/// Human-readable tier derived from the final rank score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredibilityLabel {
    New,
    Emerging,
    Promising,
    Trusted,
    Elite,
}

impl CredibilityLabel {
    pub const fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => CredibilityLabel::Elite,
            60..=79 => CredibilityLabel::Trusted,
            40..=59 => CredibilityLabel::Promising,
            20..=39 => CredibilityLabel::Emerging,
            _ => CredibilityLabel::New,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CredibilityLabel::New => "New",
            CredibilityLabel::Emerging => "Emerging",
            CredibilityLabel::Promising => "Promising",
            CredibilityLabel::Trusted => "Trusted",
            CredibilityLabel::Elite => "Elite",
        }
    }
}

/// Full explainable credibility result for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityBreakdown {
    /// Weighted sum of the five pillar scores, clamped to 0-100.
    pub credibility_score: u8,
    /// Data-volume discount in [0.1, 1.0], rounded to two decimals.
    pub confidence_multiplier: f32,
    /// `round(credibility_score × confidence_multiplier)`, the score used
    /// for ranking.
    pub final_rank_score: u8,
    pub data_points: u32,
    pub pillars: PillarBreakdowns,
    pub label: CredibilityLabel,
    /// Up to five signal strings, strongest pillars first.
    pub top_signals: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

impl CredibilityBreakdown {
    pub fn summary(&self) -> CredibilitySummary {
        CredibilitySummary {
            credibility_score: self.credibility_score,
            final_rank_score: self.final_rank_score,
            label: self.label,
            confidence_multiplier: self.confidence_multiplier,
        }
    }
}

/// Minimal credibility payload for ranking integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CredibilitySummary {
    pub credibility_score: u8,
    pub final_rank_score: u8,
    pub label: CredibilityLabel,
    pub confidence_multiplier: f32,
}

impl CredibilitySummary {
    /// Neutral fallback used when a user's data cannot be fetched.
    pub const fn baseline() -> Self {
        Self {
            credibility_score: 0,
            final_rank_score: 0,
            label: CredibilityLabel::New,
            confidence_multiplier: 0.1,
        }
    }
}
