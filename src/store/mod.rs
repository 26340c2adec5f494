//! Record vocabulary and contracts for the external collaborators the
//! engines read from: the record store (profiles, projects, memberships,
//! endorsements, invites, activity log) and the repository-metadata provider.
//!
//! Nothing in this module performs scoring. The traits exist so the scoring
//! services can be exercised against in-memory doubles and wired to any
//! backing store that satisfies the contract.

mod memory;

pub use memory::MemoryRecordStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for user records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Identifier wrapper for project records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Stored user profile as read from the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub github_handle: Option<String>,
    pub skills: Vec<String>,
    pub portfolio_url: Option<String>,
    pub website: Option<String>,
    pub availability: Option<String>,
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn has_portfolio(&self) -> bool {
        self.portfolio_url.is_some() || self.website.is_some()
    }

    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            github_handle: self.github_handle.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// Trimmed profile payload embedded in suggestion results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub id: UserId,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub github_handle: Option<String>,
    pub skills: Vec<String>,
}

/// Stored project record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub status: ProjectStatus,
    pub team_size: u32,
    pub availability_required: Option<String>,
    pub timezone_preferred: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle status tracked per project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Open,
    InProgress,
    Completed,
}

impl ProjectStatus {
    /// Wire name used in logs and payloads.
    pub const fn label(self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, ProjectStatus::Open | ProjectStatus::InProgress)
    }
}

/// Role a user holds within a project team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectRole {
    Leader,
    Member,
}

/// Membership row linking a user to a project with a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub role: ProjectRole,
}

/// Peer endorsement of one user's skill, optionally tied to a shared project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endorsement {
    pub endorser_id: UserId,
    pub endorsed_id: UserId,
    pub skill: String,
    pub project_id: Option<ProjectId>,
    /// Credibility of the endorser (0-100) when known; endorsements from
    /// high-credibility peers carry extra weight.
    pub endorser_credibility: Option<u8>,
}

/// Status of a project invite sent to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InviteStatus {
    Pending,
    Accepted,
    Rejected,
}

/// Invite row addressed to a prospective teammate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invite {
    pub project_id: ProjectId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub status: InviteStatus,
}

/// How a skill claim was verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationType {
    SelfDeclared,
    QuizPassed,
    PeerVerified,
    ProjectProven,
    RepoVerified,
}

impl VerificationType {
    /// Confidence weight applied to a verification of this type.
    pub const fn confidence(self) -> f32 {
        match self {
            VerificationType::SelfDeclared => 0.3,
            VerificationType::QuizPassed => 0.8,
            VerificationType::PeerVerified => 0.6,
            VerificationType::ProjectProven => 0.9,
            VerificationType::RepoVerified => 0.7,
        }
    }
}

/// Declared proficiency attached to a verified skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    /// Multiplier applied on top of the verification confidence.
    pub const fn multiplier(self) -> f32 {
        match self {
            ProficiencyLevel::Beginner => 0.4,
            ProficiencyLevel::Intermediate => 0.6,
            ProficiencyLevel::Advanced => 0.85,
            ProficiencyLevel::Expert => 1.0,
        }
    }
}

/// Verified-skill row for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillVerification {
    pub user_id: UserId,
    pub skill: String,
    pub verification: VerificationType,
    pub proficiency: ProficiencyLevel,
}

/// Single entry in a user's chronological activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    pub action: String,
}

/// Language/topic/repo-name vector derived from a user's repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSkillVector {
    /// Language name to byte count across the user's repositories.
    pub languages: BTreeMap<String, u64>,
    pub topics: Vec<String>,
    pub repo_names: Vec<String>,
}

impl RepoSkillVector {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.topics.is_empty() && self.repo_names.is_empty()
    }
}

/// Error enumeration for record-store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(String),
}

/// Error raised by the repository-metadata provider. Always recoverable:
/// callers substitute an empty vector instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("metadata provider unavailable: {0}")]
    Unavailable(String),
    #[error("no repository data for handle '{0}'")]
    UnknownHandle(String),
}

/// Read contract over the record store. Implementations must support point
/// lookups by id and batch lookups by a set of ids.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn fetch_profile(&self, id: &UserId) -> Result<Option<Profile>, StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;
    async fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, StoreError>;
    async fn projects_owned_by(&self, owner: &UserId) -> Result<Vec<Project>, StoreError>;
    async fn projects_by_ids(&self, ids: &[ProjectId]) -> Result<Vec<Project>, StoreError>;
    async fn memberships_for_user(&self, user: &UserId) -> Result<Vec<Membership>, StoreError>;
    async fn members_of_project(&self, project: &ProjectId) -> Result<Vec<Membership>, StoreError>;
    async fn members_of_projects(
        &self,
        projects: &[ProjectId],
    ) -> Result<Vec<Membership>, StoreError>;
    async fn endorsements_for(&self, user: &UserId) -> Result<Vec<Endorsement>, StoreError>;
    async fn invites_received(&self, user: &UserId) -> Result<Vec<Invite>, StoreError>;
    async fn invites_for_project(&self, project: &ProjectId) -> Result<Vec<Invite>, StoreError>;
    async fn skill_verifications(
        &self,
        user: &UserId,
    ) -> Result<Vec<SkillVerification>, StoreError>;
    async fn activity_log(&self, user: &UserId) -> Result<Vec<ActivityEntry>, StoreError>;
}

/// Contract for the repository-metadata provider (e.g. a GitHub API client).
#[async_trait]
pub trait RepoMetadataProvider: Send + Sync {
    async fn skill_vector(&self, handle: &str) -> Result<RepoSkillVector, MetadataError>;
}
