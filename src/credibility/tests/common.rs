use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::credibility::cache::{CacheEntry, CacheError, CredibilityCache};
use crate::credibility::domain::{
    ActivityObservation, ConsistencyInput, CredibilityInput, ExecutionProofInput,
    ProjectParticipation, ReliabilityInput, SkillEvidenceInput, SocialValidationInput,
    VerifiedSkill,
};
use crate::credibility::service::CredibilityService;
use crate::credibility::MemoryCredibilityCache;
use crate::store::{
    ActivityEntry, Endorsement, Invite, Membership, MemoryRecordStore, MetadataError,
    ProficiencyLevel, Profile, Project, ProjectId, ProjectRole, RecordStore, RepoMetadataProvider,
    RepoSkillVector, SkillVerification, StoreError, UserId, VerificationType,
};

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn profile(id: &str, skills: &[&str]) -> Profile {
    Profile {
        id: UserId::new(id),
        username: Some(id.to_string()),
        display_name: None,
        github_handle: None,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        portfolio_url: None,
        website: None,
        availability: None,
        timezone: None,
        created_at: Utc::now() - Duration::days(90),
        updated_at: None,
    }
}

pub(super) fn participation(
    id: &str,
    role: ProjectRole,
    required_skill_count: u32,
    team_size: u32,
) -> ProjectParticipation {
    ProjectParticipation {
        project_id: ProjectId::new(id),
        role,
        required_skill_count,
        team_size,
    }
}

pub(super) fn verified(
    skill: &str,
    verification: VerificationType,
    proficiency: ProficiencyLevel,
) -> VerifiedSkill {
    VerifiedSkill {
        skill: skill.to_string(),
        verification,
        proficiency,
    }
}

pub(super) fn endorsement(endorser: &str, endorsed: &str, credibility: Option<u8>) -> Endorsement {
    Endorsement {
        endorser_id: UserId::new(endorser),
        endorsed_id: UserId::new(endorsed),
        skill: "rust".to_string(),
        project_id: None,
        endorser_credibility: credibility,
    }
}

pub(super) fn repo_vector(languages: &[&str], topics: &[&str], repos: &[&str]) -> RepoSkillVector {
    RepoSkillVector {
        languages: languages
            .iter()
            .map(|language| (language.to_string(), 1_000_u64))
            .collect(),
        topics: topics.iter().map(|topic| topic.to_string()).collect(),
        repo_names: repos.iter().map(|name| name.to_string()).collect(),
    }
}

/// Input touching every confidence credit, used by the engine tests.
pub(super) fn rich_input(now: DateTime<Utc>) -> CredibilityInput {
    let completed = participation("p-done", ProjectRole::Leader, 4, 3);
    let active = participation("p-live", ProjectRole::Member, 2, 2);

    let mut languages = BTreeMap::new();
    languages.insert("rust".to_string(), 8_000_u64);
    languages.insert("typescript".to_string(), 2_000_u64);

    let mut collaborators = BTreeSet::new();
    collaborators.insert(UserId::new("u-ally"));
    collaborators.insert(UserId::new("u-peer"));

    CredibilityInput {
        user_id: UserId::new("u-rich"),
        skill_evidence: SkillEvidenceInput {
            declared_skills: vec!["rust".to_string(), "react".to_string()],
            verified_skills: vec![verified(
                "rust",
                VerificationType::ProjectProven,
                ProficiencyLevel::Expert,
            )],
            languages,
            topics: vec!["cli".to_string()],
        },
        execution_proof: ExecutionProofInput {
            completed_projects: vec![completed.clone()],
            active_projects: vec![active.clone()],
            all_projects: vec![completed, active],
            has_portfolio: true,
        },
        social_validation: SocialValidationInput {
            endorsements: vec![
                endorsement("u-ally", "u-rich", Some(80)),
                endorsement("u-peer", "u-rich", Some(70)),
            ],
            unique_collaborators: collaborators,
            repeat_collaborators: 1,
        },
        reliability: ReliabilityInput {
            projects_joined: 2,
            projects_completed: 1,
            projects_abandoned: 0,
            invites_received: 2,
            invites_accepted: 1,
            invites_rejected: 1,
            invites_ignored: 0,
            last_active_at: Some(now - Duration::days(2)),
            account_created_at: now - Duration::days(90),
        },
        consistency: ConsistencyInput {
            activity_log: vec![
                ActivityObservation {
                    at: now - Duration::days(62),
                    action: "project_created".to_string(),
                },
                ActivityObservation {
                    at: now - Duration::days(33),
                    action: "skill_added".to_string(),
                },
                ActivityObservation {
                    at: now - Duration::days(2),
                    action: "profile_updated".to_string(),
                },
            ],
            account_age_days: 90,
            skill_changes: 1,
        },
    }
}

pub(super) struct StaticMetadata(pub(super) RepoSkillVector);

#[async_trait]
impl RepoMetadataProvider for StaticMetadata {
    async fn skill_vector(&self, _handle: &str) -> Result<RepoSkillVector, MetadataError> {
        Ok(self.0.clone())
    }
}

pub(super) struct FailingMetadata;

#[async_trait]
impl RepoMetadataProvider for FailingMetadata {
    async fn skill_vector(&self, handle: &str) -> Result<RepoSkillVector, MetadataError> {
        Err(MetadataError::UnknownHandle(handle.to_string()))
    }
}

pub(super) struct FailingCache;

#[async_trait]
impl CredibilityCache for FailingCache {
    async fn get(&self, _user: &UserId) -> Result<Option<CacheEntry>, CacheError> {
        Err(CacheError::Unavailable("cache offline".to_string()))
    }

    async fn put(&self, _entry: CacheEntry) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("cache offline".to_string()))
    }
}

pub(super) struct UnavailableRecordStore;

#[async_trait]
impl RecordStore for UnavailableRecordStore {
    async fn fetch_profile(&self, _id: &UserId) -> Result<Option<Profile>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn fetch_project(&self, _id: &ProjectId) -> Result<Option<Project>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn projects_owned_by(&self, _owner: &UserId) -> Result<Vec<Project>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn projects_by_ids(&self, _ids: &[ProjectId]) -> Result<Vec<Project>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn memberships_for_user(&self, _user: &UserId) -> Result<Vec<Membership>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn members_of_project(
        &self,
        _project: &ProjectId,
    ) -> Result<Vec<Membership>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn members_of_projects(
        &self,
        _projects: &[ProjectId],
    ) -> Result<Vec<Membership>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn endorsements_for(&self, _user: &UserId) -> Result<Vec<Endorsement>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn invites_received(&self, _user: &UserId) -> Result<Vec<Invite>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn invites_for_project(&self, _project: &ProjectId) -> Result<Vec<Invite>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn skill_verifications(
        &self,
        _user: &UserId,
    ) -> Result<Vec<SkillVerification>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }

    async fn activity_log(&self, _user: &UserId) -> Result<Vec<ActivityEntry>, StoreError> {
        Err(StoreError::Unavailable("record store offline".to_string()))
    }
}

pub(super) fn service_with_cache(
    store: Arc<MemoryRecordStore>,
    cache: Arc<MemoryCredibilityCache>,
) -> CredibilityService<MemoryRecordStore, StaticMetadata, MemoryCredibilityCache> {
    CredibilityService::new(
        store,
        Arc::new(StaticMetadata(RepoSkillVector::empty())),
        cache,
        Duration::hours(1),
    )
}
