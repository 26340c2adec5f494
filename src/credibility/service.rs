use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use super::cache::{CacheEntry, CredibilityCache};
use super::domain::{
    ConsistencyInput, CredibilityBreakdown, CredibilityInput, CredibilitySummary,
    ExecutionProofInput, ProjectParticipation, ReliabilityInput, SkillEvidenceInput,
    SocialValidationInput, VerifiedSkill, ActivityObservation,
};
use super::engine::compute_credibility_at;
use crate::error::ServiceError;
use crate::store::{
    InviteStatus, Profile, ProjectId, ProjectRole, RecordStore, RepoMetadataProvider,
    RepoSkillVector, StoreError, UserId,
};

/// Activity actions interpreted as abandoning a project.
const ABANDON_ACTION: &str = "project_abandoned";
/// Activity actions interpreted as a skill-profile edit.
const SKILL_CHANGE_ACTIONS: [&str; 2] = ["skill_added", "profile_updated"];

/// Assembles credibility inputs from the record store, computes breakdowns,
/// and serves summaries through the injected cache.
pub struct CredibilityService<S, M, C> {
    store: Arc<S>,
    metadata: Arc<M>,
    cache: Arc<C>,
    cache_ttl: Duration,
}

impl<S, M, C> CredibilityService<S, M, C>
where
    S: RecordStore + 'static,
    M: RepoMetadataProvider + 'static,
    C: CredibilityCache + 'static,
{
    pub fn new(store: Arc<S>, metadata: Arc<M>, cache: Arc<C>, cache_ttl: Duration) -> Self {
        Self {
            store,
            metadata,
            cache,
            cache_ttl,
        }
    }

    /// Full breakdown for one user, computed fresh and written through the
    /// cache. A missing profile is the only hard failure.
    pub async fn breakdown(&self, user_id: &UserId) -> Result<CredibilityBreakdown, ServiceError> {
        let profile = self
            .store
            .fetch_profile(user_id)
            .await?
            .ok_or_else(|| ServiceError::TargetNotFound {
                id: user_id.0.clone(),
            })?;

        let now = Utc::now();
        let input = self.assemble_input(&profile, now).await?;
        let breakdown = compute_credibility_at(&input, now);

        let entry = CacheEntry::from_breakdown(user_id.clone(), &breakdown, self.cache_ttl);
        if let Err(error) = self.cache.put(entry).await {
            warn!(user = %user_id.0, %error, "credibility cache write failed");
        }

        Ok(breakdown)
    }

    /// Summary for one user, served from the cache while a live entry
    /// exists and recomputed (write-through) otherwise.
    pub async fn summary(&self, user_id: &UserId) -> Result<CredibilitySummary, ServiceError> {
        let now = Utc::now();
        match self.cache.get(user_id).await {
            Ok(Some(entry)) if !entry.is_expired(now) => {
                debug!(user = %user_id.0, "credibility cache hit");
                return Ok(entry.summary);
            }
            Ok(_) => debug!(user = %user_id.0, "credibility cache miss"),
            Err(error) => {
                warn!(user = %user_id.0, %error, "credibility cache read failed");
            }
        }

        Ok(self.breakdown(user_id).await?.summary())
    }

    /// Summaries for many users, fetched concurrently. A failure for one id
    /// degrades that id to the baseline summary and never disturbs the rest.
    pub async fn batch_summaries(
        &self,
        user_ids: &[UserId],
    ) -> HashMap<UserId, CredibilitySummary> {
        let lookups = user_ids.iter().map(|user_id| async move {
            match self.summary(user_id).await {
                Ok(summary) => (user_id.clone(), summary),
                Err(error) => {
                    warn!(user = %user_id.0, %error, "credibility lookup failed, using baseline");
                    (user_id.clone(), CredibilitySummary::baseline())
                }
            }
        });

        join_all(lookups).await.into_iter().collect()
    }

    /// Pull every record the pillars need and build the typed snapshot.
    async fn assemble_input(
        &self,
        profile: &Profile,
        now: DateTime<Utc>,
    ) -> Result<CredibilityInput, StoreError> {
        let user_id = &profile.id;

        let verifications = self.store.skill_verifications(user_id).await?;
        let repo_vector = self.fetch_repo_vector(profile).await;

        let owned_projects = self.store.projects_owned_by(user_id).await?;
        let memberships = self.store.memberships_for_user(user_id).await?;
        let member_project_ids: Vec<ProjectId> = memberships
            .iter()
            .map(|membership| membership.project_id.clone())
            .collect();
        let member_projects = self.store.projects_by_ids(&member_project_ids).await?;

        // Owned projects imply leadership; membership rows carry the role
        // for the rest. A project owned and joined counts once, as leader.
        let role_by_project: HashMap<&ProjectId, ProjectRole> = memberships
            .iter()
            .map(|membership| (&membership.project_id, membership.role))
            .collect();

        let mut participations: Vec<(ProjectParticipation, bool)> = Vec::new();
        for project in &owned_projects {
            participations.push((
                ProjectParticipation {
                    project_id: project.id.clone(),
                    role: ProjectRole::Leader,
                    required_skill_count: project.required_skills.len() as u32,
                    team_size: project.team_size.max(1),
                },
                !project.status.is_active(),
            ));
        }
        for project in &member_projects {
            if participations
                .iter()
                .any(|(existing, _)| existing.project_id == project.id)
            {
                continue;
            }
            participations.push((
                ProjectParticipation {
                    project_id: project.id.clone(),
                    role: role_by_project
                        .get(&project.id)
                        .copied()
                        .unwrap_or(ProjectRole::Member),
                    required_skill_count: project.required_skills.len() as u32,
                    team_size: project.team_size.max(1),
                },
                !project.status.is_active(),
            ));
        }

        let completed_projects: Vec<ProjectParticipation> = participations
            .iter()
            .filter(|(_, completed)| *completed)
            .map(|(participation, _)| participation.clone())
            .collect();
        let active_projects: Vec<ProjectParticipation> = participations
            .iter()
            .filter(|(_, completed)| !completed)
            .map(|(participation, _)| participation.clone())
            .collect();
        let all_projects: Vec<ProjectParticipation> = participations
            .into_iter()
            .map(|(participation, _)| participation)
            .collect();

        let endorsements = self.store.endorsements_for(user_id).await?;

        let co_members = if member_project_ids.is_empty() {
            Vec::new()
        } else {
            self.store.members_of_projects(&member_project_ids).await?
        };
        let mut shared_project_counts: HashMap<UserId, u32> = HashMap::new();
        for membership in co_members {
            if &membership.user_id == user_id {
                continue;
            }
            *shared_project_counts.entry(membership.user_id).or_insert(0) += 1;
        }
        let unique_collaborators = shared_project_counts.keys().cloned().collect();
        let repeat_collaborators = shared_project_counts
            .values()
            .filter(|count| **count >= 2)
            .count() as u32;

        let invites = self.store.invites_received(user_id).await?;
        let invites_accepted = invites
            .iter()
            .filter(|invite| invite.status == InviteStatus::Accepted)
            .count() as u32;
        let invites_rejected = invites
            .iter()
            .filter(|invite| invite.status == InviteStatus::Rejected)
            .count() as u32;
        let invites_ignored = invites
            .iter()
            .filter(|invite| invite.status == InviteStatus::Pending)
            .count() as u32;

        let activity = self.store.activity_log(user_id).await?;
        let projects_abandoned = activity
            .iter()
            .filter(|entry| entry.action == ABANDON_ACTION)
            .count() as u32;
        let skill_changes = activity
            .iter()
            .filter(|entry| SKILL_CHANGE_ACTIONS.contains(&entry.action.as_str()))
            .count() as u32;
        let last_active_at = activity
            .iter()
            .map(|entry| entry.at)
            .max()
            .or(profile.updated_at);

        let projects_completed = completed_projects.len() as u32;
        let projects_joined = (memberships.len() + owned_projects.len()) as u32;
        let account_age_days = (now - profile.created_at).num_days().max(0) as u32;

        Ok(CredibilityInput {
            user_id: user_id.clone(),
            skill_evidence: SkillEvidenceInput {
                declared_skills: profile.skills.clone(),
                verified_skills: verifications
                    .into_iter()
                    .map(|verification| VerifiedSkill {
                        skill: verification.skill,
                        verification: verification.verification,
                        proficiency: verification.proficiency,
                    })
                    .collect(),
                languages: repo_vector.languages,
                topics: repo_vector.topics,
            },
            execution_proof: ExecutionProofInput {
                completed_projects,
                active_projects,
                all_projects,
                has_portfolio: profile.has_portfolio(),
            },
            social_validation: SocialValidationInput {
                endorsements,
                unique_collaborators,
                repeat_collaborators,
            },
            reliability: ReliabilityInput {
                projects_joined,
                projects_completed,
                projects_abandoned,
                invites_received: invites.len() as u32,
                invites_accepted,
                invites_rejected,
                invites_ignored,
                last_active_at,
                account_created_at: profile.created_at,
            },
            consistency: ConsistencyInput {
                activity_log: activity
                    .into_iter()
                    .map(|entry| ActivityObservation {
                        at: entry.at,
                        action: entry.action,
                    })
                    .collect(),
                account_age_days,
                skill_changes,
            },
        })
    }

    /// Repository metadata is best-effort: a provider failure degrades to an
    /// empty vector instead of failing the computation.
    async fn fetch_repo_vector(&self, profile: &Profile) -> RepoSkillVector {
        let Some(handle) = profile.github_handle.as_deref() else {
            return RepoSkillVector::empty();
        };
        match self.metadata.skill_vector(handle).await {
            Ok(vector) => vector,
            Err(error) => {
                warn!(user = %profile.id.0, %handle, %error, "repository metadata fetch failed");
                RepoSkillVector::empty()
            }
        }
    }
}
