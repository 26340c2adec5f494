use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credibility::{CredibilityCache, CredibilityService, CredibilitySummary};
use crate::error::ServiceError;
use crate::matching::{extract_keywords, rank_candidates, MatchCandidate, MatchResult, RankingInput};
use crate::store::{
    InviteStatus, Profile, ProfileSnapshot, ProjectId, RecordStore, RepoMetadataProvider,
    RepoSkillVector, UserId,
};

/// Hard ceiling on returned suggestions regardless of configuration.
pub const MAX_SUGGESTIONS: usize = 20;

/// Ranked suggestion with the candidate's profile payload attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTeammate {
    pub profile: ProfileSnapshot,
    pub result: MatchResult,
}

/// Orchestrates candidate fetching, concurrent enrichment, credibility
/// lookup, and ranking for one target project.
pub struct SuggestionService<S, M, C> {
    store: Arc<S>,
    metadata: Arc<M>,
    credibility: CredibilityService<S, M, C>,
    max_suggestions: usize,
}

impl<S, M, C> SuggestionService<S, M, C>
where
    S: RecordStore + 'static,
    M: RepoMetadataProvider + 'static,
    C: CredibilityCache + 'static,
{
    pub fn new(store: Arc<S>, metadata: Arc<M>, cache: Arc<C>, cache_ttl: Duration) -> Self {
        Self::with_limit(store, metadata, cache, cache_ttl, MAX_SUGGESTIONS)
    }

    /// Cap results at `limit`, clamped to the hard ceiling of 20.
    pub fn with_limit(
        store: Arc<S>,
        metadata: Arc<M>,
        cache: Arc<C>,
        cache_ttl: Duration,
        limit: usize,
    ) -> Self {
        let credibility = CredibilityService::new(
            Arc::clone(&store),
            Arc::clone(&metadata),
            cache,
            cache_ttl,
        );
        Self {
            store,
            metadata,
            credibility,
            max_suggestions: limit.min(MAX_SUGGESTIONS),
        }
    }

    pub fn credibility(&self) -> &CredibilityService<S, M, C> {
        &self.credibility
    }

    /// Ranked teammate suggestions for one target project.
    ///
    /// A missing target is a hard error; everything else degrades per
    /// candidate, so the call always returns an ordered (possibly
    /// lower-confidence) list.
    pub async fn suggested_teammates(
        &self,
        target_id: &ProjectId,
    ) -> Result<Vec<SuggestedTeammate>, ServiceError> {
        let project = self
            .store
            .fetch_project(target_id)
            .await?
            .ok_or_else(|| ServiceError::TargetNotFound {
                id: target_id.0.clone(),
            })?;

        let keywords = extract_keywords(&format!("{} {}", project.title, project.description));
        let input = RankingInput {
            target_id: target_id.clone(),
            required_skills: project.required_skills.clone(),
            description: project.description.clone(),
            keywords,
        };

        let eligible = self.eligible_profiles(target_id, &project.owner_id).await?;
        debug!(
            target = %target_id.0,
            candidates = eligible.len(),
            "ranking candidate pool"
        );

        let eligible_ids: Vec<UserId> = eligible.iter().map(|profile| profile.id.clone()).collect();
        let credibility_map = self.credibility.batch_summaries(&eligible_ids).await;

        // Fork-join enrichment: one branch per candidate, each resolving to
        // neutral data on failure so siblings are never disturbed.
        let enrichments = eligible.iter().map(|profile| {
            let credibility = credibility_map.get(&profile.id).copied();
            async move {
                let vector = self.fetch_repo_vector(profile).await;
                build_candidate(profile, vector, credibility)
            }
        });
        let candidates: Vec<MatchCandidate> = join_all(enrichments).await;

        let ranked = rank_candidates(&candidates, &input);

        let suggestions = ranked
            .into_iter()
            .take(self.max_suggestions)
            .filter_map(|result| {
                eligible
                    .iter()
                    .find(|profile| profile.id == result.user_id)
                    .map(|profile| SuggestedTeammate {
                        profile: profile.snapshot(),
                        result,
                    })
            })
            .collect();

        Ok(suggestions)
    }

    /// Everyone except the owner, current team members, and users already
    /// holding a pending or accepted invite.
    async fn eligible_profiles(
        &self,
        target_id: &ProjectId,
        owner_id: &UserId,
    ) -> Result<Vec<Profile>, ServiceError> {
        let profiles = self.store.list_profiles().await?;

        let member_ids: HashSet<UserId> = self
            .store
            .members_of_project(target_id)
            .await?
            .into_iter()
            .map(|membership| membership.user_id)
            .collect();

        let invited_ids: HashSet<UserId> = self
            .store
            .invites_for_project(target_id)
            .await?
            .into_iter()
            .filter(|invite| {
                matches!(invite.status, InviteStatus::Pending | InviteStatus::Accepted)
            })
            .map(|invite| invite.receiver_id)
            .collect();

        Ok(profiles
            .into_iter()
            .filter(|profile| {
                profile.id != *owner_id
                    && !member_ids.contains(&profile.id)
                    && !invited_ids.contains(&profile.id)
            })
            .collect())
    }

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

fn build_candidate(
    profile: &Profile,
    vector: RepoSkillVector,
    credibility: Option<CredibilitySummary>,
) -> MatchCandidate {
    MatchCandidate {
        id: profile.id.clone(),
        skills: profile.skills.clone(),
        github_handle: profile.github_handle.clone(),
        languages: vector.languages,
        topics: vector.topics,
        repo_names: vector.repo_names,
        credibility,
    }
}
