use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crewmatch::credibility::{CredibilityLabel, CredibilityService, MemoryCredibilityCache};
use crewmatch::store::{
    ActivityEntry, Endorsement, Invite, InviteStatus, MemoryRecordStore, Membership,
    MetadataError, ProficiencyLevel, Profile, Project, ProjectId, ProjectRole, ProjectStatus,
    RepoMetadataProvider, RepoSkillVector, SkillVerification, UserId, VerificationType,
};

struct StubMetadata(RepoSkillVector);

#[async_trait]
impl RepoMetadataProvider for StubMetadata {
    async fn skill_vector(&self, _handle: &str) -> Result<RepoSkillVector, MetadataError> {
        Ok(self.0.clone())
    }
}

fn profile(id: &str, skills: &[&str]) -> Profile {
    Profile {
        id: UserId::new(id),
        username: Some(id.to_string()),
        display_name: None,
        github_handle: Some(format!("gh-{id}")),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        portfolio_url: Some("https://example.dev/ada".to_string()),
        website: None,
        availability: Some("full-time".to_string()),
        timezone: Some("UTC+1:00".to_string()),
        created_at: Utc::now() - Duration::days(200),
        updated_at: None,
    }
}

fn project(id: &str, owner: &str, status: ProjectStatus) -> Project {
    Project {
        id: ProjectId::new(id),
        owner_id: UserId::new(owner),
        title: "Realtime collaboration board".to_string(),
        description: "Rust backend with a React client".to_string(),
        required_skills: vec![
            "rust".to_string(),
            "react".to_string(),
            "postgresql".to_string(),
            "docker".to_string(),
        ],
        status,
        team_size: 3,
        availability_required: None,
        timezone_preferred: None,
        created_at: Utc::now() - Duration::days(150),
    }
}

fn populated_store() -> Arc<MemoryRecordStore> {
    let store = Arc::new(MemoryRecordStore::new());
    let ada = UserId::new("ada");

    store.insert_profile(profile("ada", &["rust", "react"]));
    store.insert_project(project("p-done", "ada", ProjectStatus::Completed));
    store.insert_project(project("p-live", "grace", ProjectStatus::InProgress));
    store.insert_membership(Membership {
        project_id: ProjectId::new("p-live"),
        user_id: ada.clone(),
        role: ProjectRole::Member,
    });
    store.insert_membership(Membership {
        project_id: ProjectId::new("p-live"),
        user_id: UserId::new("grace"),
        role: ProjectRole::Leader,
    });

    store.insert_verification(SkillVerification {
        user_id: ada.clone(),
        skill: "rust".to_string(),
        verification: VerificationType::ProjectProven,
        proficiency: ProficiencyLevel::Expert,
    });
    store.insert_endorsement(Endorsement {
        endorser_id: UserId::new("grace"),
        endorsed_id: ada.clone(),
        skill: "rust".to_string(),
        project_id: Some(ProjectId::new("p-live")),
        endorser_credibility: Some(80),
    });
    store.insert_endorsement(Endorsement {
        endorser_id: UserId::new("linus"),
        endorsed_id: ada.clone(),
        skill: "react".to_string(),
        project_id: None,
        endorser_credibility: None,
    });
    store.insert_invite(Invite {
        project_id: ProjectId::new("p-live"),
        sender_id: UserId::new("grace"),
        receiver_id: ada.clone(),
        status: InviteStatus::Accepted,
    });
    store.insert_invite(Invite {
        project_id: ProjectId::new("p-done"),
        sender_id: UserId::new("linus"),
        receiver_id: ada.clone(),
        status: InviteStatus::Rejected,
    });

    for days_ago in [80_i64, 45, 12, 2] {
        store.record_activity(
            ada.clone(),
            ActivityEntry {
                at: Utc::now() - Duration::days(days_ago),
                action: "project_update".to_string(),
            },
        );
    }

    store
}

fn service(
    store: Arc<MemoryRecordStore>,
) -> CredibilityService<MemoryRecordStore, StubMetadata, MemoryCredibilityCache> {
    let vector = RepoSkillVector {
        languages: [("rust".to_string(), 12_000_u64)].into_iter().collect(),
        topics: vec!["realtime".to_string()],
        repo_names: vec!["collab-board".to_string()],
    };
    CredibilityService::new(
        store,
        Arc::new(StubMetadata(vector)),
        Arc::new(MemoryCredibilityCache::new()),
        Duration::hours(1),
    )
}

#[tokio::test]
async fn breakdown_assembles_all_pillars_from_records() {
    let service = service(populated_store());
    let breakdown = service
        .breakdown(&UserId::new("ada"))
        .await
        .expect("breakdown computes");

    let pillars = &breakdown.pillars;
    assert_eq!(pillars.skill_evidence.declared_count, 2);
    assert_eq!(pillars.skill_evidence.verified_count, 1);
    assert_eq!(pillars.skill_evidence.repo_signal_count, 2);
    assert_eq!(pillars.execution_proof.completed_count, 1);
    assert_eq!(pillars.execution_proof.leader_count, 1);
    assert_eq!(pillars.execution_proof.portfolio_bonus, 10);
    assert_eq!(pillars.social_validation.endorsement_count, 2);
    assert_eq!(pillars.social_validation.endorser_quality_bonus, 5);
    assert_eq!(pillars.reliability.completion_rate, 50);
    assert_eq!(pillars.reliability.invite_response_rate, 100);
    assert!(pillars.consistency.active_months >= 3);
}

#[tokio::test]
async fn scores_respect_ranges_and_discount_contract() {
    let service = service(populated_store());
    let breakdown = service
        .breakdown(&UserId::new("ada"))
        .await
        .expect("breakdown computes");

    for score in [
        breakdown.pillars.skill_evidence.score,
        breakdown.pillars.execution_proof.score,
        breakdown.pillars.social_validation.score,
        breakdown.pillars.reliability.score,
        breakdown.pillars.consistency.score,
        breakdown.credibility_score,
    ] {
        assert!(score <= 100);
    }

    assert!(breakdown.confidence_multiplier >= 0.1);
    assert!(breakdown.confidence_multiplier <= 1.0);
    assert_eq!(
        breakdown.final_rank_score,
        (f32::from(breakdown.credibility_score) * breakdown.confidence_multiplier).round() as u8
    );
    assert_eq!(
        breakdown.label,
        CredibilityLabel::from_score(breakdown.final_rank_score)
    );
    assert!(!breakdown.top_signals.is_empty());
    assert!(breakdown.top_signals.len() <= 5);
}

#[tokio::test]
async fn summary_round_trips_through_the_cache() {
    let service = service(populated_store());
    let ada = UserId::new("ada");

    let first = service.summary(&ada).await.expect("first summary");
    let second = service.summary(&ada).await.expect("cached summary");
    assert_eq!(first, second);

    let breakdown = service.breakdown(&ada).await.expect("fresh breakdown");
    assert_eq!(breakdown.summary().final_rank_score, first.final_rank_score);
}
