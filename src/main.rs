use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;

use crewmatch::config::AppConfig;
use crewmatch::credibility::MemoryCredibilityCache;
use crewmatch::store::{
    ActivityEntry, Endorsement, MemoryRecordStore, MetadataError, ProficiencyLevel, Profile,
    Project, ProjectId, ProjectStatus, RepoMetadataProvider, RepoSkillVector, SkillVerification,
    UserId, VerificationType,
};
use crewmatch::suggestions::SuggestionService;
use crewmatch::telemetry;

/// Canned repository metadata keyed by handle, standing in for a live
/// GitHub client.
struct SeededMetadata {
    vectors: HashMap<String, RepoSkillVector>,
}

#[async_trait]
impl RepoMetadataProvider for SeededMetadata {
    async fn skill_vector(&self, handle: &str) -> Result<RepoSkillVector, MetadataError> {
        self.vectors
            .get(handle)
            .cloned()
            .ok_or_else(|| MetadataError::UnknownHandle(handle.to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "starting crewmatch demo");

    let store = Arc::new(seed_store());
    let metadata = Arc::new(seed_metadata());
    let cache = Arc::new(MemoryCredibilityCache::new());
    let service = SuggestionService::with_limit(
        store,
        metadata,
        cache,
        config.matching.cache_ttl(),
        config.matching.max_suggestions,
    );

    let target = ProjectId::new("p-demo");
    let breakdown = service
        .credibility()
        .breakdown(&UserId::new("ada"))
        .await?;
    println!("Credibility breakdown for ada:");
    println!("{}", serde_json::to_string_pretty(&breakdown)?);

    let suggestions = service.suggested_teammates(&target).await?;
    info!(count = suggestions.len(), "ranked teammate suggestions");
    println!("Suggested teammates for {}:", target.0);
    for suggestion in &suggestions {
        let line = json!({
            "user": suggestion.profile.id.0,
            "score": suggestion.result.score,
            "label": suggestion.result.label.label(),
            "matched_skills": suggestion.result.matched_skills,
            "confidence": suggestion.result.confidence,
        });
        println!("{line}");
    }

    Ok(())
}

fn demo_profile(id: &str, skills: &[&str], handle: Option<&str>) -> Profile {
    Profile {
        id: UserId::new(id),
        username: Some(id.to_string()),
        display_name: None,
        github_handle: handle.map(str::to_string),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        portfolio_url: None,
        website: None,
        availability: Some("part-time".to_string()),
        timezone: Some("UTC+1:00".to_string()),
        created_at: Utc::now() - Duration::days(120),
        updated_at: None,
    }
}

fn seed_store() -> MemoryRecordStore {
    let store = MemoryRecordStore::new();

    store.insert_profile(demo_profile("ada", &["rust", "react"], Some("ada-dev")));
    store.insert_profile(demo_profile("grace", &["rust", "postgresql"], None));
    store.insert_profile(demo_profile("linus", &["react", "design"], None));
    store.insert_profile(demo_profile("margaret", &[], None));

    let owner = UserId::new("ada");
    let status = ProjectStatus::Open;
    info!(status = status.label(), "seeding demo project");
    store.insert_project(Project {
        id: ProjectId::new("p-demo"),
        owner_id: owner.clone(),
        title: "Realtime trivia night".to_string(),
        description: "Websocket trivia server in Rust with a React client".to_string(),
        required_skills: vec!["rust".to_string(), "react".to_string()],
        status,
        team_size: 3,
        availability_required: Some("part-time".to_string()),
        timezone_preferred: Some("UTC+1:00".to_string()),
        created_at: Utc::now() - Duration::days(3),
    });

    store.insert_verification(SkillVerification {
        user_id: owner.clone(),
        skill: "rust".to_string(),
        verification: VerificationType::RepoVerified,
        proficiency: ProficiencyLevel::Advanced,
    });
    store.insert_endorsement(Endorsement {
        endorser_id: UserId::new("grace"),
        endorsed_id: owner.clone(),
        skill: "rust".to_string(),
        project_id: None,
        endorser_credibility: Some(72),
    });
    store.record_activity(
        owner,
        ActivityEntry {
            at: Utc::now() - Duration::days(1),
            action: "project_created".to_string(),
        },
    );

    store
}

fn seed_metadata() -> SeededMetadata {
    let mut vectors = HashMap::new();
    vectors.insert(
        "ada-dev".to_string(),
        RepoSkillVector {
            languages: [("rust".to_string(), 24_000_u64)].into_iter().collect(),
            topics: vec!["websockets".to_string()],
            repo_names: vec!["trivia-server".to_string()],
        },
    );
    SeededMetadata { vectors }
}
