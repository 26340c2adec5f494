use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::domain::{CredibilityBreakdown, CredibilitySummary};
use crate::store::UserId;

/// Per-pillar scores persisted alongside the summary so cached entries stay
/// explainable without a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScores {
    pub skill_evidence: u8,
    pub execution_proof: u8,
    pub social_validation: u8,
    pub reliability: u8,
    pub consistency: u8,
}

/// Cached credibility result for one user. The engine owns TTL semantics:
/// stores only persist `expires_at`, they never have to enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub user_id: UserId,
    pub summary: CredibilitySummary,
    pub pillar_scores: PillarScores,
    pub data_points: u32,
    pub computed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn from_breakdown(
        user_id: UserId,
        breakdown: &CredibilityBreakdown,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id,
            summary: breakdown.summary(),
            pillar_scores: PillarScores {
                skill_evidence: breakdown.pillars.skill_evidence.score,
                execution_proof: breakdown.pillars.execution_proof.score,
                social_validation: breakdown.pillars.social_validation.score,
                reliability: breakdown.pillars.reliability.score,
                consistency: breakdown.pillars.consistency.score,
            },
            data_points: breakdown.data_points,
            computed_at: breakdown.computed_at,
            expires_at: breakdown.computed_at + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Error raised by cache reads and writes. Never fatal: the read path falls
/// back to a fresh computation and write failures are logged and dropped.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// Keyed cache abstraction, injected into the credibility service so TTL
/// behavior stays testable and no module-level state is hidden anywhere.
#[async_trait]
pub trait CredibilityCache: Send + Sync {
    async fn get(&self, user: &UserId) -> Result<Option<CacheEntry>, CacheError>;
    /// Upsert by user id, last write wins.
    async fn put(&self, entry: CacheEntry) -> Result<(), CacheError>;
}

/// Process-local cache implementation. Concurrent readers may observe a
/// stale-but-live entry; writers replace whole entries by key.
#[derive(Default)]
pub struct MemoryCredibilityCache {
    entries: RwLock<HashMap<UserId, CacheEntry>>,
}

impl MemoryCredibilityCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredibilityCache for MemoryCredibilityCache {
    async fn get(&self, user: &UserId) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.entries.read().await.get(user).cloned())
    }

    async fn put(&self, entry: CacheEntry) -> Result<(), CacheError> {
        self.entries
            .write()
            .await
            .insert(entry.user_id.clone(), entry);
        Ok(())
    }
}
