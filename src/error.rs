use crate::store::StoreError;

/// Error surfaced by the orchestrating services. Ranking without a target is
/// meaningless, so a missing target is the one failure callers must handle;
/// everything else degrades to neutral inputs inside the services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("target record '{id}' not found")]
    TargetNotFound { id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
