use crate::{
    domain::entities::{Fortune, FortunePatch, NewFortune},
    domain::errors::{DomainError, DomainResult, ValidationIssue},
    domain::ports::FortuneRepository,
    shared::utils::{EntityId, RetryPolicy},
};
use std::sync::Arc;

/// Service for fortune operations
#[derive(Clone)]
pub struct FortuneService {
    fortune_repo: Arc<dyn FortuneRepository>,
    retry_policy: RetryPolicy,
}

impl FortuneService {
    pub fn new(fortune_repo: Arc<dyn FortuneRepository>, retry_policy: RetryPolicy) -> Self {
        Self {
            fortune_repo,
            retry_policy,
        }
    }

    pub async fn list_fortunes(&self) -> DomainResult<Vec<Fortune>> {
        self.fortune_repo.list_fortunes().await
    }

    pub async fn get_fortune(&self, id: EntityId) -> DomainResult<Fortune> {
        tracing::debug!("Looking up fortune {}", id);
        self.fortune_repo
            .get_fortune(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("fortune".to_string()))
    }

    /// Create a fortune, retrying lock contention and author/tag insert races
    pub async fn create_fortune(&self, fortune: NewFortune) -> DomainResult<Fortune> {
        let created = self
            .retry_policy
            .run(
                "create_fortune",
                || self.fortune_repo.create_fortune(&fortune),
                DomainError::is_transient,
            )
            .await?;

        metrics::counter!("lucky_fortunes_created_total").increment(1);
        Ok(created)
    }

    pub async fn patch_fortune(&self, id: EntityId, patch: FortunePatch) -> DomainResult<Fortune> {
        if patch.is_empty() {
            return Err(DomainError::Validation(vec![ValidationIssue::value_error(
                vec!["body".into()],
                "all attributes are missing",
                None,
            )]));
        }

        let updated = self
            .retry_policy
            .run(
                "patch_fortune",
                || self.fortune_repo.update_fortune(id, &patch),
                DomainError::is_transient,
            )
            .await?
            .ok_or_else(|| DomainError::NotFound("fortune".to_string()))?;

        metrics::counter!("lucky_fortunes_patched_total").increment(1);
        Ok(updated)
    }
}
