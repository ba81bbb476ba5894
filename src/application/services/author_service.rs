use crate::{
    domain::entities::{AuthorPatch, AuthorWithFortunes},
    domain::errors::{DomainError, DomainResult},
    domain::ports::AuthorRepository,
    shared::utils::EntityId,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthorService {
    author_repo: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(author_repo: Arc<dyn AuthorRepository>) -> Self {
        Self { author_repo }
    }

    pub async fn list_authors(&self) -> DomainResult<Vec<AuthorWithFortunes>> {
        self.author_repo.list_authors().await
    }

    pub async fn get_author(&self, id: EntityId) -> DomainResult<AuthorWithFortunes> {
        tracing::debug!("Looking up author {}", id);
        self.author_repo
            .get_author(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("author".to_string()))
    }

    /// Rename an author; a name held by another author is a conflict
    pub async fn patch_author(
        &self,
        id: EntityId,
        patch: AuthorPatch,
    ) -> DomainResult<AuthorWithFortunes> {
        let author = self
            .author_repo
            .rename_author(id, &patch.name)
            .await?
            .ok_or_else(|| DomainError::NotFound("author".to_string()))?;

        metrics::counter!("lucky_authors_patched_total").increment(1);
        Ok(author)
    }
}
