use crate::{
    domain::entities::{TagPatch, TagWithFortunes},
    domain::errors::{DomainError, DomainResult},
    domain::ports::TagRepository,
    shared::utils::EntityId,
};
use std::sync::Arc;

/// Service for tag operations
#[derive(Clone)]
pub struct TagService {
    tag_repo: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { tag_repo }
    }

    pub async fn list_tags(&self) -> DomainResult<Vec<TagWithFortunes>> {
        self.tag_repo.list_tags().await
    }

    pub async fn get_tag(&self, id: EntityId) -> DomainResult<TagWithFortunes> {
        tracing::debug!("Looking up tag {}", id);
        self.tag_repo
            .get_tag(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("tag".to_string()))
    }

    pub async fn patch_tag(&self, id: EntityId, patch: TagPatch) -> DomainResult<TagWithFortunes> {
        let tag = self
            .tag_repo
            .rename_tag(id, &patch.tag)
            .await?
            .ok_or_else(|| DomainError::NotFound("tag".to_string()))?;

        metrics::counter!("lucky_tags_patched_total").increment(1);
        Ok(tag)
    }
}
