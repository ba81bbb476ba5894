use crate::domain::entities::TagWithFortunes;
use crate::domain::errors::DomainResult;
use crate::shared::utils::EntityId;

#[async_trait::async_trait]
pub trait TagRepository: Send + Sync {
    async fn list_tags(&self) -> DomainResult<Vec<TagWithFortunes>>;

    async fn get_tag(&self, id: EntityId) -> DomainResult<Option<TagWithFortunes>>;

    async fn rename_tag(&self, id: EntityId, tag: &str) -> DomainResult<Option<TagWithFortunes>>;
}
