use crate::domain::entities::AuthorWithFortunes;
use crate::domain::errors::DomainResult;
use crate::shared::utils::EntityId;

#[async_trait::async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn list_authors(&self) -> DomainResult<Vec<AuthorWithFortunes>>;

    async fn get_author(&self, id: EntityId) -> DomainResult<Option<AuthorWithFortunes>>;

    /// `Ok(None)` when the author does not exist
    async fn rename_author(
        &self,
        id: EntityId,
        name: &str,
    ) -> DomainResult<Option<AuthorWithFortunes>>;
}
