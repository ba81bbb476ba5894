use crate::domain::entities::{Fortune, FortunePatch, NewFortune};
use crate::domain::errors::DomainResult;
use crate::shared::utils::EntityId;

#[async_trait::async_trait]
pub trait FortuneRepository: Send + Sync {
    /// All fortunes ordered by id
    async fn list_fortunes(&self) -> DomainResult<Vec<Fortune>>;

    async fn get_fortune(&self, id: EntityId) -> DomainResult<Option<Fortune>>;

    /// Insert a fortune, reusing or creating its author and tags, atomically
    async fn create_fortune(&self, fortune: &NewFortune) -> DomainResult<Fortune>;

    /// Apply a patch atomically; `Ok(None)` when the fortune does not exist
    async fn update_fortune(
        &self,
        id: EntityId,
        patch: &FortunePatch,
    ) -> DomainResult<Option<Fortune>>;
}
