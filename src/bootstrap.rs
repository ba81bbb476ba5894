use crate::application::services::{AuthorService, FortuneService, TagService};
use crate::config::Config;
use crate::domain::ports::{AuthorRepository, FortuneRepository, TagRepository};
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

/// Wire repositories into services
pub fn build_app_state(db: Database, config: &Config) -> AppState {
    let retry_policy = config.retry_policy();
    tracing::debug!(
        "Write retries: {} attempts, {:?} base delay",
        retry_policy.max_attempts,
        retry_policy.base_delay
    );

    let fortune_repo: Arc<dyn FortuneRepository> = Arc::new(db.clone());
    let author_repo: Arc<dyn AuthorRepository> = Arc::new(db.clone());
    let tag_repo: Arc<dyn TagRepository> = Arc::new(db);

    AppState {
        fortune_service: FortuneService::new(fortune_repo, retry_policy),
        author_service: AuthorService::new(author_repo),
        tag_service: TagService::new(tag_repo),
    }
}
