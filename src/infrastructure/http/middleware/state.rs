use crate::application::services::{AuthorService, FortuneService, TagService};

/// Shared handler state; every service is cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub fortune_service: FortuneService,
    pub author_service: AuthorService,
    pub tag_service: TagService,
}
