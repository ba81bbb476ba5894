pub mod author_service;
pub mod fortune_service;
pub mod tag_service;

pub use author_service::AuthorService;
pub use fortune_service::FortuneService;
pub use tag_service::TagService;
