pub mod author_repository;
pub mod fortune_repository;
pub mod tag_repository;

pub use author_repository::AuthorRepository;
pub use fortune_repository::FortuneRepository;
pub use tag_repository::TagRepository;
