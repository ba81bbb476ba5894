use serde::Serialize;

use super::{Fortune, TagResponse};
use crate::shared::utils::EntityId;

/// Author of one or more fortunes; names are unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: EntityId,
    pub name: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Author together with every fortune attributed to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorWithFortunes {
    pub author: Author,
    pub fortunes: Vec<Fortune>,
}

// ========== DTOs (Data Transfer Objects) ==========

/// Author embedded in another resource (no fortunes)
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            created_at: author.created_at,
            updated_at: author.updated_at,
            name: author.name,
        }
    }
}

/// Fortune listed under its author, so the author is left out
#[derive(Debug, Clone, Serialize)]
pub struct AuthorFortuneResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub content: String,
    pub tags: Vec<TagResponse>,
}

impl From<Fortune> for AuthorFortuneResponse {
    fn from(fortune: Fortune) -> Self {
        Self {
            id: fortune.id,
            created_at: fortune.created_at,
            updated_at: fortune.updated_at,
            content: fortune.content,
            tags: fortune.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// Response for `/api/authors` resources
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetailResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub name: String,
    pub fortunes: Vec<AuthorFortuneResponse>,
}

impl From<AuthorWithFortunes> for AuthorDetailResponse {
    fn from(value: AuthorWithFortunes) -> Self {
        let AuthorWithFortunes { author, fortunes } = value;
        Self {
            id: author.id,
            created_at: author.created_at,
            updated_at: author.updated_at,
            name: author.name,
            fortunes: fortunes.into_iter().map(AuthorFortuneResponse::from).collect(),
        }
    }
}

/// Validated rename request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorPatch {
    pub name: String,
}
