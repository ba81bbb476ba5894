use serde::Serialize;

use super::{AuthorResponse, Fortune};
use crate::shared::utils::EntityId;

/// Tag entity for fortune classification; tag values are unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: EntityId,
    pub tag: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWithFortunes {
    pub tag: Tag,
    pub fortunes: Vec<Fortune>,
}

// ========== DTOs (Data Transfer Objects) ==========

#[derive(Debug, Clone, Serialize)]
pub struct TagResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub tag: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
            tag: tag.tag,
        }
    }
}

/// Fortune listed under one of its tags, so the tags are left out
#[derive(Debug, Clone, Serialize)]
pub struct TagFortuneResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub content: String,
    pub author: AuthorResponse,
}

impl From<Fortune> for TagFortuneResponse {
    fn from(fortune: Fortune) -> Self {
        Self {
            id: fortune.id,
            created_at: fortune.created_at,
            updated_at: fortune.updated_at,
            content: fortune.content,
            author: AuthorResponse::from(fortune.author),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagDetailResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub tag: String,
    pub fortunes: Vec<TagFortuneResponse>,
}

impl From<TagWithFortunes> for TagDetailResponse {
    fn from(value: TagWithFortunes) -> Self {
        let TagWithFortunes { tag, fortunes } = value;
        Self {
            id: tag.id,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
            tag: tag.tag,
            fortunes: fortunes.into_iter().map(TagFortuneResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPatch {
    pub tag: String,
}
