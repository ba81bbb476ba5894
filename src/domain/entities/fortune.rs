use serde::Serialize;

use super::{Author, AuthorResponse, Tag, TagResponse};
use crate::shared::utils::EntityId;

/// A fortune with its author and its tags in the order they were given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fortune {
    pub id: EntityId,
    pub content: String,
    pub author: Author,
    pub tags: Vec<Tag>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Validated create request; authors and tags are referenced by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFortune {
    pub author: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewFortune {
    pub fn new(author: String, content: String, tags: Vec<String>) -> Self {
        Self {
            author,
            content,
            tags: dedup_tags(tags),
        }
    }
}

/// Validated partial update; `None` leaves the attribute untouched and
/// `tags: Some(vec![])` clears the tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FortunePatch {
    pub author: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl FortunePatch {
    pub fn new(author: Option<String>, content: Option<String>, tags: Option<Vec<String>>) -> Self {
        Self {
            author,
            content,
            tags: tags.map(dedup_tags),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// Keep the first occurrence of each tag value, preserving order
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

// ========== DTOs (Data Transfer Objects) ==========

#[derive(Debug, Clone, Serialize)]
pub struct FortuneResponse {
    pub id: EntityId,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub content: String,
    pub author: AuthorResponse,
    pub tags: Vec<TagResponse>,
}

impl From<Fortune> for FortuneResponse {
    fn from(fortune: Fortune) -> Self {
        Self {
            id: fortune.id,
            created_at: fortune.created_at,
            updated_at: fortune.updated_at,
            content: fortune.content,
            author: AuthorResponse::from(fortune.author),
            tags: fortune.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fortune() -> Fortune {
        let author = Author {
            id: EntityId::generate(),
            name: "Anonymous".to_string(),
            created_at: "2025-02-26T23:31:55.000000Z".to_string(),
            updated_at: None,
        };
        let tag = Tag {
            id: EntityId::generate(),
            tag: "wisdom".to_string(),
            created_at: "2025-02-26T23:31:55.000000Z".to_string(),
            updated_at: Some("2025-02-27T08:00:00.000000Z".to_string()),
        };
        Fortune {
            id: EntityId::generate(),
            content: "You will write Rust today.".to_string(),
            author,
            tags: vec![tag],
            created_at: "2025-02-26T23:31:55.000000Z".to_string(),
            updated_at: None,
        }
    }

    #[test]
    fn test_new_fortune_collapses_duplicate_tags() {
        let fortune = NewFortune::new(
            "a".to_string(),
            "b".to_string(),
            vec!["x".to_string(), "y".to_string(), "x".to_string()],
        );
        assert_eq!(fortune.tags, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_empty_patch_is_detected() {
        assert!(FortunePatch::default().is_empty());
        assert!(!FortunePatch::new(None, None, Some(vec![])).is_empty());
    }

    #[test]
    fn test_response_omits_unset_updated_at() {
        let json = serde_json::to_value(FortuneResponse::from(sample_fortune())).unwrap();
        assert!(json.get("updated_at").is_none());
        assert!(json["author"].get("updated_at").is_none());
        assert_eq!(json["tags"][0]["updated_at"], "2025-02-27T08:00:00.000000Z");
        assert_eq!(json["tags"][0]["tag"], "wisdom");
        assert_eq!(json["id"].as_str().map(str::len), Some(13));
    }

    #[test]
    fn test_nested_responses_drop_parent() {
        let fortune = sample_fortune();
        let under_author = serde_json::to_value(super::super::AuthorFortuneResponse::from(fortune.clone())).unwrap();
        let under_tag = serde_json::to_value(super::super::TagFortuneResponse::from(fortune)).unwrap();
        assert!(under_author.get("author").is_none());
        assert!(under_author.get("tags").is_some());
        assert!(under_tag.get("tags").is_none());
        assert_eq!(under_tag["author"]["name"], "Anonymous");
    }
}
