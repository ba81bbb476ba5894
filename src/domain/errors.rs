use crate::shared::utils::EntityIdError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Payload carries the entity name, e.g. "fortune"
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} exists")]
    Conflict(String),
    #[error("Validation error: {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),
    #[error("Database busy: {0}")]
    Busy(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Errors worth retrying when resolving or creating authors and tags by
    /// value: a locked database, or a concurrent request inserting the same
    /// author or tag between our lookup and our insert.
    pub fn is_transient(&self) -> bool {
        match self {
            DomainError::Busy(_) => true,
            DomainError::Conflict(entity) => entity == "author" || entity == "tag",
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// One segment of an issue location: an object key or a list index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for LocSegment {
    fn from(key: &str) -> Self {
        LocSegment::Key(key.to_string())
    }
}

impl From<usize> for LocSegment {
    fn from(index: usize) -> Self {
        LocSegment::Index(index)
    }
}

/// A single request validation failure, serialized in the
/// `{"type", "loc", "msg", "input"}` shape clients already understand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
}

impl ValidationIssue {
    fn new(kind: &str, loc: Vec<LocSegment>, msg: String, input: Option<serde_json::Value>) -> Self {
        Self {
            kind: kind.to_string(),
            loc,
            msg,
            input,
        }
    }

    pub fn missing(loc: Vec<LocSegment>) -> Self {
        Self::new("missing", loc, "Field required".to_string(), None)
    }

    pub fn string_too_short(loc: Vec<LocSegment>, min: usize, input: &str) -> Self {
        let unit = if min == 1 { "character" } else { "characters" };
        Self::new(
            "string_too_short",
            loc,
            format!("String should have at least {} {}", min, unit),
            Some(input.into()),
        )
    }

    pub fn string_too_long(loc: Vec<LocSegment>, max: usize, input: &str) -> Self {
        let unit = if max == 1 { "character" } else { "characters" };
        Self::new(
            "string_too_long",
            loc,
            format!("String should have at most {} {}", max, unit),
            Some(input.into()),
        )
    }

    pub fn string_type(loc: Vec<LocSegment>, input: &serde_json::Value) -> Self {
        Self::new(
            "string_type",
            loc,
            "Input should be a valid string".to_string(),
            Some(input.clone()),
        )
    }

    pub fn list_type(loc: Vec<LocSegment>, input: &serde_json::Value) -> Self {
        Self::new(
            "list_type",
            loc,
            "Input should be a valid list".to_string(),
            Some(input.clone()),
        )
    }

    pub fn object_type(loc: Vec<LocSegment>, input: &serde_json::Value) -> Self {
        Self::new(
            "model_attributes_type",
            loc,
            "Input should be a valid dictionary or object to extract fields from".to_string(),
            Some(input.clone()),
        )
    }

    pub fn value_error(
        loc: Vec<LocSegment>,
        message: &str,
        input: Option<serde_json::Value>,
    ) -> Self {
        Self::new("value_error", loc, format!("Value error, {}", message), input)
    }

    pub fn json_invalid(detail: &str) -> Self {
        Self::new(
            "json_invalid",
            vec!["body".into()],
            format!("JSON decode error: {}", detail),
            None,
        )
    }

    /// Map an id parse failure at `loc` onto the matching issue type
    pub fn from_entity_id_error(err: &EntityIdError, loc: Vec<LocSegment>, input: &str) -> Self {
        match err {
            EntityIdError::TooShort => {
                Self::string_too_short(loc, crate::shared::utils::ENTITY_ID_LENGTH, input)
            }
            EntityIdError::TooLong => {
                Self::string_too_long(loc, crate::shared::utils::ENTITY_ID_LENGTH, input)
            }
            EntityIdError::InvalidCharacter(_) | EntityIdError::OutOfRange => {
                Self::value_error(loc, "invalid string", Some(input.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity() {
        assert_eq!(
            DomainError::NotFound("fortune".to_string()).to_string(),
            "fortune not found"
        );
        assert_eq!(
            DomainError::Conflict("tag".to_string()).to_string(),
            "tag exists"
        );
    }

    #[test]
    fn test_only_lookup_races_and_busy_are_transient() {
        assert!(DomainError::Busy("database is locked".to_string()).is_transient());
        assert!(DomainError::Conflict("author".to_string()).is_transient());
        assert!(DomainError::Conflict("tag".to_string()).is_transient());
        assert!(!DomainError::Conflict("fortune".to_string()).is_transient());
        assert!(!DomainError::NotFound("fortune".to_string()).is_transient());
    }

    #[test]
    fn test_issue_serializes_with_type_key() {
        let issue = ValidationIssue::missing(vec!["body".into(), "content".into()]);
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "missing");
        assert_eq!(json["loc"], serde_json::json!(["body", "content"]));
        assert!(json.get("input").is_none());
    }

    #[test]
    fn test_list_index_serializes_as_number() {
        let issue = ValidationIssue::string_too_long(
            vec!["body".into(), "tags".into(), 0.into()],
            32,
            "x",
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["loc"], serde_json::json!(["body", "tags", 0]));
        assert_eq!(json["msg"], "String should have at most 32 characters");
    }

    #[test]
    fn test_entity_id_errors_map_to_issue_types() {
        let loc = || vec![LocSegment::from("path"), LocSegment::from("tag_id")];
        let short = ValidationIssue::from_entity_id_error(&EntityIdError::TooShort, loc(), "a");
        let long = ValidationIssue::from_entity_id_error(&EntityIdError::TooLong, loc(), "a");
        let bad = ValidationIssue::from_entity_id_error(&EntityIdError::OutOfRange, loc(), "a");
        assert_eq!(short.kind, "string_too_short");
        assert_eq!(long.kind, "string_too_long");
        assert_eq!(bad.kind, "value_error");
        assert_eq!(bad.msg, "Value error, invalid string");
    }
}
