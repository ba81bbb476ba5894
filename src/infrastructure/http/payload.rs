use serde_json::{Map, Value};

use super::extract::FromPayload;
use crate::domain::entities::{
    AuthorPatch, FortunePatch, NewFortune, TagPatch, TextLimits, AUTHOR_NAME_LIMITS,
    FORTUNE_CONTENT_LIMITS, TAG_VALUE_LIMITS,
};
use crate::domain::errors::{LocSegment, ValidationIssue};

type Issues = Vec<ValidationIssue>;

fn body_loc(key: &str) -> Vec<LocSegment> {
    vec!["body".into(), key.into()]
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, Issues> {
    value
        .as_object()
        .ok_or_else(|| vec![ValidationIssue::object_type(vec!["body".into()], value)])
}

fn text(value: &Value, loc: Vec<LocSegment>, limits: TextLimits, issues: &mut Issues) -> Option<String> {
    let Value::String(s) = value else {
        issues.push(ValidationIssue::string_type(loc, value));
        return None;
    };

    let length = s.chars().count();
    if length < limits.min {
        issues.push(ValidationIssue::string_too_short(loc, limits.min, s));
        None
    } else if length > limits.max {
        issues.push(ValidationIssue::string_too_long(loc, limits.max, s));
        None
    } else {
        Some(s.clone())
    }
}

fn text_list(
    value: &Value,
    loc: Vec<LocSegment>,
    limits: TextLimits,
    issues: &mut Issues,
) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        issues.push(ValidationIssue::list_type(loc, value));
        return None;
    };

    let before = issues.len();
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let mut item_loc = loc.clone();
        item_loc.push(index.into());
        if let Some(v) = text(item, item_loc, limits, issues) {
            values.push(v);
        }
    }

    (issues.len() == before).then_some(values)
}

fn required_text(
    object: &Map<String, Value>,
    key: &str,
    limits: TextLimits,
    issues: &mut Issues,
) -> Option<String> {
    match object.get(key) {
        Some(value) => text(value, body_loc(key), limits, issues),
        None => {
            issues.push(ValidationIssue::missing(body_loc(key)));
            None
        }
    }
}

/// Absent and `null` both mean "not given"
fn optional_text(
    object: &Map<String, Value>,
    key: &str,
    limits: TextLimits,
    issues: &mut Issues,
) -> Option<String> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => text(value, body_loc(key), limits, issues),
    }
}

fn finish<T>(issues: Issues, build: impl FnOnce() -> Option<T>) -> Result<T, Issues> {
    if !issues.is_empty() {
        return Err(issues);
    }
    // no issues means every required piece parsed
    build().ok_or_else(Vec::new)
}

impl FromPayload for NewFortune {
    fn from_payload(value: &Value) -> Result<Self, Issues> {
        let object = as_object(value)?;
        let mut issues = Issues::new();

        let author = required_text(object, "author", AUTHOR_NAME_LIMITS, &mut issues);
        let content = required_text(object, "content", FORTUNE_CONTENT_LIMITS, &mut issues);
        let tags = match object.get("tags") {
            None => Some(Vec::new()),
            Some(value) => text_list(value, body_loc("tags"), TAG_VALUE_LIMITS, &mut issues),
        };

        finish(issues, || Some(NewFortune::new(author?, content?, tags?)))
    }
}

impl FromPayload for FortunePatch {
    fn from_payload(value: &Value) -> Result<Self, Issues> {
        let object = as_object(value)?;
        let mut issues = Issues::new();

        let author = optional_text(object, "author", AUTHOR_NAME_LIMITS, &mut issues);
        let content = optional_text(object, "content", FORTUNE_CONTENT_LIMITS, &mut issues);
        let tags = match object.get("tags") {
            None | Some(Value::Null) => None,
            Some(value) => text_list(value, body_loc("tags"), TAG_VALUE_LIMITS, &mut issues),
        };

        let patch = finish(issues, || Some(FortunePatch::new(author, content, tags)))?;
        if patch.is_empty() {
            return Err(vec![ValidationIssue::value_error(
                vec!["body".into()],
                "all attributes are missing",
                Some(value.clone()),
            )]);
        }
        Ok(patch)
    }
}

impl FromPayload for AuthorPatch {
    fn from_payload(value: &Value) -> Result<Self, Issues> {
        let object = as_object(value)?;
        let mut issues = Issues::new();
        let name = required_text(object, "name", AUTHOR_NAME_LIMITS, &mut issues);
        finish(issues, || Some(AuthorPatch { name: name? }))
    }
}

impl FromPayload for TagPatch {
    fn from_payload(value: &Value) -> Result<Self, Issues> {
        let object = as_object(value)?;
        let mut issues = Issues::new();
        let tag = required_text(object, "tag", TAG_VALUE_LIMITS, &mut issues);
        finish(issues, || Some(TagPatch { tag: tag? }))
    }
}
