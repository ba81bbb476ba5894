use lucky::domain::entities::{
    TextLimits, AUTHOR_NAME_LIMITS, FORTUNE_CONTENT_LIMITS, TAG_VALUE_LIMITS,
};
use lucky::shared::utils::EntityId;
use rand::{distributions::Uniform, Rng};
use serde_json::{json, Value};
use std::collections::HashSet;

/// Valid id that no test ever creates
pub const UNKNOWN_ENTITY_ID: &str = "0K27TH4PYWP1P";

/// Right length and alphabet, but beyond the 64-bit range
pub const INVALID_ENTITY_ID: &str = "aaaaaaaaaaaaa";

/// Printable ASCII text with a random length inside `limits`
pub fn random_text(limits: TextLimits) -> String {
    let mut rng = rand::thread_rng();
    let length = rng.gen_range(limits.min..=limits.max);
    rng.sample_iter(Uniform::new_inclusive(b' ', b'~'))
        .take(length)
        .map(char::from)
        .collect()
}

pub fn random_text_except(limits: TextLimits, taken: &str) -> String {
    loop {
        let text = random_text(limits);
        if text != taken {
            return text;
        }
    }
}

pub fn random_author() -> String {
    random_text(AUTHOR_NAME_LIMITS)
}

pub fn random_content() -> String {
    random_text(FORTUNE_CONTENT_LIMITS)
}

pub fn random_tag() -> String {
    random_text(TAG_VALUE_LIMITS)
}

/// Up to nine distinct tag values
pub fn random_tags() -> Vec<String> {
    let count = rand::thread_rng().gen_range(0..10);
    let mut seen = HashSet::new();
    let mut tags = Vec::with_capacity(count);
    while tags.len() < count {
        let tag = random_tag();
        if seen.insert(tag.clone()) {
            tags.push(tag);
        }
    }
    tags
}

pub fn random_fortune_payload() -> Value {
    json!({
        "author": random_author(),
        "content": random_content(),
        "tags": random_tags(),
    })
}

/// A random payload with some keys replaced
pub fn fortune_payload_with(overrides: Value) -> Value {
    let mut payload = random_fortune_payload();
    if let (Some(target), Some(source)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in source {
            target.insert(key.clone(), value.clone());
        }
    }
    payload
}

pub fn too_long(limits: TextLimits) -> String {
    "a".repeat(limits.max + 1)
}

pub fn too_short(limits: TextLimits) -> String {
    "a".repeat(limits.min.saturating_sub(1))
}

pub fn assert_entity_id(value: &Value) {
    let text = value.as_str().expect("id is a string");
    text.parse::<EntityId>()
        .unwrap_or_else(|e| panic!("{:?} is not an entity id: {}", text, e));
}

pub fn assert_timestamp(value: &Value) {
    let text = value.as_str().expect("timestamp is a string");
    chrono::DateTime::parse_from_rfc3339(text)
        .unwrap_or_else(|e| panic!("{:?} is not a timestamp: {}", text, e));
}

/// Object keys, sorted
pub fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("value is an object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys
}

/// Issue types of a 422 body, in order
pub fn issue_types(body: &Value) -> Vec<&str> {
    body["detail"]
        .as_array()
        .expect("detail is an issue list")
        .iter()
        .filter_map(|issue| issue["type"].as_str())
        .collect()
}

/// Copy of an object without one key
pub fn without(value: &Value, key: &str) -> Value {
    let mut copy = value.clone();
    if let Some(object) = copy.as_object_mut() {
        object.remove(key);
    }
    copy
}
