mod helpers;

use axum::http::StatusCode;
use helpers::*;
use lucky::domain::entities::{FORTUNE_CONTENT_LIMITS, TAG_VALUE_LIMITS};
use serde_json::{json, Value};
use std::time::Duration;

/// A fortune as it appears nested under one of its tags
fn as_tag_fortune(fortune: &Value) -> Value {
    without(fortune, "tags")
}

#[tokio::test]
async fn test_get_tag() {
    let app = TestApp::new().await;
    let value = random_tag();
    let fortune = app
        .create_fortune(&fortune_payload_with(json!({"tags": [value]})))
        .await;
    let tag_id = fortune["tags"][0]["id"].as_str().unwrap();

    let (status, body) = app.get(&format!("/api/tags/{}", tag_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": tag_id,
            "tag": value,
            "created_at": fortune["tags"][0]["created_at"],
            "fortunes": [as_tag_fortune(&fortune)],
        })
    );
}

#[tokio::test]
async fn test_get_tags() {
    let app = TestApp::new().await;
    let tag_1 = random_tag();
    let tag_2 = random_text_except(TAG_VALUE_LIMITS, &tag_1);
    let fortune = app
        .create_fortune(&fortune_payload_with(json!({"tags": [tag_1, tag_2]})))
        .await;

    let (status, body) = app.get("/api/tags").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "items": [
                {
                    "id": fortune["tags"][0]["id"],
                    "tag": tag_1,
                    "created_at": fortune["tags"][0]["created_at"],
                    "fortunes": [as_tag_fortune(&fortune)],
                },
                {
                    "id": fortune["tags"][1]["id"],
                    "tag": tag_2,
                    "created_at": fortune["tags"][1]["created_at"],
                    "fortunes": [as_tag_fortune(&fortune)],
                },
            ]
        })
    );
}

#[tokio::test]
async fn test_get_tag_lists_every_tagged_fortune() {
    let app = TestApp::new().await;
    let fortune_1 = app
        .create_fortune(&fortune_payload_with(json!({"tags": ["shared"]})))
        .await;
    let fortune_2 = app
        .create_fortune(&fortune_payload_with(json!({
            "content": random_text_except(FORTUNE_CONTENT_LIMITS, fortune_1["content"].as_str().unwrap()),
            "tags": ["other", "shared"],
        })))
        .await;
    assert_eq!(fortune_1["tags"][0]["id"], fortune_2["tags"][1]["id"]);

    let (status, body) = app
        .get(&format!("/api/tags/{}", fortune_1["tags"][0]["id"].as_str().unwrap()))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["fortunes"],
        json!([as_tag_fortune(&fortune_1), as_tag_fortune(&fortune_2)])
    );
}

#[tokio::test]
async fn test_patch_tag() {
    let app = TestApp::new().await;
    let value = random_tag();
    let fortune = app
        .create_fortune(&fortune_payload_with(json!({"tags": [value]})))
        .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    let tag_id = fortune["tags"][0]["id"].as_str().unwrap();
    let new_value = random_text_except(TAG_VALUE_LIMITS, &value);

    let (status, body) = app
        .patch(&format!("/api/tags/{}", tag_id), &json!({"tag": new_value}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(keys(&body), vec!["created_at", "fortunes", "id", "tag", "updated_at"]);
    assert_eq!(body["id"], json!(tag_id));
    assert_eq!(body["tag"], json!(new_value));
    assert_eq!(body["fortunes"], json!([as_tag_fortune(&fortune)]));
    assert_timestamp(&body["updated_at"]);
    assert!(body["updated_at"].as_str().unwrap() > body["created_at"].as_str().unwrap());
}

#[tokio::test]
async fn test_patch_tag_fail_conflict() {
    let app = TestApp::new().await;
    let tag_1 = random_tag();
    let tag_2 = random_text_except(TAG_VALUE_LIMITS, &tag_1);
    let fortune = app
        .create_fortune(&fortune_payload_with(json!({"tags": [tag_1, tag_2]})))
        .await;

    let (status, body) = app
        .patch(
            &format!("/api/tags/{}", fortune["tags"][1]["id"].as_str().unwrap()),
            &json!({"tag": tag_1}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"detail": "tag exists"}));
}

#[tokio::test]
async fn test_patch_tag_fail_invalid_payload() {
    let app = TestApp::new().await;
    let fortune = app
        .create_fortune(&fortune_payload_with(json!({"tags": [random_tag()]})))
        .await;
    let uri = format!("/api/tags/{}", fortune["tags"][0]["id"].as_str().unwrap());

    let (status, body) = app.patch(&uri, &json!({"tag": ""})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(issue_types(&body), vec!["string_too_short"]);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "tag"]));

    let (status, body) = app.patch(&uri, &json!({"tag": 42})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(issue_types(&body), vec!["string_type"]);
}
