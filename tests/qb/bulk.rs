//! Multi-record operations.

use super::common::{client, record};
use quickblox_sdk::custom_objects::{CustomObject, MAX_BATCH_SIZE};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bulk_create_update_delete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/Movie/multi.json"))
        .and(body_json(json!({"record": {
            "1": {"name": "Alien"},
            "2": {"name": "Aliens"},
            "3": {"name": "Alien 3"}
        }})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "class_name": "Movie",
            "items": [record("a1", "Alien"), record("b2", "Aliens"), record("c3", "Alien 3")]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/data/Movie/multi.json"))
        .and(body_json(json!({"record": {
            "1": {"_id": "a1", "rating": 9},
            "2": {"_id": "zz", "rating": 1}
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "class_name": "Movie",
            "not_found": {"ids": ["zz"]},
            "items": [{"_id": "a1", "name": "Alien", "rating": 9}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/data/Movie/a1,b2,c3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "SuccessfullyDeleted": {"ids": ["a1", "b2", "c3"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let drafts: Vec<CustomObject> = ["Alien", "Aliens", "Alien 3"]
        .iter()
        .map(|name| CustomObject::new("Movie").with_field("name", *name))
        .collect();
    let created = client.create_objects("Movie", &drafts).await.unwrap();
    assert_eq!(created.ids(), vec!["a1", "b2", "c3"]);

    let changes = vec![
        CustomObject::new("Movie").with_id("a1").with_field("rating", 9),
        CustomObject::new("Movie").with_id("zz").with_field("rating", 1),
    ];
    let updated = client.update_objects("Movie", &changes).await.unwrap();
    assert_eq!(updated.not_found_ids, vec!["zz"]);
    assert_eq!(updated.items[0].field("rating"), Some(&json!(9)));

    let ids = created.ids();
    let deleted = client.delete_objects("Movie", &ids).await.unwrap();
    assert!(deleted.all_deleted());
    assert_eq!(deleted.deleted_ids.len(), 3);
}

#[tokio::test]
async fn test_bulk_limits() {
    let server = MockServer::start().await;
    let client = client(&server);

    let ids: Vec<String> = (0..=MAX_BATCH_SIZE).map(|n| format!("id{}", n)).collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

    let err = client.delete_objects("Movie", &ids).await.unwrap_err();
    assert_eq!(err.input_code(), Some("BATCH_TOO_LARGE"));

    let err = client.get_objects_by_ids("Movie", &ids).await.unwrap_err();
    assert_eq!(err.input_code(), Some("BATCH_TOO_LARGE"));
}
