//! Single-record and listing operations.

use super::common::{client, page, record, TOKEN};
use quickblox_sdk::custom_objects::{
    AccessRule, CustomObject, ErrorKind, ExtendedRequest, Permissions, SpecialUpdateOperators,
};
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_record_lifecycle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data/Movie.json"))
        .and(header("QB-Token", TOKEN))
        .and(header("QuickBlox-REST-API-Version", "0.1.1"))
        .and(body_json(json!({
            "name": "Alien",
            "permissions": {"update": {"access": "open_for_users_ids", "ids": ["3060"]}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(record("a1", "Alien")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/a1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![record("a1", "Alien")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/data/Movie/a1.json"))
        .and(body_json(json!({"name": "Alien (1979)", "inc": {"views": 1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("a1", "Alien (1979)")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/data/Movie/a1.json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let draft = CustomObject::new("Movie")
        .with_field("name", "Alien")
        .with_permissions(Permissions::new().with_update(AccessRule::for_users([3060])));
    let created = client.create_object(&draft).await.expect("create");
    let id = created.id.clone().expect("server assigned an id");
    assert_eq!(created.user_id, Some(3060));

    let fetched = client.get_object("Movie", &id).await.expect("get");
    assert_eq!(fetched.field("name"), Some(&json!("Alien")));

    let mut change = fetched.clone();
    change.fields.clear();
    change.set_field("name", "Alien (1979)");
    let updated = client
        .update_object_with_operators(&change, &SpecialUpdateOperators::new().inc("views", 1))
        .await
        .expect("update");
    assert_eq!(updated.field("name"), Some(&json!("Alien (1979)")));

    client.delete_object("Movie", &id).await.expect("delete");
}

#[tokio::test]
async fn test_extended_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie.json"))
        .and(query_param("genre[in]", "sci-fi,horror"))
        .and(query_param("output[include]", "name"))
        .and(query_param("skip", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "class_name": "Movie",
            "skip": 10,
            "limit": 100,
            "items": [{"_id": "a1", "name": "Alien"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ExtendedRequest::builder()
        .in_values("genre", ["sci-fi", "horror"])
        .include_fields(&["name"])
        .skip(10)
        .build()
        .unwrap();
    let result = client(&server)
        .get_objects_extended("Movie", &request)
        .await
        .unwrap();

    assert_eq!(result.skip, 10);
    assert_eq!(result.items[0].class_name, "Movie");
}

#[tokio::test]
async fn test_expired_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": ["Token is required"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).get_objects("Movie").await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Client(_)));
    assert!(err.client_error().unwrap().is_auth_error());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_reads_are_retried_on_server_errors() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);

    Mock::given(method("GET"))
        .and(path("/data/Movie.json"))
        .respond_with(move |_: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200).set_body_json(page(vec![record("a1", "Alien")]))
            }
        })
        .mount(&server)
        .await;

    let result = client(&server).get_objects("Movie").await.unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client.get_object("Movie/../users", "a1").await.unwrap_err();
    assert_eq!(err.input_code(), Some("INVALID_CLASS_NAME"));

    let err = client.delete_object("Movie", "a1?x=1").await.unwrap_err();
    assert_eq!(err.input_code(), Some("INVALID_ID"));

    let err = client.get_permissions("Movie", "").await.unwrap_err();
    assert_eq!(err.input_code(), Some("INVALID_ID"));
}

#[tokio::test]
async fn test_permissions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/a1.json"))
        .and(query_param("permissions", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "permissions": {
                "read": {"access": "open"},
                "update": {"access": "owner"},
                "delete": {"access": "not_allowed"}
            },
            "record_id": "a1"
        })))
        .mount(&server)
        .await;

    let result = client(&server).get_permissions("Movie", "a1").await.unwrap();
    assert_eq!(result.permissions.delete, Some(AccessRule::not_allowed()));
}
