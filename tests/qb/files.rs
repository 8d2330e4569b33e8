//! File fields: upload, download through the storage redirect, delete.

use super::common::{client, TOKEN};
use quickblox_sdk::custom_objects::{CustomObjectFile, ErrorKind};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_file_round_trip() {
    let server = MockServer::start().await;
    let poster = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    Mock::given(method("POST"))
        .and(path("/data/Movie/a1/file.json"))
        .and(header("QB-Token", TOKEN))
        .and(body_string_contains("name=\"field_name\""))
        .and(body_string_contains("poster"))
        .and(body_string_contains("filename=\"poster.png\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/a1/file.json"))
        .and(query_param("field_name", "poster"))
        .respond_with(
            ResponseTemplate::new(307).insert_header("Location", format!("{}/blobs/4f1e", server.uri())),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blobs/4f1e"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/png")
                .set_body_bytes(poster.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/data/Movie/a1/file.json"))
        .and(query_param("field_name", "poster"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let file = CustomObjectFile::new("poster.png", "image/png", poster.clone());

    client.upload_file(&file, "Movie", "a1", "poster").await.unwrap();

    let download = client.download_file("Movie", "a1", "poster").await.unwrap();
    assert_eq!(download.content_type.as_deref(), Some("image/png"));
    assert_eq!(download.data.as_ref(), poster.as_slice());

    client.delete_file("Movie", "a1", "poster").await.unwrap();
}

#[tokio::test]
async fn test_download_missing_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/a1/file.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": {"base": ["Required record not found"]}
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .download_file("Movie", "a1", "poster")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err.kind, ErrorKind::NotFound(_)));
}

#[tokio::test]
async fn test_upload_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/data/Movie/a1/file.json"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("seen twice"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "seen twice").unwrap();

    let file = CustomObjectFile::from_path(&notes).await.unwrap();
    assert_eq!(file.content_type, "text/plain");

    client(&server)
        .upload_file(&file, "Movie", "a1", "notes")
        .await
        .unwrap();
}
