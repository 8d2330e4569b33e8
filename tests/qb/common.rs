use quickblox_sdk::auth::QuickbloxCredentials;
use quickblox_sdk::client::{ClientConfig, RetryConfig};
use quickblox_sdk::custom_objects::CustomObjectsClient;
use std::time::Duration;
use wiremock::MockServer;

/// Session token every mocked endpoint expects.
pub const TOKEN: &str = "8b75b6d5d4c1ef1a6d18ce6a30e2ab5c10ec4ba2";

/// A client pointed at `server`, built the way an application would:
/// credentials first, then the Custom Objects client.
pub fn client(server: &MockServer) -> CustomObjectsClient {
    let creds = QuickbloxCredentials::new(server.uri(), TOKEN);
    let config = ClientConfig::builder()
        .with_retry(
            RetryConfig::default()
                .with_max_attempts(2)
                .with_initial_delay(Duration::from_millis(5)),
        )
        .build();
    CustomObjectsClient::from_credentials(&creds, config).expect("client builds")
}

/// One backend record.
pub fn record(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "_parent_id": null,
        "user_id": 3060,
        "created_at": 1372170130,
        "updated_at": 1372170130,
        "name": name
    })
}

/// A collection envelope around `items`.
pub fn page(items: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "class_name": "Movie",
        "skip": 0,
        "limit": 100,
        "items": items
    })
}
