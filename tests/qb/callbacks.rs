//! Callback-style calls through `CustomObjects`.

use super::common::{client, page, record};
use quickblox_sdk::custom_objects::{
    with_context, CustomObject, CustomObjects, ExtendedRequest, PagedObjects, Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_callbacks_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/a1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![record("a1", "Alien")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/Movie/b2.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![record("b2", "Aliens")])))
        .mount(&server)
        .await;

    let objects = CustomObjects::new(client(&server)).unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();

    for (row, id) in [(0usize, "a1"), (1, "b2")] {
        let tx = tx.clone();
        objects.get_object(
            "Movie",
            id,
            with_context(row, move |result: Result<CustomObject>, row: usize| {
                let _ = tx.send((row, result));
            }),
        );
    }
    drop(tx);

    let mut rows = Vec::new();
    while let Some((row, result)) = rx.recv().await {
        let name = result.unwrap().field("name").cloned().unwrap();
        rows.push((row, name));
    }
    rows.sort_by_key(|(row, _)| *row);

    assert_eq!(rows[0], (0, serde_json::json!("Alien")));
    assert_eq!(rows[1], (1, serde_json::json!("Aliens")));
}

#[tokio::test]
async fn test_count_through_callback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie.json"))
        .and(query_param("count", "1"))
        .and(query_param("rating[gte]", "8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items_count": 12})))
        .mount(&server)
        .await;

    let objects = CustomObjects::new(client(&server)).unwrap();
    let request = ExtendedRequest::builder().gte("rating", 8).build().unwrap();
    let (tx, rx) = oneshot::channel();
    objects.count_objects("Movie", &request, move |result: Result<u64>| {
        let _ = tx.send(result);
    });

    assert_eq!(rx.await.unwrap().unwrap(), 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_in_flight_delivers_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/Movie.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![record("a1", "Alien")]))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let objects = CustomObjects::new(client(&server)).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let (tx, rx) = oneshot::channel();

    let handle = objects.get_objects("Movie", move |result: Result<PagedObjects>| {
        seen.fetch_add(1, Ordering::SeqCst);
        let _ = tx.send(result);
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.cancel());

    let result = rx.await.unwrap();
    assert!(result.unwrap_err().is_cancelled());
    handle.join().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_many_calls_each_complete_once() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let objects = CustomObjects::new(client(&server)).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let seen = Arc::clone(&calls);
            objects.delete_object("Movie", &format!("id{}", n), move |result: Result<()>| {
                assert!(result.is_ok());
                seen.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    for result in futures::future::join_all(handles.into_iter().map(|h| h.join())).await {
        result.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 8);
}
