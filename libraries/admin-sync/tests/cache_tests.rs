//! Query cache behavior against a mock API.


use admin_sync::QueryState;
use std::time::Duration;
use test_helpers::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_subscribe_fetches_once() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            mock_user(1, "Ann", 30, "Approved"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = cache_for(&mock_server);
    let mut first = cache.subscribe();
    let second = cache.subscribe();

    let state = first
        .wait_for(QueryState::is_settled)
        .await
        .unwrap()
        .clone();

    assert_eq!(state.data().map(|users| users.len()), Some(1));
    assert_eq!(*second.borrow(), state);
}

#[tokio::test]
async fn test_concurrent_fetches_share_one_request() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([mock_user(1, "Ann", 30, "Approved")]))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = cache_for(&mock_server);
    let (a, b) = tokio::join!(cache.fetch_users(), cache.fetch_users());

    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_list() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            mock_user(1, "Ann", 30, "Approved"),
            mock_user(2, "Ben", 41, "Pending"),
        ])))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let cache = cache_for(&mock_server);
    cache.fetch_users().await.unwrap();

    assert!(cache.refetch().await.is_err());

    let state = cache.state();
    assert!(state.error().is_some());
    assert_eq!(state.data().map(|users| users.len()), Some(2));
}

#[tokio::test]
async fn test_fetch_retries_after_error() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    mount_user_list(&mock_server, vec![mock_user(1, "Ann", 30, "Approved")]).await;

    let cache = cache_for(&mock_server);
    assert!(cache.fetch_users().await.is_err());

    let users = cache.fetch_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(cache.state().error().is_none());
}

#[tokio::test]
async fn test_malformed_list_is_an_error_state() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let cache = cache_for(&mock_server);
    let err = cache.fetch_users().await.unwrap_err();

    assert!(err.to_string().contains("Failed to load users"));
    assert!(matches!(cache.state(), QueryState::Error { previous: None, .. }));
}
