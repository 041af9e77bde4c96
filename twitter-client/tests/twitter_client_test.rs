//! Integration tests for [`twitter_client::TwitterClient`] against a local mockito server.
//!
//! Paths mirror the Twitter API v2 endpoints: `/2/users/by/username/<handle>` and
//! `/2/users/<id>/tweets`.

use mockito::Matcher;
use relay_core::{FetchError, PostFetcher};
use twitter_client::TwitterClient;

const TEST_TOKEN: &str = "test_bearer_token";

async fn mock_user_lookup(server: &mut mockito::ServerGuard, handle: &str, id: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/2/users/by/username/{}", handle).as_str())
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"data": {{"id": "{}", "name": "Test", "username": "{}"}}}}"#,
            id, handle
        ))
        .create_async()
        .await
}

fn client_for(server: &mockito::ServerGuard) -> TwitterClient {
    TwitterClient::with_base_url(TEST_TOKEN.to_string(), server.url())
}

/// **Test: newest post is returned with links stripped and entities decoded.**
#[tokio::test]
async fn test_fetch_latest_returns_newest_post() {
    let mut server = mockito::Server::new_async().await;
    let _lookup = mock_user_lookup(&mut server, "bob", "42").await;
    let _timeline = server
        .mock("GET", "/2/users/42/tweets")
        .match_query(Matcher::UrlEncoded("max_results".into(), "5".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "data": [
                {"id": "1002", "text": "rock &amp; roll https://t.co/abc"},
                {"id": "1001", "text": "older"}
            ],
            "meta": {"result_count": 2, "newest_id": "1002"}
        }"#,
        )
        .create_async()
        .await;

    let post = client_for(&server).fetch_latest("bob").await.unwrap().unwrap();

    assert_eq!(post.id(), "1002");
    assert_eq!(post.text(), "rock & roll");
}

/// **Test: an empty timeline is "no post", not an error.**
#[tokio::test]
async fn test_fetch_latest_empty_timeline_is_none() {
    let mut server = mockito::Server::new_async().await;
    let _lookup = mock_user_lookup(&mut server, "quiet", "7").await;
    let _timeline = server
        .mock("GET", "/2/users/7/tweets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"meta": {"result_count": 0}}"#)
        .create_async()
        .await;

    let post = client_for(&server).fetch_latest("quiet").await.unwrap();

    assert!(post.is_none());
}

/// **Test: the user id lookup happens once; later fetches reuse the cached id.**
#[tokio::test]
async fn test_user_id_is_cached() {
    let mut server = mockito::Server::new_async().await;
    let lookup = server
        .mock("GET", "/2/users/by/username/bob")
        .with_status(200)
        .with_body(r#"{"data": {"id": "42", "name": "Bob", "username": "bob"}}"#)
        .expect(1)
        .create_async()
        .await;
    let timeline = server
        .mock("GET", "/2/users/42/tweets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": [{"id": "1", "text": "hi"}]}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    client.fetch_latest("bob").await.unwrap();
    client.fetch_latest("bob").await.unwrap();

    lookup.assert_async().await;
    timeline.assert_async().await;
}

/// **Test: a lookup answered with an `errors` array (no `data`) is NotFound.**
#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _lookup = server
        .mock("GET", "/2/users/by/username/ghost")
        .with_status(200)
        .with_body(
            r#"{"errors": [{"title": "Not Found Error", "detail": "Could not find user with username: [ghost]."}]}"#,
        )
        .create_async()
        .await;

    let err = client_for(&server).fetch_latest("ghost").await.unwrap_err();

    assert_eq!(
        err,
        FetchError::NotFound("Could not find user with username: [ghost].".to_string())
    );
}

/// **Test: HTTP 429 maps to RateLimited, 401 to Unauthorized, 500 to Api.**
#[tokio::test]
async fn test_http_errors_are_classified() {
    let mut server = mockito::Server::new_async().await;
    let _limited = server
        .mock("GET", "/2/users/by/username/limited")
        .with_status(429)
        .with_body(r#"{"title": "Too Many Requests"}"#)
        .create_async()
        .await;
    let _unauthorized = server
        .mock("GET", "/2/users/by/username/secret")
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/2/users/by/username/broken")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server);

    assert!(matches!(
        client.fetch_latest("limited").await.unwrap_err(),
        FetchError::RateLimited { .. }
    ));
    assert!(matches!(
        client.fetch_latest("secret").await.unwrap_err(),
        FetchError::Unauthorized(_)
    ));
    assert_eq!(
        client.fetch_latest("broken").await.unwrap_err(),
        FetchError::Api {
            status: 500,
            body: "boom".to_string()
        }
    );
}

/// **Test: a malformed body is a Parse error.**
#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _lookup = mock_user_lookup(&mut server, "bob", "42").await;
    let _timeline = server
        .mock("GET", "/2/users/42/tweets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server).fetch_latest("bob").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
}

/// **Test: an unreachable server is a Network error.**
#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = TwitterClient::with_base_url(TEST_TOKEN.to_string(), "http://127.0.0.1:1".to_string());

    let err = client.fetch_latest("bob").await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

/// **Test: a handle with `?`, `#` or `/` stays one encoded path segment and never reaches another
/// account's lookup.**
#[tokio::test]
async fn test_handle_with_url_syntax_does_not_resolve_other_account() {
    let mut server = mockito::Server::new_async().await;
    let alice_lookup = server
        .mock("GET", "/2/users/by/username/alice")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": {"id": "7", "name": "Alice", "username": "alice"}}"#)
        .expect(0)
        .create_async()
        .await;
    let alice_timeline = server
        .mock("GET", "/2/users/7/tweets")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": [{"id": "99", "text": "alice post"}]}"#)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    for handle in ["alice?x=1", "alice#top", "alice/../alice"] {
        assert!(client.fetch_latest(handle).await.is_err(), "{} resolved", handle);
    }

    alice_lookup.assert_async().await;
    alice_timeline.assert_async().await;
}
