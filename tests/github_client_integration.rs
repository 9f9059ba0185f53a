//! Integration tests for the GitHub client using wiremock

use gitpoints::github::{ApiResult, Client};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_body(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "name": "The Octocat",
        "avatar_url": format!("https://avatars.example.com/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "public_repos": 2,
        "followers": 42
    })
}

fn repo_body(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "html_url": format!("https://github.com/octocat/{name}"),
        "description": "A test repository",
        "language": "Rust",
        "stargazers_count": 5,
        "forks_count": 1,
        "open_issues_count": 0,
        "topics": ["testing"],
        "archived": false,
        "has_issues": true,
        "private": false,
        "updated_at": "2024-06-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_fetch_user_profile_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(profile_body("octocat"))
                .insert_header("x-ratelimit-remaining", "4999")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    match result {
        ApiResult::Success(profile, rate_limit) => {
            assert_eq!(profile.login, "octocat");
            assert_eq!(profile.name.as_deref(), Some("The Octocat"));
            assert_eq!(profile.public_repos, 2);
            assert_eq!(profile.followers, 42);

            let rate_limit = rate_limit.expect("rate limit headers should be extracted");
            assert_eq!(rate_limit.remaining, 4999);
            assert_eq!(rate_limit.reset_at.timestamp(), 1_704_067_200);
        }
        other => panic!("Expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_profile_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/no-such-user"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("no-such-user").await;

    assert!(matches!(result, ApiResult::NotFound(_)), "Expected NotFound, got {result:?}");
}

#[tokio::test]
async fn test_fetch_user_profile_rate_limited_with_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "API rate limit exceeded"}))
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1704070800"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    match result {
        ApiResult::RateLimited(rate_limit) => {
            let rate_limit = rate_limit.expect("reset headers should be extracted");
            assert_eq!(rate_limit.remaining, 0);
            assert_eq!(rate_limit.reset_at.timestamp(), 1_704_070_800);
        }
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_profile_rate_limited_without_headers() {
    let mock_server = MockServer::start().await;

    // Secondary rate limits respond with 429 and may omit the reset headers
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "Too many requests"})))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    match result {
        ApiResult::RateLimited(rate_limit) => assert!(rate_limit.is_none()),
        other => panic!("Expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_profile_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    assert!(matches!(result, ApiResult::Failed(_, _)), "Expected Failed, got {result:?}");
}

#[tokio::test]
async fn test_fetch_user_profile_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    assert!(matches!(result, ApiResult::Failed(_, _)), "Expected Failed, got {result:?}");
}

#[tokio::test]
async fn test_bearer_token_is_forwarded() {
    let mock_server = MockServer::start().await;

    // The mock only matches when the Authorization header arrives intact
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("octocat")))
        .mount(&mock_server)
        .await;

    let client = Client::new(Some("test_token"), mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_profile("octocat").await;

    assert!(matches!(result, ApiResult::Success(_, _)), "Expected Success, got {result:?}");
}

#[tokio::test]
async fn test_fetch_user_repositories_single_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_body(1, "alpha"), repo_body(2, "beta")])))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_repositories("octocat").await;

    match result {
        ApiResult::Success(repos, _) => {
            assert_eq!(repos.len(), 2);
            assert_eq!(repos[0].name, "alpha");
            assert_eq!(repos[1].name, "beta");
        }
        other => panic!("Expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_repositories_follows_pagination() {
    let mock_server = MockServer::start().await;

    let next_link = format!("<{}/users/octocat/repos?page=2>; rel=\"next\"", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([repo_body(1, "alpha")]))
                .insert_header("link", next_link.as_str())
                .insert_header("x-ratelimit-remaining", "10")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([repo_body(2, "beta")]))
                .insert_header("x-ratelimit-remaining", "9")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_repositories("octocat").await;

    match result {
        ApiResult::Success(repos, rate_limit) => {
            assert_eq!(repos.len(), 2);
            assert_eq!(repos[0].name, "alpha");
            assert_eq!(repos[1].name, "beta");

            // The most depleted rate limit across pages is the one reported
            let rate_limit = rate_limit.expect("rate limit headers should be extracted");
            assert_eq!(rate_limit.remaining, 9);
        }
        other => panic!("Expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_repositories_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/newcomer/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_repositories("newcomer").await;

    match result {
        ApiResult::Success(repos, _) => assert!(repos.is_empty()),
        other => panic!("Expected Success, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_user_repositories_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(None, mock_server.uri()).expect("Failed to create client");
    let result = client.fetch_user_repositories("octocat").await;

    assert!(matches!(result, ApiResult::RateLimited(Some(_))), "Expected RateLimited, got {result:?}");
}
