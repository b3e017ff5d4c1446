//! Integration tests for [`github_client::GitHubClient`] against a stubbed upstream (mockito).

use std::io::Write;
use std::time::Duration;

use github_client::stats::{aggregate, FetchState};
use github_client::{GitHubClient, GitHubError, RepoQuery, RepoSort};
use mockito::Matcher;
use serde_json::json;

const USER_BODY: &str = r#"{
    "login": "octocat",
    "id": 583231,
    "public_repos": 8,
    "followers": 12000,
    "following": 9,
    "created_at": "2011-01-25T18:44:36Z"
}"#;

const REPOS_BODY: &str = r#"[
    {"name": "a", "description": "first", "html_url": "https://github.com/octocat/a",
     "language": "Rust", "stargazers_count": 3, "forks_count": 1, "updated_at": "2024-05-01T10:00:00Z"},
    {"name": "b", "description": null, "html_url": "https://github.com/octocat/b",
     "language": null, "stargazers_count": 0, "forks_count": 2, "updated_at": "2024-04-01T10:00:00Z"}
]"#;

fn client_for(server: &mockito::ServerGuard) -> GitHubClient {
    GitHubClient::new(&server.url(), Duration::from_secs(2), None).expect("client")
}

/// **Test: Profile body is returned unmodified.**
///
/// **Setup:** Stub `GET /users/octocat` with a profile JSON.
/// **Expected:** Returned value equals the stubbed JSON; user agent header is sent.
#[tokio::test]
async fn test_get_user_passthrough() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat")
        .match_header("user-agent", Matcher::Regex("^portfolio-server/".to_string()))
        .match_header("accept", "application/vnd.github+json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USER_BODY)
        .create_async()
        .await;

    let body = client_for(&server).get_user("octocat").await.expect("get_user");

    let expected: serde_json::Value = serde_json::from_str(USER_BODY).unwrap();
    assert_eq!(body, expected);
    mock.assert_async().await;
}

/// **Test: Repos query carries sort and per_page.**
#[tokio::test]
async fn test_get_repos_sends_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "pushed".into()),
            Matcher::UrlEncoded("per_page".into(), "30".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPOS_BODY)
        .create_async()
        .await;

    let body = client_for(&server)
        .get_repos("octocat", &RepoQuery::new(RepoSort::Pushed, 30))
        .await
        .expect("get_repos");

    assert_eq!(body.as_array().map(|a| a.len()), Some(2));
    mock.assert_async().await;
}

/// **Test: Bearer token is attached when configured.**
#[tokio::test]
async fn test_token_sent_as_bearer() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users/octocat")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(USER_BODY)
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), Duration::from_secs(2), Some("secret-token")).unwrap();
    client.get_user("octocat").await.expect("get_user");

    mock.assert_async().await;
}

/// **Test: Upstream non-success status becomes `GitHubError::Status`.**
///
/// **Setup:** Stub 404 for the profile and 500 for repos.
/// **Expected:** Both calls fail with the upstream status recorded; each is called once (no retry).
#[tokio::test]
async fn test_upstream_failure_status_no_retry() {
    let mut server = mockito::Server::new_async().await;
    let user_mock = server
        .mock("GET", "/users/ghost")
        .with_status(404)
        .with_body(r#"{"message":"Not Found"}"#)
        .expect(1)
        .create_async()
        .await;
    let repos_mock = server
        .mock("GET", "/users/ghost/repos")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let user_err = client.get_user("ghost").await.unwrap_err();
    let repos_err = client.get_repos("ghost", &RepoQuery::default()).await.unwrap_err();

    assert_eq!(user_err.upstream_status(), Some(404));
    assert_eq!(repos_err.upstream_status(), Some(500));
    user_mock.assert_async().await;
    repos_mock.assert_async().await;
}

/// **Test: Non-JSON success body is a decode error.**
#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let err = client_for(&server).get_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::Decode(_)));
}

/// **Test: Key order of the upstream body survives the round trip.**
#[tokio::test]
async fn test_get_user_keeps_key_order() {
    let raw = r#"{"login":"octocat","id":1,"avatar_url":"x","public_repos":8}"#;
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body(raw)
        .create_async()
        .await;

    let body = client_for(&server).get_user("octocat").await.expect("get_user");

    assert_eq!(serde_json::to_string(&body).unwrap(), raw);
}

/// **Test: A stalled upstream is cut off by the client timeout.**
///
/// **Setup:** Upstream sends headers, then stalls 1.5 s before the body; client timeout is 300 ms.
/// **Expected:** `GitHubError::Timeout`, well before the upstream would have finished.
#[tokio::test]
async fn test_stalled_upstream_times_out() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_millis(1500));
            w.write_all(USER_BODY.as_bytes())
        })
        .create_async()
        .await;

    let client = GitHubClient::new(&server.url(), Duration::from_millis(300), None).unwrap();
    let started = std::time::Instant::now();
    let err = client.get_user("octocat").await.unwrap_err();

    assert!(matches!(err, GitHubError::Timeout(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_millis(1500));
}

/// **Test: Unreachable upstream is a request error, not a panic.**
#[tokio::test]
async fn test_unreachable_upstream() {
    let client = GitHubClient::new("http://127.0.0.1:9", Duration::from_millis(500), None).unwrap();
    let err = client.get_user("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubError::Request(_) | GitHubError::Timeout(_)));
}

/// **Test: Repeating the repos query against an unchanged upstream gives identical totals.**
#[tokio::test]
async fn test_repeated_repos_give_identical_totals() {
    let mut server = mockito::Server::new_async().await;
    let _repos = server
        .mock("GET", "/users/octocat/repos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(REPOS_BODY)
        .expect(2)
        .create_async()
        .await;
    let _user = server
        .mock("GET", "/users/octocat")
        .with_status(200)
        .with_body(USER_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let user = FetchState::Loaded(client.get_user_summary("octocat").await.unwrap());

    let mut views = Vec::new();
    for _ in 0..2 {
        let repos = client
            .get_repo_summaries("octocat", &RepoQuery::default())
            .await
            .unwrap();
        views.push(aggregate(&user, &FetchState::Loaded(repos)));
    }

    assert_eq!(views[0], views[1]);
    assert_eq!(views[0].stats.total_stars, 3);
    assert_eq!(views[0].stats.total_forks, 3);
    assert_eq!(views[0].stats.repo_count, 8);
    assert_eq!(
        serde_json::to_value(&views[0].stats).unwrap(),
        json!({"repoCount": 8, "totalStars": 3, "totalForks": 3, "followerCount": 12000})
    );
}
