// connectio-core/tests/github_sync_tests.rs

mod common;

use std::sync::Arc;

use common::StubHttpClient;
use connectio_common::models::Provider;
use connectio_core::pagination::PageConfig;
use connectio_core::providers::{GithubProvider, ProviderSync, SyncParams};
use connectio_core::Error;

const OCTOCAT_PROFILE: &str = r#"{
    "login": "octocat",
    "name": "The Octocat",
    "bio": "Just a cat",
    "location": "San Francisco",
    "avatar_url": "https://avatars.example/u/583231",
    "html_url": "https://github.com/octocat",
    "followers": 9000,
    "following": 9,
    "public_repos": 2,
    "public_gists": 8
}"#;

const REPO_PAGE_ONE: &str = r#"[
    {
        "name": "repoA",
        "full_name": "octocat/repoA",
        "description": "First repo",
        "language": "Rust",
        "html_url": "https://github.com/octocat/repoA",
        "private": false,
        "fork": false,
        "archived": false,
        "disabled": false,
        "stargazers_count": 10,
        "watchers_count": 10,
        "forks_count": 3,
        "open_issues_count": 1,
        "size": 42,
        "default_branch": "main",
        "topics": ["cli", "sync"],
        "license": { "name": "MIT License" }
    },
    {
        "name": "repoB",
        "fork": true,
        "stargazers_count": 1
    }
]"#;

fn stub_github() -> Arc<StubHttpClient> {
    Arc::new(
        StubHttpClient::new()
            .route("&page=1&", 200, REPO_PAGE_ONE)
            .route("&page=2&", 200, "[]")
            .route("/users/octocat", 200, OCTOCAT_PROFILE),
    )
}

fn provider(client: Arc<StubHttpClient>) -> GithubProvider {
    GithubProvider::new(client)
        .with_api_url("https://github.test")
        .with_pages(PageConfig::github().without_delay())
}

#[tokio::test]
async fn octocat_sync_builds_expected_snapshot() -> anyhow::Result<()> {
    let client = stub_github();
    let github = provider(client.clone());

    let snapshot = github
        .sync(&SyncParams::for_username("octocat"))
        .await?;

    assert_eq!(snapshot.provider, Provider::Github);

    let account = &snapshot.payload["octocat"];
    assert_eq!(account["stats"]["repositories"], 2);
    assert_eq!(account["repositories"].as_array().unwrap().len(), 2);
    assert_eq!(account["profile"]["fullName"], "The Octocat");
    assert_eq!(account["repositories"][0]["license"], "MIT License");
    assert_eq!(account["repositoryTotals"]["total"], 2);
    assert_eq!(account["repositoryTotals"]["forks"], 1);

    // profile + two repo pages
    assert_eq!(client.request_count(), 3);
    Ok(())
}

#[tokio::test]
async fn snapshot_keeps_exactly_one_username() -> anyhow::Result<()> {
    let github = provider(stub_github());

    let snapshot = github
        .sync(&SyncParams::for_username("octocat"))
        .await?;

    let map = snapshot.payload.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("octocat"));
    Ok(())
}

#[tokio::test]
async fn repo_page_error_aborts_the_sync() {
    let client = Arc::new(
        StubHttpClient::new()
            .route("&page=1&", 500, "")
            .route("/users/octocat", 200, OCTOCAT_PROFILE),
    );
    let github = provider(client);

    let err = github
        .sync(&SyncParams::for_username("octocat"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 500, .. }));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let client = Arc::new(StubHttpClient::new().route("/users/ghost", 404, ""));
    let github = provider(client);

    let err = github
        .sync(&SyncParams::for_username("ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn rate_limit_parses_the_quota_envelope() -> anyhow::Result<()> {
    let client = Arc::new(StubHttpClient::new().route(
        "/rate_limit",
        200,
        r#"{ "rate": { "limit": 60, "remaining": 57, "reset": 1700000000 } }"#,
    ));
    let github = provider(client);

    let rate = github.rate_limit().await?;
    assert_eq!(rate.limit, 60);
    assert_eq!(rate.remaining, 57);
    Ok(())
}

#[tokio::test]
async fn missing_username_aborts_before_any_request() {
    let client = stub_github();
    let github = provider(client.clone());

    let err = github.sync(&SyncParams::default()).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(_)));
    assert_eq!(client.request_count(), 0);
}
