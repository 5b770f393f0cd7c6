//! Integration tests for the GitHub forge against a mocked REST API.
//!
//! Every test starts its own wiremock server and points a `GitHubForge`
//! at it, so no request leaves the machine.

use std::time::Duration;

use forkscout::core::types::{ComparisonStatus, RepoSlug, SortKey};
use forkscout::engine::scan::{scan, NoopObserver, ScanRequest};
use forkscout::forge::{Forge, ForgeError, GitHubForge};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "ghp_test_token";

fn forge_for(server: &MockServer) -> GitHubForge {
    GitHubForge::with_options(
        SecretString::from(TOKEN.to_string()),
        server.uri(),
        Duration::from_secs(5),
    )
    .expect("build forge")
}

fn slug() -> RepoSlug {
    RepoSlug::parse("octocat/hello").unwrap()
}

fn repository_body(forks: u64) -> serde_json::Value {
    json!({
        "full_name": "octocat/hello",
        "forks_count": forks,
        "default_branch": "main",
        "owner": { "login": "octocat" }
    })
}

fn fork_body(name: &str, stars: u64, pushed_at: &str) -> serde_json::Value {
    json!({
        "full_name": name,
        "html_url": format!("https://github.com/{}", name),
        "stargazers_count": stars,
        "pushed_at": pushed_at
    })
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// =============================================================================
// Single endpoints
// =============================================================================

mod endpoints {
    use super::*;

    #[tokio::test]
    async fn repository_lookup_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(repository_body(12)))
            .expect(1)
            .mount(&server)
            .await;

        let info = forge_for(&server).get_repository(&slug()).await.unwrap();

        assert_eq!(info.fork_count, 12);
        assert_eq!(info.owner_login, "octocat");
        assert_eq!(info.default_branch, "main");
    }

    #[tokio::test]
    async fn fork_listing_passes_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello/forks"))
            .and(query_param("per_page", "100"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                fork_body("alice/hello", 5, "2024-03-01T12:00:00Z"),
                { "full_name": "bob/hello", "stargazers_count": 1 }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let forks = forge_for(&server).list_forks(&slug(), 2, 100).await.unwrap();

        assert_eq!(forks.len(), 2);
        assert_eq!(forks[0].full_name, "alice/hello");
        assert_eq!(forks[0].stars, 5);
        assert_eq!(forks[0].pushed_at.as_deref(), Some("2024-03-01T12:00:00Z"));
        assert_eq!(forks[0].status, ComparisonStatus::Unknown);
        // No html_url: falls back to the web URL built from the name.
        assert_eq!(forks[1].url, "https://github.com/bob/hello");
        assert_eq!(forks[1].pushed_at, None);
    }

    #[tokio::test]
    async fn compare_uses_cross_repo_range() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "/repos/alice/hello/compare/octocat:main...main",
            json!({ "status": "diverged", "ahead_by": 3, "behind_by": 8 }),
        )
        .await;

        let comparison = forge_for(&server)
            .compare("alice/hello", "octocat", "main")
            .await
            .unwrap();

        assert_eq!(comparison.status, ComparisonStatus::Diverged);
        assert_eq!(comparison.ahead_by, 3);
        assert_eq!(comparison.behind_by, 8);
    }

    #[tokio::test]
    async fn branch_count_follows_pages() {
        let server = MockServer::start().await;
        let full_page: Vec<_> = (0..100).map(|i| json!({ "name": format!("b{}", i) })).collect();
        Mock::given(method("GET"))
            .and(path("/repos/alice/hello/branches"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/alice/hello/branches"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "name": "x" }, { "name": "y" }])),
            )
            .mount(&server)
            .await;

        let count = forge_for(&server).branch_count("alice/hello").await.unwrap();
        assert_eq!(count, 102);
    }

    #[tokio::test]
    async fn branch_count_stops_at_page_cap() {
        let server = MockServer::start().await;
        let full_page: Vec<_> = (0..100).map(|i| json!({ "name": format!("b{}", i) })).collect();
        Mock::given(method("GET"))
            .and(path("/repos/alice/hello/branches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
            .expect(50)
            .mount(&server)
            .await;

        let count = forge_for(&server).branch_count("alice/hello").await.unwrap();
        assert_eq!(count, 5000);
    }
}

// =============================================================================
// Error mapping
// =============================================================================

mod errors {
    use super::*;

    async fn lookup_with(response: ResponseTemplate) -> ForgeError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octocat/hello"))
            .respond_with(response)
            .mount(&server)
            .await;
        forge_for(&server).get_repository(&slug()).await.unwrap_err()
    }

    #[tokio::test]
    async fn not_found() {
        let err = lookup_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
        )
        .await;
        assert_eq!(err, ForgeError::NotFound("octocat/hello".into()));
    }

    #[tokio::test]
    async fn unauthorized() {
        let err = lookup_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .await;
        assert!(matches!(err, ForgeError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn forbidden_is_auth_failure() {
        let err = lookup_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Resource not accessible" })),
        )
        .await;
        assert!(matches!(err, ForgeError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn exhausted_quota_is_rate_limit() {
        let err = lookup_with(
            ResponseTemplate::new(403)
                .insert_header("X-RateLimit-Remaining", "0")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .await;
        assert_eq!(err, ForgeError::RateLimited);
    }

    #[tokio::test]
    async fn server_error() {
        let err = lookup_with(ResponseTemplate::new(502).set_body_string("bad gateway")).await;
        assert!(matches!(err, ForgeError::ApiError { status: 502, .. }));
    }

    #[tokio::test]
    async fn malformed_body() {
        let err = lookup_with(ResponseTemplate::new(200).set_body_string("not json")).await;
        assert!(matches!(err, ForgeError::Decode(_)));
    }
}

// =============================================================================
// Full scan over HTTP
// =============================================================================

mod full_scan {
    use super::*;

    #[tokio::test]
    async fn scan_classifies_and_ranks() {
        let server = MockServer::start().await;
        mount_json(&server, "/repos/octocat/hello", repository_body(4)).await;
        mount_json(
            &server,
            "/repos/octocat/hello/forks",
            json!([
                fork_body("f1/hello", 1, "2024-01-01T00:00:00Z"),
                fork_body("f2/hello", 9, "2024-02-01T00:00:00Z"),
                fork_body("f3/hello", 4, "2024-03-01T00:00:00Z"),
                fork_body("gone/hello", 0, "2020-01-01T00:00:00Z"),
            ]),
        )
        .await;
        mount_json(
            &server,
            "/repos/f1/hello/compare/octocat:main...main",
            json!({ "status": "ahead", "ahead_by": 2, "behind_by": 0 }),
        )
        .await;
        mount_json(
            &server,
            "/repos/f2/hello/compare/octocat:main...main",
            json!({ "status": "ahead", "ahead_by": 6, "behind_by": 0 }),
        )
        .await;
        mount_json(
            &server,
            "/repos/f3/hello/compare/octocat:main...main",
            json!({ "status": "behind", "ahead_by": 0, "behind_by": 7 }),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/repos/gone/hello/compare/octocat:main...main"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let forge = forge_for(&server);
        let request = ScanRequest::new(slug()).with_concurrency(4);
        let report = scan(&forge, &request, &NoopObserver).await.unwrap();

        let ahead: Vec<_> = report.buckets.ahead.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(ahead, vec!["f2/hello", "f1/hello"]);
        assert_eq!(report.buckets.behind[0].full_name, "f3/hello");
        assert_eq!(report.buckets.behind[0].behind_by, 7);
        assert_eq!(report.buckets.unknown[0].full_name, "gone/hello");
        assert!(report.buckets.diverged.is_empty());
        assert_eq!(report.branch, "main");
    }

    #[tokio::test]
    async fn branch_sort_fetches_branch_counts() {
        let server = MockServer::start().await;
        mount_json(&server, "/repos/octocat/hello", repository_body(2)).await;
        mount_json(
            &server,
            "/repos/octocat/hello/forks",
            json!([
                fork_body("f1/hello", 0, "2024-01-01T00:00:00Z"),
                fork_body("f2/hello", 0, "2024-01-01T00:00:00Z"),
            ]),
        )
        .await;
        for fork in ["f1", "f2"] {
            mount_json(
                &server,
                &format!("/repos/{}/hello/compare/octocat:main...main", fork),
                json!({ "status": "ahead", "ahead_by": 1, "behind_by": 0 }),
            )
            .await;
        }
        mount_json(&server, "/repos/f1/hello/branches", json!([{ "name": "main" }])).await;
        mount_json(
            &server,
            "/repos/f2/hello/branches",
            json!([{ "name": "main" }, { "name": "dev" }, { "name": "wip" }]),
        )
        .await;

        let forge = forge_for(&server);
        let request = ScanRequest::new(slug()).with_sort(SortKey::Branches);
        let report = scan(&forge, &request, &NoopObserver).await.unwrap();

        assert!(report.branches_counted);
        assert_eq!(report.buckets.ahead[0].full_name, "f2/hello");
        assert_eq!(report.buckets.ahead[0].branches, Some(3));
        assert_eq!(report.buckets.ahead[1].branches, Some(1));
    }
}
