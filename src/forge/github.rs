//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Endpoints
//!
//! - `GET /repos/{owner}/{repo}` - fork count, default branch, owner
//! - `GET /repos/{owner}/{repo}/forks?per_page=N&page=P` - fork listing
//! - `GET /repos/{fork}/compare/{owner}:{branch}...{branch}` - divergence
//! - `GET /repos/{fork}/branches?per_page=100&page=P` - branch count
//!
//! # Authentication
//!
//! Every request carries the token as a bearer `Authorization` header.
//! The token is held as a [`SecretString`] and never appears in `Debug`
//! output or logs.
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation:
//! - Returns `ForgeError::RateLimited` when limits are hit
//! - Does not retry (no request is attempted more than once)
//!
//! # Example
//!
//! ```ignore
//! use forkscout::forge::github::GitHubForge;
//! use forkscout::forge::Forge;
//! use forkscout::core::types::RepoSlug;
//! use secrecy::SecretString;
//!
//! let forge = GitHubForge::new(SecretString::from("ghp_xxx".to_string()))?;
//! let info = forge.get_repository(&RepoSlug::parse("octocat/hello-world")?).await?;
//! println!("{} forks", info.fork_count);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

use super::traits::{Forge, ForgeError};
use crate::core::config::DEFAULT_API_BASE;
use crate::core::types::{Comparison, ComparisonStatus, ForkRecord, RepoSlug, RepositoryInfo};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("forkscout/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Branches requested per page when counting.
const BRANCHES_PER_PAGE: usize = 100;

/// Hard stop for branch pagination.
const MAX_BRANCH_PAGES: u64 = 50;

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Bearer token sent with every request
    token: SecretString,
    /// API base URL (configurable for GitHub Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GitHubForge {
    /// Create a forge against api.github.com.
    ///
    /// # Errors
    ///
    /// Returns `ForgeError::NetworkError` if the HTTP client cannot be built.
    pub fn new(token: SecretString) -> Result<Self, ForgeError> {
        Self::with_options(token, DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a forge with a custom API base URL and per-request timeout.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g., `https://github.example.com/api/v3`) and for tests.
    pub fn with_options(
        token: SecretString,
        api_base: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, ForgeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .timeout(request_timeout)
            .build()
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            token,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API base URL requests are sent to.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|_| ForgeError::AuthFailed("token contains invalid characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, full_name: &str, path: &str) -> String {
        if path.is_empty() {
            format!("{}/repos/{}", self.api_base, full_name)
        } else {
            format!("{}/repos/{}/{}", self.api_base, full_name, path)
        }
    }

    /// Issue a GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, u64)],
    ) -> Result<T, ForgeError> {
        debug!("GET {} {:?}", url, query);
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .query(query)
            .send()
            .await
            .map_err(|e| ForgeError::NetworkError(e.to_string()))?;

        self.handle_response(response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ForgeError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ForgeError::Decode(e.to_string()))
        } else {
            Err(Self::error_from_response(response, status).await)
        }
    }

    /// Map an error response onto a `ForgeError`.
    async fn error_from_response(response: Response, status: StatusCode) -> ForgeError {
        // A 403 with an exhausted quota is a rate limit, not a bad token.
        let quota_exhausted = response
            .headers()
            .get("X-RateLimit-Remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };
        debug!("API error {}: {}", status, message);

        match status {
            StatusCode::UNAUTHORIZED => ForgeError::AuthFailed("Invalid or expired token".into()),
            StatusCode::FORBIDDEN if quota_exhausted => ForgeError::RateLimited,
            StatusCode::FORBIDDEN => ForgeError::AuthFailed(format!("Permission denied: {}", message)),
            StatusCode::NOT_FOUND => ForgeError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ForgeError::RateLimited,
            _ if status.is_server_error() => ForgeError::ApiError {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => ForgeError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_repository(&self, repo: &RepoSlug) -> Result<RepositoryInfo, ForgeError> {
        let url = self.repo_url(&repo.full_name(), "");
        let gh: GitHubRepository = self.get_json(&url, &[]).await.map_err(|e| match e {
            ForgeError::NotFound(_) => ForgeError::NotFound(repo.full_name()),
            other => other,
        })?;
        Ok(gh.into())
    }

    async fn list_forks(
        &self,
        repo: &RepoSlug,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<ForkRecord>, ForgeError> {
        let url = self.repo_url(&repo.full_name(), "forks");
        let forks: Vec<GitHubFork> = self
            .get_json(&url, &[("per_page", per_page), ("page", page)])
            .await?;
        Ok(forks.into_iter().map(ForkRecord::from).collect())
    }

    async fn compare(
        &self,
        fork: &str,
        base_owner: &str,
        branch: &str,
    ) -> Result<Comparison, ForgeError> {
        let url = self.repo_url(
            fork,
            &format!("compare/{}:{}...{}", base_owner, branch, branch),
        );
        let gh: GitHubComparison = self.get_json(&url, &[]).await?;
        Ok(gh.into())
    }

    async fn branch_count(&self, fork: &str) -> Result<u64, ForgeError> {
        let url = self.repo_url(fork, "branches");
        let mut total = 0u64;
        for page in 1..=MAX_BRANCH_PAGES {
            let branches: Vec<IgnoredAny> = self
                .get_json(&url, &[("per_page", BRANCHES_PER_PAGE as u64), ("page", page)])
                .await?;
            total += branches.len() as u64;
            if branches.len() < BRANCHES_PER_PAGE {
                return Ok(total);
            }
        }
        warn!("{}: branch count truncated at {}", fork, total);
        Ok(total)
    }
}

// --------------------------------------------------------------------------
// GitHub API response types
// --------------------------------------------------------------------------

/// Error body returned by the API.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    forks_count: u64,
    default_branch: String,
    owner: GitHubOwner,
}

impl From<GitHubRepository> for RepositoryInfo {
    fn from(gh: GitHubRepository) -> Self {
        RepositoryInfo {
            fork_count: gh.forks_count,
            owner_login: gh.owner.login,
            default_branch: gh.default_branch,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GitHubFork {
    full_name: String,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    pushed_at: Option<String>,
}

impl From<GitHubFork> for ForkRecord {
    fn from(gh: GitHubFork) -> Self {
        let url = gh
            .html_url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| format!("https://github.com/{}", gh.full_name));
        let mut record = ForkRecord::new(gh.full_name, url).with_stars(gh.stargazers_count);
        record.pushed_at = gh.pushed_at;
        record
    }
}

#[derive(Debug, Deserialize)]
struct GitHubComparison {
    #[serde(default)]
    status: String,
    #[serde(default)]
    ahead_by: u64,
    #[serde(default)]
    behind_by: u64,
}

impl From<GitHubComparison> for Comparison {
    fn from(gh: GitHubComparison) -> Self {
        Comparison {
            status: ComparisonStatus::from_api(&gh.status),
            ahead_by: gh.ahead_by,
            behind_by: gh.behind_by,
        }
    }
}
