//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`RepoSlug`] - Validated `owner/name` repository identifier
//! - [`ComparisonStatus`] - Divergence of a fork from the reference branch
//! - [`Comparison`] - Result of comparing a fork against the reference branch
//! - [`ForkRecord`] - One fork of the reference repository
//! - [`RepositoryInfo`] - The reference repository itself
//! - [`SortKey`] - Ranking key for fork buckets
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use forkscout::core::types::{ComparisonStatus, RepoSlug, SortKey};
//!
//! let slug = RepoSlug::parse("octocat/hello-world").unwrap();
//! assert_eq!(slug.full_name(), "octocat/hello-world");
//!
//! assert_eq!(ComparisonStatus::from_api("diverged"), ComparisonStatus::Diverged);
//! assert_eq!(ComparisonStatus::from_api(""), ComparisonStatus::Unknown);
//!
//! assert_eq!(SortKey::parse_lenient("stars"), SortKey::Stars);
//! assert_eq!(SortKey::parse_lenient("nonsense"), SortKey::Ahead);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid repository '{0}': expected owner/name")]
    InvalidRepoSlug(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}

/// A validated `owner/name` repository identifier.
///
/// Accepts the bare `owner/name` form as well as GitHub web and clone
/// URLs, which are reduced to their owner and name.
///
/// # Example
///
/// ```
/// use forkscout::core::types::RepoSlug;
///
/// let slug = RepoSlug::parse("https://github.com/octocat/hello-world.git").unwrap();
/// assert_eq!(slug.owner(), "octocat");
/// assert_eq!(slug.name(), "hello-world");
///
/// assert!(RepoSlug::parse("just-a-name").is_err());
/// assert!(RepoSlug::parse("a/b/c").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    owner: String,
    name: String,
}

impl RepoSlug {
    /// Parse a repository identifier.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRepoSlug` unless the input has exactly one
    /// `/` separating two non-empty, whitespace-free components.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let trimmed = input.trim();
        let rest = strip_github_prefix(trimmed).unwrap_or(trimmed);
        let rest = rest.strip_suffix(".git").unwrap_or(rest);
        let rest = rest.trim_end_matches('/');

        let mut parts = rest.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if valid_component(owner) && valid_component(name) => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(TypeError::InvalidRepoSlug(input.to_string())),
        }
    }

    /// Repository owner (user or organization).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `owner/name` form used in API paths.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn strip_github_prefix(input: &str) -> Option<&str> {
    input
        .strip_prefix("https://github.com/")
        .or_else(|| input.strip_prefix("http://github.com/"))
        .or_else(|| input.strip_prefix("git@github.com:"))
        .or_else(|| input.strip_prefix("github.com/"))
}

fn valid_component(component: &str) -> bool {
    !component.is_empty() && !component.chars().any(char::is_whitespace)
}

/// Divergence of a fork's branch from the reference branch.
///
/// `Unknown` covers forks the remote cannot compare: deleted forks,
/// private forks, or forks missing the branch entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// The fork has commits the reference branch lacks.
    Ahead,
    /// The reference branch has commits the fork lacks.
    Behind,
    /// Both sides have commits the other lacks.
    Diverged,
    /// Same tip commit.
    Identical,
    /// Comparison unavailable.
    #[default]
    Unknown,
}

impl ComparisonStatus {
    /// Map the remote API's status string onto a status.
    ///
    /// Anything unrecognized, including the empty string, is `Unknown`.
    pub fn from_api(status: &str) -> Self {
        match status {
            "ahead" => ComparisonStatus::Ahead,
            "behind" => ComparisonStatus::Behind,
            "diverged" => ComparisonStatus::Diverged,
            "identical" => ComparisonStatus::Identical,
            _ => ComparisonStatus::Unknown,
        }
    }

    /// The status as the remote API spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonStatus::Ahead => "ahead",
            ComparisonStatus::Behind => "behind",
            ComparisonStatus::Diverged => "diverged",
            ComparisonStatus::Identical => "identical",
            ComparisonStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing a fork's branch against the reference branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Comparison {
    pub status: ComparisonStatus,
    pub ahead_by: u64,
    pub behind_by: u64,
}

/// One fork of the reference repository.
///
/// Created from a page of the fork listing with status `Unknown`, then
/// filled in by [`ForkRecord::apply_comparison`] and branch counting.
///
/// # Invariants
///
/// - `ahead_by` is zero unless the status is `Ahead` or `Diverged`
/// - `behind_by` is zero unless the status is `Behind` or `Diverged`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkRecord {
    /// `owner/repo` of the fork.
    pub full_name: String,
    /// Web URL of the fork.
    pub url: String,
    pub status: ComparisonStatus,
    pub ahead_by: u64,
    pub behind_by: u64,
    pub stars: u64,
    /// Only present when branch counting was requested and succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<u64>,
    /// Last push timestamp, ISO-8601 as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pushed_at: Option<String>,
}

impl ForkRecord {
    /// Create a record for a freshly listed fork.
    pub fn new(full_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            url: url.into(),
            status: ComparisonStatus::Unknown,
            ahead_by: 0,
            behind_by: 0,
            stars: 0,
            branches: None,
            pushed_at: None,
        }
    }

    /// Set the star count.
    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }

    /// Set the last push timestamp.
    pub fn with_pushed_at(mut self, pushed_at: impl Into<String>) -> Self {
        self.pushed_at = Some(pushed_at.into());
        self
    }

    /// Set the branch count.
    pub fn with_branches(mut self, branches: u64) -> Self {
        self.branches = Some(branches);
        self
    }

    /// Record the outcome of comparing this fork with the reference branch.
    ///
    /// Counts that are meaningless for the resulting status are zeroed.
    pub fn apply_comparison(&mut self, comparison: Comparison) {
        self.status = comparison.status;
        let (ahead, behind) = match comparison.status {
            ComparisonStatus::Ahead => (comparison.ahead_by, 0),
            ComparisonStatus::Behind => (0, comparison.behind_by),
            ComparisonStatus::Diverged => (comparison.ahead_by, comparison.behind_by),
            ComparisonStatus::Identical | ComparisonStatus::Unknown => (0, 0),
        };
        self.ahead_by = ahead;
        self.behind_by = behind;
    }

    /// Mark the fork as impossible to compare.
    pub fn mark_unknown(&mut self) {
        self.apply_comparison(Comparison::default());
    }
}

/// The reference repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub fork_count: u64,
    pub owner_login: String,
    pub default_branch: String,
}

/// Ranking key for the fork buckets.
///
/// The direction is fixed per key: `Behind` ranks ascending, every other
/// key ranks descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Stars,
    LastUpdated,
    #[default]
    Ahead,
    Behind,
    Branches,
}

impl SortKey {
    /// All keys, in the order they are listed in help output.
    pub const ALL: [SortKey; 5] = [
        SortKey::Stars,
        SortKey::Ahead,
        SortKey::Behind,
        SortKey::LastUpdated,
        SortKey::Branches,
    ];

    /// Parse a key, falling back to [`SortKey::Ahead`] on anything unknown.
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or_default()
    }

    /// The canonical spelling of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::LastUpdated => "lastUpdated",
            SortKey::Ahead => "ahead",
            SortKey::Behind => "behind",
            SortKey::Branches => "branches",
        }
    }

    /// Whether ranking by this key needs per-fork branch counts.
    pub fn needs_branch_counts(&self) -> bool {
        matches!(self, SortKey::Branches)
    }
}

impl FromStr for SortKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stars" | "star" => Ok(SortKey::Stars),
            "lastupdated" | "last-updated" | "last_updated" | "updated" | "pushed" => {
                Ok(SortKey::LastUpdated)
            }
            "ahead" => Ok(SortKey::Ahead),
            "behind" => Ok(SortKey::Behind),
            "branches" | "branch" => Ok(SortKey::Branches),
            _ => Err(TypeError::UnknownSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repo_slug {
        use super::*;

        #[test]
        fn plain_owner_name() {
            let slug = RepoSlug::parse("octocat/hello-world").unwrap();
            assert_eq!(slug.owner(), "octocat");
            assert_eq!(slug.name(), "hello-world");
            assert_eq!(slug.to_string(), "octocat/hello-world");
        }

        #[test]
        fn web_and_clone_urls() {
            for input in [
                "https://github.com/octocat/hello-world",
                "https://github.com/octocat/hello-world/",
                "https://github.com/octocat/hello-world.git",
                "git@github.com:octocat/hello-world.git",
                "github.com/octocat/hello-world",
            ] {
                let slug = RepoSlug::parse(input).unwrap();
                assert_eq!(slug.full_name(), "octocat/hello-world", "input: {}", input);
            }
        }

        #[test]
        fn repo_with_dots() {
            let slug = RepoSlug::parse("owner/repo.name").unwrap();
            assert_eq!(slug.name(), "repo.name");
        }

        #[test]
        fn invalid_forms() {
            assert!(RepoSlug::parse("").is_err());
            assert!(RepoSlug::parse("owner").is_err());
            assert!(RepoSlug::parse("/repo").is_err());
            assert!(RepoSlug::parse("owner/").is_err());
            assert!(RepoSlug::parse("a/b/c").is_err());
            assert!(RepoSlug::parse("own er/repo").is_err());
            assert!(RepoSlug::parse("https://gitlab.com/owner/repo").is_err());
        }
    }

    mod comparison_status {
        use super::*;

        #[test]
        fn known_statuses() {
            assert_eq!(ComparisonStatus::from_api("ahead"), ComparisonStatus::Ahead);
            assert_eq!(ComparisonStatus::from_api("behind"), ComparisonStatus::Behind);
            assert_eq!(
                ComparisonStatus::from_api("diverged"),
                ComparisonStatus::Diverged
            );
            assert_eq!(
                ComparisonStatus::from_api("identical"),
                ComparisonStatus::Identical
            );
        }

        #[test]
        fn anything_else_is_unknown() {
            assert_eq!(ComparisonStatus::from_api(""), ComparisonStatus::Unknown);
            assert_eq!(ComparisonStatus::from_api("Ahead"), ComparisonStatus::Unknown);
            assert_eq!(
                ComparisonStatus::from_api("private"),
                ComparisonStatus::Unknown
            );
        }

        #[test]
        fn serializes_lowercase() {
            let json = serde_json::to_string(&ComparisonStatus::Diverged).unwrap();
            assert_eq!(json, "\"diverged\"");
        }
    }

    mod fork_record {
        use super::*;

        #[test]
        fn new_record_is_unknown() {
            let record = ForkRecord::new("alice/repo", "https://github.com/alice/repo");
            assert_eq!(record.status, ComparisonStatus::Unknown);
            assert_eq!(record.ahead_by, 0);
            assert_eq!(record.behind_by, 0);
            assert!(record.branches.is_none());
        }

        #[test]
        fn apply_comparison_zeroes_irrelevant_counts() {
            let mut record = ForkRecord::new("alice/repo", "");
            record.apply_comparison(Comparison {
                status: ComparisonStatus::Ahead,
                ahead_by: 4,
                behind_by: 7,
            });
            assert_eq!((record.ahead_by, record.behind_by), (4, 0));

            record.apply_comparison(Comparison {
                status: ComparisonStatus::Behind,
                ahead_by: 3,
                behind_by: 2,
            });
            assert_eq!((record.ahead_by, record.behind_by), (0, 2));

            record.apply_comparison(Comparison {
                status: ComparisonStatus::Diverged,
                ahead_by: 3,
                behind_by: 2,
            });
            assert_eq!((record.ahead_by, record.behind_by), (3, 2));

            record.apply_comparison(Comparison {
                status: ComparisonStatus::Identical,
                ahead_by: 1,
                behind_by: 1,
            });
            assert_eq!((record.ahead_by, record.behind_by), (0, 0));
        }

        #[test]
        fn mark_unknown_clears_counts() {
            let mut record = ForkRecord::new("alice/repo", "");
            record.apply_comparison(Comparison {
                status: ComparisonStatus::Diverged,
                ahead_by: 3,
                behind_by: 2,
            });
            record.mark_unknown();
            assert_eq!(record.status, ComparisonStatus::Unknown);
            assert_eq!((record.ahead_by, record.behind_by), (0, 0));
        }
    }

    mod sort_key {
        use super::*;

        #[test]
        fn parses_canonical_names() {
            for key in SortKey::ALL {
                assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
            }
        }

        #[test]
        fn parses_aliases_case_insensitively() {
            assert_eq!("STARS".parse::<SortKey>().unwrap(), SortKey::Stars);
            assert_eq!(
                "last-updated".parse::<SortKey>().unwrap(),
                SortKey::LastUpdated
            );
            assert_eq!("pushed".parse::<SortKey>().unwrap(), SortKey::LastUpdated);
        }

        #[test]
        fn lenient_parse_falls_back_to_ahead() {
            assert_eq!(SortKey::parse_lenient("forks"), SortKey::Ahead);
            assert_eq!(SortKey::parse_lenient(""), SortKey::Ahead);
            assert_eq!(SortKey::parse_lenient("branches"), SortKey::Branches);
        }

        #[test]
        fn only_branches_needs_counts() {
            assert!(SortKey::Branches.needs_branch_counts());
            assert!(!SortKey::Stars.needs_branch_counts());
            assert!(!SortKey::Ahead.needs_branch_counts());
        }
    }
}
