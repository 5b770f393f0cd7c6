//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge holds one repository, its forks, and per-fork comparison
//! results in memory. Forks without a configured comparison behave like
//! deleted or private forks: `compare` returns `NotFound`. Every call is
//! recorded so tests can assert on request order and count.
//!
//! # Example
//!
//! ```
//! use forkscout::forge::mock::MockForge;
//! use forkscout::forge::Forge;
//! use forkscout::core::types::{Comparison, ComparisonStatus, ForkRecord, RepoSlug};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new("octocat", "main")
//!     .with_fork(ForkRecord::new("alice/hello", "https://github.com/alice/hello"))
//!     .with_comparison("alice/hello", Comparison {
//!         status: ComparisonStatus::Ahead,
//!         ahead_by: 2,
//!         behind_by: 0,
//!     });
//!
//! let slug = RepoSlug::parse("octocat/hello").unwrap();
//! let info = forge.get_repository(&slug).await.unwrap();
//! assert_eq!(info.fork_count, 1);
//!
//! let forks = forge.list_forks(&slug, 1, 100).await.unwrap();
//! assert_eq!(forks.len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::{Forge, ForgeError};
use crate::core::types::{Comparison, ForkRecord, RepoSlug, RepositoryInfo};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug)]
struct MockForgeInner {
    owner_login: String,
    default_branch: String,
    /// Overrides the fork count reported by `get_repository`.
    reported_fork_count: Option<u64>,
    forks: Vec<ForkRecord>,
    comparisons: HashMap<String, Comparison>,
    branch_counts: HashMap<String, u64>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_repository with the given error.
    GetRepository(ForgeError),
    /// Fail list_forks with the given error.
    ListForks(ForgeError),
    /// Fail every branch_count call with the given error.
    BranchCount(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetRepository {
        repo: String,
    },
    ListForks {
        repo: String,
        page: u64,
        per_page: u64,
    },
    Compare {
        fork: String,
        base_owner: String,
        branch: String,
    },
    BranchCount {
        fork: String,
    },
}

impl MockForge {
    /// Create a mock repository owned by `owner_login` with no forks.
    pub fn new(owner_login: impl Into<String>, default_branch: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                owner_login: owner_login.into(),
                default_branch: default_branch.into(),
                reported_fork_count: None,
                forks: Vec::new(),
                comparisons: HashMap::new(),
                branch_counts: HashMap::new(),
                fail_on: None,
                operations: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MockForgeInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a fork to the listing.
    pub fn with_fork(self, fork: ForkRecord) -> Self {
        self.lock().forks.push(fork);
        self
    }

    /// Set the comparison result for a fork.
    pub fn with_comparison(self, fork: &str, comparison: Comparison) -> Self {
        self.lock().comparisons.insert(fork.to_string(), comparison);
        self
    }

    /// Set the branch count for a fork.
    pub fn with_branch_count(self, fork: &str, count: u64) -> Self {
        self.lock().branch_counts.insert(fork.to_string(), count);
        self
    }

    /// Report `count` forks regardless of how many are listed.
    pub fn with_reported_fork_count(self, count: u64) -> Self {
        self.lock().reported_fork_count = Some(count);
        self
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    /// Count recorded operations matching a predicate.
    pub fn count_operations(&self, predicate: impl Fn(&MockOperation) -> bool) -> usize {
        self.lock().operations.iter().filter(|op| predicate(op)).count()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_repository(&self, repo: &RepoSlug) -> Result<RepositoryInfo, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::GetRepository {
            repo: repo.full_name(),
        });

        if let Some(FailOn::GetRepository(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        Ok(RepositoryInfo {
            fork_count: inner
                .reported_fork_count
                .unwrap_or(inner.forks.len() as u64),
            owner_login: inner.owner_login.clone(),
            default_branch: inner.default_branch.clone(),
        })
    }

    async fn list_forks(
        &self,
        repo: &RepoSlug,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<ForkRecord>, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::ListForks {
            repo: repo.full_name(),
            page,
            per_page,
        });

        if let Some(FailOn::ListForks(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        let skip = page.saturating_sub(1).saturating_mul(per_page) as usize;
        Ok(inner
            .forks
            .iter()
            .skip(skip)
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn compare(
        &self,
        fork: &str,
        base_owner: &str,
        branch: &str,
    ) -> Result<Comparison, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::Compare {
            fork: fork.to_string(),
            base_owner: base_owner.to_string(),
            branch: branch.to_string(),
        });

        inner
            .comparisons
            .get(fork)
            .copied()
            .ok_or_else(|| ForgeError::NotFound(fork.to_string()))
    }

    async fn branch_count(&self, fork: &str) -> Result<u64, ForgeError> {
        let mut inner = self.lock();
        inner.operations.push(MockOperation::BranchCount {
            fork: fork.to_string(),
        });

        if let Some(FailOn::BranchCount(err)) = &inner.fail_on {
            return Err(err.clone());
        }

        inner
            .branch_counts
            .get(fork)
            .copied()
            .ok_or_else(|| ForgeError::NotFound(fork.to_string()))
    }
}
