//! engine::scan
//!
//! The fork scan pipeline.
//!
//! # Stages
//!
//! ```text
//! repository lookup -> page plan -> fork listing -> enrichment -> classify -> rank
//! ```
//!
//! - Repository lookup and fork listing failures abort the scan
//! - Enrichment failures only degrade the affected fork: a failed
//!   comparison leaves it `Unknown`, a failed branch listing leaves its
//!   branch count empty
//! - Enrichment runs through an order-preserving bounded stream, so the
//!   result is identical to comparing forks one at a time
//! - A repository with zero forks ends the scan before any listing request
//!
//! # Example
//!
//! ```
//! use forkscout::engine::scan::{scan, NoopObserver, ScanRequest};
//! use forkscout::forge::mock::MockForge;
//! use forkscout::core::types::{ForkRecord, RepoSlug, SortKey};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new("octocat", "main")
//!     .with_fork(ForkRecord::new("alice/hello", "https://github.com/alice/hello"));
//!
//! let request = ScanRequest::new(RepoSlug::parse("octocat/hello").unwrap());
//! let report = scan(&forge, &request, &NoopObserver).await.unwrap();
//!
//! // No comparison configured: the fork could not be compared.
//! assert_eq!(report.buckets.unknown.len(), 1);
//! assert_eq!(report.branch, "main");
//! # });
//! ```

use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::core::classify::{classify, Buckets};
use crate::core::pagination::{self, PagePlan};
use crate::core::rank::rank_buckets;
use crate::core::types::{ForkRecord, RepoSlug, RepositoryInfo, SortKey};
use crate::forge::{Forge, ForgeError};

/// Errors that end a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The repository does not exist or is not visible with this token.
    #[error("repository {0} not found")]
    NotFound(String),

    /// The token was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other failure talking to the remote.
    #[error("{0}")]
    Api(ForgeError),

    /// The repository has no forks at all.
    #[error("no forks found for {0}")]
    NoForksFound(String),

    /// The scan did not finish in time.
    #[error("scan timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl ScanError {
    /// Map a repository-level forge failure.
    fn from_forge(repo: &RepoSlug, err: ForgeError) -> Self {
        match err {
            ForgeError::AuthFailed(message) => ScanError::Unauthorized(message),
            ForgeError::NotFound(_) => ScanError::NotFound(repo.full_name()),
            other => ScanError::Api(other),
        }
    }
}

/// What to scan and how to rank it.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub repo: RepoSlug,
    /// Reference branch; the repository's default branch when `None`.
    pub branch: Option<String>,
    /// Requested page. `-1` means every page.
    pub page: i64,
    pub sort: SortKey,
    /// Maximum number of forks enriched at once.
    pub concurrency: usize,
}

impl ScanRequest {
    /// A request for page 1 of `repo`, default branch, ranked by `ahead`.
    pub fn new(repo: RepoSlug) -> Self {
        Self {
            repo,
            branch: None,
            page: 1,
            sort: SortKey::default(),
            concurrency: 1,
        }
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// `owner/name` of the scanned repository.
    pub repo: String,
    pub repository: RepositoryInfo,
    /// The branch every fork was compared against.
    pub branch: String,
    pub sort: SortKey,
    pub plan: PagePlan,
    pub buckets: Buckets,
    /// Whether branch counts were requested for this scan.
    pub branches_counted: bool,
}

/// Receives progress events while a scan runs.
///
/// All methods default to doing nothing.
pub trait ScanObserver: Send + Sync {
    /// The repository was found and the reference branch resolved.
    fn repository_found(&self, _repo: &RepoSlug, _info: &RepositoryInfo, _branch: &str) {}

    /// The pages to fetch are known.
    fn plan_ready(&self, _plan: &PagePlan) {}

    /// Another fork finished enrichment.
    fn fork_checked(&self, _done: usize, _total: usize) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// Run a scan.
pub async fn scan<F>(
    forge: &F,
    request: &ScanRequest,
    observer: &dyn ScanObserver,
) -> Result<ScanReport, ScanError>
where
    F: Forge + ?Sized,
{
    let repo = &request.repo;
    debug!("scanning {} via {}", repo, forge.name());

    let repository = forge
        .get_repository(repo)
        .await
        .map_err(|e| ScanError::from_forge(repo, e))?;

    let branch = request
        .branch
        .clone()
        .unwrap_or_else(|| repository.default_branch.clone());
    observer.repository_found(repo, &repository, &branch);

    if repository.fork_count == 0 {
        return Err(ScanError::NoForksFound(repo.full_name()));
    }

    let plan = pagination::plan(repository.fork_count, request.page);
    for notice in &plan.notices {
        debug!("page plan: {}", notice);
    }
    observer.plan_ready(&plan);

    let mut listed = Vec::new();
    for page in plan.pages() {
        let forks = forge
            .list_forks(repo, page, plan.per_page)
            .await
            .map_err(|e| ScanError::from_forge(repo, e))?;
        debug!("page {}: {} forks", page, forks.len());
        listed.extend(forks);
    }

    let count_branches = request.sort.needs_branch_counts();
    let total = listed.len();
    let base_owner = repository.owner_login.as_str();
    let branch_ref = branch.as_str();

    let mut enriched = stream::iter(listed)
        .map(|fork| enrich(forge, fork, base_owner, branch_ref, count_branches))
        .buffered(request.concurrency.max(1));

    let mut records = Vec::with_capacity(total);
    while let Some(record) = enriched.next().await {
        records.push(record);
        observer.fork_checked(records.len(), total);
    }
    drop(enriched);

    let mut buckets = classify(records);
    rank_buckets(&mut buckets, request.sort);
    info!(
        "{}: {} ahead, {} diverged, {} behind, {} identical, {} unknown",
        repo,
        buckets.ahead.len(),
        buckets.diverged.len(),
        buckets.behind.len(),
        buckets.identical.len(),
        buckets.unknown.len()
    );

    Ok(ScanReport {
        repo: repo.full_name(),
        repository,
        branch,
        sort: request.sort,
        plan,
        buckets,
        branches_counted: count_branches,
    })
}

/// Run a scan, giving up after `limit`.
///
/// Expiry drops the scan future along with every request still in flight.
pub async fn scan_with_timeout<F>(
    forge: &F,
    request: &ScanRequest,
    observer: &dyn ScanObserver,
    limit: Duration,
) -> Result<ScanReport, ScanError>
where
    F: Forge + ?Sized,
{
    tokio::time::timeout(limit, scan(forge, request, observer))
        .await
        .map_err(|_| ScanError::Timeout(limit))?
}

/// Compare one fork and, if asked, count its branches.
async fn enrich<F>(
    forge: &F,
    mut fork: ForkRecord,
    base_owner: &str,
    branch: &str,
    count_branches: bool,
) -> ForkRecord
where
    F: Forge + ?Sized,
{
    match forge.compare(&fork.full_name, base_owner, branch).await {
        Ok(comparison) => fork.apply_comparison(comparison),
        Err(err) => {
            if err == ForgeError::RateLimited {
                warn!("rate limited while comparing {}", fork.full_name);
            } else {
                debug!("cannot compare {}: {}", fork.full_name, err);
            }
            fork.mark_unknown();
            return fork;
        }
    }

    if count_branches {
        match forge.branch_count(&fork.full_name).await {
            Ok(count) => fork.branches = Some(count),
            Err(err) => debug!("cannot count branches of {}: {}", fork.full_name, err),
        }
    }

    fork
}
