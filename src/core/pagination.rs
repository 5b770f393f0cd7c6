//! core::pagination
//!
//! Turn a fork count and a requested page into the pages to fetch.
//!
//! # Rules
//!
//! Applied in order, with a fixed page size of [`PAGE_SIZE`]:
//!
//! 1. `total_pages = ceil(fork_count / 100)`
//! 2. A page past the last one is clamped to page 1 (warning)
//! 3. Page `-1` fetches every page
//! 4. Any other page below 1 is clamped to page 1, one page only,
//!    requesting a full page of 100 (warning)
//! 5. A specific page fetches that page alone. With more than 100 forks,
//!    requesting page N fetches page N only, never pages 1..N.
//!
//! # Example
//!
//! ```
//! use forkscout::core::pagination::{plan, PageNotice};
//!
//! let all = plan(250, -1);
//! assert_eq!(all.pages(), 1..=3);
//! assert_eq!(all.per_page, 100);
//!
//! let single = plan(250, 2);
//! assert_eq!(single.pages(), 2..=2);
//!
//! let clamped = plan(50, 5);
//! assert_eq!(clamped.pages(), 1..=1);
//! assert_eq!(clamped.notices[0], PageNotice::OutOfRange { max: 1 });
//! ```

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

/// Maximum number of forks the API returns per page.
pub const PAGE_SIZE: u64 = 100;

/// Something the user should know about how their page request was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PageNotice {
    /// Requested page was past the last page; showing page 1.
    OutOfRange { max: u64 },
    /// Requested page was below 1 (and not -1); showing page 1.
    BelowFirst,
    /// More than one page exists; only the first is shown.
    FirstPageOnly,
    /// More than one page exists; only the requested page is shown.
    SinglePage { page: u64 },
    /// More than one page exists and all of them are fetched.
    AllPages,
}

impl PageNotice {
    /// Warnings flag a request that was corrected; the rest are informational.
    pub fn is_warning(&self) -> bool {
        matches!(self, PageNotice::OutOfRange { .. } | PageNotice::BelowFirst)
    }
}

impl fmt::Display for PageNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNotice::OutOfRange { max } => {
                write!(f, "The page is out of range (max. {}), showing page 1", max)
            }
            PageNotice::BelowFirst => {
                write!(f, "The page number is lower than 1, showing page 1")
            }
            PageNotice::FirstPageOnly => write!(
                f,
                "More than {} forks found, only showing the first {} (use --page to get other results)",
                PAGE_SIZE, PAGE_SIZE
            ),
            PageNotice::SinglePage { page } => {
                write!(f, "More than {} forks found, showing page {}", PAGE_SIZE, page)
            }
            PageNotice::AllPages => write!(
                f,
                "More than {} forks found, showing all pages because --page is -1",
                PAGE_SIZE
            ),
        }
    }
}

/// The concrete pages to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagePlan {
    pub first_page: u64,
    /// Inclusive. Less than `first_page` when there is nothing to fetch.
    pub last_page: u64,
    /// Forks to request per page (the effective fork count of one request).
    pub per_page: u64,
    /// Pages available for the fork count.
    pub total_pages: u64,
    pub notices: Vec<PageNotice>,
}

impl PagePlan {
    /// Inclusive range of page numbers to fetch.
    pub fn pages(&self) -> RangeInclusive<u64> {
        self.first_page..=self.last_page
    }

    /// Number of pages to fetch.
    pub fn page_count(&self) -> u64 {
        (self.last_page + 1).saturating_sub(self.first_page)
    }

    /// True when there is nothing to fetch.
    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    fn single(page: u64, per_page: u64, total_pages: u64, notices: Vec<PageNotice>) -> Self {
        Self {
            first_page: page,
            last_page: page,
            per_page,
            total_pages,
            notices,
        }
    }
}

/// Number of pages needed for `fork_count` forks.
pub fn total_pages(fork_count: u64) -> u64 {
    fork_count.div_ceil(PAGE_SIZE)
}

/// Plan the pages to fetch for `fork_count` forks when the user asked for `page`.
pub fn plan(fork_count: u64, page: i64) -> PagePlan {
    let total = total_pages(fork_count);
    if total == 0 {
        return PagePlan {
            first_page: 1,
            last_page: 0,
            per_page: 0,
            total_pages: 0,
            notices: Vec::new(),
        };
    }

    let mut notices = Vec::new();
    let mut page = page;

    if page > 0 && page as u64 > total {
        notices.push(PageNotice::OutOfRange { max: total });
        page = 1;
    }

    if page == -1 {
        if fork_count > PAGE_SIZE {
            notices.push(PageNotice::AllPages);
        }
        return PagePlan {
            first_page: 1,
            last_page: total,
            per_page: fork_count.min(PAGE_SIZE),
            total_pages: total,
            notices,
        };
    }

    if page < 1 {
        notices.push(PageNotice::BelowFirst);
        return PagePlan::single(1, PAGE_SIZE, total, notices);
    }

    let page = page as u64;
    if fork_count > PAGE_SIZE {
        notices.push(if page == 1 {
            PageNotice::FirstPageOnly
        } else {
            PageNotice::SinglePage { page }
        });
    }
    PagePlan::single(page, fork_count.min(PAGE_SIZE), total, notices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(100), 1);
        assert_eq!(total_pages(101), 2);
        assert_eq!(total_pages(250), 3);
        assert_eq!(total_pages(300), 3);
    }

    #[test]
    fn no_forks_means_nothing_to_fetch() {
        let p = plan(0, 1);
        assert!(p.is_empty());
        assert_eq!(p.page_count(), 0);
        assert_eq!(p.total_pages, 0);
        assert!(p.notices.is_empty());
    }

    #[test]
    fn small_repo_first_page() {
        let p = plan(42, 1);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(p.per_page, 42);
        assert!(p.notices.is_empty());
    }

    #[test]
    fn large_repo_first_page_only() {
        let p = plan(250, 1);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(p.per_page, 100);
        assert_eq!(p.notices, vec![PageNotice::FirstPageOnly]);
    }

    #[test]
    fn large_repo_specific_page_fetches_only_that_page() {
        let p = plan(250, 3);
        assert_eq!(p.pages(), 3..=3);
        assert_eq!(p.page_count(), 1);
        assert_eq!(p.per_page, 100);
        assert_eq!(p.notices, vec![PageNotice::SinglePage { page: 3 }]);
    }

    #[test]
    fn all_pages() {
        let p = plan(250, -1);
        assert_eq!(p.pages(), 1..=3);
        assert_eq!(p.per_page, 100);
        assert_eq!(p.notices, vec![PageNotice::AllPages]);
    }

    #[test]
    fn all_pages_on_small_repo() {
        let p = plan(30, -1);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(p.per_page, 30);
        assert!(p.notices.is_empty());
    }

    #[test]
    fn out_of_range_clamps_to_first_page() {
        let p = plan(50, 5);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(p.per_page, 50);
        assert_eq!(p.notices, vec![PageNotice::OutOfRange { max: 1 }]);
        assert!(p.notices[0].is_warning());
    }

    #[test]
    fn out_of_range_on_large_repo_also_notes_first_page() {
        let p = plan(250, 9);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(
            p.notices,
            vec![PageNotice::OutOfRange { max: 3 }, PageNotice::FirstPageOnly]
        );
    }

    #[test]
    fn zero_and_negative_pages_clamp() {
        for page in [0, -2, -100, i64::MIN] {
            let p = plan(50, page);
            assert_eq!(p.pages(), 1..=1, "page {}", page);
            assert_eq!(p.per_page, 100, "page {}", page);
            assert_eq!(p.notices, vec![PageNotice::BelowFirst], "page {}", page);
        }
    }

    #[test]
    fn below_first_on_large_repo_is_single_page() {
        let p = plan(1000, 0);
        assert_eq!(p.pages(), 1..=1);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let p = plan(250, i64::MAX);
        assert_eq!(p.pages(), 1..=1);
    }

    #[test]
    fn notice_messages() {
        assert!(PageNotice::OutOfRange { max: 4 }
            .to_string()
            .contains("max. 4"));
        assert!(PageNotice::SinglePage { page: 2 }
            .to_string()
            .contains("showing page 2"));
        assert!(!PageNotice::AllPages.is_warning());
        assert!(PageNotice::BelowFirst.is_warning());
    }
}
