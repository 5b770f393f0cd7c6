//! core::classify
//!
//! Partition forks into buckets by comparison status.
//!
//! # Invariants
//!
//! - Every input record lands in exactly one bucket
//! - Within a bucket, records keep their input order
//! - Records the remote could not compare land in `unknown`
//!
//! # Example
//!
//! ```
//! use forkscout::core::classify::{classify, BucketKind};
//! use forkscout::core::types::{Comparison, ComparisonStatus, ForkRecord};
//!
//! let mut ahead = ForkRecord::new("alice/repo", "https://github.com/alice/repo");
//! ahead.apply_comparison(Comparison {
//!     status: ComparisonStatus::Ahead,
//!     ahead_by: 4,
//!     behind_by: 0,
//! });
//! let unknown = ForkRecord::new("bob/repo", "https://github.com/bob/repo");
//!
//! let buckets = classify(vec![ahead, unknown]);
//! assert_eq!(buckets.get(BucketKind::Ahead).len(), 1);
//! assert_eq!(buckets.get(BucketKind::Unknown).len(), 1);
//! assert_eq!(buckets.len(), 2);
//! ```

use std::fmt;

use serde::Serialize;

use super::types::{ComparisonStatus, ForkRecord};

/// One of the five classification groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    Ahead,
    Behind,
    Diverged,
    Identical,
    Unknown,
}

impl BucketKind {
    /// All buckets in classification order.
    pub const ALL: [BucketKind; 5] = [
        BucketKind::Ahead,
        BucketKind::Behind,
        BucketKind::Diverged,
        BucketKind::Identical,
        BucketKind::Unknown,
    ];

    /// The bucket a status belongs to.
    pub fn for_status(status: ComparisonStatus) -> Self {
        match status {
            ComparisonStatus::Ahead => BucketKind::Ahead,
            ComparisonStatus::Behind => BucketKind::Behind,
            ComparisonStatus::Diverged => BucketKind::Diverged,
            ComparisonStatus::Identical => BucketKind::Identical,
            ComparisonStatus::Unknown => BucketKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketKind::Ahead => "ahead",
            BucketKind::Behind => "behind",
            BucketKind::Diverged => "diverged",
            BucketKind::Identical => "identical",
            BucketKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forks grouped by comparison status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    pub ahead: Vec<ForkRecord>,
    pub behind: Vec<ForkRecord>,
    pub diverged: Vec<ForkRecord>,
    pub identical: Vec<ForkRecord>,
    pub unknown: Vec<ForkRecord>,
}

impl Buckets {
    /// Append a record to the bucket matching its status.
    pub fn push(&mut self, record: ForkRecord) {
        let kind = BucketKind::for_status(record.status);
        self.get_mut(kind).push(record);
    }

    /// Records in a bucket.
    pub fn get(&self, kind: BucketKind) -> &[ForkRecord] {
        match kind {
            BucketKind::Ahead => &self.ahead,
            BucketKind::Behind => &self.behind,
            BucketKind::Diverged => &self.diverged,
            BucketKind::Identical => &self.identical,
            BucketKind::Unknown => &self.unknown,
        }
    }

    /// Mutable access to a bucket.
    pub fn get_mut(&mut self, kind: BucketKind) -> &mut Vec<ForkRecord> {
        match kind {
            BucketKind::Ahead => &mut self.ahead,
            BucketKind::Behind => &mut self.behind,
            BucketKind::Diverged => &mut self.diverged,
            BucketKind::Identical => &mut self.identical,
            BucketKind::Unknown => &mut self.unknown,
        }
    }

    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        BucketKind::ALL.iter().map(|kind| self.get(*kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition records into buckets by status.
pub fn classify<I>(records: I) -> Buckets
where
    I: IntoIterator<Item = ForkRecord>,
{
    let mut buckets = Buckets::default();
    for record in records {
        buckets.push(record);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Comparison;

    fn fork(name: &str, status: ComparisonStatus) -> ForkRecord {
        let mut record = ForkRecord::new(name, format!("https://github.com/{}", name));
        record.apply_comparison(Comparison {
            status,
            ahead_by: 1,
            behind_by: 1,
        });
        record
    }

    #[test]
    fn each_status_lands_in_its_bucket() {
        let buckets = classify(vec![
            fork("a/r", ComparisonStatus::Ahead),
            fork("b/r", ComparisonStatus::Behind),
            fork("c/r", ComparisonStatus::Diverged),
            fork("d/r", ComparisonStatus::Identical),
            fork("e/r", ComparisonStatus::Unknown),
        ]);

        assert_eq!(buckets.ahead[0].full_name, "a/r");
        assert_eq!(buckets.behind[0].full_name, "b/r");
        assert_eq!(buckets.diverged[0].full_name, "c/r");
        assert_eq!(buckets.identical[0].full_name, "d/r");
        assert_eq!(buckets.unknown[0].full_name, "e/r");
        for kind in BucketKind::ALL {
            assert_eq!(buckets.get(kind).len(), 1, "bucket {}", kind);
        }
    }

    #[test]
    fn empty_api_status_is_unknown() {
        let mut record = ForkRecord::new("gone/repo", "");
        record.apply_comparison(Comparison {
            status: ComparisonStatus::from_api(""),
            ahead_by: 0,
            behind_by: 0,
        });
        let buckets = classify(vec![record]);
        assert_eq!(buckets.unknown.len(), 1);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn input_order_is_preserved_within_bucket() {
        let buckets = classify(vec![
            fork("first/r", ComparisonStatus::Ahead),
            fork("x/r", ComparisonStatus::Behind),
            fork("second/r", ComparisonStatus::Ahead),
            fork("third/r", ComparisonStatus::Ahead),
        ]);

        let names: Vec<_> = buckets.ahead.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["first/r", "second/r", "third/r"]);
    }

    #[test]
    fn empty_input_gives_empty_buckets() {
        let buckets = classify(Vec::new());
        assert!(buckets.is_empty());
        assert_eq!(buckets, Buckets::default());
    }

    #[test]
    fn bucket_kind_display() {
        assert_eq!(BucketKind::Diverged.to_string(), "diverged");
        assert_eq!(
            BucketKind::for_status(ComparisonStatus::Identical),
            BucketKind::Identical
        );
    }
}
