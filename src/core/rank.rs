//! core::rank
//!
//! Ordering of fork buckets.
//!
//! # Directions
//!
//! | Key           | Direction                         |
//! |---------------|-----------------------------------|
//! | `stars`       | descending                        |
//! | `branches`    | descending (missing counts as 0)  |
//! | `ahead`       | descending                        |
//! | `behind`      | ascending                         |
//! | `lastUpdated` | descending, missing timestamps last |
//!
//! Timestamps are compared as strings. The API returns fixed-width,
//! zero-padded ISO-8601 values, so lexicographic order is time order.
//!
//! All sorts are stable: equal records keep their input order.
//!
//! # Per-bucket keys
//!
//! The active sort mode does not always make sense for every bucket.
//! See [`effective_key`] for how each bucket resolves its key.

use std::cmp::Ordering;

use super::classify::{BucketKind, Buckets};
use super::types::{ForkRecord, SortKey};

/// Compare two records under `key`, honouring the key's fixed direction.
pub fn compare(a: &ForkRecord, b: &ForkRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Stars => b.stars.cmp(&a.stars),
        SortKey::Branches => b.branches.unwrap_or(0).cmp(&a.branches.unwrap_or(0)),
        SortKey::Ahead => b.ahead_by.cmp(&a.ahead_by),
        SortKey::Behind => a.behind_by.cmp(&b.behind_by),
        // None < Some, so reversing puts forks without a timestamp last.
        SortKey::LastUpdated => b.pushed_at.cmp(&a.pushed_at),
    }
}

/// Sort records in place by `key`.
pub fn rank(records: &mut [ForkRecord], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

/// The key a bucket is actually ordered by under sort mode `mode`.
///
/// - `behind` ranks by `behind` when the mode is `ahead`
/// - `identical` and `unknown` carry no ahead/behind counts, so they rank
///   by `stars` when the mode is `ahead` or `behind`
/// - every other combination uses `mode` unchanged
pub fn effective_key(bucket: BucketKind, mode: SortKey) -> SortKey {
    match (bucket, mode) {
        (BucketKind::Behind, SortKey::Ahead) => SortKey::Behind,
        (BucketKind::Identical | BucketKind::Unknown, SortKey::Ahead | SortKey::Behind) => {
            SortKey::Stars
        }
        (_, mode) => mode,
    }
}

/// Sort every bucket by its effective key under `mode`.
pub fn rank_buckets(buckets: &mut Buckets, mode: SortKey) {
    for kind in BucketKind::ALL {
        rank(buckets.get_mut(kind), effective_key(kind, mode));
    }
}
