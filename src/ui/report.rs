//! ui::report
//!
//! Rendering of a finished scan.
//!
//! Text output shows one table per bucket in the order ahead, diverged,
//! behind, and with `--verbose` also identical and unknown. Empty buckets
//! print a one-line notice instead of an empty table. JSON output is the
//! serialized [`ScanReport`].

use super::output::{format_reference, format_status, Marker};
use super::table::Table;
use crate::core::classify::BucketKind;
use crate::core::types::ForkRecord;
use crate::engine::scan::ScanReport;

/// Buckets shown without `--verbose`.
const DEFAULT_BUCKETS: [BucketKind; 3] =
    [BucketKind::Ahead, BucketKind::Diverged, BucketKind::Behind];

/// Buckets added by `--verbose`.
const VERBOSE_BUCKETS: [BucketKind; 2] = [BucketKind::Identical, BucketKind::Unknown];

const MASTER_HINT: &str = "No forks found on branch master, maybe try with main?";

/// Buckets rendered for the given verbosity, in display order.
pub fn visible_buckets(verbose: bool) -> Vec<BucketKind> {
    let mut kinds = DEFAULT_BUCKETS.to_vec();
    if verbose {
        kinds.extend(VERBOSE_BUCKETS);
    }
    kinds
}

fn heading(kind: BucketKind) -> (Marker, &'static str) {
    match kind {
        BucketKind::Ahead => (Marker::Success, "Forks ahead:"),
        BucketKind::Diverged => (Marker::Notice, "Forks diverged:"),
        BucketKind::Behind => (Marker::Warning, "Forks behind:"),
        BucketKind::Identical => (Marker::Notice, "Forks up to date:"),
        BucketKind::Unknown => (Marker::Notice, "Forks that could not be compared (deleted or private):"),
    }
}

/// Notice printed in place of an empty bucket.
pub fn empty_message(kind: BucketKind, owner: &str, branch: &str) -> String {
    let relation = match kind {
        BucketKind::Ahead => "ahead of",
        BucketKind::Diverged => "diverged from",
        BucketKind::Behind => "behind",
        BucketKind::Identical => "identical to",
        BucketKind::Unknown => "inaccessible from",
    };
    format!(
        "No forks {} {}",
        relation,
        format_reference(owner, branch)
    )
}

/// Column headers for a bucket.
pub fn columns(kind: BucketKind, with_branches: bool) -> Vec<&'static str> {
    let mut columns = vec!["Fork"];
    match kind {
        BucketKind::Ahead => columns.push("Ahead by"),
        BucketKind::Diverged => columns.extend(["Ahead by", "Behind by"]),
        BucketKind::Behind => columns.push("Behind by"),
        BucketKind::Identical | BucketKind::Unknown => {}
    }
    columns.extend(["Stars", "Last push"]);
    if with_branches && has_counts(kind) {
        columns.push("Branches");
    }
    columns.push("URL");
    columns
}

fn has_counts(kind: BucketKind) -> bool {
    matches!(
        kind,
        BucketKind::Ahead | BucketKind::Diverged | BucketKind::Behind
    )
}

/// One table row, matching [`columns`].
pub fn row(kind: BucketKind, record: &ForkRecord, with_branches: bool) -> Vec<String> {
    let mut cells = vec![record.full_name.clone()];
    match kind {
        BucketKind::Ahead => cells.push(record.ahead_by.to_string()),
        BucketKind::Diverged => {
            cells.push(record.ahead_by.to_string());
            cells.push(record.behind_by.to_string());
        }
        BucketKind::Behind => cells.push(record.behind_by.to_string()),
        BucketKind::Identical | BucketKind::Unknown => {}
    }
    cells.push(record.stars.to_string());
    cells.push(record.pushed_at.clone().unwrap_or_else(|| "-".to_string()));
    if with_branches && has_counts(kind) {
        cells.push(
            record
                .branches
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    cells.push(record.url.clone());
    cells
}

/// The hint for scans of `master` that found nothing comparable.
pub fn master_hint(report: &ScanReport) -> Option<&'static str> {
    let buckets = &report.buckets;
    let nothing = buckets.ahead.is_empty()
        && buckets.behind.is_empty()
        && buckets.identical.is_empty();
    (nothing && report.branch == "master").then_some(MASTER_HINT)
}

/// Render the report as text tables.
pub fn render_text(report: &ScanReport, verbose: bool) -> String {
    let owner = report.repository.owner_login.as_str();
    let mut out = String::new();

    for kind in visible_buckets(verbose) {
        let records = report.buckets.get(kind);
        if records.is_empty() {
            out.push_str(&format_status(
                Marker::Notice,
                empty_message(kind, owner, &report.branch),
            ));
            out.push('\n');
            continue;
        }

        let (marker, title) = heading(kind);
        out.push_str(&format_status(marker, title));
        out.push('\n');

        let mut table = Table::new(columns(kind, report.branches_counted));
        for record in records {
            table.push_row(row(kind, record, report.branches_counted));
        }
        out.push_str(&table.render());
    }

    if let Some(hint) = master_hint(report) {
        out.push_str(&format_status(Marker::Failure, hint));
        out.push('\n');
    }

    out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &ScanReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
