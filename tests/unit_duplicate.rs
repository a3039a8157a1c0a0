mod common;

use hlm::model::leave_request::LeaveRequest;
use hlm::service::duplicate::{conflicts, is_duplicate};

fn record(start: &str, end: &str, reason: &str) -> LeaveRequest {
    let mut c = common::candidate();
    c.start_date = common::date(start);
    c.end_date = common::date(end);
    c.reason = reason.to_string();
    let days = (c.end_date - c.start_date).num_days() as u32 + 1;
    c.into_pending(days)
}

#[test]
fn test_overlapping_same_reason_conflicts() {
    let a = record("2024-01-01", "2024-01-05", "Family function");
    let b = record("2024-01-04", "2024-01-08", "Family function");
    assert!(conflicts(&a, &b));
    assert!(conflicts(&b, &a));
}

#[test]
fn test_adjacent_day_overlap_conflicts() {
    // inclusive day ranges: sharing a single boundary day is an overlap
    let a = record("2024-01-01", "2024-01-03", "Family function");
    let b = record("2024-01-03", "2024-01-05", "Family function");
    assert!(conflicts(&a, &b));
}

#[test]
fn test_disjoint_ranges_do_not_conflict() {
    let a = record("2024-01-01", "2024-01-02", "Family function");
    let b = record("2024-01-03", "2024-01-04", "Family function");
    assert!(!conflicts(&a, &b));
    assert!(!conflicts(&b, &a));
}

#[test]
fn test_contained_range_conflicts() {
    let outer = record("2024-01-01", "2024-01-10", "Family function");
    let inner = record("2024-01-04", "2024-01-05", "Family function");
    assert!(conflicts(&inner, &outer));
}

#[test]
fn test_reason_comparison_ignores_case_and_whitespace() {
    let a = record("2024-01-01", "2024-01-03", "Family Function");
    let b = record("2024-01-02", "2024-01-04", "  family function  ");
    assert!(conflicts(&a, &b));
}

#[test]
fn test_different_reason_does_not_conflict() {
    let a = record("2024-01-01", "2024-01-03", "Family function");
    let b = record("2024-01-02", "2024-01-04", "Medical appointment");
    assert!(!conflicts(&a, &b));
}

#[test]
fn test_is_duplicate_scans_all_records() {
    let candidate = record("2024-02-01", "2024-02-03", "Sports meet");
    let pending = vec![
        record("2024-01-01", "2024-01-03", "Sports meet"),
        record("2024-01-10", "2024-01-12", "Family function"),
        record("2024-02-03", "2024-02-05", "sports meet"),
    ];
    assert!(is_duplicate(&candidate, &pending));

    let unrelated = record("2024-03-01", "2024-03-02", "Sports meet");
    assert!(!is_duplicate(&unrelated, &pending));
}

#[test]
fn test_is_duplicate_empty_set() {
    let candidate = record("2024-01-01", "2024-01-03", "Family function");
    assert!(!is_duplicate(&candidate, &[]));
}
