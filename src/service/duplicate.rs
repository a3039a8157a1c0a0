use crate::model::leave_request::LeaveRequest;

/// True when two requests cover overlapping days for the same stated reason.
/// Date ranges are inclusive whole days, so [01-01, 01-03] and [01-03, 01-05]
/// overlap while [01-01, 01-02] and [01-03, 01-04] do not. Reasons compare
/// trimmed and case-insensitively.
pub fn conflicts(new: &LeaveRequest, existing: &LeaveRequest) -> bool {
    dates_overlap(new, existing) && reasons_match(&new.reason, &existing.reason)
}

/// Checks `candidate` against a student's existing pending requests. Every
/// record is considered; the scan stops at the first conflict.
pub fn is_duplicate(candidate: &LeaveRequest, pending: &[LeaveRequest]) -> bool {
    pending.iter().any(|existing| conflicts(candidate, existing))
}

fn dates_overlap(a: &LeaveRequest, b: &LeaveRequest) -> bool {
    a.start_date <= b.end_date && b.start_date <= a.end_date
}

fn reasons_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
