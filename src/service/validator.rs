use derive_more::Error;
use std::fmt;
use strum_macros::Display;

use crate::model::catalog;
use crate::model::leave_request::LeaveCandidate;

/// Identifier of a violated submission rule.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Violation {
    StudentNameEmpty,
    StudentIdEmpty,
    EmailEmpty,
    ReasonEmpty,
    YearOutOfRange,
    AttendanceOutOfRange,
    BatchNotInBranch,
    LeaveTypeNotExclusive,
    DateRangeInverted,
    MentorMismatch,
}

#[derive(Debug, Error)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<String> = self.violations.iter().map(Violation::to_string).collect();
        write!(f, "violated rules: {}", rules.join(", "))
    }
}

/// Checks every submission rule and reports all violations at once. Pure:
/// depends only on the candidate and the static catalog.
pub fn validate(candidate: &LeaveCandidate) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if candidate.student_name.trim().is_empty() {
        violations.push(Violation::StudentNameEmpty);
    }
    if candidate.student_id.trim().is_empty() {
        violations.push(Violation::StudentIdEmpty);
    }
    if candidate.email.trim().is_empty() {
        violations.push(Violation::EmailEmpty);
    }
    if candidate.reason.trim().is_empty() {
        violations.push(Violation::ReasonEmpty);
    }

    match candidate.year.trim().parse::<u32>() {
        Ok(year) if (1..=4).contains(&year) => {}
        _ => violations.push(Violation::YearOutOfRange),
    }

    // contains() is false for NaN as well
    if !(0.0..=100.0).contains(&candidate.attendance) {
        violations.push(Violation::AttendanceOutOfRange);
    }

    if !candidate.branch.has_batch(&candidate.batch) {
        violations.push(Violation::BatchNotInBranch);
    }

    // exactly one leave type, not "at most one"
    if candidate.authorized_leave == candidate.special_leave {
        violations.push(Violation::LeaveTypeNotExclusive);
    }

    if candidate.start_date > candidate.end_date {
        violations.push(Violation::DateRangeInverted);
    }

    // Hard gate: the named teacher must be the mentor assigned to the batch,
    // compared case-sensitively.
    if catalog::mentor_for(&candidate.batch) != Some(candidate.teacher.as_str()) {
        violations.push(Violation::MentorMismatch);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
