mod common;

use hlm::service::validator::{Violation, validate};

#[test]
fn test_valid_candidate_passes() {
    assert!(validate(&common::candidate()).is_ok());
}

#[test]
fn test_year_boundaries() {
    for year in ["1", "2", "3", "4"] {
        let mut c = common::candidate();
        c.year = year.to_string();
        assert!(validate(&c).is_ok(), "year {} should be accepted", year);
    }

    for year in ["0", "5", "abc", "", "2.5"] {
        let mut c = common::candidate();
        c.year = year.to_string();
        let err = validate(&c).unwrap_err();
        assert!(
            err.violations.contains(&Violation::YearOutOfRange),
            "year {:?} should be refused",
            year
        );
    }
}

#[test]
fn test_attendance_range() {
    for attendance in [0.0, 55.5, 100.0] {
        let mut c = common::candidate();
        c.attendance = attendance;
        assert!(validate(&c).is_ok());
    }

    for attendance in [-0.5, 100.5, f64::NAN] {
        let mut c = common::candidate();
        c.attendance = attendance;
        let err = validate(&c).unwrap_err();
        assert!(err.violations.contains(&Violation::AttendanceOutOfRange));
    }
}

#[test]
fn test_batch_must_belong_to_branch() {
    // C1 exists, but under BTECH CE
    let mut c = common::candidate();
    c.batch = "C1".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::BatchNotInBranch));

    let mut c = common::candidate();
    c.batch = "Z9".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::BatchNotInBranch));
}

#[test]
fn test_exactly_one_leave_type() {
    let mut c = common::candidate();
    c.authorized_leave = true;
    c.special_leave = true;
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::LeaveTypeNotExclusive));

    let mut c = common::candidate();
    c.authorized_leave = false;
    c.special_leave = false;
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::LeaveTypeNotExclusive));

    let mut c = common::candidate();
    c.authorized_leave = false;
    c.special_leave = true;
    assert!(validate(&c).is_ok());
}

#[test]
fn test_required_text_fields() {
    let mut c = common::candidate();
    c.student_name = "   ".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::StudentNameEmpty));

    let mut c = common::candidate();
    c.student_id = String::new();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::StudentIdEmpty));

    let mut c = common::candidate();
    c.email = String::new();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::EmailEmpty));

    let mut c = common::candidate();
    c.reason = " ".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::ReasonEmpty));
}

#[test]
fn test_date_range_order() {
    let mut c = common::candidate();
    c.start_date = common::date("2024-01-05");
    c.end_date = common::date("2024-01-03");
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::DateRangeInverted));

    // equal dates are a one-day leave
    let mut c = common::candidate();
    c.start_date = common::date("2024-01-03");
    c.end_date = common::date("2024-01-03");
    assert!(validate(&c).is_ok());
}

#[test]
fn test_mentor_must_match_batch() {
    // DJ is a real mentor, just not for batch A1
    let mut c = common::candidate();
    c.teacher = "DJ".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::MentorMismatch));

    // comparison is case-sensitive
    let mut c = common::candidate();
    c.teacher = "sugam shivare".to_string();
    let err = validate(&c).unwrap_err();
    assert!(err.violations.contains(&Violation::MentorMismatch));
}

#[test]
fn test_all_violations_reported_together() {
    let mut c = common::candidate();
    c.year = "7".to_string();
    c.attendance = 140.0;
    c.reason = String::new();
    c.teacher = "Rehan".to_string();
    let err = validate(&c).unwrap_err();

    assert!(err.violations.contains(&Violation::YearOutOfRange));
    assert!(err.violations.contains(&Violation::AttendanceOutOfRange));
    assert!(err.violations.contains(&Violation::ReasonEmpty));
    assert!(err.violations.contains(&Violation::MentorMismatch));
    assert_eq!(err.violations.len(), 4);
}
