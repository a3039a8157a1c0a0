use chrono::NaiveDate;
use hlm::model::catalog::Branch;
use hlm::model::leave_request::LeaveCandidate;

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// A candidate that passes every validation rule.
pub fn candidate() -> LeaveCandidate {
    LeaveCandidate {
        student_name: "Jane Doe".to_string(),
        attendance: 86.5,
        year: "2".to_string(),
        student_id: "S1".to_string(),
        branch: Branch::BtechCs,
        batch: "A1".to_string(),
        email: "jane.doe@college.edu".to_string(),
        start_date: date("2024-01-01"),
        end_date: date("2024-01-03"),
        reason: "Family function".to_string(),
        teacher: "Sugam Shivare".to_string(),
        authorized_leave: true,
        special_leave: false,
    }
}
