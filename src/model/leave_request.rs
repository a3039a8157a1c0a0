use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::catalog::Branch;

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum LeaveStatus {
    Pending,
    Granted,
    Rejected,
}

/// A leave request as persisted. `qr_code_data` is set exactly once when the
/// request is granted and stays `None` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub student_name: String,
    pub attendance: f64,
    pub year: String,
    pub student_id: String,
    pub branch: Branch,
    pub batch: String,
    pub email: String,
    pub leave_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub teacher: String,
    pub status: LeaveStatus,
    pub qr_code_data: Option<String>,
}

/// What a student submits. Becomes a [`LeaveRequest`] only after validation;
/// the leave-type flags are checked at submission and not persisted.
#[derive(Debug, Clone)]
pub struct LeaveCandidate {
    pub student_name: String,
    pub attendance: f64,
    pub year: String,
    pub student_id: String,
    pub branch: Branch,
    pub batch: String,
    pub email: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub teacher: String,
    pub authorized_leave: bool,
    pub special_leave: bool,
}

impl LeaveCandidate {
    /// Freeze the candidate into a pending record.
    pub fn into_pending(self, leave_days: u32) -> LeaveRequest {
        LeaveRequest {
            student_name: self.student_name,
            attendance: self.attendance,
            year: self.year,
            student_id: self.student_id,
            branch: self.branch,
            batch: self.batch,
            email: self.email,
            leave_days,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            teacher: self.teacher,
            status: LeaveStatus::Pending,
            qr_code_data: None,
        }
    }
}
