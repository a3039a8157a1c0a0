use derive_more::{Display, Error};
use serde::Serialize;

use crate::model::leave_request::{LeaveRequest, LeaveStatus};

pub mod memory;
pub mod mysql;

/// Store-assigned identity of a persisted request (append order).
pub type RequestId = u64;

#[derive(Debug, Clone, Serialize)]
pub struct StoredRequest {
    pub id: RequestId,
    #[serde(flatten)]
    pub record: LeaveRequest,
}

/// Pairwise conflict predicate run by the store while it holds the lock or
/// transaction covering the student's pending set.
pub type ConflictFn = fn(&LeaveRequest, &LeaveRequest) -> bool;

#[derive(Debug)]
pub enum AppendOutcome {
    Appended(RequestId),
    DuplicatePending,
}

#[derive(Debug)]
pub enum DecideOutcome {
    Applied(StoredRequest),
    NotFound,
    AlreadyDecided(LeaveStatus),
}

/// A terminal transition. Constructors keep the invariant that
/// `qr_code_data` is set iff the request is granted.
#[derive(Debug, Clone)]
pub struct Decision {
    status: LeaveStatus,
    qr_code_data: Option<String>,
}

impl Decision {
    pub fn grant(payload: String) -> Self {
        Self {
            status: LeaveStatus::Granted,
            qr_code_data: Some(payload),
        }
    }

    pub fn reject() -> Self {
        Self {
            status: LeaveStatus::Rejected,
            qr_code_data: None,
        }
    }

    pub fn status(&self) -> LeaveStatus {
        self.status
    }
}

#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(#[error(source)] sqlx::Error),
    #[display(fmt = "corrupt row {}: {}", id, detail)]
    Corrupt { id: RequestId, detail: String },
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

/// Persistence abstraction over leave-request records. Requests are only ever
/// appended and transitioned, never deleted.
#[allow(async_fn_in_trait)]
pub trait RequestStore {
    async fn load_all(&self) -> Result<Vec<StoredRequest>, StoreError>;

    async fn find(&self, id: RequestId) -> Result<Option<StoredRequest>, StoreError>;

    /// Most-recently-appended granted record for the student, if any.
    async fn latest_granted_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<StoredRequest>, StoreError>;

    /// Appends `record` as Pending unless `conflicts` matches it against one
    /// of the student's existing pending records. Check and insert happen
    /// under one lock/transaction so two racing submits cannot both pass.
    async fn append_pending(
        &self,
        record: LeaveRequest,
        conflicts: ConflictFn,
    ) -> Result<AppendOutcome, StoreError>;

    /// Applies a terminal transition iff the record is still Pending.
    async fn decide(
        &self,
        id: RequestId,
        decision: Decision,
    ) -> Result<DecideOutcome, StoreError>;
}
