use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store::{
    AppendOutcome, ConflictFn, DecideOutcome, Decision, RequestId, RequestStore, StoreError,
    StoredRequest,
};

/// In-memory request store: the whole table behind one mutex. Used by the
/// test suites; also a reasonable dev backend since records are never
/// deleted and ids are append positions.
#[derive(Default)]
pub struct MemoryRequestStore {
    rows: Mutex<Vec<StoredRequest>>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<StoredRequest>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RequestStore for MemoryRequestStore {
    async fn load_all(&self) -> Result<Vec<StoredRequest>, StoreError> {
        Ok(self.rows().clone())
    }

    async fn find(&self, id: RequestId) -> Result<Option<StoredRequest>, StoreError> {
        Ok(self.rows().iter().find(|r| r.id == id).cloned())
    }

    async fn latest_granted_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<StoredRequest>, StoreError> {
        Ok(self
            .rows()
            .iter()
            .rev()
            .find(|r| r.record.student_id == student_id && r.record.status == LeaveStatus::Granted)
            .cloned())
    }

    async fn append_pending(
        &self,
        record: LeaveRequest,
        conflicts: ConflictFn,
    ) -> Result<AppendOutcome, StoreError> {
        let mut rows = self.rows();

        let duplicate = rows.iter().any(|r| {
            r.record.student_id == record.student_id
                && r.record.status == LeaveStatus::Pending
                && conflicts(&record, &r.record)
        });
        if duplicate {
            return Ok(AppendOutcome::DuplicatePending);
        }

        let id = rows.len() as RequestId + 1;
        rows.push(StoredRequest { id, record });
        Ok(AppendOutcome::Appended(id))
    }

    async fn decide(
        &self,
        id: RequestId,
        decision: Decision,
    ) -> Result<DecideOutcome, StoreError> {
        let mut rows = self.rows();

        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(DecideOutcome::NotFound);
        };
        if row.record.status != LeaveStatus::Pending {
            return Ok(DecideOutcome::AlreadyDecided(row.record.status));
        }

        row.record.status = decision.status;
        row.record.qr_code_data = decision.qr_code_data;
        Ok(DecideOutcome::Applied(row.clone()))
    }
}
