use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use tracing::{info, instrument};

use crate::model::leave_request::{LeaveCandidate, LeaveStatus};
use crate::service::gatepass::{self, EncodingError, GatePass};
use crate::service::validator::{self, ValidationError};
use crate::service::duplicate;
use crate::store::{
    AppendOutcome, DecideOutcome, Decision, RequestId, RequestStore, StoreError, StoredRequest,
};

#[derive(Debug, Display, Error)]
pub enum SubmitError {
    #[display(fmt = "invalid request: {}", _0)]
    Invalid(#[error(source)] ValidationError),
    #[display(fmt = "a similar pending request already exists")]
    Duplicate,
    #[display(fmt = "{}", _0)]
    Store(#[error(source)] StoreError),
}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        SubmitError::Invalid(e)
    }
}

impl From<StoreError> for SubmitError {
    fn from(e: StoreError) -> Self {
        SubmitError::Store(e)
    }
}

#[derive(Debug, Display, Error)]
pub enum ApproveError {
    #[display(fmt = "leave request not found")]
    NotFound,
    #[display(fmt = "leave request already processed")]
    AlreadyDecided,
    #[display(fmt = "{}", _0)]
    Encoding(#[error(source)] EncodingError),
    #[display(fmt = "{}", _0)]
    Store(#[error(source)] StoreError),
}

impl From<EncodingError> for ApproveError {
    fn from(e: EncodingError) -> Self {
        ApproveError::Encoding(e)
    }
}

impl From<StoreError> for ApproveError {
    fn from(e: StoreError) -> Self {
        ApproveError::Store(e)
    }
}

#[derive(Debug, Display, Error)]
pub enum RejectError {
    #[display(fmt = "leave request not found")]
    NotFound,
    #[display(fmt = "leave request already processed")]
    AlreadyDecided,
    #[display(fmt = "{}", _0)]
    Store(#[error(source)] StoreError),
}

impl From<StoreError> for RejectError {
    fn from(e: StoreError) -> Self {
        RejectError::Store(e)
    }
}

/// Orchestrates the request lifecycle over an injected store. Success is
/// only ever reported after the corresponding store call committed.
pub struct LeaveRequestService<S> {
    store: S,
}

impl<S: RequestStore> LeaveRequestService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates, duplicate-checks, and persists a new Pending request.
    #[instrument(skip(self, candidate), fields(student_id = %candidate.student_id))]
    pub async fn submit(&self, candidate: LeaveCandidate) -> Result<RequestId, SubmitError> {
        validator::validate(&candidate)?;

        // start <= end just validated, so this is always >= 1
        let leave_days = (candidate.end_date - candidate.start_date).num_days() as u32 + 1;
        let record = candidate.into_pending(leave_days);

        match self.store.append_pending(record, duplicate::conflicts).await? {
            AppendOutcome::Appended(id) => {
                info!(id, "leave request submitted");
                Ok(id)
            }
            AppendOutcome::DuplicatePending => Err(SubmitError::Duplicate),
        }
    }

    /// Grants a Pending request: builds the payload, renders the pass, then
    /// commits status + payload as one conditional update. Rendering happens
    /// before the transition, so an encoding failure changes nothing.
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        id: RequestId,
        now: DateTime<Utc>,
    ) -> Result<GatePass, ApproveError> {
        let existing = self.store.find(id).await?.ok_or(ApproveError::NotFound)?;
        if existing.record.status != LeaveStatus::Pending {
            return Err(ApproveError::AlreadyDecided);
        }

        // Fields of a Pending record cannot change, so encoding from this
        // read stays consistent with what the transition below persists.
        let payload = gatepass::encode(&existing.record, now);
        let png = gatepass::render_png(&payload)?;

        match self.store.decide(id, Decision::grant(payload.clone())).await? {
            DecideOutcome::Applied(stored) => {
                info!(id, student_id = %stored.record.student_id, "leave granted");
                Ok(GatePass {
                    payload,
                    png,
                    filename: gatepass::suggested_filename(&stored.record),
                })
            }
            DecideOutcome::NotFound => Err(ApproveError::NotFound),
            DecideOutcome::AlreadyDecided(_) => Err(ApproveError::AlreadyDecided),
        }
    }

    /// Rejects a Pending request, clearing any QR data.
    #[instrument(skip(self))]
    pub async fn reject(&self, id: RequestId) -> Result<(), RejectError> {
        match self.store.decide(id, Decision::reject()).await? {
            DecideOutcome::Applied(stored) => {
                info!(id, student_id = %stored.record.student_id, "leave rejected");
                Ok(())
            }
            DecideOutcome::NotFound => Err(RejectError::NotFound),
            DecideOutcome::AlreadyDecided(_) => Err(RejectError::AlreadyDecided),
        }
    }

    pub async fn find(&self, id: RequestId) -> Result<Option<StoredRequest>, StoreError> {
        self.store.find(id).await
    }

    /// Most-recently-appended granted record for the student, if any.
    pub async fn latest_granted(
        &self,
        student_id: &str,
    ) -> Result<Option<StoredRequest>, StoreError> {
        self.store.latest_granted_for_student(student_id).await
    }

    /// Full history, optionally narrowed by status and/or student.
    pub async fn list(
        &self,
        status: Option<LeaveStatus>,
        student_id: Option<&str>,
    ) -> Result<Vec<StoredRequest>, StoreError> {
        let mut records = self.store.load_all().await?;
        if let Some(status) = status {
            records.retain(|r| r.record.status == status);
        }
        if let Some(student_id) = student_id {
            records.retain(|r| r.record.student_id == student_id);
        }
        Ok(records)
    }
}
