use chrono::NaiveDate;
use sqlx::{FromRow, MySqlPool};

use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store::{
    AppendOutcome, ConflictFn, DecideOutcome, Decision, RequestId, RequestStore, StoreError,
    StoredRequest,
};

/// MySQL-backed request store.
///
/// Backing table:
///
/// ```sql
/// CREATE TABLE leave_requests (
///     id            BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
///     student_name  VARCHAR(255)  NOT NULL,
///     attendance    DOUBLE        NOT NULL,
///     year          VARCHAR(8)    NOT NULL,
///     student_id    VARCHAR(64)   NOT NULL,
///     branch        VARCHAR(32)   NOT NULL,
///     batch         VARCHAR(8)    NOT NULL,
///     email         VARCHAR(255)  NOT NULL,
///     leave_days    INT UNSIGNED  NOT NULL,
///     start_date    DATE          NOT NULL,
///     end_date      DATE          NOT NULL,
///     reason        TEXT          NOT NULL,
///     teacher       VARCHAR(128)  NOT NULL,
///     status        VARCHAR(16)   NOT NULL,
///     qr_code_data  TEXT          NULL,
///     INDEX idx_student_status (student_id, status)
/// );
/// ```
#[derive(Clone)]
pub struct MySqlRequestStore {
    pool: MySqlPool,
}

impl MySqlRequestStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const COLUMNS: &str = "id, student_name, attendance, year, student_id, branch, batch, email, \
                       leave_days, start_date, end_date, reason, teacher, status, qr_code_data";

#[derive(FromRow)]
struct LeaveRow {
    id: u64,
    student_name: String,
    attendance: f64,
    year: String,
    student_id: String,
    branch: String,
    batch: String,
    email: String,
    leave_days: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    teacher: String,
    status: String,
    qr_code_data: Option<String>,
}

impl LeaveRow {
    fn into_stored(self) -> Result<StoredRequest, StoreError> {
        let branch = self.branch.parse().map_err(|_| StoreError::Corrupt {
            id: self.id,
            detail: format!("unknown branch '{}'", self.branch),
        })?;
        let status = self.status.parse().map_err(|_| StoreError::Corrupt {
            id: self.id,
            detail: format!("unknown status '{}'", self.status),
        })?;

        Ok(StoredRequest {
            id: self.id,
            record: LeaveRequest {
                student_name: self.student_name,
                attendance: self.attendance,
                year: self.year,
                student_id: self.student_id,
                branch,
                batch: self.batch,
                email: self.email,
                leave_days: self.leave_days,
                start_date: self.start_date,
                end_date: self.end_date,
                reason: self.reason,
                teacher: self.teacher,
                status,
                qr_code_data: self.qr_code_data,
            },
        })
    }
}

impl RequestStore for MySqlRequestStore {
    async fn load_all(&self) -> Result<Vec<StoredRequest>, StoreError> {
        let sql = format!("SELECT {} FROM leave_requests ORDER BY id", COLUMNS);
        let rows: Vec<LeaveRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(LeaveRow::into_stored).collect()
    }

    async fn find(&self, id: RequestId) -> Result<Option<StoredRequest>, StoreError> {
        let sql = format!("SELECT {} FROM leave_requests WHERE id = ?", COLUMNS);
        let row: Option<LeaveRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(LeaveRow::into_stored).transpose()
    }

    async fn latest_granted_for_student(
        &self,
        student_id: &str,
    ) -> Result<Option<StoredRequest>, StoreError> {
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE student_id = ? AND status = ? \
             ORDER BY id DESC LIMIT 1",
            COLUMNS
        );
        let row: Option<LeaveRow> = sqlx::query_as(&sql)
            .bind(student_id)
            .bind(LeaveStatus::Granted.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.map(LeaveRow::into_stored).transpose()
    }

    async fn append_pending(
        &self,
        record: LeaveRequest,
        conflicts: ConflictFn,
    ) -> Result<AppendOutcome, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Lock the student's pending set so a racing submit cannot slip past
        // the duplicate check before this insert commits.
        let sql = format!(
            "SELECT {} FROM leave_requests WHERE student_id = ? AND status = ? FOR UPDATE",
            COLUMNS
        );
        let rows: Vec<LeaveRow> = sqlx::query_as(&sql)
            .bind(&record.student_id)
            .bind(LeaveStatus::Pending.to_string())
            .fetch_all(&mut *tx)
            .await?;

        for row in rows {
            let existing = row.into_stored()?;
            if conflicts(&record, &existing.record) {
                return Ok(AppendOutcome::DuplicatePending);
            }
        }

        let result = sqlx::query(
            "INSERT INTO leave_requests \
             (student_name, attendance, year, student_id, branch, batch, email, \
              leave_days, start_date, end_date, reason, teacher, status, qr_code_data) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.student_name)
        .bind(record.attendance)
        .bind(&record.year)
        .bind(&record.student_id)
        .bind(record.branch.to_string())
        .bind(&record.batch)
        .bind(&record.email)
        .bind(record.leave_days)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.reason)
        .bind(&record.teacher)
        .bind(record.status.to_string())
        .bind(&record.qr_code_data)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_id();
        tx.commit().await?;

        Ok(AppendOutcome::Appended(id))
    }

    async fn decide(
        &self,
        id: RequestId,
        decision: Decision,
    ) -> Result<DecideOutcome, StoreError> {
        // Conditional update keyed on the current status: whichever racer
        // runs second affects zero rows and reports AlreadyDecided.
        let result = sqlx::query(
            "UPDATE leave_requests SET status = ?, qr_code_data = ? \
             WHERE id = ? AND status = ?",
        )
        .bind(decision.status.to_string())
        .bind(&decision.qr_code_data)
        .bind(id)
        .bind(LeaveStatus::Pending.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return match self.find(id).await? {
                None => Ok(DecideOutcome::NotFound),
                Some(existing) => Ok(DecideOutcome::AlreadyDecided(existing.record.status)),
            };
        }

        let updated = self.find(id).await?.ok_or(StoreError::Corrupt {
            id,
            detail: "row vanished after update".to_string(),
        })?;
        Ok(DecideOutcome::Applied(updated))
    }
}
