mod common;

use chrono::{DateTime, Utc};
use hlm::model::leave_request::LeaveStatus;
use hlm::service::leave::{ApproveError, LeaveRequestService, RejectError, SubmitError};
use hlm::service::validator::Violation;
use hlm::store::memory::MemoryRequestStore;

fn service() -> LeaveRequestService<MemoryRequestStore> {
    LeaveRequestService::new(MemoryRequestStore::new())
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

#[actix_web::test]
async fn test_submit_persists_pending_without_qr() {
    let service = service();

    let id = service.submit(common::candidate()).await.unwrap();
    let stored = service.find(id).await.unwrap().unwrap();

    assert_eq!(stored.record.status, LeaveStatus::Pending);
    assert_eq!(stored.record.qr_code_data, None);
    assert_eq!(stored.record.leave_days, 3);
}

#[actix_web::test]
async fn test_submit_refuses_invalid_candidate() {
    let service = service();

    let mut candidate = common::candidate();
    candidate.year = "9".to_string();

    match service.submit(candidate).await {
        Err(SubmitError::Invalid(e)) => {
            assert!(e.violations.contains(&Violation::YearOutOfRange));
        }
        other => panic!("expected validation failure, got {:?}", other.map(|_| ())),
    }
}

#[actix_web::test]
async fn test_submit_refuses_duplicate_pending() {
    let service = service();

    service.submit(common::candidate()).await.unwrap();

    // identical resubmission
    assert!(matches!(
        service.submit(common::candidate()).await,
        Err(SubmitError::Duplicate)
    ));

    // overlapping range sharing one boundary day, reason differing only in
    // case and padding
    let mut overlapping = common::candidate();
    overlapping.start_date = common::date("2024-01-03");
    overlapping.end_date = common::date("2024-01-05");
    overlapping.reason = "  FAMILY FUNCTION ".to_string();
    assert!(matches!(
        service.submit(overlapping).await,
        Err(SubmitError::Duplicate)
    ));
}

#[actix_web::test]
async fn test_submit_allows_disjoint_dates_or_new_reason() {
    let service = service();

    service.submit(common::candidate()).await.unwrap();

    let mut disjoint = common::candidate();
    disjoint.start_date = common::date("2024-01-04");
    disjoint.end_date = common::date("2024-01-05");
    disjoint.reason = "Family function".to_string();
    assert!(service.submit(disjoint).await.is_ok());

    let mut other_reason = common::candidate();
    other_reason.reason = "Medical appointment".to_string();
    assert!(service.submit(other_reason).await.is_ok());
}

#[actix_web::test]
async fn test_approve_grants_and_issues_gate_pass() {
    let service = service();

    let id = service.submit(common::candidate()).await.unwrap();
    let pass = service.approve(id, at(1_704_875_400)).await.unwrap();

    assert!(pass.payload.contains("LEAVE_GRANTED_ID:S1"));
    assert_eq!(pass.filename, "gatepass_S1_2024-01-01.png");
    assert!(!pass.png.is_empty());

    let stored = service.find(id).await.unwrap().unwrap();
    assert_eq!(stored.record.status, LeaveStatus::Granted);
    assert_eq!(stored.record.qr_code_data.as_deref(), Some(pass.payload.as_str()));
}

#[actix_web::test]
async fn test_approve_twice_keeps_first_pass() {
    let service = service();

    let id = service.submit(common::candidate()).await.unwrap();
    let first = service.approve(id, at(1_704_875_400)).await.unwrap();

    assert!(matches!(
        service.approve(id, at(1_704_875_401)).await,
        Err(ApproveError::AlreadyDecided)
    ));

    let stored = service.find(id).await.unwrap().unwrap();
    assert_eq!(
        stored.record.qr_code_data.as_deref(),
        Some(first.payload.as_str())
    );
}

#[actix_web::test]
async fn test_approve_unknown_id() {
    let service = service();
    assert!(matches!(
        service.approve(42, at(1_704_875_400)).await,
        Err(ApproveError::NotFound)
    ));
}

#[actix_web::test]
async fn test_reject_clears_qr_and_is_terminal() {
    let service = service();

    let id = service.submit(common::candidate()).await.unwrap();
    service.reject(id).await.unwrap();

    let stored = service.find(id).await.unwrap().unwrap();
    assert_eq!(stored.record.status, LeaveStatus::Rejected);
    assert_eq!(stored.record.qr_code_data, None);

    assert!(matches!(
        service.reject(id).await,
        Err(RejectError::AlreadyDecided)
    ));
    assert!(matches!(
        service.approve(id, at(1_704_875_400)).await,
        Err(ApproveError::AlreadyDecided)
    ));
}

#[actix_web::test]
async fn test_decided_requests_do_not_block_resubmission() {
    let service = service();

    let id = service.submit(common::candidate()).await.unwrap();
    service.reject(id).await.unwrap();

    // only pending requests participate in duplicate detection
    assert!(service.submit(common::candidate()).await.is_ok());
}

#[actix_web::test]
async fn test_latest_granted_is_most_recent_append() {
    let service = service();

    let first = service.submit(common::candidate()).await.unwrap();

    let mut later = common::candidate();
    later.start_date = common::date("2024-02-01");
    later.end_date = common::date("2024-02-02");
    let second = service.submit(later).await.unwrap();

    service.approve(first, at(1_704_875_400)).await.unwrap();
    service.approve(second, at(1_704_875_500)).await.unwrap();

    let latest = service.latest_granted("S1").await.unwrap().unwrap();
    assert_eq!(latest.id, second);

    assert!(service.latest_granted("S2").await.unwrap().is_none());
}

#[actix_web::test]
async fn test_identical_requests_approved_at_different_times_differ() {
    let a = service();
    let b = service();

    let id_a = a.submit(common::candidate()).await.unwrap();
    let id_b = b.submit(common::candidate()).await.unwrap();

    let pass_a = a.approve(id_a, at(1_704_875_400)).await.unwrap();
    let pass_b = b.approve(id_b, at(1_704_875_401)).await.unwrap();

    assert_ne!(pass_a.payload, pass_b.payload);
}

#[actix_web::test]
async fn test_list_filters_by_status_and_student() {
    let service = service();

    let first = service.submit(common::candidate()).await.unwrap();

    let mut later = common::candidate();
    later.start_date = common::date("2024-02-01");
    later.end_date = common::date("2024-02-02");
    service.submit(later).await.unwrap();

    service.approve(first, at(1_704_875_400)).await.unwrap();

    let pending = service.list(Some(LeaveStatus::Pending), None).await.unwrap();
    assert_eq!(pending.len(), 1);

    let granted = service
        .list(Some(LeaveStatus::Granted), Some("S1"))
        .await
        .unwrap();
    assert_eq!(granted.len(), 1);
    assert_eq!(granted[0].id, first);

    let other = service.list(None, Some("S2")).await.unwrap();
    assert!(other.is_empty());
}
