use crate::api::AppService;
use crate::auth::auth::AuthUser;
use crate::model::catalog::Branch;
use crate::model::leave_request::{LeaveCandidate, LeaveStatus};
use crate::service::leave::{ApproveError, RejectError, SubmitError};
use crate::store::StoredRequest;
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct SubmitLeave {
    #[schema(example = "Jane Doe")]
    pub student_name: String,
    #[schema(example = 86.5)]
    pub attendance: f64,
    #[schema(example = "2")]
    pub year: String,
    #[schema(example = "BTECH CS")]
    pub branch: Branch,
    #[schema(example = "A1")]
    pub batch: String,
    #[schema(example = "jane.doe@college.edu")]
    pub email: String,
    /// Exactly one of the two leave-type flags must be set
    #[schema(example = true)]
    pub authorized_leave: bool,
    #[schema(example = false)]
    pub special_leave: bool,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family function at home")]
    pub reason: String,
    #[schema(example = "Sugam Shivare")]
    pub teacher: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = "Pending")]
    /// Filter by request status
    pub status: Option<LeaveStatus>,
    #[schema(example = "SAP12345")]
    /// Filter by student ID
    pub student_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveResponse {
    #[schema(example = 1)]
    /// leave request id
    pub id: u64,
    #[schema(example = "Jane Doe")]
    pub student_name: String,
    #[schema(example = 86.5)]
    pub attendance: f64,
    #[schema(example = "2")]
    pub year: String,
    #[schema(example = "SAP12345")]
    pub student_id: String,
    #[schema(example = "BTECH CS")]
    pub branch: Branch,
    #[schema(example = "A1")]
    pub batch: String,
    #[schema(example = "jane.doe@college.edu")]
    pub email: String,
    #[schema(example = 3)]
    pub leave_days: u32,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family function at home")]
    pub reason: String,
    #[schema(example = "Sugam Shivare")]
    pub teacher: String,
    #[schema(example = "Pending")]
    pub status: LeaveStatus,
    #[schema(nullable = true)]
    /// Set iff the request has been granted
    pub qr_code_data: Option<String>,
}

impl From<StoredRequest> for LeaveResponse {
    fn from(stored: StoredRequest) -> Self {
        let r = stored.record;
        LeaveResponse {
            id: stored.id,
            student_name: r.student_name,
            attendance: r.attendance,
            year: r.year,
            student_id: r.student_id,
            branch: r.branch,
            batch: r.batch,
            email: r.email,
            leave_days: r.leave_days,
            start_date: r.start_date,
            end_date: r.end_date,
            reason: r.reason,
            teacher: r.teacher,
            status: r.status,
            qr_code_data: r.qr_code_data,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveResponse>,
    #[schema(example = 1)]
    pub total: usize,
}

fn png_download(png: Vec<u8>, filename: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("image/png")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(png)
}

/* =========================
Submit leave request (student)
========================= */
/// Swagger doc for submit_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = SubmitLeave,
        description = "Leave request payload; the student id comes from the session token",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted successfully",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "id": 1,
            "status": "Pending"
         })
        ),
        (status = 400, description = "Validation failed", body = Object, example = json!({
            "message": "Request failed validation",
            "violations": ["mentor_mismatch"]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Duplicate pending request", body = Object, example = json!({
            "message": "A similar pending request already exists for these dates and reason"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    payload: web::Json<SubmitLeave>,
) -> actix_web::Result<impl Responder> {
    // The session, not the body, says who is applying.
    let student_id = auth.student_id()?;
    let body = payload.into_inner();

    let candidate = LeaveCandidate {
        student_name: body.student_name,
        attendance: body.attendance,
        year: body.year,
        student_id,
        branch: body.branch,
        batch: body.batch,
        email: body.email,
        start_date: body.start_date,
        end_date: body.end_date,
        reason: body.reason,
        teacher: body.teacher,
        authorized_leave: body.authorized_leave,
        special_leave: body.special_leave,
    };

    match service.submit(candidate).await {
        Ok(id) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave request submitted",
            "id": id,
            "status": LeaveStatus::Pending,
        }))),
        Err(SubmitError::Invalid(e)) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Request failed validation",
            "violations": e.violations.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))),
        Err(SubmitError::Duplicate) => Ok(HttpResponse::Conflict().json(serde_json::json!({
            "message": "A similar pending request already exists for these dates and reason"
        }))),
        Err(SubmitError::Store(e)) => {
            tracing::error!(error = %e, "Failed to save leave request");
            Err(actix_web::error::ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/* =========================
Approve leave (teacher)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved, gate pass generated", body = Object, example = json!({
            "message": "Leave approved",
            "id": 1,
            "qr_code_data": "LEAVE_GRANTED_ID:SAP12345 NAME:Jane Doe FROM:2026-01-01 TO:2026-01-03 TS:1767225600.000000",
            "gate_pass_file": "gatepass_SAP12345_2026-01-01.png"
        })),
        (status = 400, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let leave_id = path.into_inner();

    match service.approve(leave_id, Utc::now()).await {
        Ok(pass) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave approved",
            "id": leave_id,
            "qr_code_data": pass.payload,
            "gate_pass_file": pass.filename,
        }))),
        Err(ApproveError::NotFound) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
        Err(ApproveError::AlreadyDecided) => {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Leave request already processed"
            })))
        }
        Err(ApproveError::Encoding(e)) => {
            tracing::error!(error = %e, leave_id, "Gate pass rendering failed");
            Err(actix_web::error::ErrorInternalServerError("Internal Server Error"))
        }
        Err(ApproveError::Store(e)) => {
            tracing::error!(error = %e, leave_id, "Approve leave failed");
            Err(actix_web::error::ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/* =========================
Reject leave (teacher)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Leave request already processed", body = Object, example = json!({
            "message": "Leave request already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let leave_id = path.into_inner();

    match service.reject(leave_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Leave rejected"
        }))),
        Err(RejectError::NotFound) => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
        Err(RejectError::AlreadyDecided) => {
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Leave request already processed"
            })))
        }
        Err(RejectError::Store(e)) => {
            tracing::error!(error = %e, leave_id, "Reject leave failed");
            Err(actix_web::error::ErrorInternalServerError("Internal Server Error"))
        }
    }
}

/// for getting a leave request's details endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let leave_id = path.into_inner();

    let found = service.find(leave_id).await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match found {
        Some(stored) => Ok(HttpResponse::Ok().json(LeaveResponse::from(stored))),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

/// for listing leave requests endpoint (teacher review queue and history)
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Filtered leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    service: web::Data<AppService>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_teacher()?;

    let records = service
        .list(query.status, query.student_id.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch leave list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let data: Vec<LeaveResponse> = records.into_iter().map(LeaveResponse::from).collect();
    let total = data.len();

    Ok(HttpResponse::Ok().json(LeaveListResponse { data, total }))
}

/// for a student's own request history endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/mine",
    responses(
        (status = 200, description = "The student's leave requests", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    let student_id = auth.student_id()?;

    let records = service.list(None, Some(&student_id)).await.map_err(|e| {
        tracing::error!(error = %e, student_id, "Failed to fetch student's leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data: Vec<LeaveResponse> = records.into_iter().map(LeaveResponse::from).collect();
    let total = data.len();

    Ok(HttpResponse::Ok().json(LeaveListResponse { data, total }))
}

/* =========================
Gate pass downloads
========================= */
/// Swagger doc for download_gate_pass endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}/gatepass",
    params(
        ("leave_id" = u64, Path, description = "ID of the granted leave request")
    ),
    responses(
        (status = 200, description = "Gate pass PNG", body = Vec<u8>, content_type = "image/png"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No gate pass for this request")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "GatePass"
)]
pub async fn download_gate_pass(
    auth: AuthUser,
    service: web::Data<AppService>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let found = service.find(leave_id).await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(stored) = found else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        })));
    };

    // Students may only fetch their own pass.
    if auth.is_student() && auth.student_id()? != stored.record.student_id {
        return Err(actix_web::error::ErrorForbidden("Not your gate pass"));
    }

    render_pass_response(stored).await
}

/// for a student's latest granted gate pass endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/gatepass",
    responses(
        (status = 200, description = "Gate pass PNG for the latest granted request", body = Vec<u8>, content_type = "image/png"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No granted leave request")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "GatePass"
)]
pub async fn my_gate_pass(
    auth: AuthUser,
    service: web::Data<AppService>,
) -> actix_web::Result<impl Responder> {
    let student_id = auth.student_id()?;

    let found = service.latest_granted(&student_id).await.map_err(|e| {
        tracing::error!(error = %e, student_id, "Failed to fetch granted leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let Some(stored) = found else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "No approved leave requests found for your Student ID yet"
        })));
    };

    render_pass_response(stored).await
}

async fn render_pass_response(stored: StoredRequest) -> actix_web::Result<HttpResponse> {
    let Some(payload) = stored.record.qr_code_data.as_deref() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "No gate pass for this request"
        })));
    };

    let png = crate::service::gatepass::render_png(payload).map_err(|e| {
        tracing::error!(error = %e, id = stored.id, "Gate pass rendering failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let filename = crate::service::gatepass::suggested_filename(&stored.record);
    Ok(png_download(png, &filename))
}
