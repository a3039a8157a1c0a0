use crate::api::catalog::{BatchEntry, BranchEntry, CatalogResponse};
use crate::api::leave_request::{LeaveFilter, LeaveListResponse, LeaveResponse, SubmitLeave};
use crate::model::catalog::Branch;
use crate::model::leave_request::LeaveStatus;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hostel Leave Management API",
        version = "1.0.0",
        description = r#"
## Hostel Leave Management System

This API powers the hostel leave workflow for a college campus.

### 🔹 Key Features
- **Leave Requests**
  - Students submit leave requests with academic and scheduling details
  - Duplicate pending requests (overlapping dates, same reason) are refused
- **Review**
  - Teachers list pending requests, approve or reject them
- **Gate Passes**
  - Approved requests get a scannable QR gate pass, downloadable as PNG

### 🔐 Security
All endpoints are protected using **JWT Bearer authentication** issued by the
campus identity provider. Student actions are bound to the student id carried
in the token; review actions require the **Teacher** role.

### 📦 Response Format
- JSON-based RESTful responses
- Gate passes are returned as `image/png` downloads

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::submit_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::download_gate_pass,
        crate::api::leave_request::my_gate_pass,

        crate::api::catalog::get_catalog
    ),
    components(
        schemas(
            SubmitLeave,
            LeaveFilter,
            LeaveResponse,
            LeaveListResponse,
            LeaveStatus,
            Branch,
            CatalogResponse,
            BranchEntry,
            BatchEntry
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave request submission and review APIs"),
        (name = "GatePass", description = "Gate pass download APIs"),
        (name = "Catalog", description = "Branch, batch and mentor reference data"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
