use crate::auth::auth::AuthUser;
use crate::model::catalog::{self, Branch};
use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use strum::IntoEnumIterator;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct BatchEntry {
    #[schema(example = "A1")]
    pub batch: &'static str,
    #[schema(example = "Sugam Shivare")]
    pub mentor: &'static str,
}

#[derive(Serialize, ToSchema)]
pub struct BranchEntry {
    #[schema(example = "BTECH CS")]
    pub branch: Branch,
    pub batches: Vec<BatchEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct CatalogResponse {
    pub branches: Vec<BranchEntry>,
    pub mentors: Vec<&'static str>,
}

/// Reference-data endpoint: what a submission form needs to offer.
#[utoipa::path(
    get,
    path = "/api/v1/catalog",
    responses(
        (status = 200, description = "Branches, batches and mentor assignments", body = CatalogResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Catalog"
)]
pub async fn get_catalog(_auth: AuthUser) -> actix_web::Result<impl Responder> {
    let branches = Branch::iter()
        .map(|branch| BranchEntry {
            branch,
            batches: branch
                .batches()
                .iter()
                .map(|&batch| BatchEntry {
                    batch,
                    // every batch code in the catalog has a mentor assigned
                    mentor: catalog::mentor_for(batch).unwrap_or(""),
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(CatalogResponse {
        branches,
        mentors: catalog::MENTORS.to_vec(),
    }))
}
