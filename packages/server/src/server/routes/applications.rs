use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::{ApplicationId, UserId};
use crate::domains::applications::{
    self, ApplicationDetails, DomainApplication, NewApplication,
};
use crate::domains::domain::Domain;
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub creator_id: UserId,
    #[serde(flatten)]
    pub application: NewApplication,
}

/// Who is acting; identity comes from the upstream login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActorRequest {
    pub actor_id: Option<UserId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewRequest {
    pub investigator_id: Option<UserId>,
    pub actor_id: Option<UserId>,
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub application: DomainApplication,
    pub domain: Domain,
}

/// POST /api/v1/applications
pub async fn create_application_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationDetails>), ApiError> {
    let details =
        applications::create_application(request.creator_id, &request.application, &state.deps)
            .await?;
    Ok((StatusCode::CREATED, Json(details)))
}

/// GET /api/v1/applications/:id
pub async fn get_application_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApplicationDetails>, ApiError> {
    let application =
        applications::activities::transition::load_application(id, &state.deps.db_pool).await?;
    let details = ApplicationDetails::load(application, &state.deps.db_pool).await?;
    Ok(Json(details))
}

/// GET /api/v1/users/:id/applications
pub async fn list_applications_handler(
    Extension(state): Extension<AppState>,
    Path(creator_id): Path<UserId>,
) -> Result<Json<Vec<DomainApplication>>, ApiError> {
    let applications = DomainApplication::find_by_creator(creator_id, &state.deps.db_pool).await?;
    Ok(Json(applications))
}

/// POST /api/v1/applications/:id/submit
pub async fn submit_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
    body: Option<Json<ActorRequest>>,
) -> Result<Json<DomainApplication>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let application = applications::submit_application(id, request.actor_id, &state.deps).await?;
    Ok(Json(application))
}

/// POST /api/v1/applications/:id/review
pub async fn begin_review_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
    body: Option<Json<ReviewRequest>>,
) -> Result<Json<DomainApplication>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let application =
        applications::begin_review(id, request.investigator_id, request.actor_id, &state.deps)
            .await?;
    Ok(Json(application))
}

/// POST /api/v1/applications/:id/approve
pub async fn approve_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
    body: Option<Json<ActorRequest>>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let (application, domain) = applications::approve(id, request.actor_id, &state.deps).await?;
    Ok(Json(ApprovalResponse {
        application,
        domain,
    }))
}

/// POST /api/v1/applications/:id/reject
pub async fn reject_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
    body: Option<Json<ActorRequest>>,
) -> Result<Json<DomainApplication>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let application = applications::reject(id, request.actor_id, &state.deps).await?;
    Ok(Json(application))
}

/// POST /api/v1/applications/:id/withdraw
pub async fn withdraw_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
    body: Option<Json<ActorRequest>>,
) -> Result<Json<DomainApplication>, ApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let application = applications::withdraw(id, request.actor_id, &state.deps).await?;
    Ok(Json(application))
}
