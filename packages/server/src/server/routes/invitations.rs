use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::{InvitationId, UserId};
use crate::domains::invitations::{self, DomainInvitation};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// POST /api/v1/invitations/:id/retrieve
pub async fn retrieve_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<InvitationId>,
) -> Result<Json<DomainInvitation>, ApiError> {
    let invitation = invitations::retrieve(id, &state.deps).await?;
    Ok(Json(invitation))
}

/// POST /api/v1/users/:id/first-login
pub async fn first_login_handler(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<DomainInvitation>>, ApiError> {
    let retrieved = invitations::first_login(user_id, &state.deps).await?;
    Ok(Json(retrieved))
}
