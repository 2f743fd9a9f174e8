use axum::extract::{Extension, Path};
use axum::Json;

use crate::domains::domain::{check_availability, Availability};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// GET /api/v1/available/:domain
pub async fn availability_handler(
    Extension(state): Extension<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<Availability>, ApiError> {
    let availability = check_availability(&domain, &state.deps).await?;
    Ok(Json(availability))
}
