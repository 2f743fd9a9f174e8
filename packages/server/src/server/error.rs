//! Mapping domain errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registry_client::RegistryError;
use serde_json::json;
use tracing::error;

use crate::domains::applications::ApplicationError;
use crate::domains::invitations::InvitationError;
use crate::domains::public_contacts::ContactSyncError;

#[derive(Debug)]
pub enum ApiError {
    /// 422: the request can never succeed as sent
    Validation(String),
    NotFound(String),
    /// 409: the request raced another change or repeats an earlier one
    Conflict(String),
    /// 502: the registry refused or could not be reached
    Registry(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Registry(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Validation(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::Registry(m) => m,
            ApiError::Internal(e) => {
                error!(error = ?e, "Request failed");
                "Internal server error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        ApiError::Registry(e.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("Not found".to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(registry) = e.downcast_ref::<RegistryError>() {
            return ApiError::Registry(registry.to_string());
        }
        if matches!(e.downcast_ref::<sqlx::Error>(), Some(sqlx::Error::RowNotFound)) {
            return ApiError::NotFound("Not found".to_string());
        }
        ApiError::Internal(e)
    }
}

impl From<ContactSyncError> for ApiError {
    fn from(e: ContactSyncError) -> Self {
        match e {
            ContactSyncError::InvalidFields(_) => ApiError::Validation(e.to_string()),
            ContactSyncError::RegistryIdTaken(_) => ApiError::Conflict(e.to_string()),
            ContactSyncError::Registry(inner) => inner.into(),
            ContactSyncError::Database(inner) => inner.into(),
            ContactSyncError::Internal(inner) => inner.into(),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound(_) => ApiError::NotFound(e.to_string()),
            ApplicationError::Transition(_)
            | ApplicationError::MissingFields(_)
            | ApplicationError::InvalidRequestedDomain(_)
            | ApplicationError::InvalidDomainName { .. }
            | ApplicationError::DomainInUse(_)
            | ApplicationError::InvestigatorRequired => ApiError::Validation(e.to_string()),
            ApplicationError::Conflict { .. } => ApiError::Conflict(e.to_string()),
            ApplicationError::ContactSync(inner) => inner.into(),
            ApplicationError::Database(inner) => inner.into(),
            ApplicationError::Internal(inner) => inner.into(),
        }
    }
}

impl From<InvitationError> for ApiError {
    fn from(e: InvitationError) -> Self {
        match e {
            InvitationError::NotFound(_)
            | InvitationError::DomainNotFound(_)
            | InvitationError::UserNotFound { .. } => ApiError::NotFound(e.to_string()),
            InvitationError::AlreadyRetrieved(_)
            | InvitationError::AlreadyInvited { .. }
            | InvitationError::AlreadyManager { .. } => ApiError::Conflict(e.to_string()),
            InvitationError::InvalidEmail(_) => ApiError::Validation(e.to_string()),
            InvitationError::Database(inner) => inner.into(),
            InvitationError::Internal(inner) => inner.into(),
        }
    }
}
