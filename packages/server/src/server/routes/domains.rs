use axum::extract::{Extension, Path};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::DomainId;
use crate::domains::domain::Domain;
use crate::domains::invitations::{self, InviteOutcome};
use crate::domains::public_contacts::{
    save_contact, ContactFields, ContactType, PublicContact, PublicContactDraft,
};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DomainContactsResponse {
    pub domain: Domain,
    pub contacts: Vec<PublicContact>,
}

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub email: String,
}

async fn load_domain(id: DomainId, state: &AppState) -> Result<Domain, ApiError> {
    Domain::find(id, &state.deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Domain {} not found", id)))
}

/// GET /api/v1/domains/:id/contacts
pub async fn list_contacts_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<DomainId>,
) -> Result<Json<DomainContactsResponse>, ApiError> {
    let domain = load_domain(id, &state).await?;
    let contacts = domain.contacts(&state.deps.db_pool).await?;
    Ok(Json(DomainContactsResponse { domain, contacts }))
}

/// PUT /api/v1/domains/:id/contacts/:contact_type
///
/// Edits the active contact for the role, keeping its registry id, or
/// creates the role's first contact.
pub async fn save_contact_handler(
    Extension(state): Extension<AppState>,
    Path((id, contact_type)): Path<(DomainId, ContactType)>,
    Json(fields): Json<ContactFields>,
) -> Result<Json<PublicContact>, ApiError> {
    let domain = load_domain(id, &state).await?;

    let draft = match domain.contact_id(contact_type) {
        Some(active) => {
            let mut draft = PublicContact::find_by_id(active, &state.deps.db_pool)
                .await?
                .to_draft();
            draft.fields = fields;
            draft
        }
        None => PublicContactDraft::new(domain.id, contact_type, fields),
    };

    let contact = save_contact(&draft, &state.deps).await?;
    Ok(Json(contact))
}

/// POST /api/v1/domains/:id/users
pub async fn add_user_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<DomainId>,
    Json(request): Json<AddUserRequest>,
) -> Result<Json<InviteOutcome>, ApiError> {
    let outcome = invitations::invite(id, &request.email, &state.deps).await?;
    Ok(Json(outcome))
}
