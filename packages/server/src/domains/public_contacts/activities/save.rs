//! Save a contact locally and at the registry as one unit.

use sqlx::PgConnection;
use tracing::{debug, error, info};

use crate::common::DomainId;
use crate::domains::domain::models::Domain;
use crate::domains::public_contacts::defaults::DefaultContacts;
use crate::domains::public_contacts::error::ContactSyncError;
use crate::domains::public_contacts::models::{
    ContactFields, ContactType, PublicContact, PublicContactDraft,
};
use crate::domains::public_contacts::registry_id::generate_registry_id;
use crate::domains::public_contacts::validation::validate_fields;
use crate::kernel::{BaseRegistryClient, ServerDeps};

impl PublicContactDraft {
    /// A new contact with a freshly generated registry id
    pub fn new(domain_id: DomainId, contact_type: ContactType, fields: ContactFields) -> Self {
        Self {
            domain_id,
            contact_type,
            registry_id: generate_registry_id(),
            fields,
        }
    }

    /// The placeholder contact for `contact_type`
    pub fn default_for(domain_id: DomainId, contact_type: ContactType) -> Self {
        Self::new(
            domain_id,
            contact_type,
            DefaultContacts::global().get(contact_type).clone(),
        )
    }
}

/// Save a contact and make it the domain's active contact for its role.
///
/// The row, the domain's role reference, and the registry upsert succeed or
/// fail together.
pub async fn save_contact(
    draft: &PublicContactDraft,
    deps: &ServerDeps,
) -> Result<PublicContact, ContactSyncError> {
    let mut tx = deps.db_pool.begin().await?;
    let contact = save_contact_in(draft, deps.registry.as_ref(), &mut *tx).await?;

    if let Err(e) = tx.commit().await {
        // The registry already has these fields; the next save of this
        // registry id reconciles the two sides.
        error!(
            registry_id = %contact.registry_id,
            domain_id = %contact.domain_id,
            error = %e,
            "Contact upserted at registry but local commit failed"
        );
        return Err(e.into());
    }

    info!(
        registry_id = %contact.registry_id,
        domain_id = %contact.domain_id,
        contact_type = %contact.contact_type,
        "Contact saved"
    );
    Ok(contact)
}

/// Save inside the caller's transaction. Dropping the transaction after an
/// error undoes the local writes.
pub async fn save_contact_in(
    draft: &PublicContactDraft,
    registry: &dyn BaseRegistryClient,
    conn: &mut PgConnection,
) -> Result<PublicContact, ContactSyncError> {
    validate_fields(&draft.fields).map_err(ContactSyncError::InvalidFields)?;

    let contact = PublicContact::upsert(draft, &mut *conn)
        .await?
        .ok_or_else(|| ContactSyncError::RegistryIdTaken(draft.registry_id.clone()))?;

    Domain::set_contact_reference(contact.domain_id, contact.contact_type, contact.id, &mut *conn)
        .await?;

    debug!(registry_id = %contact.registry_id, "Pushing contact to registry");
    registry.upsert_contact(&contact.to_payload()).await?;

    Ok(contact)
}

/// Save the placeholder contact for every role on a new domain.
pub async fn provision_default_contacts(
    domain_id: DomainId,
    registry: &dyn BaseRegistryClient,
    conn: &mut PgConnection,
) -> Result<Vec<PublicContact>, ContactSyncError> {
    let mut contacts = Vec::with_capacity(ContactType::ALL.len());
    for contact_type in ContactType::ALL {
        let draft = PublicContactDraft::default_for(domain_id, contact_type);
        contacts.push(save_contact_in(&draft, registry, &mut *conn).await?);
    }
    Ok(contacts)
}
