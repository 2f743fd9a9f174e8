//! Typed ID definitions for every persisted registrar entity.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for registered users.
pub struct User;

/// Marker type for people named on applications.
pub struct Contact;

/// Marker type for requested (not yet approved) domain names.
pub struct DraftDomain;

/// Marker type for website / alternative domain entries.
pub struct Website;

/// Marker type for registered domains.
pub struct Domain;

/// Marker type for WHOIS contacts published to the registry.
pub struct PublicContact;

/// Marker type for domain applications.
pub struct DomainApplication;

/// Marker type for collaborator invitations.
pub struct DomainInvitation;

/// Marker type for access-role grants.
pub struct UserDomainRole;

/// Marker type for audit log rows.
pub struct AuditLog;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;
pub type ContactId = Id<Contact>;
pub type DraftDomainId = Id<DraftDomain>;
pub type WebsiteId = Id<Website>;
pub type DomainId = Id<Domain>;
pub type PublicContactId = Id<PublicContact>;
pub type ApplicationId = Id<DomainApplication>;
pub type InvitationId = Id<DomainInvitation>;
pub type UserDomainRoleId = Id<UserDomainRole>;
pub type AuditLogId = Id<AuditLog>;
