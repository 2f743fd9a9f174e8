//! Invitation lifecycle: INVITED -> RETRIEVED, nothing else.

use super::error::InvitationError;
use super::models::{DomainInvitation, InvitationStatus};

impl DomainInvitation {
    /// Can this invitation still be retrieved?
    pub fn plan_retrieve(&self) -> Result<(), InvitationError> {
        match self.status() {
            InvitationStatus::Invited => Ok(()),
            InvitationStatus::Retrieved => Err(InvitationError::AlreadyRetrieved(self.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invited_can_be_retrieved() {
        assert!(DomainInvitation::fixture(InvitationStatus::Invited)
            .plan_retrieve()
            .is_ok());
    }

    #[test]
    fn retrieved_is_final() {
        let invitation = DomainInvitation::fixture(InvitationStatus::Retrieved);
        assert!(matches!(
            invitation.plan_retrieve(),
            Err(InvitationError::AlreadyRetrieved(id)) if id == invitation.id
        ));
    }
}
