//! Application lifecycle: which actions are allowed from which status.

use serde::Serialize;
use thiserror::Error;

use super::models::ApplicationStatus;
use ApplicationStatus::*;

/// Something a person does to an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationAction {
    Submit,
    BeginReview,
    Approve,
    Reject,
    Withdraw,
}

impl ApplicationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationAction::Submit => "submit",
            ApplicationAction::BeginReview => "begin_review",
            ApplicationAction::Approve => "approve",
            ApplicationAction::Reject => "reject",
            ApplicationAction::Withdraw => "withdraw",
        }
    }
}

impl std::fmt::Display for ApplicationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (action, allowed sources, target)
const TRANSITIONS: &[(ApplicationAction, &[ApplicationStatus], ApplicationStatus)] = &[
    (ApplicationAction::Submit, &[Draft], Submitted),
    (ApplicationAction::BeginReview, &[Submitted], InReview),
    (ApplicationAction::Approve, &[Submitted, InReview], Approved),
    (ApplicationAction::Reject, &[Submitted, InReview], Rejected),
    (ApplicationAction::Withdraw, &[Submitted, InReview], Withdrawn),
];

/// A decided transition, carrying the status it was decided from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusChange {
    pub action: ApplicationAction,
    pub from: ApplicationStatus,
    pub to: ApplicationStatus,
}

impl StatusChange {
    /// Only a fresh submission notifies the submitter
    pub fn sends_confirmation(&self) -> bool {
        self.from == Draft && self.to == Submitted
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot {action} an application that is {from}")]
pub struct TransitionError {
    pub action: ApplicationAction,
    pub from: ApplicationStatus,
}

/// Look up `action` from `current` in the transition table
pub fn decide(
    current: ApplicationStatus,
    action: ApplicationAction,
) -> Result<StatusChange, TransitionError> {
    TRANSITIONS
        .iter()
        .find(|(a, sources, _)| *a == action && sources.contains(&current))
        .map(|(_, _, to)| StatusChange {
            action,
            from: current,
            to: *to,
        })
        .ok_or(TransitionError {
            action,
            from: current,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [ApplicationStatus; 6] =
        [Draft, Submitted, InReview, Approved, Rejected, Withdrawn];

    const ALL_ACTIONS: [ApplicationAction; 5] = [
        ApplicationAction::Submit,
        ApplicationAction::BeginReview,
        ApplicationAction::Approve,
        ApplicationAction::Reject,
        ApplicationAction::Withdraw,
    ];

    #[test]
    fn submit_only_from_draft() {
        let change = decide(Draft, ApplicationAction::Submit).unwrap();
        assert_eq!(change.to, Submitted);
        assert!(change.sends_confirmation());

        for status in [Submitted, InReview, Approved, Rejected, Withdrawn] {
            let err = decide(status, ApplicationAction::Submit).unwrap_err();
            assert_eq!(err.from, status);
        }
    }

    #[test]
    fn terminal_statuses_have_no_way_out() {
        for status in ALL_STATUSES.iter().filter(|s| s.is_terminal()) {
            for action in ALL_ACTIONS {
                assert!(decide(*status, action).is_err(), "{} from {}", action, status);
            }
        }
    }

    #[test]
    fn review_paths() {
        assert_eq!(decide(Submitted, ApplicationAction::BeginReview).unwrap().to, InReview);
        assert_eq!(decide(InReview, ApplicationAction::Approve).unwrap().to, Approved);
        assert_eq!(decide(Submitted, ApplicationAction::Approve).unwrap().to, Approved);
        assert_eq!(decide(InReview, ApplicationAction::Reject).unwrap().to, Rejected);
        assert!(decide(InReview, ApplicationAction::BeginReview).is_err());
        assert!(decide(Draft, ApplicationAction::Approve).is_err());
    }

    #[test]
    fn withdraw_after_submission_only() {
        assert_eq!(decide(Submitted, ApplicationAction::Withdraw).unwrap().to, Withdrawn);
        assert_eq!(decide(InReview, ApplicationAction::Withdraw).unwrap().to, Withdrawn);
        assert!(decide(Draft, ApplicationAction::Withdraw).is_err());
    }

    #[test]
    fn only_submission_sends_confirmation() {
        let approve = decide(Submitted, ApplicationAction::Approve).unwrap();
        assert!(!approve.sends_confirmation());
    }

    #[test]
    fn error_names_action_and_status() {
        let err = decide(Approved, ApplicationAction::Submit).unwrap_err();
        assert_eq!(err.to_string(), "Cannot submit an application that is approved");
    }
}
