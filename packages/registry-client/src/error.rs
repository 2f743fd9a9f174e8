//! Error types for the registry client.
//!
//! Result codes follow RFC 5730 section 3:
//! - 1000 - 1500 success
//! - 2000 - 2308 the client sent something the registry refused
//! - 2400 - 2500 the registry failed
//! - 2501 - 2502 the registry is closing the session (abuse / auth)

use thiserror::Error;

/// Result type for registry client operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Result codes the registry can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    CommandCompletedSuccessfully = 1000,
    CommandCompletedSuccessfullyActionPending = 1001,
    CommandCompletedSuccessfullyNoMessages = 1300,
    CommandCompletedSuccessfullyAckToDequeue = 1301,
    CommandCompletedSuccessfullyEndingSession = 1500,

    UnknownCommand = 2000,
    CommandSyntaxError = 2001,
    CommandUseError = 2002,
    RequiredParameterMissing = 2003,
    ParameterValueRangeError = 2004,
    ParameterValueSyntaxError = 2005,
    UnimplementedProtocolVersion = 2100,
    UnimplementedCommand = 2101,
    UnimplementedOption = 2102,
    UnimplementedExtension = 2103,
    BillingFailure = 2104,
    ObjectIsNotEligibleForRenewal = 2105,
    ObjectIsNotEligibleForTransfer = 2106,
    AuthenticationError = 2200,
    AuthorizationError = 2201,
    InvalidAuthorizationInformation = 2202,
    ObjectPendingTransfer = 2300,
    ObjectNotPendingTransfer = 2301,
    ObjectExists = 2302,
    ObjectDoesNotExist = 2303,
    ObjectStatusProhibitsOperation = 2304,
    ObjectAssociationProhibitsOperation = 2305,
    ParameterValuePolicyError = 2306,
    UnimplementedObjectService = 2307,
    DataManagementPolicyViolation = 2308,

    CommandFailed = 2400,
    CommandFailedServerClosingConnection = 2500,

    AuthenticationErrorServerClosingConnection = 2501,
    SessionLimitExceededServerClosingConnection = 2502,
}

impl ErrorCode {
    /// Map a raw result code onto a known variant.
    pub fn from_code(code: u16) -> Option<Self> {
        use ErrorCode::*;
        let known = match code {
            1000 => CommandCompletedSuccessfully,
            1001 => CommandCompletedSuccessfullyActionPending,
            1300 => CommandCompletedSuccessfullyNoMessages,
            1301 => CommandCompletedSuccessfullyAckToDequeue,
            1500 => CommandCompletedSuccessfullyEndingSession,
            2000 => UnknownCommand,
            2001 => CommandSyntaxError,
            2002 => CommandUseError,
            2003 => RequiredParameterMissing,
            2004 => ParameterValueRangeError,
            2005 => ParameterValueSyntaxError,
            2100 => UnimplementedProtocolVersion,
            2101 => UnimplementedCommand,
            2102 => UnimplementedOption,
            2103 => UnimplementedExtension,
            2104 => BillingFailure,
            2105 => ObjectIsNotEligibleForRenewal,
            2106 => ObjectIsNotEligibleForTransfer,
            2200 => AuthenticationError,
            2201 => AuthorizationError,
            2202 => InvalidAuthorizationInformation,
            2300 => ObjectPendingTransfer,
            2301 => ObjectNotPendingTransfer,
            2302 => ObjectExists,
            2303 => ObjectDoesNotExist,
            2304 => ObjectStatusProhibitsOperation,
            2305 => ObjectAssociationProhibitsOperation,
            2306 => ParameterValuePolicyError,
            2307 => UnimplementedObjectService,
            2308 => DataManagementPolicyViolation,
            2400 => CommandFailed,
            2500 => CommandFailedServerClosingConnection,
            2501 => AuthenticationErrorServerClosingConnection,
            2502 => SessionLimitExceededServerClosingConnection,
            _ => return None,
        };
        Some(known)
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn is_success(self) -> bool {
        self.as_u16() < 2000
    }
}

/// Registry client errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Configuration error (bad base URL, unusable HTTP client settings)
    #[error("Registry client configuration error: {0}")]
    Config(String),

    /// The request never produced a registry response
    #[error("{command} failed to execute due to a connection error: {message}")]
    Transport {
        command: &'static str,
        message: String,
    },

    /// The request or the response could not be encoded/decoded
    #[error("{command} failed to execute due to some syntax error: {message}")]
    Syntax {
        command: &'static str,
        message: String,
    },

    /// The gateway rejected our credentials
    #[error("{command} failed to execute due to a registry login error")]
    Login { command: &'static str },

    /// The registry answered with an error result code
    #[error("Registry returned {code}: {message}")]
    Response { code: u16, message: String },
}

impl RegistryError {
    /// Raw result code, when the registry produced one.
    pub fn code(&self) -> Option<u16> {
        match self {
            RegistryError::Response { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Known result code, when the registry produced one we recognize.
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code().and_then(ErrorCode::from_code)
    }

    /// Only a generic "command failed" is worth sending again.
    pub fn should_retry(&self) -> bool {
        self.code() == Some(ErrorCode::CommandFailed.as_u16())
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.code(), Some(code) if (2400..=2500).contains(&code))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.code(), Some(code) if (2000..=2308).contains(&code))
    }

    /// The object named in the command is unknown to the registry.
    pub fn is_object_missing(&self) -> bool {
        self.code() == Some(ErrorCode::ObjectDoesNotExist.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(code: u16) -> RegistryError {
        RegistryError::Response {
            code,
            message: "test".to_string(),
        }
    }

    #[test]
    fn only_command_failed_is_retried() {
        assert!(response(2400).should_retry());
        assert!(!response(2500).should_retry());
        assert!(!response(2303).should_retry());
        assert!(!RegistryError::Login { command: "Login" }.should_retry());
    }

    #[test]
    fn classifies_client_and_server_errors() {
        assert!(response(2001).is_client_error());
        assert!(response(2308).is_client_error());
        assert!(!response(2400).is_client_error());

        assert!(response(2400).is_server_error());
        assert!(response(2500).is_server_error());
        assert!(!response(2501).is_server_error());
    }

    #[test]
    fn transport_errors_have_no_code() {
        let err = RegistryError::Transport {
            command: "UpdateContact",
            message: "connection reset".to_string(),
        };
        assert_eq!(err.code(), None);
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
        assert!(err.to_string().contains("UpdateContact"));
    }

    #[test]
    fn maps_known_codes() {
        assert_eq!(ErrorCode::from_code(2303), Some(ErrorCode::ObjectDoesNotExist));
        assert_eq!(ErrorCode::from_code(1001), Some(ErrorCode::CommandCompletedSuccessfullyActionPending));
        assert_eq!(ErrorCode::from_code(1999), None);
        assert!(ErrorCode::CommandCompletedSuccessfully.is_success());
        assert!(!ErrorCode::CommandFailed.is_success());
    }
}
