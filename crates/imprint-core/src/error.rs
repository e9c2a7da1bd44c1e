//! Error types for operations that cannot report through a listener.
//!
//! Almost every failure in this stack is delivered as an
//! [`AuthenticationFailure`](crate::AuthenticationFailure) through the
//! listener's failure callback. The `Error` type below exists for the few
//! conditions that must propagate as a `Result` instead: permission denial
//! raised by the vendor service, vendor client faults that modules convert
//! before they reach a caller, and mock harness misuse in tests.

/// Result type alias for imprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the listener callback path.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The calling process lacks the biometric permission.
    ///
    /// This is the one vendor-raised condition that propagates to the
    /// caller unchanged instead of being normalized into a failure reason.
    #[error("biometric permission denied: {message}")]
    PermissionDenied { message: String },

    /// The vendor client failed in a way the module did not expect.
    ///
    /// Modules catch this and convert it into a fatal
    /// [`FailureReason::Unknown`](crate::FailureReason::Unknown) failure;
    /// it only crosses an API boundary inside a module crate.
    #[error("vendor API failure: {message}")]
    VendorApi { message: String },

    /// A mock client handle was driven while no session was active.
    #[error("no authentication session is active")]
    NoActiveSession,

    /// Invalid data supplied to a constructor.
    #[error("invalid data: {message}")]
    InvalidData { message: String },
}

impl Error {
    /// Create a new permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a new vendor API error.
    pub fn vendor_api(message: impl Into<String>) -> Self {
        Self::VendorApi {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// True if this error is a permission denial that must propagate to the
    /// caller rather than being swallowed by a module.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_error() {
        let error = Error::permission_denied("USE_BIOMETRIC not granted");
        assert!(error.is_permission_denied());
        assert_eq!(
            error.to_string(),
            "biometric permission denied: USE_BIOMETRIC not granted"
        );
    }

    #[test]
    fn test_vendor_api_error() {
        let error = Error::vendor_api("service handle was null");
        assert!(!error.is_permission_denied());
        assert_eq!(error.to_string(), "vendor API failure: service handle was null");
    }

    #[test]
    fn test_no_active_session_error() {
        let error = Error::NoActiveSession;
        assert_eq!(error.to_string(), "no authentication session is active");
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            Error::permission_denied("denied"),
            Error::vendor_api("broken"),
            Error::invalid_data("bad key id"),
        ];

        for error in errors {
            let _ = format!("{}", error);
            let _ = format!("{:?}", error);
        }
    }
}
