//! Fallback user-facing messages.
//!
//! The platform service attaches human-readable text to most of its
//! callbacks, but not all of them, and the Veridex SDK attaches none.
//! Modules fill the gap with these constants so a listener always has
//! something presentable to show.
//!
//! Callers that localize should match on
//! [`FailureReason`](crate::FailureReason) instead of displaying these.

use crate::FailureReason;

/// A fingerprint was read cleanly but matched no enrolled fingerprint.
pub const NOT_RECOGNIZED: &str = "Fingerprint not recognized. Try again";

/// The sensor could not process the reading.
pub const UNABLE_TO_PROCESS: &str = "Unable to process fingerprint. Try again";

/// The sensor exists but is currently unavailable.
pub const HARDWARE_UNAVAILABLE: &str = "Fingerprint hardware not available";

/// The vendor service stopped the session after too many failed attempts.
pub const LOCKED_OUT: &str = "Too many attempts. Try again later";

/// The sensor session ran too long.
pub const TIMED_OUT: &str = "Fingerprint read timed out";

/// Default message for a failure reason, where one exists.
///
/// # Examples
///
/// ```
/// use imprint_core::{FailureReason, messages};
///
/// assert_eq!(
///     messages::fallback_for(FailureReason::Timeout),
///     Some(messages::TIMED_OUT)
/// );
/// assert_eq!(messages::fallback_for(FailureReason::NoHardware), None);
/// ```
pub fn fallback_for(reason: FailureReason) -> Option<&'static str> {
    match reason {
        FailureReason::HardwareUnavailable => Some(HARDWARE_UNAVAILABLE),
        FailureReason::SensorFailed => Some(UNABLE_TO_PROCESS),
        FailureReason::Timeout => Some(TIMED_OUT),
        FailureReason::AuthenticationFailed => Some(NOT_RECOGNIZED),
        FailureReason::LockedOut => Some(LOCKED_OUT),
        FailureReason::Unknown => Some(UNABLE_TO_PROCESS),
        FailureReason::NoHardware | FailureReason::NoFingerprintsRegistered => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_reasons_have_fallback_text() {
        for reason in [
            FailureReason::SensorFailed,
            FailureReason::AuthenticationFailed,
            FailureReason::Timeout,
            FailureReason::LockedOut,
        ] {
            assert!(fallback_for(reason).is_some(), "no fallback for {reason}");
        }
    }

    #[test]
    fn test_dispatch_synthesized_reasons_have_no_text() {
        assert_eq!(fallback_for(FailureReason::NoHardware), None);
        assert_eq!(fallback_for(FailureReason::NoFingerprintsRegistered), None);
    }
}
