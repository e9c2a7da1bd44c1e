//! Veridex SDK module.

use crate::client::{AnyVeridexClient, VeridexClient};
use crate::mock::{MockVeridexClient, MockVeridexHandle};
use imprint_core::{
    AuthenticationFailure, AuthenticationListener, CancellationToken, CryptoContext,
    FailureReason, FingerprintModule, ModuleTag, Result, messages,
};
use tracing::{debug, warn};

/// Tag of the Veridex module.
pub const TAG: ModuleTag = ModuleTag::new(2);

// Terminal identify statuses, as delivered by the vendor service. The SDK
// attaches no message text to any of them.

/// A fingerprint was read and matched a registered fingerprint.
pub const STATUS_SUCCESS: i32 = 0;

/// The identify attempt ran too long and was stopped by the SDK.
pub const STATUS_TIMEOUT: i32 = 4;

/// The user cancelled the attempt from the vendor UI.
pub const STATUS_USER_CANCELLED: i32 = 8;

/// A hardware button press aborted the attempt.
pub const STATUS_BUTTON_PRESSED: i32 = 9;

/// The reading was too poor to match against.
pub const STATUS_QUALITY_FAILED: i32 = 12;

/// The SDK refuses further attempts for a lockout period.
pub const STATUS_OPERATION_DENIED: i32 = 13;

/// A fingerprint was read cleanly but matched no registered fingerprint.
pub const STATUS_NO_MATCH: i32 = 16;

/// The sensor failed while reading.
pub const STATUS_SENSOR_FAILED: i32 = 51;

/// How the module reacts to a terminal identify status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Deliver `on_success` and end the session.
    Success,

    /// End the session without any callback.
    Cancelled,

    /// Deliver a non-fatal failure; restart identify if requested.
    NonFatal(FailureReason),

    /// Deliver a fatal failure and end the session.
    Fatal(FailureReason),
}

/// Classify a terminal identify status.
pub fn classify_status(status: i32) -> StatusClass {
    match status {
        STATUS_SUCCESS => StatusClass::Success,
        STATUS_USER_CANCELLED | STATUS_BUTTON_PRESSED => StatusClass::Cancelled,
        STATUS_TIMEOUT => StatusClass::Fatal(FailureReason::Timeout),
        STATUS_OPERATION_DENIED => StatusClass::Fatal(FailureReason::LockedOut),
        STATUS_NO_MATCH => StatusClass::NonFatal(FailureReason::AuthenticationFailed),
        STATUS_QUALITY_FAILED | STATUS_SENSOR_FAILED => {
            StatusClass::NonFatal(FailureReason::SensorFailed)
        }
        _ => StatusClass::Fatal(FailureReason::Unknown),
    }
}

/// Fingerprint module backed by the Veridex SDK.
///
/// Identify sessions are one-shot, so while `restart_on_non_fatal` holds
/// the module re-requests identify after every non-fatal status,
/// indefinitely: the bounded retry budget upstream applies to timeouts
/// only, and timeouts are fatal here.
///
/// The SDK has no keystore binding; a supplied
/// [`CryptoContext`] is ignored.
#[derive(Debug)]
pub struct VeridexModule {
    client: AnyVeridexClient,
}

impl VeridexModule {
    /// Create a module over the given SDK client.
    pub fn new(client: AnyVeridexClient) -> Self {
        Self { client }
    }

    /// Create a module over a fresh mock client, returning the mock's
    /// controlling handle. For development and tests.
    pub fn with_mock() -> (Self, MockVeridexHandle) {
        let (client, handle) = MockVeridexClient::new();
        (Self::new(AnyVeridexClient::Mock(client)), handle)
    }

    fn failure(reason: FailureReason, fatal: bool, status: i32) -> AuthenticationFailure {
        AuthenticationFailure::new(
            reason,
            fatal,
            messages::fallback_for(reason).map(str::to_string),
            TAG,
            status,
        )
    }
}

impl FingerprintModule for VeridexModule {
    fn tag(&self) -> ModuleTag {
        TAG
    }

    async fn is_hardware_present(&self) -> bool {
        match self.client.is_fingerprint_feature_enabled().await {
            Ok(enabled) => enabled,
            Err(error) => {
                warn!(%error, "veridex feature probe failed");
                false
            }
        }
    }

    async fn has_fingerprint_registered(&self) -> Result<bool> {
        match self.client.has_registered_fingerprints().await {
            Ok(registered) => Ok(registered),
            Err(error) if error.is_permission_denied() => Err(error),
            Err(error) => {
                warn!(%error, "veridex registration probe failed");
                Ok(false)
            }
        }
    }

    async fn authenticate(
        &mut self,
        cancellation: CancellationToken,
        _crypto: Option<&CryptoContext>,
        listener: &mut dyn AuthenticationListener,
        restart_on_non_fatal: bool,
    ) -> Result<()> {
        loop {
            let status = tokio::select! {
                _ = cancellation.cancelled() => {
                    debug!("veridex session cancelled");
                    return Ok(());
                }
                status = self.client.request_identify(cancellation.clone()) => match status {
                    Ok(status) => status,
                    Err(error) => {
                        if error.is_permission_denied() {
                            return Err(error);
                        }
                        warn!(%error, "veridex identify request failed");
                        listener.on_failure(Self::failure(
                            FailureReason::Unknown,
                            true,
                            STATUS_SENSOR_FAILED,
                        ));
                        return Ok(());
                    }
                },
            };

            match classify_status(status) {
                StatusClass::Success => {
                    listener.on_success(TAG);
                    return Ok(());
                }
                StatusClass::Cancelled => {
                    // Don't forward a cancelled message.
                    return Ok(());
                }
                StatusClass::Fatal(reason) => {
                    listener.on_failure(Self::failure(reason, true, status));
                    return Ok(());
                }
                StatusClass::NonFatal(reason) => {
                    if restart_on_non_fatal {
                        listener.on_failure(Self::failure(reason, false, status));
                        debug!(status, "restarting veridex identify after non-fatal status");
                        continue;
                    }
                    cancellation.cancel();
                    listener.on_failure(Self::failure(reason, false, status));
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[derive(Debug, Default)]
    struct Recorder {
        successes: Vec<ModuleTag>,
        failures: Vec<AuthenticationFailure>,
    }

    impl AuthenticationListener for Recorder {
        fn on_success(&mut self, module_tag: ModuleTag) {
            self.successes.push(module_tag);
        }

        fn on_failure(&mut self, failure: AuthenticationFailure) {
            self.failures.push(failure);
        }
    }

    #[rstest]
    #[case(STATUS_SUCCESS, StatusClass::Success)]
    #[case(STATUS_USER_CANCELLED, StatusClass::Cancelled)]
    #[case(STATUS_BUTTON_PRESSED, StatusClass::Cancelled)]
    #[case(STATUS_TIMEOUT, StatusClass::Fatal(FailureReason::Timeout))]
    #[case(STATUS_OPERATION_DENIED, StatusClass::Fatal(FailureReason::LockedOut))]
    #[case(STATUS_NO_MATCH, StatusClass::NonFatal(FailureReason::AuthenticationFailed))]
    #[case(STATUS_QUALITY_FAILED, StatusClass::NonFatal(FailureReason::SensorFailed))]
    #[case(STATUS_SENSOR_FAILED, StatusClass::NonFatal(FailureReason::SensorFailed))]
    #[case(-1, StatusClass::Fatal(FailureReason::Unknown))]
    #[case(1000, StatusClass::Fatal(FailureReason::Unknown))]
    fn test_status_classification(#[case] status: i32, #[case] expected: StatusClass) {
        assert_eq!(classify_status(status), expected);
    }

    proptest! {
        /// Every raw SDK status classifies without panicking.
        #[test]
        fn prop_status_classification_is_total(status in any::<i32>()) {
            let _ = classify_status(status);
        }
    }

    #[tokio::test]
    async fn test_success_delivers_one_callback() {
        let (mut module, handle) = VeridexModule::with_mock();
        handle.queue_status(STATUS_SUCCESS).await.unwrap();

        let mut recorder = Recorder::default();
        module
            .authenticate(CancellationToken::new(), None, &mut recorder, true)
            .await
            .unwrap();

        assert_eq!(recorder.successes, vec![TAG]);
        assert!(recorder.failures.is_empty());
        assert_eq!(handle.identify_requests(), 1);
    }

    #[tokio::test]
    async fn test_non_fatal_statuses_restart_identify_indefinitely() {
        let (mut module, handle) = VeridexModule::with_mock();
        for _ in 0..7 {
            handle.queue_status(STATUS_NO_MATCH).await.unwrap();
        }
        handle.queue_status(STATUS_QUALITY_FAILED).await.unwrap();
        handle.queue_status(STATUS_SUCCESS).await.unwrap();

        let mut recorder = Recorder::default();
        module
            .authenticate(CancellationToken::new(), None, &mut recorder, true)
            .await
            .unwrap();

        // 8 non-fatal failures forwarded, then the success; 9 attempts total.
        assert_eq!(recorder.failures.len(), 8);
        assert!(recorder.failures.iter().all(|f| !f.fatal));
        assert_eq!(recorder.successes, vec![TAG]);
        assert_eq!(handle.identify_requests(), 9);
    }

    #[tokio::test]
    async fn test_non_fatal_stops_sensor_without_restart() {
        let (mut module, handle) = VeridexModule::with_mock();
        handle.queue_status(STATUS_NO_MATCH).await.unwrap();

        let token = CancellationToken::new();
        let mut recorder = Recorder::default();
        module
            .authenticate(token.clone(), None, &mut recorder, false)
            .await
            .unwrap();

        assert!(token.is_cancelled());
        assert_eq!(recorder.failures.len(), 1);
        assert_eq!(
            recorder.failures[0].reason,
            FailureReason::AuthenticationFailed
        );
        assert_eq!(
            recorder.failures[0].message.as_deref(),
            Some(messages::NOT_RECOGNIZED)
        );
        assert_eq!(handle.identify_requests(), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_fatal_and_does_not_restart() {
        let (mut module, handle) = VeridexModule::with_mock();
        handle.queue_status(STATUS_TIMEOUT).await.unwrap();

        let mut recorder = Recorder::default();
        module
            .authenticate(CancellationToken::new(), None, &mut recorder, true)
            .await
            .unwrap();

        assert_eq!(recorder.failures.len(), 1);
        assert_eq!(recorder.failures[0].reason, FailureReason::Timeout);
        assert!(recorder.failures[0].fatal);
        assert_eq!(handle.identify_requests(), 1);
    }

    #[tokio::test]
    async fn test_vendor_cancel_statuses_deliver_no_callback() {
        for status in [STATUS_USER_CANCELLED, STATUS_BUTTON_PRESSED] {
            let (mut module, handle) = VeridexModule::with_mock();
            handle.queue_status(status).await.unwrap();

            let mut recorder = Recorder::default();
            module
                .authenticate(CancellationToken::new(), None, &mut recorder, true)
                .await
                .unwrap();

            assert!(recorder.successes.is_empty());
            assert!(recorder.failures.is_empty());
        }
    }

    #[tokio::test]
    async fn test_cancellation_ends_session_silently() {
        let (mut module, _handle) = VeridexModule::with_mock();

        let token = CancellationToken::new();
        token.cancel();

        let mut recorder = Recorder::default();
        module
            .authenticate(token, None, &mut recorder, true)
            .await
            .unwrap();

        assert!(recorder.successes.is_empty());
        assert!(recorder.failures.is_empty());
    }

    #[tokio::test]
    async fn test_identify_fault_becomes_unknown_failure() {
        let (mut module, handle) = VeridexModule::with_mock();
        handle.fail_next_identify();

        let mut recorder = Recorder::default();
        module
            .authenticate(CancellationToken::new(), None, &mut recorder, true)
            .await
            .unwrap();

        assert_eq!(recorder.failures.len(), 1);
        assert_eq!(recorder.failures[0].reason, FailureReason::Unknown);
        assert!(recorder.failures[0].fatal);
    }

    #[tokio::test]
    async fn test_feature_probe_fault_reads_as_no_hardware() {
        let (module, handle) = VeridexModule::with_mock();
        handle.fail_feature_probe();

        assert!(!module.is_hardware_present().await);
    }

    #[tokio::test]
    async fn test_registration_permission_denial_propagates() {
        let (module, handle) = VeridexModule::with_mock();
        handle.deny_registered_probe();

        let err = module.has_fingerprint_registered().await.unwrap_err();
        assert!(err.is_permission_denied());
    }
}
