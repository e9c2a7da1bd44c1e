//! Platform biometric service module.

use crate::client::{AnyPlatformClient, PlatformAuthEvent, PlatformClient};
use crate::mock::{MockPlatformClient, MockPlatformHandle};
use imprint_core::{
    AuthenticationFailure, AuthenticationListener, CancellationToken, CryptoContext,
    FailureReason, FingerprintModule, ModuleTag, Result, messages,
};
use tracing::{debug, warn};

/// Tag of the platform module.
pub const TAG: ModuleTag = ModuleTag::new(1);

// The ERROR and ACQUIRED constants below are copied from the platform
// service headers, which this shim cannot link against. Fatal and non-fatal
// codes overlap numerically; fatal errors arrive on the error channel,
// non-fatal acquisition hints on the help channel.

/// The hardware is unavailable. Try again later.
pub const ERROR_HW_UNAVAILABLE: i32 = 1;

/// The sensor was unable to process the current image.
pub const ERROR_UNABLE_TO_PROCESS: i32 = 2;

/// The current request ran too long and was stopped by the service.
pub const ERROR_TIMEOUT: i32 = 3;

/// Not enough storage remaining to complete the operation.
pub const ERROR_NO_SPACE: i32 = 4;

/// The operation was cancelled, by the caller or because the sensor became
/// unavailable (user switch, device lock).
pub const ERROR_CANCELED: i32 = 5;

/// The service is locked out due to too many attempts.
pub const ERROR_LOCKOUT: i32 = 7;

/// The image acquired was good.
pub const ACQUIRED_GOOD: i32 = 0;

/// Only a partial fingerprint image was detected.
pub const ACQUIRED_PARTIAL: i32 = 1;

/// The image was too noisy to process (dry skin, dirty sensor).
pub const ACQUIRED_INSUFFICIENT: i32 = 2;

/// The image was too noisy due to suspected or detected dirt on the sensor.
pub const ACQUIRED_IMAGER_DIRTY: i32 = 3;

/// The image was unreadable due to lack of motion (swipe sensors).
pub const ACQUIRED_TOO_SLOW: i32 = 4;

/// The image was incomplete due to quick motion.
pub const ACQUIRED_TOO_FAST: i32 = 5;

/// Sentinel vendor code for an unrecognized fingerprint. Defined by this
/// shim, not by the service, which reports that case without a code.
pub const AUTHENTICATION_FAILED_CODE: i32 = 1001;

/// Fingerprint module backed by the platform biometric service.
///
/// Normalizes the service's two-channel error reporting (fatal `ERROR_*`
/// codes, non-fatal `ACQUIRED_*` hints) into the shared failure taxonomy,
/// and keeps the sensor session alive across non-fatal failures when asked
/// to. The service keeps the sensor running after a non-fatal event on its
/// own, so stopping on non-fatal means cancelling the session token before
/// the callback.
#[derive(Debug)]
pub struct PlatformModule {
    client: AnyPlatformClient,
}

impl PlatformModule {
    /// Create a module over the given service client.
    pub fn new(client: AnyPlatformClient) -> Self {
        Self { client }
    }

    /// Create a module over a fresh mock client, returning the mock's
    /// controlling handle. For development and tests.
    pub fn with_mock() -> (Self, MockPlatformHandle) {
        let (client, handle) = MockPlatformClient::new();
        (Self::new(AnyPlatformClient::Mock(client)), handle)
    }

    fn unknown_failure() -> AuthenticationFailure {
        AuthenticationFailure::new(
            FailureReason::Unknown,
            true,
            Some(messages::UNABLE_TO_PROCESS.to_string()),
            TAG,
            ERROR_CANCELED,
        )
    }
}

/// Map a fatal service error code to a failure reason.
///
/// `ERROR_CANCELED` is intentionally absent: a cancelled session delivers
/// no callback at all.
pub fn map_error_code(code: i32) -> FailureReason {
    match code {
        ERROR_HW_UNAVAILABLE => FailureReason::HardwareUnavailable,
        ERROR_UNABLE_TO_PROCESS | ERROR_NO_SPACE => FailureReason::SensorFailed,
        ERROR_TIMEOUT => FailureReason::Timeout,
        ERROR_LOCKOUT => FailureReason::LockedOut,
        _ => FailureReason::Unknown,
    }
}

impl FingerprintModule for PlatformModule {
    fn tag(&self) -> ModuleTag {
        TAG
    }

    async fn is_hardware_present(&self) -> bool {
        // Some devices raise a spurious permission error from the presence
        // probe even when the manifest is correct; treat any probe fault as
        // missing hardware.
        match self.client.is_hardware_detected().await {
            Ok(detected) => detected,
            Err(error) => {
                warn!(%error, "platform hardware presence probe failed");
                false
            }
        }
    }

    async fn has_fingerprint_registered(&self) -> Result<bool> {
        match self.client.has_enrolled_fingerprints().await {
            Ok(enrolled) => Ok(enrolled),
            Err(error) if error.is_permission_denied() => Err(error),
            Err(error) => {
                warn!(%error, "platform enrollment probe failed");
                Ok(false)
            }
        }
    }

    async fn authenticate(
        &mut self,
        cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
        listener: &mut dyn AuthenticationListener,
        restart_on_non_fatal: bool,
    ) -> Result<()> {
        if let Err(error) = self
            .client
            .begin_authentication(cancellation.clone(), crypto)
            .await
        {
            if error.is_permission_denied() {
                return Err(error);
            }
            // The service is known to fault here unpredictably on some
            // devices; surface it as a generic failure instead.
            warn!(%error, "platform authenticate failed to start");
            listener.on_failure(Self::unknown_failure());
            return Ok(());
        }

        loop {
            let event = tokio::select! {
                _ = cancellation.cancelled() => {
                    debug!("platform session cancelled");
                    return Ok(());
                }
                event = self.client.next_event() => match event {
                    Ok(event) => event,
                    Err(error) => {
                        warn!(%error, "platform session event stream failed");
                        listener.on_failure(Self::unknown_failure());
                        return Ok(());
                    }
                },
            };

            match event {
                PlatformAuthEvent::Succeeded => {
                    listener.on_success(TAG);
                    return Ok(());
                }
                PlatformAuthEvent::Error {
                    code: ERROR_CANCELED,
                    ..
                } => {
                    // Don't forward a cancelled message.
                    return Ok(());
                }
                PlatformAuthEvent::Error { code, message } => {
                    let reason = map_error_code(code);
                    let message =
                        message.or_else(|| messages::fallback_for(reason).map(str::to_string));
                    listener.on_failure(AuthenticationFailure::new(
                        reason, true, message, TAG, code,
                    ));
                    return Ok(());
                }
                PlatformAuthEvent::Help { code, message } => {
                    if !restart_on_non_fatal {
                        cancellation.cancel();
                    }
                    let message = message
                        .or_else(|| Some(messages::UNABLE_TO_PROCESS.to_string()));
                    listener.on_failure(AuthenticationFailure::new(
                        FailureReason::SensorFailed,
                        false,
                        message,
                        TAG,
                        code,
                    ));
                    if !restart_on_non_fatal {
                        return Ok(());
                    }
                }
                PlatformAuthEvent::NotRecognized => {
                    if !restart_on_non_fatal {
                        cancellation.cancel();
                    }
                    listener.on_failure(AuthenticationFailure::new(
                        FailureReason::AuthenticationFailed,
                        false,
                        Some(messages::NOT_RECOGNIZED.to_string()),
                        TAG,
                        AUTHENTICATION_FAILED_CODE,
                    ));
                    if !restart_on_non_fatal {
                        return Ok(());
                    }
                }
            }
        }
    }
}
