//! Client abstraction over the platform biometric service.

use imprint_core::{CancellationToken, CryptoContext, Result};

/// One callback from an active platform sensor session.
///
/// Mirrors the service's callback surface: a session delivers any number of
/// `Help` and `NotRecognized` events while the sensor runs, then exactly one
/// `Succeeded` or `Error`, unless it is cancelled first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformAuthEvent {
    /// A fingerprint was read and matched an enrolled fingerprint.
    Succeeded,

    /// The session ended with a fatal service error (`ERROR_*` code).
    Error {
        code: i32,
        message: Option<String>,
    },

    /// Non-fatal acquisition hint (`ACQUIRED_*` code); the sensor is still
    /// running.
    Help {
        code: i32,
        message: Option<String>,
    },

    /// A fingerprint was read cleanly but matched no enrolled fingerprint;
    /// the sensor is still running.
    NotRecognized,
}

/// Access to the platform biometric service.
///
/// Real implementations bind to the OS service; the
/// [`MockPlatformClient`](crate::mock::MockPlatformClient) simulates it for
/// development and testing. Like the device traits elsewhere in this
/// workspace, methods are native `async fn`, so the trait is not
/// object-safe: use [`AnyPlatformClient`] where dispatch is needed.
pub trait PlatformClient: Send + Sync {
    /// True if the service reports a fingerprint sensor on this device.
    ///
    /// # Errors
    ///
    /// Returns an error if the service handle cannot be obtained or the
    /// probe itself faults. Some devices raise spurious permission errors
    /// from this probe; callers treat any error as "no hardware".
    async fn is_hardware_detected(&self) -> Result<bool>;

    /// True if the user has fingerprints enrolled with the service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`](imprint_core::Error::PermissionDenied)
    /// if the calling process lacks the biometric permission.
    async fn has_enrolled_fingerprints(&self) -> Result<bool>;

    /// Start a sensor session. Events are then pulled with [`next_event`].
    ///
    /// The cancellation token is handed to the service, which halts the
    /// sensor when it fires. `crypto` binds the session to a keystore key.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be started; the service is
    /// known to fault here unpredictably on some devices.
    ///
    /// [`next_event`]: PlatformClient::next_event
    async fn begin_authentication(
        &mut self,
        cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
    ) -> Result<()>;

    /// Receive the next callback of the active session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session stream breaks before a terminal
    /// event arrives.
    async fn next_event(&mut self) -> Result<PlatformAuthEvent>;
}

/// Enum wrapper for platform client dispatch.
///
/// Native async trait methods are not object-safe, so the module holds this
/// enum instead of a boxed client.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyPlatformClient {
    /// Mock client for development and testing.
    Mock(crate::mock::MockPlatformClient),
    // Real service bindings are added here as drivers are implemented.
}

impl PlatformClient for AnyPlatformClient {
    async fn is_hardware_detected(&self) -> Result<bool> {
        match self {
            Self::Mock(client) => client.is_hardware_detected().await,
        }
    }

    async fn has_enrolled_fingerprints(&self) -> Result<bool> {
        match self {
            Self::Mock(client) => client.has_enrolled_fingerprints().await,
        }
    }

    async fn begin_authentication(
        &mut self,
        cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
    ) -> Result<()> {
        match self {
            Self::Mock(client) => client.begin_authentication(cancellation, crypto).await,
        }
    }

    async fn next_event(&mut self) -> Result<PlatformAuthEvent> {
        match self {
            Self::Mock(client) => client.next_event().await,
        }
    }
}
