//! Client abstraction over the Veridex fingerprint SDK.

use imprint_core::{CancellationToken, Result};

/// Access to the Veridex SDK.
///
/// Real implementations bind to the vendor service; the
/// [`MockVeridexClient`](crate::mock::MockVeridexClient) simulates it for
/// development and testing. Methods are native `async fn`, so the trait is
/// not object-safe: use [`AnyVeridexClient`] where dispatch is needed.
pub trait VeridexClient: Send + Sync {
    /// True if the SDK reports fingerprint support on this device.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK is not installed or refuses the probe;
    /// callers treat any error as "no hardware".
    async fn is_fingerprint_feature_enabled(&self) -> Result<bool>;

    /// True if the user has fingerprints registered with the SDK.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`](imprint_core::Error::PermissionDenied)
    /// if the calling process lacks the vendor biometric permission.
    async fn has_registered_fingerprints(&self) -> Result<bool>;

    /// Run one identify attempt to completion and return its terminal
    /// status (`STATUS_*` in [`module`](crate::module)).
    ///
    /// Identify sessions are one-shot: the sensor stops when the status is
    /// delivered. The cancellation token is handed to the SDK, which
    /// aborts the attempt when it fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the identify request cannot be issued.
    async fn request_identify(&mut self, cancellation: CancellationToken) -> Result<i32>;
}

/// Enum wrapper for Veridex client dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyVeridexClient {
    /// Mock client for development and testing.
    Mock(crate::mock::MockVeridexClient),
    // The real SDK binding is added here when it lands.
}

impl VeridexClient for AnyVeridexClient {
    async fn is_fingerprint_feature_enabled(&self) -> Result<bool> {
        match self {
            Self::Mock(client) => client.is_fingerprint_feature_enabled().await,
        }
    }

    async fn has_registered_fingerprints(&self) -> Result<bool> {
        match self {
            Self::Mock(client) => client.has_registered_fingerprints().await,
        }
    }

    async fn request_identify(&mut self, cancellation: CancellationToken) -> Result<i32> {
        match self {
            Self::Mock(client) => client.request_identify(cancellation).await,
        }
    }
}
