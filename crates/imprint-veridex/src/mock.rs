//! Mock Veridex SDK for testing and development.
//!
//! The mock simulates the vendor service with programmable feature and
//! registration state plus a queue of identify statuses. Each queued
//! status resolves one identify attempt, so a scripted sequence exercises
//! the module's internal restart behavior end to end.

use crate::client::VeridexClient;
use imprint_core::{CancellationToken, Error, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug)]
struct MockVeridexState {
    feature_enabled: bool,
    has_registered: bool,
    fail_feature_probe: bool,
    deny_registered_probe: bool,
    fail_next_identify: bool,
    identify_requests: u32,
}

impl Default for MockVeridexState {
    fn default() -> Self {
        Self {
            feature_enabled: true,
            has_registered: true,
            fail_feature_probe: false,
            deny_registered_probe: false,
            fail_next_identify: false,
            identify_requests: 0,
        }
    }
}

/// Mock Veridex client.
///
/// Created together with a [`MockVeridexHandle`] that controls it.
///
/// # Examples
///
/// ```
/// use imprint_veridex::{MockVeridexClient, VeridexClient, module};
/// use imprint_core::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> imprint_core::Result<()> {
///     let (mut client, handle) = MockVeridexClient::new();
///     handle.queue_status(module::STATUS_SUCCESS).await?;
///
///     let status = client.request_identify(CancellationToken::new()).await?;
///     assert_eq!(status, module::STATUS_SUCCESS);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockVeridexClient {
    state: Arc<Mutex<MockVeridexState>>,
    status_rx: mpsc::Receiver<i32>,
}

impl MockVeridexClient {
    /// Create a mock client and its controlling handle.
    ///
    /// The mock starts with the fingerprint feature enabled and
    /// fingerprints registered.
    pub fn new() -> (Self, MockVeridexHandle) {
        let (status_tx, status_rx) = mpsc::channel(32);
        let state = Arc::new(Mutex::new(MockVeridexState::default()));

        let client = Self {
            state: Arc::clone(&state),
            status_rx,
        };
        let handle = MockVeridexHandle { state, status_tx };

        (client, handle)
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockVeridexState> {
        self.state.lock().expect("mock veridex state poisoned")
    }
}

impl VeridexClient for MockVeridexClient {
    async fn is_fingerprint_feature_enabled(&self) -> Result<bool> {
        let state = self.state();
        if state.fail_feature_probe {
            return Err(Error::vendor_api("fingerprint feature probe refused"));
        }
        Ok(state.feature_enabled)
    }

    async fn has_registered_fingerprints(&self) -> Result<bool> {
        let state = self.state();
        if state.deny_registered_probe {
            return Err(Error::permission_denied("vendor biometric permission missing"));
        }
        Ok(state.has_registered)
    }

    async fn request_identify(&mut self, _cancellation: CancellationToken) -> Result<i32> {
        {
            let mut state = self.state.lock().expect("mock veridex state poisoned");
            state.identify_requests += 1;
            if state.fail_next_identify {
                state.fail_next_identify = false;
                return Err(Error::vendor_api("identify request refused"));
            }
        }

        self.status_rx
            .recv()
            .await
            .ok_or_else(|| Error::vendor_api("veridex status channel closed"))
    }
}

/// Handle for controlling a [`MockVeridexClient`].
#[derive(Debug, Clone)]
pub struct MockVeridexHandle {
    state: Arc<Mutex<MockVeridexState>>,
    status_tx: mpsc::Sender<i32>,
}

impl MockVeridexHandle {
    fn state(&self) -> std::sync::MutexGuard<'_, MockVeridexState> {
        self.state.lock().expect("mock veridex state poisoned")
    }

    /// Set whether the SDK reports fingerprint support.
    pub fn set_feature_enabled(&self, enabled: bool) {
        self.state().feature_enabled = enabled;
    }

    /// Set whether the user has registered fingerprints.
    pub fn set_has_registered(&self, registered: bool) {
        self.state().has_registered = registered;
    }

    /// Make the feature probe fail, as on devices without the SDK.
    pub fn fail_feature_probe(&self) {
        self.state().fail_feature_probe = true;
    }

    /// Make registration probes fail with a permission denial.
    pub fn deny_registered_probe(&self) {
        self.state().deny_registered_probe = true;
    }

    /// Make the next identify request fault.
    pub fn fail_next_identify(&self) {
        self.state().fail_next_identify = true;
    }

    /// Number of identify attempts requested so far.
    pub fn identify_requests(&self) -> u32 {
        self.state().identify_requests
    }

    /// Queue the terminal status for the next identify attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] if the client has been dropped.
    pub async fn queue_status(&self, status: i32) -> Result<()> {
        self.status_tx
            .send(status)
            .await
            .map_err(|_| Error::NoActiveSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module;

    #[tokio::test]
    async fn test_mock_defaults_report_usable_sensor() {
        let (client, _handle) = MockVeridexClient::new();

        assert!(client.is_fingerprint_feature_enabled().await.unwrap());
        assert!(client.has_registered_fingerprints().await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_statuses_resolve_in_order() {
        let (mut client, handle) = MockVeridexClient::new();

        handle.queue_status(module::STATUS_NO_MATCH).await.unwrap();
        handle.queue_status(module::STATUS_SUCCESS).await.unwrap();

        let token = CancellationToken::new();
        assert_eq!(
            client.request_identify(token.clone()).await.unwrap(),
            module::STATUS_NO_MATCH
        );
        assert_eq!(
            client.request_identify(token).await.unwrap(),
            module::STATUS_SUCCESS
        );
        assert_eq!(handle.identify_requests(), 2);
    }

    #[tokio::test]
    async fn test_mock_fail_next_identify_is_one_shot() {
        let (mut client, handle) = MockVeridexClient::new();

        handle.fail_next_identify();
        handle.queue_status(module::STATUS_SUCCESS).await.unwrap();

        assert!(client.request_identify(CancellationToken::new()).await.is_err());
        assert!(client.request_identify(CancellationToken::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_registration_permission_denial() {
        let (client, handle) = MockVeridexClient::new();

        handle.deny_registered_probe();

        let err = client.has_registered_fingerprints().await.unwrap_err();
        assert!(err.is_permission_denied());
    }
}
