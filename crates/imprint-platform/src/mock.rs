//! Mock platform biometric service for testing and development.
//!
//! The mock simulates the platform service by exposing programmable
//! presence/enrollment state and a queue of session events that can be
//! driven from a handle without real hardware.

use crate::client::{PlatformAuthEvent, PlatformClient};
use imprint_core::{CancellationToken, CryptoContext, Error, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug)]
struct MockPlatformState {
    hardware_detected: bool,
    enrolled: bool,
    fail_hardware_probe: bool,
    deny_enrollment_probe: bool,
    fail_next_begin: bool,
    sessions_begun: u32,
    last_crypto_key: Option<String>,
}

impl Default for MockPlatformState {
    fn default() -> Self {
        Self {
            hardware_detected: true,
            enrolled: true,
            fail_hardware_probe: false,
            deny_enrollment_probe: false,
            fail_next_begin: false,
            sessions_begun: 0,
            last_crypto_key: None,
        }
    }
}

/// Mock platform biometric client.
///
/// Created together with a [`MockPlatformHandle`] that controls it.
///
/// # Examples
///
/// ```
/// use imprint_platform::{MockPlatformClient, PlatformClient};
///
/// #[tokio::main]
/// async fn main() -> imprint_core::Result<()> {
///     let (client, handle) = MockPlatformClient::new();
///
///     assert!(client.is_hardware_detected().await?);
///
///     handle.set_hardware_detected(false);
///     assert!(!client.is_hardware_detected().await?);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockPlatformClient {
    state: Arc<Mutex<MockPlatformState>>,
    event_rx: mpsc::Receiver<PlatformAuthEvent>,
}

impl MockPlatformClient {
    /// Create a mock client and its controlling handle.
    ///
    /// The mock starts with hardware present and fingerprints enrolled.
    pub fn new() -> (Self, MockPlatformHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);
        let state = Arc::new(Mutex::new(MockPlatformState::default()));

        let client = Self {
            state: Arc::clone(&state),
            event_rx,
        };
        let handle = MockPlatformHandle { state, event_tx };

        (client, handle)
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MockPlatformState> {
        self.state.lock().expect("mock platform state poisoned")
    }
}

impl PlatformClient for MockPlatformClient {
    async fn is_hardware_detected(&self) -> Result<bool> {
        let state = self.state();
        if state.fail_hardware_probe {
            return Err(Error::vendor_api("hardware probe fault"));
        }
        Ok(state.hardware_detected)
    }

    async fn has_enrolled_fingerprints(&self) -> Result<bool> {
        let state = self.state();
        if state.deny_enrollment_probe {
            return Err(Error::permission_denied("USE_BIOMETRIC not granted"));
        }
        Ok(state.enrolled)
    }

    async fn begin_authentication(
        &mut self,
        _cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
    ) -> Result<()> {
        let mut state = self.state.lock().expect("mock platform state poisoned");
        if state.fail_next_begin {
            state.fail_next_begin = false;
            return Err(Error::vendor_api("authenticate raised unexpectedly"));
        }
        state.sessions_begun += 1;
        state.last_crypto_key = crypto.map(|c| c.key_id().to_string());
        Ok(())
    }

    async fn next_event(&mut self) -> Result<PlatformAuthEvent> {
        self.event_rx
            .recv()
            .await
            .ok_or_else(|| Error::vendor_api("platform event channel closed"))
    }
}

/// Handle for controlling a [`MockPlatformClient`].
///
/// Clone-able; events queued here are delivered to the client's session
/// loop in order.
#[derive(Debug, Clone)]
pub struct MockPlatformHandle {
    state: Arc<Mutex<MockPlatformState>>,
    event_tx: mpsc::Sender<PlatformAuthEvent>,
}

impl MockPlatformHandle {
    fn state(&self) -> std::sync::MutexGuard<'_, MockPlatformState> {
        self.state.lock().expect("mock platform state poisoned")
    }

    /// Set whether the service reports a fingerprint sensor.
    pub fn set_hardware_detected(&self, detected: bool) {
        self.state().hardware_detected = detected;
    }

    /// Set whether the user has enrolled fingerprints.
    pub fn set_enrolled(&self, enrolled: bool) {
        self.state().enrolled = enrolled;
    }

    /// Make the hardware presence probe fault, as some devices do.
    pub fn fail_hardware_probe(&self) {
        self.state().fail_hardware_probe = true;
    }

    /// Make enrollment probes fail with a permission denial.
    pub fn deny_enrollment_probe(&self) {
        self.state().deny_enrollment_probe = true;
    }

    /// Make the next `begin_authentication` call fault.
    pub fn fail_next_begin(&self) {
        self.state().fail_next_begin = true;
    }

    /// Number of sessions begun so far.
    pub fn sessions_begun(&self) -> u32 {
        self.state().sessions_begun
    }

    /// Keystore key id the most recent session was bound to, if any.
    pub fn last_crypto_key(&self) -> Option<String> {
        self.state().last_crypto_key.clone()
    }

    /// Queue a session event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveSession`] if the client has been dropped.
    pub async fn emit(&self, event: PlatformAuthEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| Error::NoActiveSession)
    }

    /// Queue a successful authentication.
    pub async fn emit_succeeded(&self) -> Result<()> {
        self.emit(PlatformAuthEvent::Succeeded).await
    }

    /// Queue a fatal service error.
    pub async fn emit_error(&self, code: i32, message: Option<&str>) -> Result<()> {
        self.emit(PlatformAuthEvent::Error {
            code,
            message: message.map(str::to_string),
        })
        .await
    }

    /// Queue a non-fatal acquisition hint.
    pub async fn emit_help(&self, code: i32, message: Option<&str>) -> Result<()> {
        self.emit(PlatformAuthEvent::Help {
            code,
            message: message.map(str::to_string),
        })
        .await
    }

    /// Queue an unrecognized-fingerprint reading.
    pub async fn emit_not_recognized(&self) -> Result<()> {
        self.emit(PlatformAuthEvent::NotRecognized).await
    }
}
