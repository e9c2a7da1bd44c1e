//! Common test utilities for integration tests.
//!
//! Provides the recording listener and service-construction helpers shared
//! across the dispatch and restart integration tests.

#![allow(dead_code)]

use imprint::{
    AnyFingerprintModule, AuthenticationFailure, AuthenticationListener, FailureReason, Imprint,
    ImprintConfig, ModuleTag, PlatformModule, VeridexModule,
};
use imprint_platform::MockPlatformHandle;
use imprint_veridex::MockVeridexHandle;

/// Listener that records every callback for later assertions.
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub successes: Vec<ModuleTag>,
    pub failures: Vec<AuthenticationFailure>,
}

impl RecordingListener {
    /// The single fatal failure this listener received.
    ///
    /// Panics if the recorded callbacks are anything other than exactly
    /// one failure.
    pub fn only_failure(&self) -> &AuthenticationFailure {
        assert!(
            self.successes.is_empty(),
            "expected no successes, got {:?}",
            self.successes
        );
        assert_eq!(
            self.failures.len(),
            1,
            "expected exactly one failure, got {:?}",
            self.failures
        );
        &self.failures[0]
    }

    /// Assert that nothing was delivered at all.
    pub fn assert_silent(&self) {
        assert!(self.successes.is_empty(), "unexpected successes: {:?}", self.successes);
        assert!(self.failures.is_empty(), "unexpected failures: {:?}", self.failures);
    }

    /// Reasons of all recorded failures, in delivery order.
    pub fn failure_reasons(&self) -> Vec<FailureReason> {
        self.failures.iter().map(|f| f.reason).collect()
    }
}

impl AuthenticationListener for RecordingListener {
    fn on_success(&mut self, module_tag: ModuleTag) {
        self.successes.push(module_tag);
    }

    fn on_failure(&mut self, failure: AuthenticationFailure) {
        self.failures.push(failure);
    }
}

/// Service over a single mock Veridex module, with its handle.
pub async fn veridex_service() -> (Imprint, MockVeridexHandle) {
    let (module, handle) = VeridexModule::with_mock();
    let service = Imprint::initialize(
        &ImprintConfig::default(),
        vec![AnyFingerprintModule::Veridex(module)],
    )
    .await;
    (service, handle)
}

/// Service over a single mock platform module, with its handle.
pub async fn platform_service() -> (Imprint, MockPlatformHandle) {
    let (module, handle) = PlatformModule::with_mock();
    let service = Imprint::initialize(
        &ImprintConfig::default(),
        vec![AnyFingerprintModule::Platform(module)],
    )
    .await;
    (service, handle)
}
