//! The dispatch service: module selection, authenticate/cancel, bounded
//! timeout retry.

use crate::config::{AuthenticationOptions, ImprintConfig, RestartPolicy};
use crate::modules::AnyFingerprintModule;
use imprint_core::{
    AuthenticationFailure, AuthenticationListener, CancellationToken, FailureReason,
    FingerprintModule, ModuleTag, Result,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Unified fingerprint authentication service.
///
/// Holds at most one active module and forwards the public surface to it.
/// There is no global instance: construct one, keep it alive for as long as
/// fingerprint authentication is needed, and share it by reference
/// (`authenticate` and `cancel_authentication` both take `&self`, so the
/// service can be cancelled from another task while a session is running).
///
/// Sessions are serialized: a second `authenticate` call waits until the
/// current session ends.
#[derive(Debug, Default)]
pub struct Imprint {
    /// Active module, if any candidate with present hardware registered.
    /// Held across awaits during a session, which also serializes sessions.
    module: tokio::sync::Mutex<Option<AnyFingerprintModule>>,

    /// Cancellation token of the current authentication, if one is
    /// running. A plain mutex: cancel may arrive from another task while
    /// the session task is parked on the sensor.
    cancellation: std::sync::Mutex<Option<CancellationToken>>,
}

impl Imprint {
    /// Create a service with no registered module.
    ///
    /// Every query reports no hardware until a module registers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service and register the given candidate modules.
    ///
    /// Candidates are offered in order, gated by the per-module `enabled`
    /// flags in `config`, and selection is first-match-wins: once a
    /// candidate with present hardware is active, later candidates are not
    /// consulted. Offer the Veridex module before the platform module.
    pub async fn initialize(
        config: &ImprintConfig,
        candidates: impl IntoIterator<Item = AnyFingerprintModule>,
    ) -> Self {
        let service = Self::new();

        for candidate in candidates {
            if service.active_module_tag().await.is_some() {
                break;
            }
            if !config.is_enabled(&candidate) {
                debug!(tag = %candidate.tag(), "module disabled by configuration");
                continue;
            }
            service.register_module(candidate).await;
        }

        if service.active_module_tag().await.is_none() {
            info!("no fingerprint module registered; hardware reported absent");
        }

        service
    }

    /// Register a module.
    ///
    /// Ignored if the candidate's tag matches the active module's tag.
    /// Otherwise the candidate replaces the active module, but only if it
    /// reports present hardware at registration time.
    pub async fn register_module(&self, module: AnyFingerprintModule) {
        let mut slot = self.module.lock().await;

        if let Some(active) = slot.as_ref()
            && active.tag() == module.tag()
        {
            debug!(tag = %module.tag(), "module already active; ignoring re-registration");
            return;
        }

        if module.is_hardware_present().await {
            info!(tag = %module.tag(), "fingerprint module registered");
            *slot = Some(module);
        } else {
            debug!(tag = %module.tag(), "module reports no hardware; not registered");
        }
    }

    /// Tag of the active module, if any.
    pub async fn active_module_tag(&self) -> Option<ModuleTag> {
        self.module.lock().await.as_ref().map(|m| m.tag())
    }

    /// True if the active module reports a fingerprint sensor.
    pub async fn is_hardware_present(&self) -> bool {
        match self.module.lock().await.as_ref() {
            Some(module) => module.is_hardware_present().await,
            None => false,
        }
    }

    /// True if the user has fingerprints enrolled with the active module.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::PermissionDenied`](imprint_core::Error::PermissionDenied)
    /// from the vendor service.
    pub async fn has_fingerprint_registered(&self) -> Result<bool> {
        match self.module.lock().await.as_ref() {
            Some(module) => module.has_fingerprint_registered().await,
            None => Ok(false),
        }
    }

    /// Start an authentication session with the default options: restart
    /// on non-fatal failures, [`DEFAULT_TIMEOUT_RESTARTS`] timeout
    /// restarts, no crypto binding.
    ///
    /// Resolves when the session ends; the outcome is delivered through
    /// `listener`. See [`authenticate_with`] for the failure cases.
    ///
    /// [`DEFAULT_TIMEOUT_RESTARTS`]: crate::DEFAULT_TIMEOUT_RESTARTS
    /// [`authenticate_with`]: Imprint::authenticate_with
    pub async fn authenticate(&self, listener: &mut dyn AuthenticationListener) -> Result<()> {
        self.authenticate_with(listener, AuthenticationOptions::default())
            .await
    }

    /// Start an authentication session that surfaces every failure
    /// immediately instead of restarting.
    pub async fn authenticate_without_restart(
        &self,
        listener: &mut dyn AuthenticationListener,
    ) -> Result<()> {
        self.authenticate_with(
            listener,
            AuthenticationOptions::new().with_restart(RestartPolicy::Never),
        )
        .await
    }

    /// Start an authentication session.
    ///
    /// Fails immediately through the listener with
    /// [`FailureReason::NoHardware`] when no module is active or its
    /// hardware is gone, and with
    /// [`FailureReason::NoFingerprintsRegistered`] when nothing is
    /// enrolled. Otherwise installs a fresh cancellation token and
    /// delegates the session to the active module, decorating the listener
    /// with the bounded timeout-restart behavior when the policy asks for
    /// restarts.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::PermissionDenied`](imprint_core::Error::PermissionDenied)
    /// from the vendor service. Every other failure is delivered through
    /// the listener.
    pub async fn authenticate_with(
        &self,
        listener: &mut dyn AuthenticationListener,
        options: AuthenticationOptions,
    ) -> Result<()> {
        let session = Uuid::new_v4();
        let mut slot = self.module.lock().await;

        let Some(module) = slot.as_mut() else {
            debug!(%session, "authenticate requested with no active module");
            listener.on_failure(AuthenticationFailure::without_module(
                FailureReason::NoHardware,
            ));
            return Ok(());
        };

        if !module.is_hardware_present().await {
            warn!(%session, tag = %module.tag(), "active module lost its hardware");
            listener.on_failure(AuthenticationFailure::without_module(
                FailureReason::NoHardware,
            ));
            return Ok(());
        }

        if !module.has_fingerprint_registered().await? {
            debug!(%session, tag = %module.tag(), "no fingerprints enrolled");
            listener.on_failure(AuthenticationFailure::without_module(
                FailureReason::NoFingerprintsRegistered,
            ));
            return Ok(());
        }

        let token = CancellationToken::new();
        *self
            .cancellation
            .lock()
            .expect("cancellation slot poisoned") = Some(token.clone());

        debug!(%session, tag = %module.tag(), "starting fingerprint authentication");

        match options.restart {
            RestartPolicy::Never => {
                module
                    .authenticate(token, options.crypto.as_ref(), listener, false)
                    .await
            }
            RestartPolicy::RestartOnNonFatal { timeout_restarts } => {
                let mut restarting =
                    RestartingListener::new(listener, token.clone(), timeout_restarts);
                loop {
                    module
                        .authenticate(
                            token.clone(),
                            options.crypto.as_ref(),
                            &mut restarting,
                            true,
                        )
                        .await?;
                    if restarting.take_restart_requested() {
                        debug!(
                            %session,
                            remaining = restarting.remaining(),
                            "restarting session after timeout"
                        );
                        continue;
                    }
                    break;
                }
                Ok(())
            }
        }
    }

    /// Cancel the current authentication session, if one is running.
    ///
    /// Cancellation is cooperative: the token notifies the vendor service,
    /// which halts the sensor; the session ends without further listener
    /// callbacks. The token slot is cleared, so a cancelled session cannot
    /// restart.
    pub fn cancel_authentication(&self) {
        let mut slot = self
            .cancellation
            .lock()
            .expect("cancellation slot poisoned");
        if let Some(token) = slot.take() {
            debug!("cancelling fingerprint authentication");
            token.cancel();
        }
    }

    /// True while an authentication session is running and has not been
    /// cancelled.
    pub fn is_authenticating(&self) -> bool {
        self.cancellation
            .lock()
            .expect("cancellation slot poisoned")
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }
}

/// Listener decorator implementing the bounded timeout-restart behavior.
///
/// Absorbs a `Timeout` failure while restarts remain and the session token
/// has not been cancelled, recording a restart request for the dispatch
/// loop; forwards everything else to the wrapped listener unchanged. The
/// wrapped listener sees nothing until the budget is exhausted.
struct RestartingListener<'a> {
    inner: &'a mut dyn AuthenticationListener,
    token: CancellationToken,
    remaining: u32,
    restart_requested: bool,
}

impl<'a> RestartingListener<'a> {
    fn new(
        inner: &'a mut dyn AuthenticationListener,
        token: CancellationToken,
        timeout_restarts: u32,
    ) -> Self {
        Self {
            inner,
            token,
            remaining: timeout_restarts,
            restart_requested: false,
        }
    }

    fn remaining(&self) -> u32 {
        self.remaining
    }

    fn take_restart_requested(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }
}

impl AuthenticationListener for RestartingListener<'_> {
    fn on_success(&mut self, module_tag: ModuleTag) {
        self.inner.on_success(module_tag);
    }

    fn on_failure(&mut self, failure: AuthenticationFailure) {
        if failure.reason == FailureReason::Timeout
            && self.remaining > 0
            && !self.token.is_cancelled()
        {
            self.remaining -= 1;
            self.restart_requested = true;
        } else {
            self.inner.on_failure(failure);
        }
    }
}
