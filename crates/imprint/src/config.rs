//! Configuration for the dispatch service.

use imprint_core::CryptoContext;
use serde::{Deserialize, Serialize};

/// Default number of bounded timeout restarts.
pub const DEFAULT_TIMEOUT_RESTARTS: u32 = 5;

/// What to do when a sensor session ends with a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Surface every failure immediately; the sensor is stopped before the
    /// first non-fatal failure callback.
    Never,

    /// Keep the sensor running across non-fatal failures, and restart the
    /// session after a timeout up to `timeout_restarts` times before the
    /// timeout surfaces. Non-timeout non-fatal failures restart
    /// indefinitely inside the module.
    RestartOnNonFatal {
        /// Bounded restart budget for vendor-reported timeouts.
        timeout_restarts: u32,
    },
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::RestartOnNonFatal {
            timeout_restarts: DEFAULT_TIMEOUT_RESTARTS,
        }
    }
}

/// Per-call options for [`Imprint::authenticate_with`](crate::Imprint::authenticate_with).
#[derive(Debug, Clone, Default)]
pub struct AuthenticationOptions {
    /// Keystore key to bind the authentication to, where the backing
    /// module supports it.
    pub crypto: Option<CryptoContext>,

    /// Restart behavior for this call.
    pub restart: RestartPolicy,
}

impl AuthenticationOptions {
    /// Create options with the default restart policy and no crypto binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the authentication to a keystore key.
    pub fn with_crypto(mut self, crypto: CryptoContext) -> Self {
        self.crypto = Some(crypto);
        self
    }

    /// Set the restart policy.
    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }
}

/// Configuration for [`Imprint::initialize`](crate::Imprint::initialize).
///
/// Controls which candidate modules are offered for registration and the
/// default timeout restart budget.
///
/// # Examples
///
/// ```
/// use imprint::ImprintConfig;
///
/// let config = ImprintConfig::default();
/// assert!(config.veridex_enabled);
/// assert!(config.platform_enabled);
/// assert_eq!(config.timeout_restarts, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprintConfig {
    /// Offer the Veridex SDK module for registration.
    pub veridex_enabled: bool,

    /// Offer the platform biometric service module for registration.
    pub platform_enabled: bool,

    /// Timeout restart budget used by [`default_restart_policy`].
    ///
    /// [`default_restart_policy`]: ImprintConfig::default_restart_policy
    pub timeout_restarts: u32,
}

impl Default for ImprintConfig {
    fn default() -> Self {
        Self {
            veridex_enabled: true,
            platform_enabled: true,
            timeout_restarts: DEFAULT_TIMEOUT_RESTARTS,
        }
    }
}

impl ImprintConfig {
    /// The restart policy this configuration implies.
    pub fn default_restart_policy(&self) -> RestartPolicy {
        RestartPolicy::RestartOnNonFatal {
            timeout_restarts: self.timeout_restarts,
        }
    }

    /// Whether a candidate module is enabled by this configuration.
    pub fn is_enabled(&self, module: &crate::AnyFingerprintModule) -> bool {
        match module {
            crate::AnyFingerprintModule::Veridex(_) => self.veridex_enabled,
            crate::AnyFingerprintModule::Platform(_) => self.platform_enabled,
        }
    }
}
