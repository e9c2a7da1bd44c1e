//! Shared types for fingerprint authentication.
//!
//! This module defines the failure taxonomy that every vendor module
//! normalizes into, plus the small value types that travel through the
//! listener interface.

use crate::{Result, error::Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an authentication attempt did not succeed.
///
/// This is a closed enumeration: vendor modules map their heterogeneous
/// error codes into these reasons, and consumers can match exhaustively.
/// The raw vendor code is preserved separately in
/// [`AuthenticationFailure::vendor_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The sensor exists but is currently unavailable. Try again later.
    HardwareUnavailable,

    /// No fingerprint sensor is present on this device.
    NoHardware,

    /// The sensor works but the user has no fingerprints enrolled.
    NoFingerprintsRegistered,

    /// The sensor could not process the reading (dirty sensor, partial
    /// touch, storage exhaustion). Usually recoverable within a session.
    SensorFailed,

    /// The sensor session ran too long and the vendor service stopped it.
    Timeout,

    /// A fingerprint was read cleanly but matched no enrolled fingerprint.
    AuthenticationFailed,

    /// Too many failed attempts; the vendor service refuses further reads
    /// for a lockout period.
    LockedOut,

    /// An unexpected vendor failure that fits none of the above.
    Unknown,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureReason::HardwareUnavailable => "hardware unavailable",
            FailureReason::NoHardware => "no hardware",
            FailureReason::NoFingerprintsRegistered => "no fingerprints registered",
            FailureReason::SensorFailed => "sensor failed",
            FailureReason::Timeout => "timeout",
            FailureReason::AuthenticationFailed => "authentication failed",
            FailureReason::LockedOut => "locked out",
            FailureReason::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Identifies which module produced a callback.
///
/// Each module type has a fixed tag, unique among registered modules. Tag 0
/// ([`ModuleTag::NONE`]) is reserved for failures synthesized by the
/// dispatch core before any module was consulted.
///
/// # Examples
///
/// ```
/// use imprint_core::ModuleTag;
///
/// let tag = ModuleTag::new(1);
/// assert_eq!(tag.as_u8(), 1);
/// assert_ne!(tag, ModuleTag::NONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleTag(u8);

impl ModuleTag {
    /// Tag carried by failures that no module produced.
    pub const NONE: ModuleTag = ModuleTag(0);

    /// Create a module tag.
    #[must_use]
    pub const fn new(tag: u8) -> Self {
        ModuleTag(tag)
    }

    /// Get the raw tag value.
    #[must_use]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ModuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized authentication failure, as delivered to
/// [`AuthenticationListener::on_failure`](crate::AuthenticationListener::on_failure).
///
/// `fatal` distinguishes failures that end the sensor session (timeout,
/// lockout, hardware loss) from recoverable ones (bad reading, unrecognized
/// fingerprint) after which the sensor may keep running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationFailure {
    /// Normalized failure reason.
    pub reason: FailureReason,

    /// Whether this failure terminated the sensor session.
    pub fatal: bool,

    /// Human-readable message, either vendor-provided or one of the
    /// fallbacks in [`messages`](crate::messages).
    pub message: Option<String>,

    /// Tag of the module that produced the failure.
    pub module_tag: ModuleTag,

    /// Raw vendor error code, for diagnostics only.
    pub vendor_code: i32,
}

impl AuthenticationFailure {
    /// Create a failure reported by a vendor module.
    pub fn new(
        reason: FailureReason,
        fatal: bool,
        message: Option<String>,
        module_tag: ModuleTag,
        vendor_code: i32,
    ) -> Self {
        Self {
            reason,
            fatal,
            message,
            module_tag,
            vendor_code,
        }
    }

    /// Create a fatal failure synthesized by the dispatch core before any
    /// module was consulted (no tag, no vendor code, no message).
    pub fn without_module(reason: FailureReason) -> Self {
        Self {
            reason,
            fatal: true,
            message: None,
            module_tag: ModuleTag::NONE,
            vendor_code: 0,
        }
    }
}

impl fmt::Display for AuthenticationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, module {}, code {})",
            self.reason,
            if self.fatal { "fatal" } else { "non-fatal" },
            self.module_tag,
            self.vendor_code
        )
    }
}

/// Opaque handle naming a platform keystore key to bind authentication to.
///
/// The platform biometric service can tie a successful authentication to a
/// keystore operation; this type carries the key identifier through the
/// module contract. Vendor SDKs without crypto binding ignore it.
///
/// # Examples
///
/// ```
/// use imprint_core::CryptoContext;
///
/// let crypto = CryptoContext::new("payments-key").unwrap();
/// assert_eq!(crypto.key_id(), "payments-key");
///
/// assert!(CryptoContext::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoContext {
    key_id: String,
}

impl CryptoContext {
    /// Create a crypto context for the given keystore key identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the key identifier is empty.
    pub fn new(key_id: impl Into<String>) -> Result<Self> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(Error::invalid_data("crypto key id cannot be empty"));
        }
        Ok(Self { key_id })
    }

    /// Get the keystore key identifier.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}
