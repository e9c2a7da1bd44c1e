//! The contract a vendor API adapter fulfills.

use crate::{AuthenticationListener, CancellationToken, CryptoContext, ModuleTag, Result};

/// A fingerprint module handles communication with one vendor fingerprint
/// API, translating its error codes into the shared failure taxonomy.
///
/// Implement this trait to add a vendor API, then register an instance with
/// the dispatch service. Consumers never call modules directly; the service
/// selects at most one active module and forwards to it.
///
/// # Object safety
///
/// Methods are native `async fn` (Edition 2024 RPITIT), so this trait is
/// not object-safe. The dispatch crate wraps the concrete module types in
/// an enum for dispatch.
pub trait FingerprintModule: Send + Sync {
    /// A tag uniquely identifying this module type. It must be the same for
    /// all instances of a type and unique among registered modules.
    fn tag(&self) -> ModuleTag;

    /// True if a fingerprint sensor of this module's type exists on the
    /// current device. Vendor probe errors are swallowed to `false`.
    async fn is_hardware_present(&self) -> bool;

    /// True if the user has fingerprints enrolled with this module's
    /// vendor service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`](crate::Error::PermissionDenied)
    /// if the vendor service refuses the enrollment probe; that condition
    /// propagates to the caller unchanged.
    async fn has_fingerprint_registered(&self) -> Result<bool>;

    /// Drive one sensor session to its terminal callback.
    ///
    /// The session ends when the listener receives a success or a fatal
    /// failure, or when `cancellation` fires: a cancelled session delivers
    /// no further callbacks.
    ///
    /// If a non-fatal error occurs and `restart_on_non_fatal` is true, the
    /// module must leave the sensor running when it delivers the failure
    /// callback; if false, it must stop the sensor (cancelling the session
    /// token) before the callback, ending the session.
    ///
    /// `crypto` binds the authentication to a platform keystore key where
    /// the vendor API supports it; modules without crypto binding ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`](crate::Error::PermissionDenied)
    /// raised by the vendor service. Every other vendor fault is normalized
    /// and delivered through the listener instead.
    async fn authenticate(
        &mut self,
        cancellation: CancellationToken,
        crypto: Option<&CryptoContext>,
        listener: &mut dyn AuthenticationListener,
        restart_on_non_fatal: bool,
    ) -> Result<()>;
}
