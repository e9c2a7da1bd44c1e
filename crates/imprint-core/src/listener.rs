//! The callback surface consumers implement to observe authentication.

use crate::{AuthenticationFailure, ModuleTag};

/// Receives the outcome of an authentication session.
///
/// A session delivers exactly one terminal callback: `on_success`, or
/// `on_failure` with a fatal failure. Non-fatal failures may be delivered
/// any number of times before the terminal callback while the sensor keeps
/// running (for example, an unrecognized fingerprint followed by a
/// successful retry).
///
/// Callbacks are invoked from the task driving the session, so
/// implementations must be cheap and must not block.
///
/// # Examples
///
/// ```
/// use imprint_core::{AuthenticationFailure, AuthenticationListener, ModuleTag};
///
/// struct LogListener;
///
/// impl AuthenticationListener for LogListener {
///     fn on_success(&mut self, module_tag: ModuleTag) {
///         println!("authenticated via module {module_tag}");
///     }
///
///     fn on_failure(&mut self, failure: AuthenticationFailure) {
///         println!("failed: {failure}");
///     }
/// }
/// ```
pub trait AuthenticationListener: Send {
    /// A fingerprint was read and matched an enrolled fingerprint.
    fn on_success(&mut self, module_tag: ModuleTag);

    /// An attempt failed. Check [`AuthenticationFailure::fatal`] to tell
    /// whether the session ended.
    fn on_failure(&mut self, failure: AuthenticationFailure);
}
