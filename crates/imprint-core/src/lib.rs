//! Core contracts and shared taxonomy for the Imprint fingerprint
//! authentication shim.
//!
//! Imprint unifies heterogeneous vendor fingerprint APIs behind one
//! listener-based interface. This crate defines the pieces every backing
//! module and the dispatch service agree on:
//!
//! - [`FailureReason`]: the closed failure taxonomy all vendor error codes
//!   normalize into
//! - [`AuthenticationFailure`]: a normalized failure as delivered to a
//!   listener
//! - [`AuthenticationListener`]: the callback surface consumers implement
//! - [`FingerprintModule`]: the contract a vendor API adapter fulfills
//! - [`Error`]: the error type for conditions that propagate instead of
//!   flowing through a listener (permission denial, mock harness misuse)
//!
//! Modules never surface vendor error codes directly: each adapter owns a
//! normalization table from its vendor's codes into [`FailureReason`], and
//! the raw code rides along in [`AuthenticationFailure::vendor_code`] for
//! diagnostics only.
//!
//! All module I/O is asynchronous using native `async fn` in traits
//! (Edition 2024 RPITIT), so the traits here are not object-safe; the
//! dispatch crate wraps concrete module types in an enum for dispatch.

#![allow(async_fn_in_trait)]

pub mod error;
pub mod listener;
pub mod messages;
pub mod module;
pub mod types;

pub use error::{Error, Result};
pub use listener::AuthenticationListener;
pub use module::FingerprintModule;
pub use types::{AuthenticationFailure, CryptoContext, FailureReason, ModuleTag};

// Re-exported so module implementations and the dispatch service agree on
// one cancellation primitive without each naming tokio-util.
pub use tokio_util::sync::CancellationToken;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
