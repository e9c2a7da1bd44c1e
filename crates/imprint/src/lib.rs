//! Unified fingerprint authentication over heterogeneous vendor APIs.
//!
//! Devices expose fingerprint hardware through different stacks: the
//! platform biometric service, or a proprietary vendor SDK with its own
//! error codes and session semantics. Imprint puts one listener-based
//! interface in front of both.
//!
//! The [`Imprint`] service holds at most one active module, the first
//! registered candidate whose hardware is actually present, and forwards
//! presence/enrollment queries and authenticate/cancel calls to it. Vendor
//! error codes never escape: modules normalize them into the shared
//! [`FailureReason`] taxonomy before a listener sees them. Timeouts can be
//! retried a bounded number of times; other recoverable failures keep the
//! sensor session alive when the restart policy asks for it.
//!
//! # Examples
//!
//! ```no_run
//! use imprint::{AnyFingerprintModule, Imprint, ImprintConfig, VeridexModule};
//!
//! #[tokio::main]
//! async fn main() -> imprint::Result<()> {
//!     let (module, _handle) = VeridexModule::with_mock();
//!
//!     let service = Imprint::initialize(
//!         &ImprintConfig::default(),
//!         vec![AnyFingerprintModule::Veridex(module)],
//!     )
//!     .await;
//!
//!     if !service.is_hardware_present().await {
//!         println!("no fingerprint sensor");
//!         return Ok(());
//!     }
//!
//!     let (mut listener, mut events) = imprint::events::channel(16);
//!     service.authenticate(&mut listener).await?;
//!
//!     while let Some(event) = events.recv().await {
//!         println!("{event:?}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Real vendor bindings plug in behind the client traits of the
//! `imprint-platform` and `imprint-veridex` crates; the channel-driven
//! mocks those crates ship are enough for development and tests.

pub mod config;
pub mod dispatch;
pub mod events;
pub mod modules;

pub use config::{
    AuthenticationOptions, DEFAULT_TIMEOUT_RESTARTS, ImprintConfig, RestartPolicy,
};
pub use dispatch::Imprint;
pub use modules::AnyFingerprintModule;

// Re-export the contract types so most consumers need only this crate.
pub use imprint_core::{
    AuthenticationFailure, AuthenticationListener, CancellationToken, CryptoContext, Error,
    FailureReason, FingerprintModule, ModuleTag, Result, messages,
};

// Re-export the concrete modules for registration at startup.
pub use imprint_platform::PlatformModule;
pub use imprint_veridex::VeridexModule;
