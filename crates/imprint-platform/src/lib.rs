//! Fingerprint module backed by the platform biometric service.
//!
//! This crate adapts the OS-provided fingerprint manager to the
//! [`FingerprintModule`](imprint_core::FingerprintModule) contract. The
//! service is reached through the [`PlatformClient`] trait; a channel-driven
//! [`mock::MockPlatformClient`] stands in for it in development and tests,
//! and real service bindings implement the same trait.
//!
//! The service reports errors on two channels with overlapping numeric
//! ranges: fatal session errors (`ERROR_*` codes) and non-fatal acquisition
//! hints (`ACQUIRED_*` help codes). [`PlatformModule`] normalizes both into
//! the shared [`FailureReason`](imprint_core::FailureReason) taxonomy.
//!
//! # Examples
//!
//! ```no_run
//! use imprint_core::{CancellationToken, FingerprintModule};
//! use imprint_platform::PlatformModule;
//!
//! # async fn example(listener: &mut dyn imprint_core::AuthenticationListener)
//! # -> imprint_core::Result<()> {
//! let (mut module, handle) = PlatformModule::with_mock();
//! handle.emit_succeeded().await?;
//!
//! let token = CancellationToken::new();
//! module.authenticate(token, None, listener, true).await?;
//! # Ok(())
//! # }
//! ```

#![allow(async_fn_in_trait)]

pub mod client;
pub mod mock;
pub mod module;

pub use client::{AnyPlatformClient, PlatformAuthEvent, PlatformClient};
pub use mock::{MockPlatformClient, MockPlatformHandle};
pub use module::PlatformModule;
