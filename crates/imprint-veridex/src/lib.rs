//! Fingerprint module backed by the proprietary Veridex SDK.
//!
//! Some devices ship a vendor fingerprint stack alongside (or instead of)
//! the platform biometric service. This crate adapts that SDK to the
//! [`FingerprintModule`](imprint_core::FingerprintModule) contract through
//! the [`VeridexClient`] trait, with a channel-driven
//! [`mock::MockVeridexClient`] standing in for the real SDK.
//!
//! Unlike the platform service, Veridex identify sessions are one-shot:
//! each attempt resolves with a single terminal status and the sensor
//! stops. [`VeridexModule`] therefore restarts identify itself, as often
//! as needed, while non-fatal statuses keep arriving and restarting was
//! requested.

#![allow(async_fn_in_trait)]

pub mod client;
pub mod mock;
pub mod module;

pub use client::{AnyVeridexClient, VeridexClient};
pub use mock::{MockVeridexClient, MockVeridexHandle};
pub use module::{StatusClass, VeridexModule, classify_status};
