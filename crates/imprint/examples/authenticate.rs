//! Authenticate against the mock Veridex SDK.
//!
//! Run with:
//!
//! ```text
//! cargo run -p imprint --example authenticate
//! ```
//!
//! The scripted sensor rejects the first reading, then accepts one. With
//! real vendor bindings the only change is the client handed to the module.

use anyhow::Result;
use imprint::{AnyFingerprintModule, Imprint, ImprintConfig, VeridexModule};
use imprint_veridex::module as veridex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let (module, sensor) = VeridexModule::with_mock();
    let service = Imprint::initialize(
        &ImprintConfig::default(),
        vec![AnyFingerprintModule::Veridex(module)],
    )
    .await;

    info!(
        hardware = service.is_hardware_present().await,
        enrolled = service.has_fingerprint_registered().await?,
        "service ready"
    );

    // Script the sensor: one bad reading, then a match.
    sensor.queue_status(veridex::STATUS_NO_MATCH).await?;
    sensor.queue_status(veridex::STATUS_SUCCESS).await?;

    let (mut listener, mut events) = imprint::events::channel(16);
    service.authenticate(&mut listener).await?;
    drop(listener);

    while let Some(event) = events.recv().await {
        info!(?event, "authentication event");
    }

    Ok(())
}
