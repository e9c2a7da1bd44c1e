//! Listener-to-channel bridge.
//!
//! Some consumers prefer pulling a stream of events over implementing a
//! callback listener. [`channel`] returns a listener that forwards every
//! callback into a bounded mpsc channel as a timestamped
//! [`AuthenticationEvent`].

use chrono::{DateTime, Utc};
use imprint_core::{AuthenticationFailure, AuthenticationListener, ModuleTag};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// One authentication outcome, timestamped at delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationEvent {
    /// A fingerprint was read and matched an enrolled fingerprint.
    Success {
        module_tag: ModuleTag,
        at: DateTime<Utc>,
    },

    /// An attempt failed; check [`AuthenticationFailure::fatal`] to tell
    /// whether the session ended.
    Failure {
        failure: AuthenticationFailure,
        at: DateTime<Utc>,
    },
}

/// Create a channel-backed listener with the given event capacity.
///
/// # Examples
///
/// ```no_run
/// use imprint::Imprint;
///
/// # async fn example(service: &Imprint) -> imprint::Result<()> {
/// let (mut listener, mut events) = imprint::events::channel(16);
/// service.authenticate(&mut listener).await?;
///
/// while let Some(event) = events.recv().await {
///     println!("{event:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn channel(capacity: usize) -> (ChannelListener, mpsc::Receiver<AuthenticationEvent>) {
    let (event_tx, event_rx) = mpsc::channel(capacity);
    (ChannelListener { event_tx }, event_rx)
}

/// Listener that forwards callbacks into an mpsc channel.
///
/// Callbacks must not block the session task, so a full channel drops the
/// event with a warning instead of waiting for the consumer.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    event_tx: mpsc::Sender<AuthenticationEvent>,
}

impl ChannelListener {
    fn forward(&self, event: AuthenticationEvent) {
        if let Err(error) = self.event_tx.try_send(event) {
            warn!(%error, "dropping authentication event");
        }
    }
}

impl AuthenticationListener for ChannelListener {
    fn on_success(&mut self, module_tag: ModuleTag) {
        self.forward(AuthenticationEvent::Success {
            module_tag,
            at: Utc::now(),
        });
    }

    fn on_failure(&mut self, failure: AuthenticationFailure) {
        self.forward(AuthenticationEvent::Failure {
            failure,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imprint_core::FailureReason;

    #[tokio::test]
    async fn test_channel_listener_forwards_events_in_order() {
        let (mut listener, mut events) = channel(8);

        listener.on_failure(AuthenticationFailure::new(
            FailureReason::AuthenticationFailed,
            false,
            None,
            ModuleTag::new(1),
            1001,
        ));
        listener.on_success(ModuleTag::new(1));

        match events.recv().await.unwrap() {
            AuthenticationEvent::Failure { failure, .. } => {
                assert_eq!(failure.reason, FailureReason::AuthenticationFailed);
            }
            other => panic!("expected failure event, got {other:?}"),
        }
        match events.recv().await.unwrap() {
            AuthenticationEvent::Success { module_tag, .. } => {
                assert_eq!(module_tag, ModuleTag::new(1));
            }
            other => panic!("expected success event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_channel_drops_instead_of_blocking() {
        let (mut listener, mut events) = channel(1);

        listener.on_success(ModuleTag::new(1));
        listener.on_success(ModuleTag::new(2));

        match events.recv().await.unwrap() {
            AuthenticationEvent::Success { module_tag, .. } => {
                assert_eq!(module_tag, ModuleTag::new(1));
            }
            other => panic!("expected success event, got {other:?}"),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_event_serde_roundtrip() {
        let event = AuthenticationEvent::Success {
            module_tag: ModuleTag::new(2),
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: AuthenticationEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
