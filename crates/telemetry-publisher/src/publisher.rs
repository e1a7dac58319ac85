//! Caller-facing publish operations.

use std::sync::Arc;
use std::time::Duration;
use telemetry_events::TelemetryRecord;
use tracing::{error, info};

use crate::transport::{MessageId, TelemetryTransport, TransportError};

/// Default bound on waiting for a delivery acknowledgment.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolve the fully-qualified topic path for a `(project, topic)` pair.
///
/// The project id acts as a namespace prefix within the transport's flat
/// topic namespace.
pub fn topic_path(project_id: &str, topic_id: &str) -> String {
    format!("{project_id}.{topic_id}")
}

/// A publishable payload: either a structured record serialized to the
/// canonical JSON wire format, or a pre-serialized string passed through
/// unmodified. Both normalize to UTF-8 bytes before hitting the transport.
#[derive(Debug, Clone)]
pub enum Payload {
    Record(TelemetryRecord),
    Raw(String),
}

impl Payload {
    fn into_bytes(self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Payload::Record(record) => record.to_json_bytes(),
            Payload::Raw(text) => Ok(text.into_bytes()),
        }
    }
}

impl From<TelemetryRecord> for Payload {
    fn from(record: TelemetryRecord) -> Self {
        Payload::Record(record)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(text)
    }
}

/// Delivery style selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Fire-and-forget: don't wait for acknowledgment before the next record.
    Detached,
    /// Block on each delivery handle before proceeding.
    Awaited,
}

/// Errors observed on the delivery path.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The resolved result of one publish attempt.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered { message_id: MessageId },
    Failed { error: PublishError },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

/// Publish adapter bound to one destination topic.
///
/// Holds the shared transport handle; cloning the `Arc` into completion
/// tasks keeps the handle alive across in-flight deliveries.
pub struct Publisher {
    transport: Arc<dyn TelemetryTransport>,
    topic: String,
    delivery_timeout: Duration,
}

impl Publisher {
    pub fn new(transport: Arc<dyn TelemetryTransport>, topic: impl Into<String>) -> Self {
        Self {
            transport,
            topic: topic.into(),
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    /// Override the bound on waiting for delivery acknowledgment.
    pub fn with_delivery_timeout(mut self, timeout: Duration) -> Self {
        self.delivery_timeout = timeout;
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Fire-and-forget publish.
    ///
    /// Hands the payload to the transport and spawns a completion task that
    /// drains the delivery handle and logs the outcome. Registration never
    /// blocks, and no failure — serialization, delivery, or timeout —
    /// propagates to the caller.
    pub fn publish_detached(&self, payload: Payload) {
        let transport = Arc::clone(&self.transport);
        let topic = self.topic.clone();
        let timeout = self.delivery_timeout;

        tokio::spawn(async move {
            let outcome = deliver(transport.as_ref(), &topic, payload, timeout).await;
            log_outcome(&topic, &outcome);
        });
    }

    /// Blocking publish: awaits the delivery handle and returns the outcome.
    ///
    /// This stalls the caller until the current message is acknowledged or
    /// fails — a distinct, slower operating mode from `publish_detached`.
    pub async fn publish_awaited(&self, payload: Payload) -> DeliveryOutcome {
        let outcome = deliver(
            self.transport.as_ref(),
            &self.topic,
            payload,
            self.delivery_timeout,
        )
        .await;
        log_outcome(&self.topic, &outcome);
        outcome
    }
}

async fn deliver(
    transport: &dyn TelemetryTransport,
    topic: &str,
    payload: Payload,
    timeout: Duration,
) -> DeliveryOutcome {
    let bytes = match payload.into_bytes() {
        Ok(bytes) => bytes,
        Err(e) => {
            return DeliveryOutcome::Failed { error: e.into() };
        }
    };

    match tokio::time::timeout(timeout, transport.deliver(topic, bytes)).await {
        Ok(Ok(message_id)) => DeliveryOutcome::Delivered { message_id },
        Ok(Err(error)) => DeliveryOutcome::Failed {
            error: error.into(),
        },
        Err(_) => DeliveryOutcome::Failed {
            error: TransportError::Timeout(timeout).into(),
        },
    }
}

// Every failure path ends in a log statement; the completion path never
// panics.
fn log_outcome(topic: &str, outcome: &DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Delivered { message_id } => {
            info!("Delivered message {message_id} to '{topic}'");
        }
        DeliveryOutcome::Failed { error } => {
            error!("Publishing on '{topic}' failed: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryTransport;
    use async_trait::async_trait;

    fn sample_record() -> TelemetryRecord {
        TelemetryRecord {
            uid: 7,
            game_id: 1000,
            game_type: "Keyhunt".to_string(),
            game_map: "xoylent".to_string(),
            event_time: "20240115_093042_000123".to_string(),
            player: "nitro".to_string(),
            kill_flag: 0,
            weapon: "Crylink".to_string(),
            x_coord: 1,
            y_coord: 2,
            z_coord: 3,
        }
    }

    #[test]
    fn test_topic_path() {
        assert_eq!(topic_path("gaming-demos", "game-events"), "gaming-demos.game-events");
    }

    #[tokio::test]
    async fn test_awaited_record_publish_round_trips() {
        let transport = Arc::new(MemoryTransport::new());
        let publisher = Publisher::new(transport.clone(), "events");

        let record = sample_record();
        let outcome = publisher.publish_awaited(record.clone().into()).await;
        assert!(outcome.is_delivered());

        let published = transport.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "events");
        let decoded: TelemetryRecord = serde_json::from_slice(&published[0].1).unwrap();
        assert_eq!(decoded, record);
    }

    #[tokio::test]
    async fn test_raw_payload_passes_through_unmodified() {
        let transport = Arc::new(MemoryTransport::new());
        let publisher = Publisher::new(transport.clone(), "events");

        let raw = r#"{"eventid":"eventid_123","eventtype":"spawn"}"#.to_string();
        let outcome = publisher.publish_awaited(raw.clone().into()).await;
        assert!(outcome.is_delivered());

        assert_eq!(transport.published()[0].1, raw.as_bytes());
    }

    #[tokio::test]
    async fn test_failed_delivery_resolves_to_failed_outcome() {
        let transport = Arc::new(MemoryTransport::failing());
        let publisher = Publisher::new(transport.clone(), "events");

        let outcome = publisher.publish_awaited(sample_record().into()).await;
        match outcome {
            DeliveryOutcome::Failed {
                error: PublishError::Transport(TransportError::Rejected(_)),
            } => {}
            other => panic!("expected rejected outcome, got {other:?}"),
        }
        assert!(transport.published().is_empty());
    }

    #[tokio::test]
    async fn test_detached_publish_completes_in_background() {
        let transport = Arc::new(MemoryTransport::new());
        let publisher = Publisher::new(transport.clone(), "events");

        for _ in 0..10 {
            publisher.publish_detached(sample_record().into());
        }

        // The completion tasks run on the same runtime; poll until they land.
        for _ in 0..100 {
            if transport.published().len() == 10 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("detached publishes did not complete");
    }

    struct StalledTransport;

    #[async_trait]
    impl TelemetryTransport for StalledTransport {
        async fn deliver(
            &self,
            _topic: &str,
            _payload: Vec<u8>,
        ) -> Result<MessageId, TransportError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_unacknowledged_delivery_times_out() {
        let publisher = Publisher::new(Arc::new(StalledTransport), "events")
            .with_delivery_timeout(Duration::from_millis(50));

        let outcome = publisher.publish_awaited(sample_record().into()).await;
        match outcome {
            DeliveryOutcome::Failed {
                error: PublishError::Transport(TransportError::Timeout(t)),
            } => assert_eq!(t, Duration::from_millis(50)),
            other => panic!("expected timeout outcome, got {other:?}"),
        }
    }
}
