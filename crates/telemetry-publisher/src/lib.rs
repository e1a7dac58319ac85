//! Publish adapter for telemetry records.
//!
//! This crate bridges a structured [`TelemetryRecord`](telemetry_events::TelemetryRecord)
//! to an asynchronous message transport. The [`TelemetryTransport`] trait is
//! the swappable boundary: the future returned by its `deliver` method is
//! the delivery handle for one in-flight publish. [`Publisher`] layers the
//! caller-facing delivery styles on top of it:
//!
//! - `publish_detached` — fire-and-forget; a spawned completion task drains
//!   the delivery handle and logs the outcome, never blocking the caller.
//! - `publish_awaited` — blocks on the delivery handle and returns the
//!   [`DeliveryOutcome`].
//!
//! [`KafkaTransport`] is the production implementation; the [`testing`]
//! module provides an in-memory double that records every published payload.

pub mod publisher;
pub mod testing;
pub mod transport;

// Re-exports for convenience
pub use publisher::{
    topic_path, DeliveryMode, DeliveryOutcome, Payload, PublishError, Publisher,
    DEFAULT_DELIVERY_TIMEOUT,
};
pub use transport::{KafkaTransport, MessageId, TelemetryTransport, TransportError};
