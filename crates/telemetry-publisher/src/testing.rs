//! In-memory transport doubles for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::transport::{MessageId, TelemetryTransport, TransportError};

/// Transport stub that records every published payload.
///
/// Optionally fails every delivery, for exercising the failure path of the
/// publisher's completion handling.
#[derive(Default)]
pub struct MemoryTransport {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    fail_all: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every delivery resolves to a failure.
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_all: true,
        }
    }

    /// All `(topic, payload)` pairs delivered so far, in publish order.
    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().expect("transport lock poisoned").clone()
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().expect("transport lock poisoned").len()
    }
}

#[async_trait]
impl TelemetryTransport for MemoryTransport {
    async fn deliver(&self, topic: &str, payload: Vec<u8>) -> Result<MessageId, TransportError> {
        if self.fail_all {
            return Err(TransportError::Rejected(
                "transport configured to fail".to_string(),
            ));
        }

        let mut published = self.published.lock().expect("transport lock poisoned");
        published.push((topic.to_string(), payload));
        Ok(format!("msg-{}", published.len()))
    }
}
