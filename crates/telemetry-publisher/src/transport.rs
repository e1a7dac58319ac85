//! Transport boundary and the Kafka implementation.

use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Identifier assigned by the transport to a delivered message.
pub type MessageId = String;

/// Errors surfaced by a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    #[error("delivery not acknowledged within {0:?}")]
    Timeout(Duration),

    #[error("transport rejected delivery: {0}")]
    Rejected(String),

    #[error("topic creation failed: {0}")]
    TopicCreation(String),
}

/// Asynchronous message transport.
///
/// The future returned by [`deliver`](TelemetryTransport::deliver) is the
/// delivery handle for one in-flight publish: it resolves to the assigned
/// message id once the transport acknowledges the message, or to the
/// delivery error. Implementations must tolerate concurrent use from the
/// publisher's completion tasks.
#[async_trait]
pub trait TelemetryTransport: Send + Sync {
    async fn deliver(&self, topic: &str, payload: Vec<u8>) -> Result<MessageId, TransportError>;
}

/// Kafka-backed transport over an `rdkafka` future producer.
///
/// The producer is created once per process and shared; batching, retries,
/// and network I/O happen inside the client, behind the delivery future.
pub struct KafkaTransport {
    producer: FutureProducer,
    brokers: String,
    send_timeout: Duration,
}

impl KafkaTransport {
    /// Connect a producer to the given brokers.
    pub fn new(brokers: &str, send_timeout: Duration) -> Result<Self, TransportError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", send_timeout.as_millis().to_string())
            .create()?;

        Ok(Self {
            producer,
            brokers: brokers.to_string(),
            send_timeout,
        })
    }

    /// Create a Kafka topic if it doesn't exist.
    pub async fn create_topic_if_not_exists(
        &self,
        topic: &str,
        partitions: i32,
    ) -> Result<(), TransportError> {
        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .create()?;

        let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
        let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(5)));

        match admin_client.create_topics(&[new_topic], &opts).await {
            Ok(results) => {
                for result in results {
                    match result {
                        Ok(topic_name) => {
                            tracing::info!("Topic '{topic_name}' created successfully");
                        }
                        Err((topic_name, err)) => {
                            if err.to_string().contains("already exists") {
                                tracing::info!("Topic '{topic_name}' already exists");
                            } else {
                                return Err(TransportError::TopicCreation(format!(
                                    "{topic_name}: {err}"
                                )));
                            }
                        }
                    }
                }
            }
            Err(e) => return Err(TransportError::TopicCreation(e.to_string())),
        }

        Ok(())
    }
}

#[async_trait]
impl TelemetryTransport for KafkaTransport {
    async fn deliver(&self, topic: &str, payload: Vec<u8>) -> Result<MessageId, TransportError> {
        let record = FutureRecord::<(), _>::to(topic).payload(&payload);

        let (partition, offset) = self
            .producer
            .send(record, self.send_timeout)
            .await
            .map_err(|(err, _)| TransportError::Kafka(err))?;

        Ok(format!("{partition}@{offset}"))
    }
}
