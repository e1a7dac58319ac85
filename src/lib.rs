//! telemetry-sim library
//!
//! A demonstration telemetry pipeline producer: synthetic game events are
//! generated at randomized intervals and published as JSON to a Kafka topic.
//! The downstream consumer (a stream-processing job) is an external
//! collaborator defined only by the wire format in `telemetry-events`.
//!
//! # CLI Usage
//!
//! ```bash
//! # Continuous simulation, fire-and-forget delivery
//! telemetry-sim run \
//!   --brokers localhost:9092 \
//!   --project-id gaming-demos \
//!   --topic-id game-events \
//!   --create-topic
//!
//! # Bounded, reproducible run with blocking delivery
//! telemetry-sim run \
//!   --brokers localhost:9092 \
//!   --project-id gaming-demos \
//!   --topic-id game-events \
//!   --seed 42 --max-events 100 --no-sleep --delivery-mode awaited
//!
//! # One-shot publish of a raw payload (topic wiring smoke test)
//! telemetry-sim publish \
//!   --brokers localhost:9092 \
//!   --project-id gaming-demos \
//!   --topic-id game-events \
//!   --payload '{"uid":1,"game_id":1000}'
//! ```
//!
//! Broker, project, and topic can also come from the environment
//! (`KAFKA_BROKERS`, `TELEMETRY_PROJECT_ID`, `TELEMETRY_TOPIC_ID`). They
//! have no defaults: a missing value fails at startup, before the loop runs.

use clap::{Parser, ValueEnum};
use std::time::Duration;
use telemetry_generator::{EventGenerator, PaceConfig, PlayerNaming};
use telemetry_publisher::{topic_path, DeliveryMode, KafkaTransport, TransportError};

pub mod sim;

pub use sim::{RunMetrics, Simulator, SimulatorConfig};

/// Destination transport options.
#[derive(Parser, Clone)]
pub struct TransportOpts {
    /// Kafka bootstrap servers
    #[arg(long, env = "KAFKA_BROKERS")]
    pub brokers: String,

    /// Logical project namespace for the destination topic
    #[arg(long, env = "TELEMETRY_PROJECT_ID")]
    pub project_id: String,

    /// Topic id within the project namespace
    #[arg(long, env = "TELEMETRY_TOPIC_ID")]
    pub topic_id: String,

    /// Bound on waiting for a delivery acknowledgment, in seconds
    #[arg(long, default_value = "30")]
    pub delivery_timeout_secs: u64,

    /// Create the destination topic if it doesn't exist
    #[arg(long)]
    pub create_topic: bool,
}

impl TransportOpts {
    /// Fully-qualified destination topic.
    pub fn topic(&self) -> String {
        topic_path(&self.project_id, &self.topic_id)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }

    /// Create the process-wide Kafka producer handle.
    pub fn connect(&self) -> Result<KafkaTransport, TransportError> {
        KafkaTransport::new(&self.brokers, self.delivery_timeout())
    }
}

/// Event generation options.
#[derive(Parser, Clone)]
pub struct GeneratorOpts {
    /// Player naming strategy
    #[arg(long, value_enum, default_value_t = NamingOpt::Roster)]
    pub naming: NamingOpt,

    /// Fixed RNG seed for a reproducible event stream (entropy when absent)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GeneratorOpts {
    pub fn build(&self) -> EventGenerator {
        match self.seed {
            Some(seed) => EventGenerator::new(self.naming.into(), seed),
            None => EventGenerator::from_entropy(self.naming.into()),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamingOpt {
    /// Closed roster of usernames
    Roster,
    /// Fresh pseudo-random username per event
    Generated,
}

impl From<NamingOpt> for PlayerNaming {
    fn from(opt: NamingOpt) -> Self {
        match opt {
            NamingOpt::Roster => PlayerNaming::Roster,
            NamingOpt::Generated => PlayerNaming::Generated,
        }
    }
}

/// Run-loop options.
#[derive(Parser, Clone)]
pub struct RunOpts {
    /// Stop after this many events (unbounded when absent)
    #[arg(long)]
    pub max_events: Option<u64>,

    /// Disable the randomized inter-event sleep
    #[arg(long)]
    pub no_sleep: bool,

    /// Upper bound of the uniform inter-event sleep, in seconds
    #[arg(long, default_value = "2.0")]
    pub max_sleep_secs: f64,

    /// Delivery style
    #[arg(long, value_enum, default_value_t = DeliveryOpt::Detached)]
    pub delivery_mode: DeliveryOpt,
}

impl RunOpts {
    pub fn pace(&self) -> PaceConfig {
        if self.no_sleep {
            PaceConfig::disabled()
        } else {
            PaceConfig::uniform(Duration::from_secs_f64(self.max_sleep_secs))
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryOpt {
    /// Fire-and-forget: don't wait for acknowledgment between events
    Detached,
    /// Block on each delivery before the next event
    Awaited,
}

impl From<DeliveryOpt> for DeliveryMode {
    fn from(opt: DeliveryOpt) -> Self {
        match opt {
            DeliveryOpt::Detached => DeliveryMode::Detached,
            DeliveryOpt::Awaited => DeliveryMode::Awaited,
        }
    }
}
