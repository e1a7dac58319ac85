//! Simulator run loop.
//!
//! Single generation task driving a paced loop: sleep, sample one record,
//! log it, hand it to the publisher. In fire-and-forget mode the loop never
//! waits for delivery confirmation — pacing is governed solely by the sleep.
//! The loop stops on cancellation or after an optional event bound;
//! per-record delivery failures are logged and counted, never fatal.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use telemetry_generator::{EventGenerator, PaceConfig};
use telemetry_publisher::{DeliveryMode, Publisher};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Configuration for one simulator run.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorConfig {
    pub pace: PaceConfig,
    pub delivery_mode: DeliveryMode,
    /// Stop after this many events; `None` runs until cancelled.
    pub max_events: Option<u64>,
}

/// Metrics from a simulator run.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Records constructed and handed to the publisher.
    pub events_emitted: u64,
    /// Deliveries acknowledged (awaited mode only).
    pub deliveries_confirmed: u64,
    /// Deliveries that resolved to a failure (awaited mode only).
    pub deliveries_failed: u64,
    /// Cumulative pacing sleep.
    pub total_sleep: Duration,
    /// Wall-clock time for the whole run.
    pub total_duration: Duration,
}

impl RunMetrics {
    pub fn events_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.events_emitted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// The telemetry simulator: a generator, a publisher, and the loop that
/// connects them.
pub struct Simulator {
    generator: EventGenerator,
    publisher: Publisher,
    config: SimulatorConfig,
    cancel: CancellationToken,
    // Pacing draws from its own entropy-seeded RNG so record generation
    // stays seed-deterministic whether or not sleeping is enabled.
    pace_rng: StdRng,
}

impl Simulator {
    pub fn new(generator: EventGenerator, publisher: Publisher, config: SimulatorConfig) -> Self {
        Self {
            generator,
            publisher,
            config,
            cancel: CancellationToken::new(),
            pace_rng: StdRng::from_entropy(),
        }
    }

    /// Token that ends the run at the next iteration boundary (or mid-sleep).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drive the loop until cancellation or the configured event bound.
    pub async fn run(mut self) -> RunMetrics {
        let started = Instant::now();
        let mut metrics = RunMetrics::default();

        info!(
            "Simulator started: topic '{}', {:?} delivery",
            self.publisher.topic(),
            self.config.delivery_mode
        );

        loop {
            if self.cancel.is_cancelled() {
                info!("Shutdown requested, stopping simulator");
                break;
            }
            if let Some(max) = self.config.max_events {
                if metrics.events_emitted >= max {
                    break;
                }
            }

            let delay = self.config.pace.next_delay(&mut self.pace_rng);
            if !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        metrics.total_sleep += delay;
                    }
                    _ = self.cancel.cancelled() => {
                        info!("Shutdown requested, stopping simulator");
                        break;
                    }
                }
            }

            let record = self.generator.next_event();

            // Observability side effect, not part of the data contract.
            match record.to_json_string() {
                Ok(json) => info!("{json}"),
                Err(e) => warn!("Record not loggable as JSON: {e}"),
            }

            metrics.events_emitted += 1;

            match self.config.delivery_mode {
                DeliveryMode::Detached => {
                    self.publisher.publish_detached(record.into());
                }
                DeliveryMode::Awaited => {
                    let outcome = self.publisher.publish_awaited(record.into()).await;
                    if outcome.is_delivered() {
                        metrics.deliveries_confirmed += 1;
                    } else {
                        metrics.deliveries_failed += 1;
                    }
                }
            }
        }

        metrics.total_duration = started.elapsed();

        info!(
            "Simulator finished: {} events in {:?} ({:.2} events/sec, {:?} asleep)",
            metrics.events_emitted,
            metrics.total_duration,
            metrics.events_per_second(),
            metrics.total_sleep,
        );

        metrics
    }
}
