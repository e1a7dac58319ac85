//! Synthetic game-event generation.
//!
//! This crate provides the [`EventGenerator`] which samples
//! [`TelemetryRecord`](telemetry_events::TelemetryRecord)s field by field:
//! uniform discrete selection over each closed label set and uniform integer
//! sampling over each numeric range. The generator uses a seeded RNG so the
//! same seed produces the same record sequence, which keeps unit tests
//! deterministic despite the random sampling.
//!
//! Pacing between records is a separate concern, modeled by [`PaceConfig`]:
//! an optional inter-record delay drawn from a uniform continuous
//! distribution, which approximates bursty client arrival rather than
//! fixed-interval ticking.

pub mod generator;
pub mod naming;
pub mod pace;

// Re-exports for convenience
pub use generator::EventGenerator;
pub use naming::{PlayerNaming, PLAYER_ROSTER};
pub use pace::PaceConfig;
