//! Seeded record sampling.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use telemetry_events::{format_event_time, TelemetryRecord, GAME_MAPS, GAME_TYPES, WEAPONS};

use crate::naming::{sample_player, PlayerNaming};

/// Generator that produces synthetic telemetry records.
///
/// The generator uses a seeded random number generator so the same seed and
/// naming strategy yield the same record sequence (modulo `event_time`,
/// which is taken from the clock — use [`EventGenerator::next_event_at`]
/// with a fixed instant for fully reproducible records).
pub struct EventGenerator {
    /// Seeded random number generator for reproducibility
    rng: StdRng,
    /// Strategy for the `player` field
    naming: PlayerNaming,
}

impl EventGenerator {
    /// Create a generator with a fixed seed.
    pub fn new(naming: PlayerNaming, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            naming,
        }
    }

    /// Create a generator seeded from system entropy (production runs).
    pub fn from_entropy(naming: PlayerNaming) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            naming,
        }
    }

    /// Sample the next record, stamped with the current UTC time.
    pub fn next_event(&mut self) -> TelemetryRecord {
        self.next_event_at(Utc::now())
    }

    /// Sample the next record with an explicit event-time instant.
    ///
    /// Every field is re-rolled independently per record; duplicates across
    /// records are permitted and expected.
    pub fn next_event_at(&mut self, instant: DateTime<Utc>) -> TelemetryRecord {
        TelemetryRecord {
            uid: self.rng.gen_range(0..1_000_000),
            game_id: self.rng.gen_range(1000..=1050),
            game_type: pick(&mut self.rng, &GAME_TYPES).to_string(),
            game_map: pick(&mut self.rng, &GAME_MAPS).to_string(),
            event_time: format_event_time(instant),
            player: sample_player(self.naming, &mut self.rng),
            kill_flag: self.rng.gen_range(0..=1),
            weapon: pick(&mut self.rng, &WEAPONS).to_string(),
            x_coord: self.rng.gen_range(1..=100),
            y_coord: self.rng.gen_range(1..=100),
            z_coord: self.rng.gen_range(1..=100),
        }
    }
}

/// Uniform pick from a closed label set.
fn pick<'a, R: Rng>(rng: &mut R, set: &[&'a str]) -> &'a str {
    set[rng.gen_range(0..set.len())]
}
