//! Game telemetry event data model and wire format.
//!
//! A [`TelemetryRecord`] is the unit of simulated data: one game event with
//! every field present and non-null. Records are serialized as a flat UTF-8
//! JSON object with exact lowercase field names — no envelope, no
//! compression, no schema version tag. The downstream consumer matches on
//! this field set, so the serde names here are the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of game types.
pub const GAME_TYPES: [&str; 5] = [
    "Keyhunt",
    "Deathmatch",
    "Capture The Flag",
    "Team Death Match",
    "Complete This Stage",
];

/// Closed set of game maps.
pub const GAME_MAPS: [&str; 10] = [
    "boil",
    "atelier",
    "implosion",
    "finalrage",
    "afterslime",
    "solarium",
    "xoylent",
    "darkzone",
    "warfare",
    "stormkeep",
];

/// Closed set of weapons.
pub const WEAPONS: [&str; 10] = [
    "Electro",
    "Hagar",
    "Shotgun",
    "Mine Layer",
    "Crylink",
    "Mortar",
    "Blaster",
    "Machine Gun",
    "Devastator",
    "Vortex",
];

/// One simulated game event.
///
/// Constructed fresh per loop iteration, serialized, published, and
/// discarded — never mutated after construction.
///
/// Field ranges:
/// - `uid`: [0, 1_000_000)
/// - `game_id`: [1000, 1050]
/// - `kill_flag`: 0 or 1
/// - `x_coord`, `y_coord`, `z_coord`: [1, 100]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub uid: u64,
    pub game_id: i64,
    pub game_type: String,
    pub game_map: String,
    pub event_time: String,
    pub player: String,
    pub kill_flag: u8,
    pub weapon: String,
    pub x_coord: i64,
    pub y_coord: i64,
    pub z_coord: i64,
}

impl TelemetryRecord {
    /// Serialize to the canonical UTF-8 JSON wire format.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Serialize to a JSON string (log emission).
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Format a timestamp as an ordered, lexically-sortable event time with
/// microsecond precision: `YYYYMMDD_HHMMSS_ffffff`.
pub fn format_event_time(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%d_%H%M%S_%6f").to_string()
}
