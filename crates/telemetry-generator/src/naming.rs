//! Player naming strategies.
//!
//! Two interchangeable strategies coexist: drawing from a fixed roster of
//! usernames, or generating a fresh pseudo-random username per record.

use rand::Rng;

/// Closed set of roster usernames.
pub const PLAYER_ROSTER: [&str; 12] = [
    "player1001",
    "player1002",
    "player1003",
    "player1004",
    "nitro",
    "quickfuse",
    "shardik",
    "overclock",
    "mirv",
    "lowping",
    "wallhugger",
    "respawnlord",
];

const ADJECTIVES: [&str; 16] = [
    "Silly", "Rapid", "Grumpy", "Sneaky", "Blazing", "Frozen", "Rusty", "Shiny", "Feral",
    "Quiet", "Jumpy", "Cosmic", "Salty", "Turbo", "Lucky", "Gloomy",
];

const NOUNS: [&str; 16] = [
    "Goose", "Badger", "Rocket", "Wombat", "Falcon", "Mole", "Viper", "Yeti", "Walrus",
    "Piranha", "Comet", "Gopher", "Llama", "Mantis", "Otter", "Drone",
];

/// How the `player` field of a record is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerNaming {
    /// Uniform pick from the closed [`PLAYER_ROSTER`] set.
    Roster,
    /// Freshly generated pseudo-random username per record.
    Generated,
}

/// Sample a player name under the given strategy.
pub fn sample_player<R: Rng>(naming: PlayerNaming, rng: &mut R) -> String {
    match naming {
        PlayerNaming::Roster => PLAYER_ROSTER[rng.gen_range(0..PLAYER_ROSTER.len())].to_string(),
        PlayerNaming::Generated => generate_username(rng),
    }
}

/// Generate a username of the form `AdjectiveNounNN`.
fn generate_username<R: Rng>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let digits: u8 = rng.gen_range(0..100);
    format!("{adjective}{noun}{digits:02}")
}
