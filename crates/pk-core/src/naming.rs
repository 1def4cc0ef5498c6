//! # NameGenerator
//!
//! Collision-resistant storage filenames for uploaded photos.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random alphanumeric prefix. 62^10 ≈ 8.4 × 10^17
/// (~59.5 bits), which makes a collision inside one album's namespace
/// vanishingly unlikely without being globally guaranteed unique.
pub const PREFIX_LEN: usize = 10;

/// Prefixes the original filename with a random alphanumeric string so
/// two uploads of identically-named files never collide in practice,
/// while the extension hint in the original name stays intact for
/// content-type inference. Seeded from the OS RNG; no I/O.
pub fn storage_file_name(original_file_name: &str) -> String {
    let prefix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PREFIX_LEN)
        .map(char::from)
        .collect();
    format!("{prefix}{original_file_name}")
}
