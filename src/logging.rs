//! `tracing` subscriber setup for host applications and tests.
//!
//! The library itself only emits events; installing a subscriber is the
//! host's call.

use tracing::Level;

pub type InitError = Box<dyn std::error::Error + Send + Sync>;

/// Install the default `fmt` subscriber (INFO and above) as the global default.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init() -> Result<(), InitError> {
    init_with_level(Level::INFO)
}

/// Install an `fmt` subscriber that records events at `level` and above.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_with_level(level: Level) -> Result<(), InitError> {
    tracing_subscriber::fmt().with_max_level(level).with_target(false).try_init()
}
