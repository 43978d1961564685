//! Editor configuration parsed from environment variables.

use crate::consts::{DEFAULT_MOVE_THROTTLE_MS, DEFAULT_SNAP_THRESHOLD};
use crate::error::ConfigError;

pub const SNAP_THRESHOLD_VAR: &str = "STAGE_SNAP_THRESHOLD";
pub const SNAP_ENABLED_VAR: &str = "STAGE_SNAP_ENABLED";
pub const MOVE_THROTTLE_VAR: &str = "STAGE_MOVE_THROTTLE_MS";
pub const SANITIZE_ON_LOAD_VAR: &str = "STAGE_SANITIZE_ON_LOAD";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Snap distance in percent units.
    pub snap_threshold: f64,
    pub snap_enabled: bool,
    /// Minimum spacing between processed move events.
    pub move_throttle_ms: f64,
    /// Clamp out-of-range persisted geometry when a layout is loaded.
    pub sanitize_on_load: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            snap_enabled: true,
            move_throttle_ms: DEFAULT_MOVE_THROTTLE_MS,
            sanitize_on_load: false,
        }
    }
}

impl EditorConfig {
    /// Build typed editor config from environment variables.
    ///
    /// Optional:
    /// - `STAGE_SNAP_THRESHOLD`: percent, default 1.5, must be > 0
    /// - `STAGE_SNAP_ENABLED`: `true` (default) or `false`
    /// - `STAGE_MOVE_THROTTLE_MS`: default 16
    /// - `STAGE_SANITIZE_ON_LOAD`: `false` (default) or `true`
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first variable that fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first variable that fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let snap_threshold = parse_f64(SNAP_THRESHOLD_VAR, lookup(SNAP_THRESHOLD_VAR), defaults.snap_threshold)?;
        if snap_threshold <= 0.0 {
            return Err(ConfigError::NotPositive { var: SNAP_THRESHOLD_VAR, value: snap_threshold });
        }
        let move_throttle_ms = parse_f64(MOVE_THROTTLE_VAR, lookup(MOVE_THROTTLE_VAR), defaults.move_throttle_ms)?;
        if move_throttle_ms < 0.0 {
            return Err(ConfigError::NotPositive { var: MOVE_THROTTLE_VAR, value: move_throttle_ms });
        }
        let snap_enabled = parse_bool(SNAP_ENABLED_VAR, lookup(SNAP_ENABLED_VAR), defaults.snap_enabled)?;
        let sanitize_on_load =
            parse_bool(SANITIZE_ON_LOAD_VAR, lookup(SANITIZE_ON_LOAD_VAR), defaults.sanitize_on_load)?;

        Ok(Self { snap_threshold, snap_enabled, move_throttle_ms, sanitize_on_load })
    }
}

fn parse_f64(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConfigError::NotANumber { var, value: raw }),
    }
}

fn parse_bool(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::NotABool { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
