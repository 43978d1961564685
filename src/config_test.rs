use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |var| map.get(var).cloned()
}

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_stage_env() {
    unsafe {
        std::env::remove_var(SNAP_THRESHOLD_VAR);
        std::env::remove_var(SNAP_ENABLED_VAR);
        std::env::remove_var(MOVE_THROTTLE_VAR);
        std::env::remove_var(SANITIZE_ON_LOAD_VAR);
    }
}

#[test]
fn from_env_reads_overrides() {
    unsafe {
        clear_stage_env();
        std::env::set_var(SNAP_THRESHOLD_VAR, "2.5");
        std::env::set_var(SNAP_ENABLED_VAR, "false");
    }

    let cfg = EditorConfig::from_env().unwrap();
    assert_eq!(cfg.snap_threshold, 2.5);
    assert!(!cfg.snap_enabled);
    assert_eq!(cfg.move_throttle_ms, DEFAULT_MOVE_THROTTLE_MS);
    assert!(!cfg.sanitize_on_load);

    unsafe { clear_stage_env() };
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = EditorConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.snap_threshold, 1.5);
    assert!(cfg.snap_enabled);
    assert_eq!(cfg.move_throttle_ms, 16.0);
    assert!(!cfg.sanitize_on_load);
}

#[test]
fn parses_all_overrides() {
    let cfg = EditorConfig::from_lookup(lookup_from(&[
        (SNAP_THRESHOLD_VAR, " 3 "),
        (SNAP_ENABLED_VAR, "off"),
        (MOVE_THROTTLE_VAR, "0"),
        (SANITIZE_ON_LOAD_VAR, "TRUE"),
    ]))
    .unwrap();
    assert_eq!(cfg.snap_threshold, 3.0);
    assert!(!cfg.snap_enabled);
    assert_eq!(cfg.move_throttle_ms, 0.0);
    assert!(cfg.sanitize_on_load);
}

#[test]
fn rejects_non_numeric_threshold() {
    let err = EditorConfig::from_lookup(lookup_from(&[(SNAP_THRESHOLD_VAR, "wide")])).unwrap_err();
    assert_eq!(err, ConfigError::NotANumber { var: SNAP_THRESHOLD_VAR, value: "wide".into() });
}

#[test]
fn rejects_non_finite_threshold() {
    let err = EditorConfig::from_lookup(lookup_from(&[(SNAP_THRESHOLD_VAR, "inf")])).unwrap_err();
    assert!(matches!(err, ConfigError::NotANumber { .. }));
}

#[test]
fn rejects_zero_threshold() {
    let err = EditorConfig::from_lookup(lookup_from(&[(SNAP_THRESHOLD_VAR, "0")])).unwrap_err();
    assert_eq!(err, ConfigError::NotPositive { var: SNAP_THRESHOLD_VAR, value: 0.0 });
}

#[test]
fn rejects_negative_throttle() {
    let err = EditorConfig::from_lookup(lookup_from(&[(MOVE_THROTTLE_VAR, "-4")])).unwrap_err();
    assert_eq!(err, ConfigError::NotPositive { var: MOVE_THROTTLE_VAR, value: -4.0 });
}

#[test]
fn rejects_unrecognized_bool() {
    let err = EditorConfig::from_lookup(lookup_from(&[(SNAP_ENABLED_VAR, "maybe")])).unwrap_err();
    assert_eq!(err, ConfigError::NotABool { var: SNAP_ENABLED_VAR, value: "maybe".into() });
}
