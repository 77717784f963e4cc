//! Geometry Configuration Unit Tests.
//!
//! Covers the production defaults, invariant validation, and loading of JSON
//! override files (full, partial, and malformed).

use std::fs;

use rstest::rstest;

use cachesim_core::config::{CacheConfig, ConfigError, HierarchyConfig};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

/// The default hierarchy reproduces the production geometry.
#[test]
fn defaults_match_production_geometry() {
    let config = HierarchyConfig::default();

    assert_eq!(config.l1_i.sets, 16_384);
    assert_eq!(config.l1_i.ways, 2);
    assert_eq!(config.l1_i.line_bytes, 64);

    assert_eq!(config.l1_d.sets, 16_384);
    assert_eq!(config.l1_d.ways, 4);
    assert_eq!(config.l1_d.line_bytes, 64);

    assert!(config.validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

/// Zero or non-power-of-two set counts are rejected.
#[rstest]
#[case(0)]
#[case(3)]
#[case(100)]
fn rejects_bad_set_count(#[case] sets: usize) {
    let config = CacheConfig {
        sets,
        ways: 2,
        line_bytes: 64,
    };
    assert!(matches!(
        config.validate("l1_i"),
        Err(ConfigError::BadSetCount { cache: "l1_i", value }) if value == sets
    ));
}

/// Zero or non-power-of-two line sizes are rejected.
#[rstest]
#[case(0)]
#[case(48)]
fn rejects_bad_line_size(#[case] line_bytes: usize) {
    let config = CacheConfig {
        sets: 4,
        ways: 2,
        line_bytes,
    };
    assert!(matches!(
        config.validate("l1_d"),
        Err(ConfigError::BadLineSize { cache: "l1_d", value }) if value == line_bytes
    ));
}

/// Zero associativity is rejected.
#[test]
fn rejects_zero_ways() {
    let config = CacheConfig {
        sets: 4,
        ways: 0,
        line_bytes: 64,
    };
    assert!(matches!(
        config.validate("l1_d"),
        Err(ConfigError::ZeroWays { cache: "l1_d" })
    ));
}

/// A direct-mapped single-set cache is a valid (degenerate) geometry.
#[test]
fn accepts_degenerate_geometry() {
    let config = CacheConfig {
        sets: 1,
        ways: 1,
        line_bytes: 1,
    };
    assert!(config.validate("l1_i").is_ok());
}

// ══════════════════════════════════════════════════════════
// 3. Override files
// ══════════════════════════════════════════════════════════

/// A full override file replaces both geometries.
#[test]
fn loads_full_override_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geometry.json");
    fs::write(
        &path,
        r#"{
            "l1_i": { "sets": 8, "ways": 2, "line_bytes": 32 },
            "l1_d": { "sets": 16, "ways": 4, "line_bytes": 32 }
        }"#,
    )
    .unwrap();

    let config = HierarchyConfig::from_json_file(&path).unwrap();
    assert_eq!(config.l1_i.sets, 8);
    assert_eq!(config.l1_i.line_bytes, 32);
    assert_eq!(config.l1_d.sets, 16);
    assert_eq!(config.l1_d.ways, 4);
}

/// Omitted caches and fields keep their production defaults.
#[test]
fn partial_override_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geometry.json");
    fs::write(&path, r#"{ "l1_d": { "sets": 4, "ways": 2 } }"#).unwrap();

    let config = HierarchyConfig::from_json_file(&path).unwrap();
    assert_eq!(config.l1_d.sets, 4);
    assert_eq!(config.l1_d.ways, 2);
    assert_eq!(config.l1_d.line_bytes, 64);
    assert_eq!(config.l1_i, CacheConfig::l1_i());
}

/// Loading validates: a syntactically fine file with bad geometry fails.
#[test]
fn load_rejects_invalid_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geometry.json");
    fs::write(&path, r#"{ "l1_i": { "sets": 3 } }"#).unwrap();

    assert!(matches!(
        HierarchyConfig::from_json_file(&path),
        Err(ConfigError::BadSetCount { cache: "l1_i", value: 3 })
    ));
}

/// Malformed JSON is a parse error naming the file.
#[test]
fn load_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("geometry.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        HierarchyConfig::from_json_file(&path),
        Err(ConfigError::Parse { .. })
    ));
}

/// A missing file is an I/O error naming the file.
#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    assert!(matches!(
        HierarchyConfig::from_json_file(&path),
        Err(ConfigError::Io { .. })
    ));
}
