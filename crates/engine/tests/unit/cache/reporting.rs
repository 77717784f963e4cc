//! Content reports and reset completeness.

use pretty_assertions::assert_eq;

use cachesim_core::{AccessKind, CacheStats, LineState};

use super::small_cache;

/// An empty cache reports no sets at all.
#[test]
fn empty_cache_reports_nothing() {
    let cache = small_cache();
    assert!(cache.contents().is_empty());
    assert_eq!(cache.report().to_string(), "");
}

/// Occupied sets render one block each, valid ways only, in way order.
#[test]
fn report_renders_occupied_sets() {
    let mut cache = small_cache();

    let _ = cache.access(0x000, AccessKind::Read); // set 0, tag 0, clean
    let _ = cache.access(0x140, AccessKind::Write); // set 1, tag 1
    let _ = cache.access(0x140, AccessKind::Write); // Modified, dirty

    let expected = "\
Set 0:
  Way 0: [Tag: 0x0, State: V, Dirty: false, Age: 0]
Set 1:
  Way 0: [Tag: 0x1, State: M, Dirty: true, Age: 0]
";
    assert_eq!(cache.report().to_string(), expected);
}

/// The single-letter state labels used by the report.
#[test]
fn state_labels() {
    assert_eq!(LineState::Invalid.to_string(), "I");
    assert_eq!(LineState::Valid.to_string(), "V");
    assert_eq!(LineState::Modified.to_string(), "M");
}

/// After a reset every line is Invalid again and all four counters are zero.
#[test]
fn reset_clears_lines_and_counters() {
    let mut cache = small_cache();

    let _ = cache.access(0x000, AccessKind::Read);
    let _ = cache.access(0x100, AccessKind::Write);
    let _ = cache.access(0x100, AccessKind::Write);
    assert_ne!(cache.stats(), CacheStats::default());

    cache.reset();

    assert!(cache.contents().is_empty(), "no line may stay valid");
    assert_eq!(cache.stats(), CacheStats::default());
    assert!(!cache.contains(0x000));
    assert!(!cache.contains(0x100));
}

/// Reset is unconditional: resetting an empty cache succeeds and changes
/// nothing.
#[test]
fn reset_on_empty_cache() {
    let mut cache = small_cache();
    cache.reset();
    assert!(cache.contents().is_empty());
    assert_eq!(cache.stats(), CacheStats::default());
}
