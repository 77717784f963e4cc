//! Cache Engine Unit Tests.
//!
//! All submodules drive a small, deterministic geometry — 4 sets, 2-way,
//! 64-byte lines — unless a test needs more ways. With these parameters:
//!
//! Set index = (addr >> 6) & 3
//! Tag       = addr >> 8
//!
//! so 0x000, 0x100, 0x200, ... all map to set 0 with distinct tags.

use cachesim_core::cache::WayContents;
use cachesim_core::{Cache, CacheConfig};

/// Content reports and reset.
pub mod reporting;

/// A small deterministic test geometry: 4 sets, 2-way, 64-byte lines.
pub fn small_config() -> CacheConfig {
    CacheConfig {
        sets: 4,
        ways: 2,
        line_bytes: 64,
    }
}

/// An empty cache with the [`small_config`] geometry.
pub fn small_cache() -> Cache {
    Cache::new(&small_config())
}

/// Looks up the reported contents of the line holding `tag` in `set`.
pub fn way_for_tag(cache: &Cache, set: usize, tag: u64) -> Option<WayContents> {
    cache
        .contents()
        .into_iter()
        .find(|s| s.index == set)?
        .ways
        .into_iter()
        .find(|w| w.tag == tag)
}
