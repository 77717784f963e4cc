//! Access counters and derived hit ratio for one cache.

use std::fmt;

/// Running counters for one cache unit.
///
/// Reads and fetches share the read counter; hit/miss are counted per access
/// regardless of kind. Explicit evictions and resets touch no counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Read and fetch accesses observed.
    pub reads: u64,
    /// Write accesses observed.
    pub writes: u64,
    /// Accesses that hit a resident line.
    pub hits: u64,
    /// Accesses that missed.
    pub misses: u64,
}

impl CacheStats {
    /// Total accesses (hits plus misses).
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit.
    ///
    /// When no access has occurred this is `0.0 / 0.0`, i.e. NaN, and is
    /// reported as such: "no accesses yet" stays distinguishable from a true
    /// 0% hit ratio.
    pub fn hit_ratio(&self) -> f64 {
        self.hits as f64 / (self.hits + self.misses) as f64
    }
}

impl fmt::Display for CacheStats {
    /// Renders the five-line statistics block.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of cache reads: {}", self.reads)?;
        writeln!(f, "Number of cache writes: {}", self.writes)?;
        writeln!(f, "Number of cache hits: {}", self.hits)?;
        writeln!(f, "Number of cache misses: {}", self.misses)?;
        writeln!(f, "Cache hit ratio: {}", self.hit_ratio())
    }
}
