//! Split-L1 simulator: owns the instruction and data caches side by side.
//!
//! The two caches share no state; routing is the only logic here. Reads and
//! writes go to the data cache, fetches to the instruction cache, and
//! evictions are broadcast to both.

use crate::cache::{AccessKind, AccessOutcome, Cache};
use crate::config::HierarchyConfig;

/// Top-level simulator: one instruction cache plus one data cache.
#[derive(Debug)]
pub struct Simulator {
    icache: Cache,
    dcache: Cache,
}

impl Simulator {
    /// Creates both caches from the given geometry.
    ///
    /// # Panics
    ///
    /// Panics on invalid geometry; see [`Cache::new`]. Validate file-loaded
    /// configurations first with [`HierarchyConfig::validate`].
    pub fn new(config: &HierarchyConfig) -> Self {
        Self {
            icache: Cache::new(&config.l1_i),
            dcache: Cache::new(&config.l1_d),
        }
    }

    /// Routes one access: fetches to the instruction cache, reads and writes
    /// to the data cache.
    pub fn access(&mut self, kind: AccessKind, addr: u64) -> AccessOutcome {
        match kind {
            AccessKind::Fetch => self.icache.access(addr, kind),
            AccessKind::Read | AccessKind::Write => self.dcache.access(addr, kind),
        }
    }

    /// Evicts the addressed line from both caches.
    pub fn evict(&mut self, addr: u64) {
        let _ = self.dcache.evict(addr);
        let _ = self.icache.evict(addr);
    }

    /// Clears both caches and their counters.
    pub fn reset(&mut self) {
        self.icache.reset();
        self.dcache.reset();
    }

    /// The instruction cache.
    pub fn icache(&self) -> &Cache {
        &self.icache
    }

    /// The data cache.
    pub fn dcache(&self) -> &Cache {
        &self.dcache
    }
}
