//! Set-associative cache engine.
//!
//! This module implements one simulated cache unit. It models:
//! 1. **Lookup:** tag match over the ways of the addressed set.
//! 2. **Replacement:** per-line age counters approximating LRU order.
//! 3. **Write state:** a write-count-driven Invalid → Valid → Modified
//!    progression with write-back notifications once a line is Modified.
//! 4. **Eviction:** explicit removal of a tagged line, outside the hit/miss
//!    path and invisible to the counters.
//!
//! The age counters are a deliberate approximation of LRU, not a strict
//! recency queue: ages are relative ordering values, adjusted on every hit,
//! fill, and eviction, and victim selection breaks ties in way order.

/// Address decomposition into tag, set index, and byte offset.
pub mod addr;

mod line;

use std::fmt;

use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::stats::CacheStats;

pub use line::LineState;
use line::CacheLine;

/// Engine-level memory operation kind.
///
/// The trace-file opcodes are a separate, wire-level type; see
/// [`crate::trace`]. Reset and content dumps are dispatcher commands, not
/// cache operations, so they have no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Data-side read.
    Read,
    /// Data-side write.
    Write,
    /// Instruction fetch.
    Fetch,
}

/// What a single [`Cache::access`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Whether the access hit a resident line.
    pub hit: bool,
    /// Request issued to the next memory level, if any.
    ///
    /// At most one request is issued per access: a fill request on every
    /// miss, or a write-back on a write to an already-Modified line.
    pub request: Option<NextLevelRequest>,
}

/// Kind of request issued to the next memory level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Fill request for a read or fetch miss.
    Read,
    /// Fill request for a write miss.
    ReadForOwnership,
    /// Propagation of a write to an already-Modified line.
    WriteBack,
}

/// A notification to the conceptual next memory level.
///
/// The simulator models a single next level; no reply is ever received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextLevelRequest {
    /// What the next level is asked to do.
    pub kind: RequestKind,
    /// The address the request targets.
    pub addr: u64,
}

impl fmt::Display for NextLevelRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            RequestKind::Read => "read",
            RequestKind::ReadForOwnership => "read-for-ownership",
            RequestKind::WriteBack => "write-back",
        };
        write!(f, "{} 0x{:x}", kind, self.addr)
    }
}

/// Contents of one valid way, as reported by [`Cache::contents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WayContents {
    /// Way index within the set.
    pub way: usize,
    /// Resident tag.
    pub tag: u64,
    /// Derived coherence state.
    pub state: LineState,
    /// Dirty flag.
    pub dirty: bool,
    /// Replacement age; 0 is most recently used.
    pub age: u64,
}

/// Contents of one set that holds at least one valid line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetContents {
    /// Index of the set.
    pub index: usize,
    /// Valid ways, in way order.
    pub ways: Vec<WayContents>,
}

/// One simulated set-associative cache unit.
///
/// Geometry is fixed at construction; line storage is a flat array indexed by
/// `set * ways + way` and is never resized. All mutation flows through
/// [`access`](Cache::access), [`evict`](Cache::evict), and
/// [`reset`](Cache::reset).
#[derive(Debug)]
pub struct Cache {
    sets: usize,
    ways: usize,
    line_bytes: usize,
    lines: Vec<CacheLine>,
    stats: CacheStats,
}

impl Cache {
    /// Creates an empty cache with the given geometry.
    ///
    /// # Panics
    ///
    /// Panics if `sets` or `line_bytes` is not a nonzero power of two, or if
    /// `ways` is zero. Bit-mask address decomposition depends on these
    /// invariants; file-loaded configurations are validated upstream by
    /// [`crate::config::HierarchyConfig::validate`].
    pub fn new(config: &CacheConfig) -> Self {
        assert!(
            config.sets.is_power_of_two(),
            "set count must be a nonzero power of two"
        );
        assert!(
            config.line_bytes.is_power_of_two(),
            "line size must be a nonzero power of two"
        );
        assert!(config.ways >= 1, "associativity must be at least 1");

        Self {
            sets: config.sets,
            ways: config.ways,
            line_bytes: config.line_bytes,
            lines: vec![CacheLine::default(); config.sets * config.ways],
            stats: CacheStats::default(),
        }
    }

    /// Number of sets.
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Associativity (ways per set).
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Line size in bytes.
    pub fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Snapshot of the running counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Whether the addressed line is currently resident.
    pub fn contains(&self, addr: u64) -> bool {
        let fields = addr::decompose(addr, self.line_bytes, self.sets);
        let base = fields.set_index * self.ways;
        self.lines[base..base + self.ways]
            .iter()
            .any(|l| l.valid && l.tag == fields.tag)
    }

    /// Performs one read, write, or fetch access.
    ///
    /// Counters are updated before hit/miss is known: reads and fetches
    /// increment the read counter, writes the write counter. On a hit the
    /// matched line becomes most recently used and, for writes, advances the
    /// write-state machine. On a miss a victim way is chosen (first invalid
    /// way, else the oldest), the new line is installed, and a fill request
    /// for the next level is reported in the outcome.
    ///
    /// # Arguments
    ///
    /// * `addr` - The linear byte address being accessed.
    /// * `kind` - Read, write, or fetch.
    ///
    /// # Returns
    ///
    /// The [`AccessOutcome`], carrying the hit flag and at most one
    /// [`NextLevelRequest`].
    pub fn access(&mut self, addr: u64, kind: AccessKind) -> AccessOutcome {
        let fields = addr::decompose(addr, self.line_bytes, self.sets);
        let base = fields.set_index * self.ways;

        match kind {
            AccessKind::Read | AccessKind::Fetch => self.stats.reads += 1,
            AccessKind::Write => self.stats.writes += 1,
        }

        let hit_way = self.lines[base..base + self.ways]
            .iter()
            .position(|l| l.valid && l.tag == fields.tag);

        if let Some(way) = hit_way {
            self.stats.hits += 1;
            self.lines[base + way].age = 0;
            self.age_others(base, way);

            let mut request = None;
            if kind == AccessKind::Write {
                let hit_line = &mut self.lines[base + way];
                hit_line.write_count += 1;
                if hit_line.write_count == 2 {
                    // Second write: the line enters Modified.
                    hit_line.dirty = true;
                } else if hit_line.write_count >= 3 {
                    // Already Modified: every further write is propagated.
                    request = Some(NextLevelRequest {
                        kind: RequestKind::WriteBack,
                        addr,
                    });
                }
            }

            trace!("hit addr={:#x} set={} way={}", addr, fields.set_index, way);
            return AccessOutcome { hit: true, request };
        }

        self.stats.misses += 1;
        let request_kind = match kind {
            AccessKind::Read | AccessKind::Fetch => RequestKind::Read,
            AccessKind::Write => RequestKind::ReadForOwnership,
        };

        let victim = self.victim_way(base);
        self.lines[base + victim] = CacheLine {
            valid: true,
            dirty: false,
            tag: fields.tag,
            age: 0,
            write_count: u64::from(kind == AccessKind::Write),
        };
        self.age_others(base, victim);

        debug!(
            "miss addr={:#x} set={} tag={:#x} victim_way={}",
            addr, fields.set_index, fields.tag, victim
        );
        AccessOutcome {
            hit: false,
            request: Some(NextLevelRequest {
                kind: request_kind,
                addr,
            }),
        }
    }

    /// Removes the addressed line from its set, if resident.
    ///
    /// Distinct from the access path: no counter changes. On a match the line
    /// is cleared to its empty default and every other valid line in the set
    /// whose age was strictly greater than the evicted line's age is aged
    /// down by one, closing the ordering gap. At most one line is evicted per
    /// call; a non-resident address is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a line was evicted.
    pub fn evict(&mut self, addr: u64) -> bool {
        let fields = addr::decompose(addr, self.line_bytes, self.sets);
        let base = fields.set_index * self.ways;

        for way in 0..self.ways {
            let found = &self.lines[base + way];
            if found.valid && found.tag == fields.tag {
                let evicted_age = found.age;
                self.lines[base + way] = CacheLine::default();
                for sibling in &mut self.lines[base..base + self.ways] {
                    if sibling.valid && sibling.age > evicted_age {
                        sibling.age -= 1;
                    }
                }
                debug!("evict addr={:#x} set={} way={}", addr, fields.set_index, way);
                return true;
            }
        }
        false
    }

    /// Clears every line to its empty default and zeroes all counters.
    pub fn reset(&mut self) {
        for cache_line in &mut self.lines {
            *cache_line = CacheLine::default();
        }
        self.stats = CacheStats::default();
        debug!("reset");
    }

    /// Snapshot of every set holding at least one valid line.
    ///
    /// Sets appear in index order; ways within a set in way order. Empty sets
    /// are omitted, matching the content report.
    pub fn contents(&self) -> Vec<SetContents> {
        let mut out = Vec::new();
        for set in 0..self.sets {
            let base = set * self.ways;
            let ways: Vec<WayContents> = self.lines[base..base + self.ways]
                .iter()
                .enumerate()
                .filter(|(_, l)| l.valid)
                .map(|(way, l)| WayContents {
                    way,
                    tag: l.tag,
                    state: l.state(),
                    dirty: l.dirty,
                    age: l.age,
                })
                .collect();
            if !ways.is_empty() {
                out.push(SetContents { index: set, ways });
            }
        }
        out
    }

    /// Displayable content report; renders one block per occupied set.
    pub fn report(&self) -> ContentsReport<'_> {
        ContentsReport { cache: self }
    }

    /// Ages every valid line in the set except `except_way` by one.
    fn age_others(&mut self, base: usize, except_way: usize) {
        for (way, sibling) in self.lines[base..base + self.ways].iter_mut().enumerate() {
            if way != except_way && sibling.valid {
                sibling.age += 1;
            }
        }
    }

    /// Picks the way to replace: the first invalid way, else the valid way
    /// with the strictly largest age (ties keep the first-encountered way).
    fn victim_way(&self, base: usize) -> usize {
        let mut victim = 0;
        let mut max_age = None;
        for way in 0..self.ways {
            let candidate = &self.lines[base + way];
            if !candidate.valid {
                return way;
            }
            if max_age.is_none_or(|m| candidate.age > m) {
                max_age = Some(candidate.age);
                victim = way;
            }
        }
        victim
    }
}

/// Borrowed view of a [`Cache`] that renders the content report.
#[derive(Debug)]
pub struct ContentsReport<'a> {
    cache: &'a Cache,
}

impl fmt::Display for ContentsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for set in self.cache.contents() {
            writeln!(f, "Set {}:", set.index)?;
            for way in &set.ways {
                writeln!(
                    f,
                    "  Way {}: [Tag: {:#x}, State: {}, Dirty: {}, Age: {}]",
                    way.way, way.tag, way.state, way.dirty, way.age
                )?;
            }
        }
        Ok(())
    }
}
