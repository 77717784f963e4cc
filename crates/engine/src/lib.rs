//! Trace-driven set-associative L1 cache hierarchy simulator.
//!
//! This crate models the hit/miss behavior of a split L1 cache (instruction +
//! data) replaying a memory-operation trace. It provides:
//! 1. **Engine:** set-associative lookup, age-counter replacement, a
//!    write-count-driven coherence state machine, and explicit eviction.
//! 2. **Configuration:** geometry defaults with JSON overrides and validation.
//! 3. **Trace format:** wire-level opcode and address parsing.
//! 4. **Reporting:** per-cache access counters, hit ratio, and content dumps.
//!
//! No data payloads are stored; the simulator tracks line metadata only.

/// Cache engine (lines, lookup, replacement, eviction, content reports).
pub mod cache;
/// Geometry configuration (defaults, JSON overrides, validation).
pub mod config;
/// Two-cache simulator façade (routing, eviction broadcast, reset).
pub mod sim;
/// Access counters and hit-ratio reporting.
pub mod stats;
/// Wire-level trace-line parsing.
pub mod trace;

/// Single cache unit; construct with [`Cache::new`] and drive with `access`/`evict`/`reset`.
pub use crate::cache::Cache;
/// Engine-level operation kinds and access results.
pub use crate::cache::{AccessKind, AccessOutcome, LineState, NextLevelRequest, RequestKind};
/// Geometry configuration types; use `HierarchyConfig::default()` for the production geometry.
pub use crate::config::{CacheConfig, ConfigError, HierarchyConfig};
/// Split-L1 simulator; routes parsed trace commands to the right cache.
pub use crate::sim::Simulator;
/// Running counters and derived hit ratio for one cache.
pub use crate::stats::CacheStats;
/// Parsed trace commands and parse errors.
pub use crate::trace::{TraceCommand, TraceError};
