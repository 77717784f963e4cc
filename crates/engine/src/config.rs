//! Geometry configuration for the simulated cache hierarchy.
//!
//! This module defines the configuration structures for both L1 caches. It
//! provides:
//! 1. **Defaults:** the production geometry (64-byte lines, 16384-set caches,
//!    2-way instruction / 4-way data) as named constants.
//! 2. **Overrides:** `serde` deserialization with per-field defaults so a
//!    partial JSON file can override only what it names.
//! 3. **Validation:** power-of-two and nonzero checks, reported as typed
//!    errors before any cache is built.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default geometry constants for the simulator.
///
/// These values reproduce the fixed production configuration when nothing is
/// overridden from a configuration file.
mod defaults {
    /// Cache line size in bytes, shared by both L1 caches.
    pub const LINE_BYTES: usize = 64;

    /// Number of sets in the L1 instruction cache.
    pub const L1I_SETS: usize = 16_384;

    /// Associativity of the L1 instruction cache.
    pub const L1I_WAYS: usize = 2;

    /// Number of sets in the L1 data cache.
    pub const L1D_SETS: usize = 16_384;

    /// Associativity of the L1 data cache.
    pub const L1D_WAYS: usize = 4;
}

/// Configuration error raised while loading or validating geometry.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Set count is zero or not a power of two.
    #[error("{cache}: set count must be a nonzero power of two, got {value}")]
    BadSetCount {
        /// Which cache the bad value belongs to (`"l1_i"` or `"l1_d"`).
        cache: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Line size is zero or not a power of two.
    #[error("{cache}: line size must be a nonzero power of two, got {value}")]
    BadLineSize {
        /// Which cache the bad value belongs to.
        cache: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// Associativity is zero.
    #[error("{cache}: associativity must be at least 1")]
    ZeroWays {
        /// Which cache the bad value belongs to.
        cache: &'static str,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`HierarchyConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path of the file.
        path: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },
}

/// Geometry of one cache unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Number of sets (power of two).
    #[serde(default = "CacheConfig::default_sets")]
    pub sets: usize,

    /// Associativity (ways per set).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Line size in bytes (power of two).
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,
}

impl CacheConfig {
    /// Returns the default set count (instruction-cache geometry).
    fn default_sets() -> usize {
        defaults::L1I_SETS
    }

    /// Returns the default associativity (instruction-cache geometry).
    fn default_ways() -> usize {
        defaults::L1I_WAYS
    }

    /// Returns the default line size in bytes.
    fn default_line_bytes() -> usize {
        defaults::LINE_BYTES
    }

    /// Production geometry of the L1 instruction cache.
    pub fn l1_i() -> Self {
        Self {
            sets: defaults::L1I_SETS,
            ways: defaults::L1I_WAYS,
            line_bytes: defaults::LINE_BYTES,
        }
    }

    /// Production geometry of the L1 data cache.
    pub fn l1_d() -> Self {
        Self {
            sets: defaults::L1D_SETS,
            ways: defaults::L1D_WAYS,
            line_bytes: defaults::LINE_BYTES,
        }
    }

    /// Checks the construction invariants for this geometry.
    ///
    /// # Arguments
    ///
    /// * `cache` - Label used in error messages (`"l1_i"` or `"l1_d"`).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the offending field and value.
    pub fn validate(&self, cache: &'static str) -> Result<(), ConfigError> {
        if !self.sets.is_power_of_two() {
            return Err(ConfigError::BadSetCount {
                cache,
                value: self.sets,
            });
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::BadLineSize {
                cache,
                value: self.line_bytes,
            });
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays { cache });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Returns the instruction-cache production geometry.
    fn default() -> Self {
        Self::l1_i()
    }
}

/// Geometry of the split L1 hierarchy.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::HierarchyConfig;
///
/// let config = HierarchyConfig::default();
/// assert_eq!(config.l1_i.ways, 2);
/// assert_eq!(config.l1_d.ways, 4);
///
/// // Overrides may be partial; omitted fields keep their defaults.
/// let json = r#"{ "l1_d": { "sets": 4, "ways": 2 } }"#;
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.l1_d.sets, 4);
/// assert_eq!(config.l1_d.line_bytes, 64);
/// assert_eq!(config.l1_i.sets, 16384);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HierarchyConfig {
    /// L1 instruction cache geometry.
    #[serde(default = "CacheConfig::l1_i")]
    pub l1_i: CacheConfig,

    /// L1 data cache geometry.
    #[serde(default = "CacheConfig::l1_d")]
    pub l1_d: CacheConfig,
}

impl Default for HierarchyConfig {
    /// Returns the production geometry for both caches.
    fn default() -> Self {
        Self {
            l1_i: CacheConfig::l1_i(),
            l1_d: CacheConfig::l1_d(),
        }
    }
}

impl HierarchyConfig {
    /// Loads and validates a geometry override file (JSON).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, is not valid
    /// JSON, or describes an invalid geometry.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the construction invariants for both caches.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered, instruction cache
    /// first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1_i.validate("l1_i")?;
        self.l1_d.validate("l1_d")
    }
}
