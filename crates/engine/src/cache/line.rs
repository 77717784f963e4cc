//! Per-line metadata and the derived coherence state.

use std::fmt;

/// Metadata for one way within one set.
///
/// A default line is empty: `valid = false` and every other field zero. The
/// simulator stores no data payload, only this bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CacheLine {
    /// Whether the slot holds live data.
    pub(crate) valid: bool,
    /// Set once the line enters the Modified state.
    pub(crate) dirty: bool,
    /// Upper address bits identifying the resident block.
    pub(crate) tag: u64,
    /// Replacement age; 0 is most recently used.
    pub(crate) age: u64,
    /// Writes observed since the line was last filled.
    pub(crate) write_count: u64,
}

impl CacheLine {
    /// Derives the coherence state from validity and write count.
    ///
    /// Never stored; recomputed on demand for reporting.
    pub(crate) fn state(&self) -> LineState {
        if !self.valid {
            LineState::Invalid
        } else if self.write_count >= 2 {
            LineState::Modified
        } else {
            LineState::Valid
        }
    }
}

/// Simplified coherence state of a line.
///
/// Derived from validity and write count; there is no Shared/Exclusive
/// distinction in this model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// The slot holds no live data.
    Invalid,
    /// Resident and written at most once since fill.
    Valid,
    /// Resident and written at least twice; differs from the backing store.
    Modified,
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Invalid => "I",
            Self::Valid => "V",
            Self::Modified => "M",
        };
        f.write_str(s)
    }
}
