//! Address decomposition into tag, set index, and byte offset.
//!
//! The cache geometry fixes the split: the low `log2(line_bytes)` bits select
//! the byte within a line, the next `log2(sets)` bits select the set, and the
//! remaining high bits form the tag. Both widths rely on the geometry being a
//! power of two, which [`crate::cache::Cache::new`] asserts.

/// Tag and set index extracted from a linear address.
///
/// The byte offset within the line is dropped: the simulator tracks line
/// metadata only, so two addresses in the same line decompose identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressFields {
    /// Index of the set the address maps to.
    pub set_index: usize,
    /// Upper address bits identifying the resident block.
    pub tag: u64,
}

/// Number of address bits consumed by the byte offset within a line.
#[inline]
pub fn offset_bits(line_bytes: usize) -> u32 {
    line_bytes.trailing_zeros()
}

/// Number of address bits consumed by the set index.
#[inline]
pub fn index_bits(sets: usize) -> u32 {
    sets.trailing_zeros()
}

/// Splits `addr` into set index and tag for the given geometry.
///
/// # Arguments
///
/// * `addr` - The linear byte address being accessed.
/// * `line_bytes` - Line size in bytes (power of two).
/// * `sets` - Number of sets (power of two).
///
/// # Returns
///
/// The decomposed [`AddressFields`]. Behavior is undefined for non-power-of-two
/// geometry; callers validate at construction time.
pub fn decompose(addr: u64, line_bytes: usize, sets: usize) -> AddressFields {
    let offset = offset_bits(line_bytes);
    let index = index_bits(sets);
    let set_index = ((addr >> offset) & (sets as u64 - 1)) as usize;
    let tag = addr >> (offset + index);
    AddressFields { set_index, tag }
}
