//! Wire-level parsing of trace lines.
//!
//! A trace is line-oriented text, one operation per line:
//! `<opcode> [addressHex]`. The numeric opcode is a wire-format detail and is
//! mapped here to the engine-level [`AccessKind`] or to a dispatcher command;
//! the engine never sees raw opcodes.

use thiserror::Error;

use crate::cache::AccessKind;

/// Numeric opcode of the trace file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// `0` — data read.
    Read,
    /// `1` — data write.
    Write,
    /// `2` — instruction fetch.
    Fetch,
    /// `3` — evict from both caches.
    Evict,
    /// `8` — reset both caches.
    Reset,
    /// `9` — print both caches' contents.
    Print,
}

impl Opcode {
    /// Maps a wire integer to its opcode, if recognized.
    const fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Read),
            1 => Some(Self::Write),
            2 => Some(Self::Fetch),
            3 => Some(Self::Evict),
            8 => Some(Self::Reset),
            9 => Some(Self::Print),
            _ => None,
        }
    }
}

/// One parsed trace command, ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceCommand {
    /// Replay one memory access on the appropriate cache.
    Access {
        /// Read, write, or fetch.
        kind: AccessKind,
        /// Target address.
        addr: u64,
    },
    /// Remove the addressed line from both caches.
    Evict {
        /// Target address.
        addr: u64,
    },
    /// Clear both caches and their counters.
    Reset,
    /// Dump both caches' contents.
    Print,
}

/// Error raised for a reportable (but never fatal) trace line.
///
/// Lines whose opcode token does not parse as an integer are not errors; they
/// are silently skipped by [`parse_line`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// The opcode integer is not part of the trace format.
    #[error("unknown operation: {0}")]
    UnknownOpcode(i64),

    /// The opcode requires an address but the line has none.
    #[error("address missing for operation {opcode}")]
    MissingAddress {
        /// The wire opcode of the offending line.
        opcode: i64,
    },

    /// The address token is not valid hexadecimal.
    #[error("bad address {token:?} for operation {opcode}")]
    BadAddress {
        /// The wire opcode of the offending line.
        opcode: i64,
        /// The rejected token.
        token: String,
    },
}

/// Parses one trace line.
///
/// # Returns
///
/// * `Ok(None)` for blank lines and lines whose opcode token is not an
///   integer — silently skipped.
/// * `Ok(Some(command))` for a well-formed line. Tokens after the parsed
///   fields are ignored.
///
/// # Errors
///
/// Returns a [`TraceError`] for an unrecognized opcode integer or a
/// missing/malformed address. Callers report the error and continue; no trace
/// error is fatal.
pub fn parse_line(line: &str) -> Result<Option<TraceCommand>, TraceError> {
    let mut tokens = line.split_whitespace();
    let Some(op_token) = tokens.next() else {
        return Ok(None);
    };
    let Ok(wire) = op_token.parse::<i64>() else {
        return Ok(None);
    };
    let Some(opcode) = Opcode::from_wire(wire) else {
        return Err(TraceError::UnknownOpcode(wire));
    };

    let command = match opcode {
        Opcode::Read => TraceCommand::Access {
            kind: AccessKind::Read,
            addr: require_addr(&mut tokens, wire)?,
        },
        Opcode::Write => TraceCommand::Access {
            kind: AccessKind::Write,
            addr: require_addr(&mut tokens, wire)?,
        },
        Opcode::Fetch => TraceCommand::Access {
            kind: AccessKind::Fetch,
            addr: require_addr(&mut tokens, wire)?,
        },
        Opcode::Evict => TraceCommand::Evict {
            addr: require_addr(&mut tokens, wire)?,
        },
        Opcode::Reset => TraceCommand::Reset,
        Opcode::Print => TraceCommand::Print,
    };
    Ok(Some(command))
}

/// Pulls the required hexadecimal address token; `0x` prefix optional.
fn require_addr(
    tokens: &mut std::str::SplitWhitespace<'_>,
    opcode: i64,
) -> Result<u64, TraceError> {
    let token = tokens.next().ok_or(TraceError::MissingAddress { opcode })?;
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
        opcode,
        token: token.to_owned(),
    })
}
